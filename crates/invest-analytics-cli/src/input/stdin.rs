use serde_json::Value;
use std::io::{self, Read};

/// Read piped JSON from stdin, if any.
///
/// Interactive sessions (stdin is a TTY) and empty pipes both yield
/// `None`, letting the caller fall back to its usage error instead of
/// blocking on a read.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| format!("Invalid JSON on stdin: {}", e))?;
    Ok(Some(value))
}
