pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input either from a `--input` file or from piped stdin.
pub fn load<T: DeserializeOwned>(
    input_path: &Option<String>,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return file::read_json(path);
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }
    Err("Provide --input <file.json> or pipe JSON via stdin".into())
}
