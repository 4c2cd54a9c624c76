use serde_json::Value;

/// Print just the key answer value from the output.
///
/// For a simulation, that is the max-Sharpe portfolio (falling back to
/// min-variance when no Sharpe is defined); otherwise a priority list of
/// well-known result fields, then the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Simulation output: the headline portfolio
    if result_obj.get("samples").is_some() {
        let headline = match result_obj.get("max_sharpe") {
            Some(p) if !p.is_null() => Some(p),
            _ => result_obj.get("min_variance"),
        };
        if let Some(p) = headline {
            println!("{}", serde_json::to_string(p).unwrap_or_default());
            return;
        }
    }

    let priority_keys = [
        "sharpe",
        "annualized_volatility",
        "var_parametric",
        "max_drawdown",
        "values",
        "macd",
        "adx",
        "assets",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
