use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Simulation output emits one row per accepted sample; indicator output
/// emits one row per observation; anything else degrades to field/value
/// pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value.as_object().and_then(|m| m.get("result"));
    match result {
        Some(res) if res.get("samples").is_some() => write_samples_csv(&mut wtr, res),
        Some(res) if res.get("values").is_some() => write_series_csv(&mut wtr, res),
        Some(Value::Object(map)) => write_fields_csv(&mut wtr, map),
        _ => {
            if let Value::Object(map) = value {
                write_fields_csv(&mut wtr, map);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_samples_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, result: &Value) {
    let tickers: Vec<String> = result["tickers"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let mut header: Vec<String> = tickers.iter().map(|t| format!("weight_{}", t)).collect();
    header.extend([
        "expected_return".into(),
        "net_return".into(),
        "volatility".into(),
        "sharpe".into(),
    ]);
    let _ = wtr.write_record(&header);

    if let Some(samples) = result["samples"].as_array() {
        for sample in samples {
            let mut row: Vec<String> = sample["weights"]
                .as_array()
                .map(|ws| ws.iter().map(format_csv_value).collect())
                .unwrap_or_default();
            row.push(format_csv_value(&sample["expected_return"]));
            row.push(format_csv_value(&sample["net_return"]));
            row.push(format_csv_value(&sample["volatility"]));
            row.push(format_csv_value(&sample["sharpe"]));
            let _ = wtr.write_record(&row);
        }
    }
}

fn write_series_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, result: &Value) {
    let _ = wtr.write_record(["index", "value"]);
    if let Some(values) = result["values"].as_array() {
        for (i, v) in values.iter().enumerate() {
            let _ = wtr.write_record([i.to_string(), format_csv_value(v)]);
        }
    }
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
