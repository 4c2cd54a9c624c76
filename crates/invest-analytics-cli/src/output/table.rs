use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Simulation output gets a dedicated layout: one table for the
/// distinguished portfolios and one field/value table for the counters.
/// Everything else falls back to a generic field/value rendering of the
/// result envelope.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    let result = envelope.and_then(|m| m.get("result"));

    match result {
        Some(res) if is_simulation_result(res) => print_simulation(res),
        Some(Value::Object(map)) => print_field_table(map),
        Some(other) => println!("{}", other),
        None => {
            if let Value::Object(map) = value {
                print_field_table(map);
            } else {
                println!("{}", value);
            }
        }
    }

    if let Some(env) = envelope {
        print_envelope_footer(env);
    }
}

fn is_simulation_result(result: &Value) -> bool {
    result.get("samples").is_some() && result.get("min_variance").is_some()
}

fn print_simulation(result: &Value) {
    let tickers: Vec<String> = result["tickers"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let mut builder = Builder::default();
    let mut header = vec!["Portfolio".to_string()];
    header.extend(tickers.iter().cloned());
    header.extend(["Return".into(), "Volatility".into(), "Sharpe".into()]);
    builder.push_record(header);

    let rows = [
        ("Max Sharpe", result.get("max_sharpe")),
        ("Min Variance", result.get("min_variance")),
        ("Max Return", result.get("max_return")),
    ];
    for (label, portfolio) in rows {
        if let Some(p) = portfolio.filter(|p| !p.is_null()) {
            builder.push_record(portfolio_row(label, p, tickers.len()));
        }
    }
    println!("{}", Table::from(builder));

    let mut counters = Builder::default();
    counters.push_record(["Field", "Value"]);
    for key in ["samples_requested", "samples_accepted"] {
        if let Some(v) = result.get(key) {
            counters.push_record([key, &v.to_string()]);
        }
    }
    if let Some(frontier) = result["frontier"].as_array() {
        counters.push_record(["frontier_size", &frontier.len().to_string()]);
    }
    println!("\n{}", Table::from(counters));
}

fn portfolio_row(label: &str, portfolio: &Value, n_assets: usize) -> Vec<String> {
    let mut row = vec![label.to_string()];
    let weights = portfolio["weights"].as_array();
    for i in 0..n_assets {
        let w = weights
            .and_then(|ws| ws.get(i))
            .and_then(Value::as_f64)
            .map(|w| format!("{:.4}", w))
            .unwrap_or_default();
        row.push(w);
    }
    row.push(format_number(&portfolio["net_return"]));
    row.push(format_number(&portfolio["volatility"]));
    row.push(format_number(&portfolio["sharpe"]));
    row
}

fn print_field_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_footer(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn format_number(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => format!("{:.4}", n),
        None => "-".to_string(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() > 8 {
                format!("[{} values]", arr.len())
            } else {
                let items: Vec<String> = arr.iter().map(format_value).collect();
                items.join(", ")
            }
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
