use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Series fields that render better as their own sub-table than as an
/// inlined JSON string in the scalar summary.
const SERIES_FIELDS: [&str; 4] = ["cashflow_series", "points", "cost_effectiveness", "stages"];

/// Format output as tables using the tabled crate. The computation envelope
/// gets a scalar summary table plus one sub-table per embedded series.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_envelope(result, map);
            } else {
                print_scalar_table(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(result_map) = result {
        // Scalars first.
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in result_map {
            if SERIES_FIELDS.contains(&key.as_str()) {
                continue;
            }
            builder.push_record([key.as_str(), &render_value(val)]);
        }
        println!("{}", Table::from(builder));

        // Then each series as its own table.
        for field in SERIES_FIELDS {
            if let Some(Value::Array(rows)) = result_map.get(field) {
                if !rows.is_empty() {
                    println!("\n{field}:");
                    print_array_table(rows);
                }
            }
        }
    } else {
        print_scalar_table(&Value::Object(envelope.clone()));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(text) = warning {
                    println!("  - {}", text);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_scalar_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &render_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);
        for row in arr {
            if let Value::Object(map) = row {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                    .collect();
                builder.push_record(cells);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", render_value(item));
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(render_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
