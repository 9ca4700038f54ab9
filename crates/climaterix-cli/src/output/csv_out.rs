use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. Envelopes emit a two-column field/value
/// record; a result carrying a series emits the series rows instead, since
/// that is what spreadsheets want from a sweep or cash-flow run.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            match result {
                Value::Object(result_map) => {
                    if let Some(Value::Array(series)) = result_map
                        .get("points")
                        .or_else(|| result_map.get("cashflow_series"))
                    {
                        write_rows(&mut writer, series);
                    } else {
                        let _ = writer.write_record(["field", "value"]);
                        for (key, val) in result_map {
                            let _ = writer.write_record([key.as_str(), &render(val)]);
                        }
                    }
                }
                Value::Array(rows) => write_rows(&mut writer, rows),
                other => {
                    let _ = writer.write_record([&render(other)]);
                }
            }
        }
        Value::Array(rows) => write_rows(&mut writer, rows),
        other => {
            let _ = writer.write_record([&render(other)]);
        }
    }

    let _ = writer.flush();
}

fn write_rows(writer: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = writer.write_record(&headers);
        for row in rows {
            if let Value::Object(map) = row {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(render).unwrap_or_default())
                    .collect();
                let _ = writer.write_record(&record);
            }
        }
    } else {
        for row in rows {
            let _ = writer.write_record([&render(row)]);
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
