use serde_json::Value;

/// Print just the headline answer from the output.
///
/// Heuristic: well-known result fields in priority order, then the first
/// field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "npv",
        "total_impact",
        "total_annual_savings",
        "total_reduction",
        "total_investment",
        "base_npv",
        "simple_payback",
        "break_even_year",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", render(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, render(val));
            return;
        }
    }

    println!("{}", render(result_obj));
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
