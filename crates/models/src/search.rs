/// Text a list screen's free-text search looks at for one record.
pub trait Searchable {
    fn search_fields(&self) -> Vec<String>;
}

/// Collect every scalar value of a JSON document as text, recursing into
/// nested objects and arrays.
pub fn json_values_as_text(value: &serde_json::Value) -> Vec<String> {
    let mut out = Vec::new();
    collect(value, &mut out);
    out
}

fn collect(value: &serde_json::Value, out: &mut Vec<String>) {
    use serde_json::Value;
    match value {
        Value::Null => {}
        Value::String(s) => out.push(s.clone()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect(v, out)),
    }
}

impl Searchable for serde_json::Value {
    fn search_fields(&self) -> Vec<String> { json_values_as_text(self) }
}
