pub mod grades;
pub mod students;
pub mod subjects;

use serde_json::Value;

pub(crate) fn param_str(params: &Value, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Accept both JSON numbers and numeric strings; form values arrive as
/// strings from `<select>`/`<input>` fields.
pub(crate) fn param_i64(params: &Value, key: &str) -> Option<i64> {
    let v = params.get(key)?;
    v.as_i64().or_else(|| v.as_str()?.trim().parse().ok())
}

pub(crate) fn param_f64(params: &Value, key: &str) -> Option<f64> {
    let v = params.get(key)?;
    v.as_f64().or_else(|| v.as_str()?.trim().parse().ok())
}
