//! Record sets and the text forms a record value takes in the widget.

use serde_json::{Number, Value};

/// One candidate record: an arbitrary JSON value, read through [`FieldPath`]s.
///
/// [`FieldPath`]: crate::path::FieldPath
pub type Record = Value;

/// Ordered set of records loaded from one `(source, key)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Extract the array stored under `key` in a response body.
    ///
    /// Any other shape (body not an object, key absent, value not an array)
    /// yields an empty set.
    pub fn from_response(body: Value, key: &str) -> Self {
        match body {
            Value::Object(mut map) => match map.remove(key) {
                Some(Value::Array(records)) => Self { records },
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Text a value is matched against when filtering.
///
/// `null` never matches, so it has no match text.
pub fn match_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(coerce(other)),
    }
}

/// Text written into an input when a record is committed.
pub fn fill_text(value: &Value) -> String {
    coerce(value)
}

/// Text shown for a value in a popup row.
///
/// Booleans and `null` render empty; containers render as compact JSON.
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(v @ (Value::Array(_) | Value::Object(_))) => v.to_string(),
        Some(Value::Bool(_) | Value::Null) | None => String::new(),
    }
}

/// String coercion as a text input sees it.
fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest decimal form; integral floats drop their fraction (`10.0` is `10`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => {
            if f == 0.0 {
                "0".to_string()
            } else {
                f.to_string()
            }
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_array_under_key() {
        let set = RecordSet::from_response(json!({"users": [{"name": "Ann"}, {"name": "Bo"}]}), "users");
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1), Some(&json!({"name": "Bo"})));
    }

    #[test]
    fn wrong_shapes_yield_empty_set() {
        assert!(RecordSet::from_response(json!({"users": {"name": "Ann"}}), "users").is_empty());
        assert!(RecordSet::from_response(json!({"people": []}), "users").is_empty());
        assert!(RecordSet::from_response(json!([{"name": "Ann"}]), "users").is_empty());
        assert!(RecordSet::from_response(Value::Null, "users").is_empty());
    }

    #[test]
    fn match_text_coerces_scalars_and_containers() {
        assert_eq!(match_text(&json!("Ann")).as_deref(), Some("Ann"));
        assert_eq!(match_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(match_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(match_text(&json!(["a", 1, null])).as_deref(), Some("a,1,"));
        assert_eq!(match_text(&json!({"x": 1})).as_deref(), Some("[object Object]"));
        assert_eq!(match_text(&Value::Null), None);
    }

    #[test]
    fn integral_floats_print_without_fraction() {
        assert_eq!(match_text(&json!(10.0)).as_deref(), Some("10"));
        assert_eq!(fill_text(&json!(-0.0)), "0");
        assert_eq!(display_text(Some(&json!(2.50))), "2.5");
        assert_eq!(fill_text(&json!(u64::MAX)), "18446744073709551615");
        assert!(crate::filter::filter_indices(
            &RecordSet::new(vec![json!({"qty": 10.0})]),
            &"qty".into(),
            "10.0",
        )
        .is_empty());
    }

    #[test]
    fn null_fills_as_empty_text() {
        assert_eq!(fill_text(&Value::Null), "");
        assert_eq!(fill_text(&json!(3.5)), "3.5");
    }

    #[test]
    fn display_text_hides_booleans_and_nulls() {
        assert_eq!(display_text(Some(&json!(true))), "");
        assert_eq!(display_text(Some(&Value::Null)), "");
        assert_eq!(display_text(None), "");
        assert_eq!(display_text(Some(&json!("Rome"))), "Rome");
        assert_eq!(display_text(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }
}
