//! Dotted field paths into JSON records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A dot-separated address into a record, e.g. `address.city`.
///
/// Resolution is safe-navigation: any missing key or non-container
/// intermediate yields `None` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// Final segment of the path, used as the label of a displayed field.
    pub fn leaf(&self) -> &str {
        self.raw.rsplit('.').next().unwrap_or_default()
    }

    /// Walk the record along this path.
    ///
    /// Object members are looked up by key. A segment that parses as an
    /// unsigned integer also indexes into arrays.
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        if self.raw.is_empty() {
            return None;
        }
        self.segments().try_fold(record, |acc, segment| match acc {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_object_members() {
        let record = json!({"address": {"city": "Rome"}});
        let path = FieldPath::from("address.city");
        assert_eq!(path.resolve(&record), Some(&json!("Rome")));
    }

    #[test]
    fn missing_intermediate_is_absent() {
        let record = json!({"name": "Ann"});
        assert_eq!(FieldPath::from("address.city").resolve(&record), None);
        assert_eq!(FieldPath::from("name.first").resolve(&record), None);
    }

    #[test]
    fn numeric_segment_indexes_arrays() {
        let record = json!({"phones": ["111", "222"]});
        assert_eq!(
            FieldPath::from("phones.1").resolve(&record),
            Some(&json!("222"))
        );
        assert_eq!(FieldPath::from("phones.9").resolve(&record), None);
        assert_eq!(FieldPath::from("phones.x").resolve(&record), None);
    }

    #[test]
    fn empty_path_resolves_nothing() {
        let record = json!({"": "hidden"});
        assert_eq!(FieldPath::default().resolve(&record), None);
    }

    #[test]
    fn leaf_is_last_segment() {
        assert_eq!(FieldPath::from("address.city").leaf(), "city");
        assert_eq!(FieldPath::from("name").leaf(), "name");
    }

    #[test]
    fn null_member_resolves_to_null() {
        let record = json!({"email": null});
        assert_eq!(FieldPath::from("email").resolve(&record), Some(&Value::Null));
    }
}
