//! Tagged field values.

use std::collections::BTreeMap;
use std::fmt;

use crate::id::RecordId;
use crate::path::PathSegment;

/// The kind of a [`FieldValue`], used in type mismatch reporting and for
/// ordering values of different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool,
    /// Integer or floating point number.
    Number,
    /// UTF-8 string.
    String,
    /// Ordered list of values.
    List,
    /// Nested string-keyed map.
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// A value stored in a record's open field map.
///
/// Accessors (`as_str`, `as_f64`, ...) never coerce between kinds: asking a
/// string for its number returns `None` even if it looks numeric.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// Explicit null, also the value of an absent field when one is needed.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// List of values.
    List(Vec<FieldValue>),
    /// Nested map of values.
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Builds a [`FieldValue::Map`] from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        FieldValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a [`FieldValue::List`] from anything convertible to values.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<FieldValue>,
        I: IntoIterator<Item = V>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Null => ValueKind::Null,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Int(_) | FieldValue::Float(_) => ValueKind::Number,
            FieldValue::String(_) => ValueKind::String,
            FieldValue::List(_) => ValueKind::List,
            FieldValue::Map(_) => ValueKind::Map,
        }
    }

    /// Returns true for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64`, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested map, if this is a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Follows path segments into nested maps and lists.
    ///
    /// An empty segment slice returns `self`. Key segments only descend
    /// into maps, index segments only into lists.
    pub fn get_path(&self, segments: &[PathSegment]) -> Option<&FieldValue> {
        let mut current = self;
        for segment in segments {
            current = match (segment, current) {
                (PathSegment::Key(key), FieldValue::Map(map)) => map.get(key)?,
                (PathSegment::Index(idx), FieldValue::List(items)) => items.get(*idx)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => (*a as f64) == *b && b.fract() == 0.0,
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_nested(f, item)?;
                }
                f.write_str("]")
            }
            FieldValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: ", key)?;
                    write_nested(f, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

// Strings nested in lists and maps are quoted so `["a, b"]` stays readable.
fn write_nested(f: &mut fmt::Formatter<'_>, value: &FieldValue) -> fmt::Result {
    match value {
        FieldValue::String(s) => write!(f, "{:?}", s),
        other => write!(f, "{}", other),
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::List(value)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(value: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<&RecordId> for FieldValue {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Int(n) => FieldValue::Int(*n),
            RecordId::Str(s) => FieldValue::String(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(FieldValue::from(1).kind(), ValueKind::Number);
        assert_eq!(FieldValue::from(1.5).kind(), ValueKind::Number);
        assert_eq!(FieldValue::from("a").kind(), ValueKind::String);
        assert_eq!(FieldValue::Null.kind(), ValueKind::Null);
        assert_eq!(FieldValue::list([1, 2]).kind(), ValueKind::List);
    }

    #[test]
    fn test_accessors_do_not_coerce() {
        let text = FieldValue::from("10");
        assert_eq!(text.as_f64(), None);
        assert_eq!(text.as_str(), Some("10"));

        let number = FieldValue::from(10);
        assert_eq!(number.as_str(), None);
        assert_eq!(number.as_f64(), Some(10.0));
        assert_eq!(number.as_i64(), Some(10));
        assert_eq!(FieldValue::from(10.0).as_i64(), None);
    }

    #[test]
    fn test_int_float_equality() {
        assert_eq!(FieldValue::Int(10), FieldValue::Float(10.0));
        assert_eq!(FieldValue::Float(10.0), FieldValue::Int(10));
        assert_ne!(FieldValue::Int(10), FieldValue::Float(10.5));
        assert_ne!(FieldValue::Int(10), FieldValue::from("10"));
    }

    #[test]
    fn test_get_path() {
        let value = FieldValue::map([
            (
                "images",
                FieldValue::List(vec![FieldValue::map([("url", FieldValue::from("a.png"))])]),
            ),
            ("color", FieldValue::from("red")),
        ]);

        let path = [
            PathSegment::Key("images".to_string()),
            PathSegment::Index(0),
            PathSegment::Key("url".to_string()),
        ];
        assert_eq!(value.get_path(&path).and_then(FieldValue::as_str), Some("a.png"));

        let wrong = [PathSegment::Index(0)];
        assert!(value.get_path(&wrong).is_none());
        assert_eq!(value.get_path(&[]), Some(&value));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from(3).to_string(), "3");
        assert_eq!(FieldValue::from(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::from("x").to_string(), "x");
        assert_eq!(FieldValue::list(["a", "b"]).to_string(), "[\"a\", \"b\"]");
        assert_eq!(
            FieldValue::map([("k", FieldValue::from(1))]).to_string(),
            "{\"k\": 1}"
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Number.to_string(), "number");
        assert_eq!(ValueKind::Map.to_string(), "map");
    }
}
