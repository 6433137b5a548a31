//! Record identities.

use std::fmt;

/// Opaque identity of a catalog record.
///
/// Vendor payloads carry ids as JSON numbers or as strings, and frequently
/// mix the two within one response (`"id": 12` next to `"parent_id": "3"`).
/// Strings holding a canonical decimal integer are therefore normalized to
/// [`RecordId::Int`] on construction, so `RecordId::from("12") ==
/// RecordId::from(12)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawRecordId"))]
pub enum RecordId {
    /// Integer identity.
    Int(i64),
    /// String identity (slugs, UUIDs, vendor codes).
    Str(String),
}

impl RecordId {
    /// Returns true if this id is the "no parent" marker.
    ///
    /// `0`, `""` and `"0"` all mark a root record when used as a parent
    /// reference.
    pub fn is_root_sentinel(&self) -> bool {
        match self {
            RecordId::Int(n) => *n == 0,
            RecordId::Str(s) => s.is_empty() || s == "0",
        }
    }

    /// Returns the integer value, if this is an integer id.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordId::Int(n) => Some(*n),
            RecordId::Str(_) => None,
        }
    }

    /// Returns the string value, if this is a string id.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordId::Int(_) => None,
            RecordId::Str(s) => Some(s),
        }
    }

    fn from_text(text: &str) -> Self {
        match canonical_int(text) {
            Some(n) => RecordId::Int(n),
            None => RecordId::Str(text.to_string()),
        }
    }
}

/// Parses `text` as an integer only if formatting it back yields `text`
/// unchanged (no sign prefix, no leading zeros, no whitespace).
fn canonical_int(text: &str) -> Option<i64> {
    let n: i64 = text.parse().ok()?;
    (n.to_string() == text).then_some(n)
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Str(value.to_string()),
        }
    }
}

impl From<usize> for RecordId {
    fn from(value: usize) -> Self {
        RecordId::from(value as u64)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::from_text(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        match canonical_int(&value) {
            Some(n) => RecordId::Int(n),
            None => RecordId::Str(value),
        }
    }
}

impl From<&String> for RecordId {
    fn from(value: &String) -> Self {
        RecordId::from_text(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordId::Int(n) => serializer.serialize_i64(*n),
            RecordId::Str(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Int(i64),
    Big(u64),
    Str(String),
}

#[cfg(feature = "serde")]
impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Int(n) => RecordId::Int(n),
            RawRecordId::Big(n) => RecordId::from(n),
            RawRecordId::Str(s) => RecordId::from(s),
        }
    }
}
