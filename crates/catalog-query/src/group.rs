//! Grouping, counting and de-duplication by field value.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;

use catalog_record::{CatalogRecord, FieldPath, FieldValue};

/// Hashable bit pattern of a non-integral float.
///
/// Zeroes never reach this type (they are integral); NaNs compare by bits.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    /// The wrapped float.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl std::hash::Hash for FloatKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Hashable form of a [`FieldValue`] used as a group key.
///
/// Integral floats normalize to [`GroupKey::Int`], so `10` and `10.0` land in
/// the same group; `"10"` stays a string and never does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Missing or null field.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integral number.
    Int(i64),
    /// Non-integral number.
    Float(FloatKey),
    /// String value.
    String(String),
    /// List of keys.
    List(Vec<GroupKey>),
    /// Map entries in key order.
    Map(Vec<(String, GroupKey)>),
}

impl GroupKey {
    /// Converts a field value into its group key.
    pub fn from_value(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => GroupKey::Null,
            FieldValue::Bool(b) => GroupKey::Bool(*b),
            FieldValue::Int(i) => GroupKey::Int(*i),
            FieldValue::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    GroupKey::Int(*f as i64)
                } else {
                    GroupKey::Float(FloatKey(*f))
                }
            }
            FieldValue::String(s) => GroupKey::String(s.clone()),
            FieldValue::List(items) => GroupKey::List(items.iter().map(Self::from_value).collect()),
            FieldValue::Map(map) => GroupKey::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    /// Converts the key back into a field value.
    pub fn to_value(&self) -> FieldValue {
        match self {
            GroupKey::Null => FieldValue::Null,
            GroupKey::Bool(b) => FieldValue::Bool(*b),
            GroupKey::Int(i) => FieldValue::Int(*i),
            GroupKey::Float(f) => FieldValue::Float(f.get()),
            GroupKey::String(s) => FieldValue::String(s.clone()),
            GroupKey::List(items) => FieldValue::List(items.iter().map(Self::to_value).collect()),
            GroupKey::Map(entries) => {
                FieldValue::map(entries.iter().map(|(k, v)| (k.clone(), v.to_value())))
            }
        }
    }

    fn of(record: &CatalogRecord, path: &FieldPath) -> Self {
        record
            .resolve(path)
            .map_or(GroupKey::Null, |v| Self::from_value(&v))
    }
}

impl From<&FieldValue> for GroupKey {
    fn from(value: &FieldValue) -> Self {
        Self::from_value(value)
    }
}

impl From<FieldValue> for GroupKey {
    fn from(value: FieldValue) -> Self {
        Self::from_value(&value)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::String(value.to_string())
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        GroupKey::Int(value)
    }
}

impl From<bool> for GroupKey {
    fn from(value: bool) -> Self {
        GroupKey::Bool(value)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

/// Records partitioned by field value.
///
/// Groups iterate in order of first appearance; records inside a group keep
/// their view order.
#[derive(Debug, Clone, Default)]
pub struct Groups<'a> {
    groups: Vec<(GroupKey, Vec<&'a CatalogRecord>)>,
    index: HashMap<GroupKey, usize>,
}

impl<'a> Groups<'a> {
    /// Records sharing `key`, if any.
    pub fn get(&self, key: &GroupKey) -> Option<&[&'a CatalogRecord]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Records whose field equals `value`.
    pub fn get_value(&self, value: impl Into<FieldValue>) -> Option<&[&'a CatalogRecord]> {
        self.get(&GroupKey::from_value(&value.into()))
    }

    /// Group keys in first-appearance order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// `(key, records)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[&'a CatalogRecord])> {
        self.groups.iter().map(|(key, rows)| (key, rows.as_slice()))
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consumes the groups into `(key, records)` pairs.
    pub fn into_vec(self) -> Vec<(GroupKey, Vec<&'a CatalogRecord>)> {
        self.groups
    }
}

/// Record counts per field value, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    counts: Vec<(GroupKey, usize)>,
}

impl Counts {
    /// Count for `key`, zero if absent.
    pub fn get(&self, key: &GroupKey) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, count)| *count)
    }

    /// Count for records whose field equals `value`.
    pub fn get_value(&self, value: impl Into<FieldValue>) -> usize {
        self.get(&GroupKey::from_value(&value.into()))
    }

    /// `(key, count)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, usize)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// The largest count; ties go to the key seen first.
    pub fn most_common(&self) -> Option<(&GroupKey, usize)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&GroupKey, usize)>, (key, count)| match best {
                Some((_, top)) if top >= *count => best,
                _ => Some((key, *count)),
            })
    }
}

pub(crate) fn group_by<'a>(rows: &[&'a CatalogRecord], field: &str) -> Groups<'a> {
    let path = FieldPath::lenient(field);
    let mut groups = Groups::default();
    for &record in rows {
        let key = GroupKey::of(record, &path);
        match groups.index.get(&key) {
            Some(&slot) => groups.groups[slot].1.push(record),
            None => {
                groups.index.insert(key.clone(), groups.groups.len());
                groups.groups.push((key, vec![record]));
            }
        }
    }
    groups
}

pub(crate) fn count_by(rows: &[&CatalogRecord], field: &str) -> Counts {
    let path = FieldPath::lenient(field);
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut counts: Vec<(GroupKey, usize)> = Vec::new();
    for &record in rows {
        let key = GroupKey::of(record, &path);
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    Counts { counts }
}

/// Keeps the first record of each distinct field value.
pub(crate) fn unique_by<'a>(rows: Vec<&'a CatalogRecord>, field: &str) -> Vec<&'a CatalogRecord> {
    let path = FieldPath::lenient(field);
    let mut seen: HashSet<GroupKey> = HashSet::new();
    rows.into_iter()
        .filter(|record| seen.insert(GroupKey::of(record, &path)))
        .collect()
}
