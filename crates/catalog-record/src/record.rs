//! The catalog record type.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::{RecordError, RecordResult};
use crate::id::RecordId;
use crate::path::FieldPath;
use crate::value::{FieldValue, ValueKind};

/// A flat catalog entity: identity, optional parent reference and an open
/// field map.
///
/// Categories, attributes and internal categories use `parent_id` to
/// describe their hierarchy; product-like records usually leave it empty
/// and carry foreign keys (e.g. `category_id`) as ordinary fields.
///
/// # Example
///
/// ```rust
/// use catalog_record::{CatalogRecord, RecordId};
///
/// let record = CatalogRecord::new(7)
///     .with_parent(3)
///     .with_field("name", "Sneakers")
///     .with_field("is_hot", true);
///
/// assert_eq!(record.id(), &RecordId::from(7));
/// assert_eq!(record.parent_id(), Some(&RecordId::from(3)));
/// assert!(record.bool_field("is_hot").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogRecord {
    id: RecordId,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "parentId",
            alias = "pid",
            skip_serializing_if = "Option::is_none"
        )
    )]
    parent_id: Option<RecordId>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    fields: BTreeMap<String, FieldValue>,
}

impl CatalogRecord {
    /// Creates a root-level record with no fields.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Sets the parent reference.
    pub fn with_parent(mut self, parent_id: impl Into<RecordId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Adds or replaces a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the record identity.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the raw parent reference, including a root sentinel if one
    /// was supplied.
    pub fn parent_id(&self) -> Option<&RecordId> {
        self.parent_id.as_ref()
    }

    /// Returns the parent reference unless it is absent or a root sentinel.
    pub fn parent_ref(&self) -> Option<&RecordId> {
        self.parent_id.as_ref().filter(|p| !p.is_root_sentinel())
    }

    /// Returns true if the record declares no parent (absent or sentinel).
    ///
    /// A record whose parent does not exist in its sequence is not a
    /// declared root, although the taxonomy builder places it at the top.
    pub fn is_declared_root(&self) -> bool {
        self.parent_ref().is_none()
    }

    /// Returns the field map.
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Returns a top-level field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns true if the top-level field is present (even if null).
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Inserts or replaces a field, returning the previous value.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Resolves a field path against this record.
    ///
    /// A top-level key spelled exactly like a multi-segment path (e.g. a
    /// field literally named `"unit.price"`) takes precedence over descent.
    /// `id` and `parent_id` resolve to the record identity and parent
    /// reference when the field map does not define them itself.
    pub fn resolve(&self, path: &FieldPath) -> Option<Cow<'_, FieldValue>> {
        if !path.is_simple() {
            if let Some(value) = self.fields.get(path.to_string().as_str()) {
                return Some(Cow::Borrowed(value));
            }
        }
        if let Some(root) = self.fields.get(path.head()) {
            return root.get_path(path.tail()).map(Cow::Borrowed);
        }

        if !path.is_simple() {
            return None;
        }
        match path.head() {
            "id" => Some(Cow::Owned(FieldValue::from(&self.id))),
            "parent_id" | "parentId" => self
                .parent_id
                .as_ref()
                .map(|p| Cow::Owned(FieldValue::from(p))),
            _ => None,
        }
    }

    /// Resolves a field path given as text, see [`FieldPath::lenient`].
    pub fn lookup(&self, path: &str) -> Option<Cow<'_, FieldValue>> {
        self.resolve(&FieldPath::lenient(path))
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Returns a string field.
    pub fn str_field(&self, name: &str) -> RecordResult<&str> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| mismatch(name, ValueKind::String, value))
    }

    /// Returns a numeric field as `f64`.
    pub fn number_field(&self, name: &str) -> RecordResult<f64> {
        let value = self.require(name)?;
        value.as_f64().ok_or_else(|| mismatch(name, ValueKind::Number, value))
    }

    /// Returns an integer field.
    ///
    /// Floats are rejected even when integral.
    pub fn int_field(&self, name: &str) -> RecordResult<i64> {
        let value = self.require(name)?;
        value.as_i64().ok_or_else(|| mismatch(name, ValueKind::Number, value))
    }

    /// Returns a boolean field.
    pub fn bool_field(&self, name: &str) -> RecordResult<bool> {
        let value = self.require(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, ValueKind::Bool, value))
    }

    /// Returns a list field.
    pub fn list_field(&self, name: &str) -> RecordResult<&[FieldValue]> {
        let value = self.require(name)?;
        value.as_list().ok_or_else(|| mismatch(name, ValueKind::List, value))
    }

    /// Returns a nested map field.
    pub fn map_field(&self, name: &str) -> RecordResult<&BTreeMap<String, FieldValue>> {
        let value = self.require(name)?;
        value.as_map().ok_or_else(|| mismatch(name, ValueKind::Map, value))
    }

    /// Returns a string field, `None` if absent or null.
    pub fn opt_str_field(&self, name: &str) -> RecordResult<Option<&str>> {
        match self.fields.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(_) => self.str_field(name).map(Some),
        }
    }

    /// Returns a numeric field, `None` if absent or null.
    pub fn opt_number_field(&self, name: &str) -> RecordResult<Option<f64>> {
        match self.fields.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(_) => self.number_field(name).map(Some),
        }
    }

    fn require(&self, name: &str) -> RecordResult<&FieldValue> {
        self.fields
            .get(name)
            .ok_or_else(|| RecordError::MissingField(name.to_string()))
    }
}

fn mismatch(field: &str, expected: ValueKind, found: &FieldValue) -> RecordError {
    RecordError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}
