//! Stable single- and multi-key sorting.

use std::borrow::Cow;
use std::cmp::Ordering;

use catalog_record::{CatalogRecord, FieldPath, FieldValue, ValueKind};

use crate::config::QueryConfig;
use crate::value::{compare_values, normalize, zero_of};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    /// `true` maps to [`Direction::Ascending`].
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// One key of a multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field path to sort on.
    pub field: String,
    /// Direction for this key.
    pub direction: Direction,
}

impl SortKey {
    /// Ascending key on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    /// Descending key on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

pub(crate) fn sort_by_keys<'a>(
    rows: Vec<&'a CatalogRecord>,
    keys: &[SortKey],
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord> {
    if keys.is_empty() || rows.len() < 2 {
        return rows;
    }

    let paths: Vec<FieldPath> = keys.iter().map(|k| FieldPath::lenient(&k.field)).collect();

    // Decorate each row with its resolved keys once; missing values are
    // filled per key with the zero value of that key's dominant kind.
    let mut columns: Vec<Vec<Option<Cow<'a, FieldValue>>>> = paths
        .iter()
        .map(|path| {
            rows.iter()
                .map(|&record| {
                    record
                        .resolve(path)
                        .map(|v| normalize(v, config))
                        .filter(|v| !v.is_null())
                })
                .collect()
        })
        .collect();

    let zeros: Vec<FieldValue> = columns
        .iter()
        .map(|column| zero_of(dominant_kind(column)))
        .collect();

    let mut decorated: Vec<(Vec<Cow<'a, FieldValue>>, &'a CatalogRecord)> = rows
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let values = columns
                .iter_mut()
                .zip(&zeros)
                .map(|(column, zero)| column[row].take().unwrap_or_else(|| Cow::Owned(zero.clone())))
                .collect();
            (values, record)
        })
        .collect();

    // `sort_by` is stable: rows with equal keys keep their input order.
    decorated.sort_by(|(left, _), (right, _)| {
        keys.iter()
            .zip(left.iter().zip(right))
            .map(|(key, (l, r))| key.direction.apply(compare_values(l, r)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    decorated.into_iter().map(|(_, record)| record).collect()
}

/// Kind of the first non-null value in a column.
fn dominant_kind(column: &[Option<Cow<'_, FieldValue>>]) -> ValueKind {
    column
        .iter()
        .flatten()
        .map(|v| v.kind())
        .next()
        .unwrap_or(ValueKind::Null)
}
