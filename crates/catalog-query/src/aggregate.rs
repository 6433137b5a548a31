//! Numeric aggregates over a field.

use std::fmt;

use catalog_record::{CatalogRecord, FieldPath};
use tracing::trace;

use crate::config::QueryConfig;
use crate::value::numeric;

/// Aggregate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Sum of contributing values.
    Sum,
    /// Arithmetic mean.
    Avg,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        };
        f.write_str(name)
    }
}

/// Result of an aggregate.
///
/// `Empty` means no record contributed a numeric value; it is never
/// reported as zero for `Avg`, `Min` or `Max`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    /// Computed value.
    Value(f64),
    /// No contributing values.
    Empty,
}

impl Aggregate {
    /// The computed value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Aggregate::Value(v) => Some(v),
            Aggregate::Empty => None,
        }
    }

    /// Returns true if no values contributed.
    pub fn is_empty(self) -> bool {
        matches!(self, Aggregate::Empty)
    }

    /// The computed value, or `default` when empty.
    pub fn unwrap_or(self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }
}

impl From<Aggregate> for Option<f64> {
    fn from(aggregate: Aggregate) -> Self {
        aggregate.value()
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Value(v) => write!(f, "{}", v),
            Aggregate::Empty => f.write_str("empty"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Aggregate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Running totals for one field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Accumulator {
    pub(crate) count: usize,
    pub(crate) sum: f64,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
}

impl Accumulator {
    pub(crate) fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub(crate) fn result(&self, op: AggregateOp) -> Aggregate {
        match op {
            AggregateOp::Sum => Aggregate::Value(self.sum),
            AggregateOp::Avg if self.count > 0 => Aggregate::Value(self.sum / self.count as f64),
            AggregateOp::Min => self.min.map_or(Aggregate::Empty, Aggregate::Value),
            AggregateOp::Max => self.max.map_or(Aggregate::Empty, Aggregate::Value),
            AggregateOp::Avg => Aggregate::Empty,
        }
    }
}

/// Collects the numeric values of `field`, in view order.
pub(crate) fn numeric_column(
    rows: &[&CatalogRecord],
    field: &str,
    config: &QueryConfig,
) -> Vec<f64> {
    let path = FieldPath::lenient(field);
    let extract = |record: &CatalogRecord| record.resolve(&path).and_then(|v| numeric(&v, config));

    #[cfg(feature = "parallel")]
    if config.use_parallel(rows.len()) {
        use rayon::prelude::*;
        trace!(rows = rows.len(), field, "extracting aggregate column on rayon pool");
        return rows.par_iter().filter_map(|r| extract(r)).collect();
    }

    rows.iter().filter_map(|r| extract(r)).collect()
}

pub(crate) fn accumulate(rows: &[&CatalogRecord], field: &str, config: &QueryConfig) -> Accumulator {
    // Summed sequentially so results do not depend on the thread count.
    let mut acc = Accumulator::default();
    for value in numeric_column(rows, field, config) {
        acc.push(value);
    }
    if acc.count < rows.len() {
        trace!(field, skipped = rows.len() - acc.count, "non-numeric values excluded");
    }
    acc
}

pub(crate) fn aggregate(
    rows: &[&CatalogRecord],
    field: &str,
    op: AggregateOp,
    config: &QueryConfig,
) -> Aggregate {
    accumulate(rows, field, config).result(op)
}
