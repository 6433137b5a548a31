//! Named tallies and numeric field summaries in a single pass.
//!
//! A [`StatisticsSpec`] declares what to count; running it over a view
//! yields a [`Statistics`] report. Tally names and summarized fields are
//! chosen by the caller, nothing is hard-coded.

use std::collections::HashSet;
use std::fmt;

use catalog_record::{CatalogRecord, FieldPath, FieldValue};
use tracing::debug;

use crate::aggregate::{accumulate, Aggregate, AggregateOp};
use crate::config::QueryConfig;
use crate::error::{QueryError, QueryResult};
use crate::value::values_equal;

type Predicate = Box<dyn Fn(&CatalogRecord) -> bool + Send + Sync>;

/// How a tally decides whether a record counts.
enum Rule {
    Predicate(Predicate),
    /// Field equality, evaluated with the settings of the view being
    /// summarized.
    FieldEquals { path: FieldPath, value: FieldValue },
}

impl Rule {
    fn matches(&self, record: &CatalogRecord, config: &QueryConfig) -> bool {
        match self {
            Rule::Predicate(predicate) => predicate(record),
            Rule::FieldEquals { path, value } => match record.resolve(path) {
                Some(actual) => values_equal(&actual, value, config),
                None => value.is_null(),
            },
        }
    }
}

struct TallySpec {
    name: String,
    rule: Rule,
}

/// Declares the tallies and numeric summaries of a statistics report.
///
/// # Example
///
/// ```rust
/// use catalog_query::{Collection, StatisticsSpec};
/// use catalog_record::CatalogRecord;
///
/// let products = Collection::new(vec![
///     CatalogRecord::new(1).with_field("status", "active").with_field("price", 10),
///     CatalogRecord::new(2).with_field("status", "draft").with_field("price", 30),
/// ]);
///
/// let spec = StatisticsSpec::builder()
///     .tally_field_equals("active", "status", "active")
///     .numeric_field("price")
///     .build()
///     .unwrap();
///
/// let stats = products.query().statistics(&spec);
/// assert_eq!(stats.total, 2);
/// assert_eq!(stats.tally("active").map(|t| t.matched), Some(1));
/// assert_eq!(stats.field("price").and_then(|f| f.avg.value()), Some(20.0));
/// ```
pub struct StatisticsSpec {
    tallies: Vec<TallySpec>,
    fields: Vec<String>,
}

impl StatisticsSpec {
    /// Creates a new builder for StatisticsSpec.
    pub fn builder() -> StatisticsSpecBuilder {
        StatisticsSpecBuilder::default()
    }

    /// Declared tally names, in declaration order.
    pub fn tally_names(&self) -> impl Iterator<Item = &str> {
        self.tallies.iter().map(|t| t.name.as_str())
    }

    /// Declared numeric fields, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl fmt::Debug for StatisticsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatisticsSpec")
            .field("tallies", &self.tally_names().collect::<Vec<_>>())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for StatisticsSpec.
#[derive(Default)]
pub struct StatisticsSpecBuilder {
    tallies: Vec<TallySpec>,
    fields: Vec<String>,
}

impl StatisticsSpecBuilder {
    /// Adds a tally counting records that satisfy `predicate`.
    pub fn tally<P>(mut self, name: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&CatalogRecord) -> bool + Send + Sync + 'static,
    {
        self.tallies.push(TallySpec {
            name: name.into(),
            rule: Rule::Predicate(Box::new(predicate)),
        });
        self
    }

    /// Adds a tally counting records whose `field` equals `value`.
    ///
    /// Equality follows the view's [`QueryConfig`], as in
    /// `filter_by_field`.
    pub fn tally_field_equals(
        mut self,
        name: impl Into<String>,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.tallies.push(TallySpec {
            name: name.into(),
            rule: Rule::FieldEquals {
                path: FieldPath::lenient(field),
                value: value.into(),
            },
        });
        self
    }

    /// Adds a numeric summary for `field`.
    pub fn numeric_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Builds the spec, rejecting repeated tally names or fields.
    pub fn build(self) -> QueryResult<StatisticsSpec> {
        if let Some(name) = first_duplicate(self.tallies.iter().map(|t| t.name.as_str())) {
            return Err(QueryError::DuplicateTally(name.to_string()));
        }
        if let Some(field) = first_duplicate(self.fields.iter().map(String::as_str)) {
            return Err(QueryError::DuplicateField(field.to_string()));
        }
        Ok(StatisticsSpec {
            tallies: self.tallies,
            fields: self.fields,
        })
    }
}

fn first_duplicate<'a>(mut names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.find(|name| !seen.insert(*name))
}

/// Outcome of one named tally.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tally {
    /// Tally name.
    pub name: String,
    /// Records satisfying the predicate.
    pub matched: usize,
    /// Records not satisfying it.
    pub unmatched: usize,
}

/// Numeric summary of one field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSummary {
    /// Summarized field.
    pub field: String,
    /// Records with a numeric value in the field.
    pub count: usize,
    /// Sum of the values; 0 when `count` is 0.
    pub sum: f64,
    /// Mean value.
    pub avg: Aggregate,
    /// Smallest value.
    pub min: Aggregate,
    /// Largest value.
    pub max: Aggregate,
}

/// Statistics report over a view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Statistics {
    /// Records in the view.
    pub total: usize,
    /// Tallies in declaration order.
    pub tallies: Vec<Tally>,
    /// Field summaries in declaration order.
    pub fields: Vec<FieldSummary>,
}

impl Statistics {
    /// Looks up a tally by name.
    pub fn tally(&self, name: &str) -> Option<&Tally> {
        self.tallies.iter().find(|t| t.name == name)
    }

    /// Looks up a field summary by field name.
    pub fn field(&self, field: &str) -> Option<&FieldSummary> {
        self.fields.iter().find(|f| f.field == field)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics ({} records):", self.total)?;
        for tally in &self.tallies {
            writeln!(f, "  {}: {} matched, {} unmatched", tally.name, tally.matched, tally.unmatched)?;
        }
        for summary in &self.fields {
            writeln!(
                f,
                "  {}: count={} sum={} avg={} min={} max={}",
                summary.field, summary.count, summary.sum, summary.avg, summary.min, summary.max
            )?;
        }
        Ok(())
    }
}

pub(crate) fn statistics(
    rows: &[&CatalogRecord],
    spec: &StatisticsSpec,
    config: &QueryConfig,
) -> Statistics {
    let total = rows.len();
    let tallies = spec
        .tallies
        .iter()
        .map(|tally| {
            let matched = rows.iter().filter(|&&r| tally.rule.matches(r, config)).count();
            Tally {
                name: tally.name.clone(),
                matched,
                unmatched: total - matched,
            }
        })
        .collect();

    let fields = spec
        .fields
        .iter()
        .map(|field| {
            let acc = accumulate(rows, field, config);
            FieldSummary {
                field: field.clone(),
                count: acc.count,
                sum: acc.sum,
                avg: acc.result(AggregateOp::Avg),
                min: acc.result(AggregateOp::Min),
                max: acc.result(AggregateOp::Max),
            }
        })
        .collect();

    debug!(
        total,
        tallies = spec.tallies.len(),
        fields = spec.fields.len(),
        "statistics computed"
    );
    Statistics {
        total,
        tallies,
        fields,
    }
}
