//! Value interpretation shared by filters, sorting and aggregates.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use catalog_record::{FieldValue, ValueKind};

use crate::config::QueryConfig;

/// Numeric view of a value: numbers always, numeric strings only when the
/// config allows it.
pub(crate) fn numeric(value: &FieldValue, config: &QueryConfig) -> Option<f64> {
    match value {
        FieldValue::Int(_) | FieldValue::Float(_) => value.as_f64(),
        FieldValue::String(s) if config.numeric_strings => parse_number(s),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Field equality: natural [`FieldValue`] equality, widened to numeric
/// equality for numeric strings when enabled.
pub(crate) fn values_equal(a: &FieldValue, b: &FieldValue, config: &QueryConfig) -> bool {
    if a == b {
        return true;
    }
    if !config.numeric_strings {
        return false;
    }
    match (numeric(a, config), numeric(b, config)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Rewrites numeric strings as numbers when enabled, so they sort
/// numerically.
pub(crate) fn normalize<'a>(value: Cow<'a, FieldValue>, config: &QueryConfig) -> Cow<'a, FieldValue> {
    match value.as_ref() {
        FieldValue::String(s) if config.numeric_strings => match parse_number(s) {
            Some(n) => Cow::Owned(FieldValue::Float(n)),
            None => value,
        },
        _ => value,
    }
}

/// The zero/empty value of a kind, substituted for missing fields when
/// sorting.
pub(crate) fn zero_of(kind: ValueKind) -> FieldValue {
    match kind {
        ValueKind::Null => FieldValue::Null,
        ValueKind::Bool => FieldValue::Bool(false),
        ValueKind::Number => FieldValue::Int(0),
        ValueKind::String => FieldValue::String(String::new()),
        ValueKind::List => FieldValue::List(Vec::new()),
        ValueKind::Map => FieldValue::Map(BTreeMap::new()),
    }
}

/// Total order over field values.
///
/// Values of different kinds order by kind (`Null < Bool < Number < String
/// < List < Map`); numbers compare numerically, strings by bytes, lists
/// element-wise, maps entry-wise.
pub(crate) fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        (FieldValue::Int(x), FieldValue::Int(y)) => x.cmp(y),
        (FieldValue::String(x), FieldValue::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        (FieldValue::List(x), FieldValue::List(y)) => {
            for (left, right) in x.iter().zip(y) {
                let ord = compare_values(left, right);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (FieldValue::Map(x), FieldValue::Map(y)) => {
            for ((lk, lv), (rk, rv)) in x.iter().zip(y) {
                let ord = lk.cmp(rk).then_with(|| compare_values(lv, rv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (FieldValue::Float(x), FieldValue::Float(y)) => compare_floats(*x, *y),
        (FieldValue::Int(x), FieldValue::Float(y)) => compare_int_float(*x, *y),
        (FieldValue::Float(x), FieldValue::Int(y)) => compare_int_float(*y, *x).reverse(),
        _ => a.kind().cmp(&b.kind()),
    }
}

/// `-0.0` equals `0.0`; NaNs sit past the infinities on their sign's side.
fn compare_floats(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}

/// Exact integer/float comparison, without rounding the integer through
/// `f64`.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above i64::MAX.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    let whole = f.floor();
    i.cmp(&(whole as i64)).then(if f > whole {
        Ordering::Less
    } else {
        Ordering::Equal
    })
}
