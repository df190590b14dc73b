use serde_json::Value;

use crate::models::{RawRecord, SeriesPoint};

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// Ordered list of upstream keys tried for one field. The first key holding a
/// scalar (string, number or bool) wins. Dotted keys reach into nested objects.
pub type Keys = &'static [&'static str];

/// Scalar value at `key`. Nulls, objects and arrays count as absent.
pub fn lookup<'a>(raw: &'a RawRecord, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = raw.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    match current {
        Value::Null | Value::Object(_) | Value::Array(_) => None,
        scalar => Some(scalar),
    }
}

pub fn pick<'a>(raw: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| lookup(raw, k))
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Strip thousands separators and parse. Anything unparseable or non-finite
/// is 0.
pub fn parse_number(raw: &str) -> f64 {
    raw.replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_number(s),
        _ => 0.0,
    }
}

pub fn to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn text(raw: &RawRecord, keys: &[&str]) -> String {
    to_text(pick(raw, keys))
}

pub fn number(raw: &RawRecord, keys: &[&str]) -> f64 {
    to_number(pick(raw, keys))
}

/// Like [`number`] but distinguishes "absent" from "present and zero".
pub fn number_opt(raw: &RawRecord, keys: &[&str]) -> Option<f64> {
    pick(raw, keys).map(|v| to_number(Some(v)))
}

/// Record identifier, synthesized from the position when the record has none.
pub fn id(raw: &RawRecord, keys: &[&str], index: usize) -> String {
    let found = text(raw, keys);
    if found.trim().is_empty() {
        format!("row-{}", index + 1)
    } else {
        found
    }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

const LABEL: Keys = &["label", "month", "period", "name"];
const APPROVED: Keys = &["approved", "approved_count", "approvedCount"];
const PENDING: Keys = &["pending", "pending_count", "pendingCount"];
const REJECTED: Keys = &["rejected", "rejected_count", "rejectedCount", "declined"];
const APPROVED_AMOUNT: Keys = &["approved_amount", "approvedAmount", "amount_approved"];
const PENDING_AMOUNT: Keys = &["pending_amount", "pendingAmount", "amount_pending"];
const REJECTED_AMOUNT: Keys = &["rejected_amount", "rejectedAmount", "amount_rejected"];

pub fn series_point(raw: &RawRecord) -> SeriesPoint {
    SeriesPoint {
        label: text(raw, LABEL),
        approved: number(raw, APPROVED),
        pending: number(raw, PENDING),
        rejected: number(raw, REJECTED),
        approved_amount: number(raw, APPROVED_AMOUNT),
        pending_amount: number(raw, PENDING_AMOUNT),
        rejected_amount: number(raw, REJECTED_AMOUNT),
    }
}

pub fn series(records: &[RawRecord]) -> Vec<SeriesPoint> {
    records.iter().map(series_point).collect()
}

#[cfg(test)]
pub(crate) fn record(value: serde_json::Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
