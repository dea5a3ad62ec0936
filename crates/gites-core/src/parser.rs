//! Turns the raw per-property feed into typed booking records.
//!
//! Parsing is permissive: rows that are not reservations (totals, headers,
//! malformed lines) are dropped without error. The only gate is the row shape
//! and the check-in date pattern.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use gites_domain::{BookingRecord, PropertyDataset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Minimum positional fields a reservation row must carry.
pub const MIN_ROW_FIELDS: usize = 9;

static NULL_FIELD: Value = Value::Null;

static CHECK_IN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("valid check-in pattern"));

/// Accepted and dropped row counts per property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    pub accepted: BTreeMap<String, usize>,
    pub dropped: BTreeMap<String, usize>,
}

impl ParseDiagnostics {
    pub fn total_accepted(&self) -> usize {
        self.accepted.values().sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Parses the raw feed object into a dataset.
pub fn parse_feed(raw: &Value) -> PropertyDataset {
    let (dataset, diagnostics) = parse_feed_with_diagnostics(raw);
    tracing::debug!(
        properties = dataset.len(),
        accepted = diagnostics.total_accepted(),
        dropped = diagnostics.total_dropped(),
        "parsed booking feed"
    );
    dataset
}

/// Parses the raw feed and reports how many rows each property lost.
pub fn parse_feed_with_diagnostics(raw: &Value) -> (PropertyDataset, ParseDiagnostics) {
    let mut dataset = PropertyDataset::new();
    let mut diagnostics = ParseDiagnostics::default();

    let Some(properties) = raw.as_object() else {
        tracing::warn!("booking feed is not an object; treating it as empty");
        return (dataset, diagnostics);
    };

    for (property, rows) in properties {
        let rows = rows.as_array().map(Vec::as_slice).unwrap_or(&[]);
        let records: Vec<BookingRecord> = rows.iter().filter_map(parse_row).collect();
        diagnostics
            .accepted
            .insert(property.clone(), records.len());
        diagnostics
            .dropped
            .insert(property.clone(), rows.len() - records.len());
        dataset.insert(property.clone(), records);
    }

    (dataset, diagnostics)
}

/// Maps one raw row, or `None` when it is not a reservation.
pub fn parse_row(row: &Value) -> Option<BookingRecord> {
    let fields = row.as_array()?;
    if fields.len() < MIN_ROW_FIELDS {
        return None;
    }
    let check_in = fields.get(1)?.as_str()?;
    if !CHECK_IN_PATTERN.is_match(check_in) {
        return None;
    }

    let field = |idx: usize| fields.get(idx).unwrap_or(&NULL_FIELD);
    Some(BookingRecord {
        name: value_to_text(field(0)),
        check_in: parse_date(check_in),
        check_out: field(2).as_str().and_then(parse_date),
        month_tag: safe_number(field(3)).trunc() as i32,
        nights: safe_number(field(4)),
        adults: safe_number(field(5)),
        price_per_night: safe_number(field(6)),
        revenue: safe_number(field(7)),
        payment_channel: value_to_text(field(8)).trim().to_string(),
        tourist_tax: safe_number(field(9)),
        taxable_nights: safe_number(field(10)),
    })
}

/// Parses `DD/MM/YYYY`. Out-of-range days and months roll over into the
/// neighbouring month or year (`31/02/2024` is 2 March, `00/07/2024` is
/// 30 June); only non-numeric parts give `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let day = parts.next()?.parse::<i64>().ok()?;
    let month = parts.next()?.parse::<i64>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if let Some(date) = u32::try_from(month)
        .ok()
        .zip(u32::try_from(day).ok())
        .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
    {
        return Some(date);
    }

    let month_index = month - 1;
    let year = year.checked_add(i32::try_from(month_index.div_euclid(12)).ok()?)?;
    let month = u32::try_from(month_index.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_signed(Duration::days(day - 1))
}

/// Defensive numeric coercion shared by every numeric field.
///
/// Strings accept a decimal comma (first occurrence only) and lose every
/// character other than digits, `.` and `-` before parsing.
pub fn safe_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => {
            let cleaned: String = text
                .replacen(',', ".", 1)
                .chars()
                .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
                .collect();
            if cleaned.is_empty() {
                return 0.0;
            }
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Text rendering of a cell; falsy cells (null, false, 0, "") become empty.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if number.as_f64() == Some(0.0) {
                String::new()
            } else {
                number.to_string()
            }
        }
        Value::Bool(true) => "true".into(),
        _ => String::new(),
    }
}

/// Every check-in year present in the dataset, most recent first.
pub fn available_years(dataset: &PropertyDataset) -> Vec<i32> {
    let years: BTreeSet<i32> = dataset
        .iter()
        .flat_map(|(_, records)| records.iter())
        .filter_map(BookingRecord::check_in_year)
        .collect();
    years.into_iter().rev().collect()
}
