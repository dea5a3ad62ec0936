//! Period filter shared by every aggregate.

use gites_domain::{BookingRecord, PeriodSelector, ReportRules};

use crate::labels::canonical_label;

/// Records checked in during `period`, without undated or barter bookings.
/// Input order is preserved.
pub fn filter_by_period<'a>(
    records: &'a [BookingRecord],
    period: PeriodSelector,
    rules: &ReportRules,
) -> Vec<&'a BookingRecord> {
    records
        .iter()
        .filter(|record| !is_excluded_channel(record, rules))
        .filter(|record| record.check_in.is_some_and(|date| period.contains(date)))
        .collect()
}

/// Whether the record was paid through the excluded (non-monetary) channel.
pub fn is_excluded_channel(record: &BookingRecord, rules: &ReportRules) -> bool {
    let label = canonical_label(&record.payment_channel);
    !label.is_empty() && label == canonical_label(&rules.excluded_channel)
}
