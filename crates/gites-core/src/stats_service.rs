//! Reservation, night and revenue totals per property and across the dataset.

use std::collections::BTreeMap;

use gites_domain::{
    BookingRecord, GlobalStats, PaymentGroup, PeriodSelector, PropertyDataset, PropertyStats,
    ReportRules,
};

use crate::{filter::filter_by_period, labels::normalize_label};

pub struct StatsService;

impl StatsService {
    /// Totals across every property of the dataset.
    pub fn global_stats(
        dataset: &PropertyDataset,
        period: PeriodSelector,
        rules: &ReportRules,
    ) -> GlobalStats {
        dataset
            .iter()
            .fold(GlobalStats::default(), |mut acc, (_, records)| {
                let filtered = filter_by_period(records, period, rules);
                acc.reservation_count += filtered.len();
                acc.total_nights += total_nights(&filtered);
                acc.total_revenue += total_revenue(&filtered);
                acc
            })
    }

    /// Full statistics for one property's records.
    pub fn property_stats(
        records: &[BookingRecord],
        period: PeriodSelector,
        rules: &ReportRules,
    ) -> PropertyStats {
        let filtered = filter_by_period(records, period, rules);
        let reservation_count = filtered.len();
        let total_nights = total_nights(&filtered);
        let total_revenue = total_revenue(&filtered);

        let mut revenue_by_payment_channel: BTreeMap<String, f64> = BTreeMap::new();
        let mut nights_by_payment_group: BTreeMap<String, f64> = rules
            .payment_groups
            .iter()
            .map(|group| (group.label.clone(), 0.0))
            .collect();

        for record in &filtered {
            let channel = if record.payment_channel.trim().is_empty() {
                rules.undefined_channel_label.as_str()
            } else {
                record.payment_channel.as_str()
            };
            *revenue_by_payment_channel
                .entry(channel.to_string())
                .or_insert(0.0) += record.revenue;

            if let Some(group) = match_payment_group(channel, &rules.payment_groups) {
                if let Some(nights) = nights_by_payment_group.get_mut(&group.label) {
                    *nights += record.guest_nights();
                }
            }
        }

        PropertyStats {
            reservation_count,
            total_nights,
            total_revenue,
            mean_stay_nights: ratio(total_nights, reservation_count as f64),
            mean_price_per_night: ratio(total_revenue, total_nights),
            revenue_by_payment_channel,
            nights_by_payment_group,
        }
    }
}

/// First group, in precedence order, with a pattern contained in the normalised label.
pub fn match_payment_group<'a>(label: &str, groups: &'a [PaymentGroup]) -> Option<&'a PaymentGroup> {
    let normalized = normalize_label(label);
    groups.iter().find(|group| {
        group
            .patterns
            .iter()
            .any(|pattern| normalized.contains(&normalize_label(pattern)))
    })
}

pub(crate) fn total_nights(records: &[&BookingRecord]) -> f64 {
    records.iter().map(|record| record.nights).sum()
}

pub(crate) fn total_revenue(records: &[&BookingRecord]) -> f64 {
    records.iter().map(|record| record.revenue).sum()
}

/// Division guarded against a zero (or non-finite) result.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking(m: u32, nights: f64, adults: f64, revenue: f64, channel: &str) -> BookingRecord {
        BookingRecord::new("guest", NaiveDate::from_ymd_opt(2024, m, 5))
            .with_stay(nights, adults)
            .with_revenue(revenue)
            .with_payment(channel)
    }

    #[test]
    fn empty_period_reports_zero_means() {
        let stats = StatsService::property_stats(&[], PeriodSelector::year(2024), &ReportRules::default());
        assert_eq!(stats.reservation_count, 0);
        assert_eq!(stats.mean_stay_nights, 0.0);
        assert_eq!(stats.mean_price_per_night, 0.0);
        assert!(stats.revenue_by_payment_channel.is_empty());
        assert_eq!(stats.nights_by_payment_group.len(), 4);
        assert!(stats.nights_by_payment_group.values().all(|v| *v == 0.0));
    }

    #[test]
    fn zero_night_bookings_do_not_divide_by_zero() {
        let records = vec![booking(3, 0.0, 2.0, 150.0, "Airbnb")];
        let stats =
            StatsService::property_stats(&records, PeriodSelector::year(2024), &ReportRules::default());
        assert_eq!(stats.reservation_count, 1);
        assert_eq!(stats.mean_stay_nights, 0.0);
        assert_eq!(stats.mean_price_per_night, 0.0);
    }

    #[test]
    fn blank_payment_uses_undefined_label() {
        let records = vec![booking(3, 2.0, 1.0, 90.0, ""), booking(4, 1.0, 1.0, 10.0, "  ")];
        let stats =
            StatsService::property_stats(&records, PeriodSelector::year(2024), &ReportRules::default());
        assert_eq!(stats.revenue_by_payment_channel.get("Indéfini"), Some(&100.0));
        assert_eq!(stats.revenue_by_payment_channel.len(), 1);
    }

    #[test]
    fn channel_keys_keep_their_spelling() {
        let records = vec![booking(3, 1.0, 1.0, 50.0, "Airbnb"), booking(4, 1.0, 1.0, 70.0, "AIRBNB")];
        let stats =
            StatsService::property_stats(&records, PeriodSelector::year(2024), &ReportRules::default());
        assert_eq!(stats.revenue_by_payment_channel["Airbnb"], 50.0);
        assert_eq!(stats.revenue_by_payment_channel["AIRBNB"], 70.0);
        assert_eq!(stats.nights_by_payment_group["Airbnb"], 2.0);
    }

    #[test]
    fn payment_groups_accumulate_guest_nights() {
        let records = vec![
            booking(1, 2.0, 3.0, 200.0, "Chèque"),
            booking(2, 4.0, 2.0, 400.0, "virement bancaire"),
            booking(3, 1.0, 2.0, 100.0, "Gîtes de France"),
            booking(4, 5.0, 1.0, 500.0, "Gites de France"),
            booking(5, 3.0, 2.0, 300.0, "Espèces"),
        ];
        let stats =
            StatsService::property_stats(&records, PeriodSelector::year(2024), &ReportRules::default());
        assert_eq!(stats.nights_by_payment_group["Virement / chèque"], 14.0);
        // "Gîtes" keeps its circumflex after normalisation and matches nothing
        assert_eq!(stats.nights_by_payment_group["Gites de France"], 5.0);
        assert_eq!(stats.nights_by_payment_group["Airbnb"], 0.0);
        assert_eq!(stats.total_revenue, 1500.0);
        assert_eq!(stats.total_nights, 15.0);
    }

    #[test]
    fn first_matching_group_wins() {
        let groups = ReportRules::default_payment_groups();
        let group = match_payment_group("Virement Airbnb", &groups).unwrap();
        assert_eq!(group.label, "Airbnb");
        let group = match_payment_group("abritel via gites de france", &groups).unwrap();
        assert_eq!(group.label, "Abritel");
        assert!(match_payment_group("Cash", &groups).is_none());
    }

    #[test]
    fn global_stats_sum_every_property() {
        let mut dataset = PropertyDataset::new();
        dataset.insert("Gree", vec![booking(1, 2.0, 1.0, 100.0, "Airbnb")]);
        dataset.insert(
            "Edmond",
            vec![booking(1, 3.0, 1.0, 240.0, "Virement"), booking(2, 1.0, 1.0, 0.0, "HomeExchange")],
        );
        let stats = StatsService::global_stats(&dataset, PeriodSelector::year(2024), &ReportRules::default());
        assert_eq!(stats.reservation_count, 2);
        assert_eq!(stats.total_nights, 5.0);
        assert_eq!(stats.total_revenue, 340.0);
    }

    #[test]
    fn global_stats_of_empty_dataset_are_zero() {
        let stats = StatsService::global_stats(
            &PropertyDataset::new(),
            PeriodSelector::month(2024, 2),
            &ReportRules::default(),
        );
        assert_eq!(stats, GlobalStats::default());
    }
}
