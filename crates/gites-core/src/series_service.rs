//! Monthly revenue time series, per-year revenue and historical averages.

use std::collections::BTreeMap;

use gites_domain::{
    BookingRecord, MonthlyRevenue, MonthlySeries, PeriodSelector, PropertyDataset, ReportRules,
    RevenueTrend, SeriesKey, SeriesScope, YearRevenue,
};

use crate::{
    filter::filter_by_period,
    stats_service::{ratio, total_revenue},
};

pub struct SeriesService;

impl SeriesService {
    /// Twelve-bucket revenue series keyed by property (for one year) or by
    /// year (across the dataset). Every key carries all twelve months.
    pub fn monthly_revenue_series(
        dataset: &PropertyDataset,
        scope: &SeriesScope,
        rules: &ReportRules,
    ) -> BTreeMap<SeriesKey, MonthlySeries> {
        let mut series = BTreeMap::new();
        match scope {
            SeriesScope::Year(year) => {
                let mut all = MonthlySeries::empty();
                for (property, records) in dataset {
                    let property_series = Self::year_series(records, *year, rules);
                    for bucket in &property_series.months {
                        all.add(bucket.month, bucket.revenue);
                    }
                    series.insert(SeriesKey::Property(property.clone()), property_series);
                }
                series.insert(SeriesKey::AllProperties, all);
            }
            SeriesScope::Years(years) => {
                for &year in years {
                    let mut combined = MonthlySeries::empty();
                    for (_, records) in dataset {
                        for bucket in Self::year_series(records, year, rules).months {
                            combined.add(bucket.month, bucket.revenue);
                        }
                    }
                    series.insert(SeriesKey::Year(year), combined);
                }
            }
        }
        series
    }

    /// Monthly series of a single record set for one year.
    pub fn year_series(records: &[BookingRecord], year: i32, rules: &ReportRules) -> MonthlySeries {
        let mut series = MonthlySeries::empty();
        for record in filter_by_period(records, PeriodSelector::year(year), rules) {
            if let Some(month) = record.check_in_month() {
                series.add(month, record.revenue);
            }
        }
        series
    }

    /// Per-month mean revenue across `years`, used as an overlay on the
    /// yearly charts. Zero-filled when no years are given.
    pub fn monthly_average_revenue(
        dataset: &PropertyDataset,
        years: &[i32],
        rules: &ReportRules,
    ) -> Vec<MonthlyRevenue> {
        let by_year = Self::monthly_revenue_series(dataset, &SeriesScope::Years(years.to_vec()), rules);
        let count = by_year.len() as f64;
        (1..=12)
            .map(|month| {
                let sum: f64 = by_year.values().map(|series| series.revenue(month)).sum();
                MonthlyRevenue {
                    month,
                    revenue: ratio(sum, count),
                }
            })
            .collect()
    }

    /// Revenue of the same month (or whole year) for each supplied year.
    pub fn yearly_revenue(
        records: &[BookingRecord],
        years: &[i32],
        month: Option<u32>,
        rules: &ReportRules,
    ) -> Vec<YearRevenue> {
        years
            .iter()
            .map(|&year| YearRevenue {
                year,
                revenue: total_revenue(&filter_by_period(
                    records,
                    PeriodSelector { year, month },
                    rules,
                )),
            })
            .collect()
    }

    /// Highest revenue of a set, 0 when empty. Shared axis scale for charts.
    pub fn peak_revenue(values: &[YearRevenue]) -> f64 {
        values.iter().map(|entry| entry.revenue).fold(0.0, f64::max)
    }

    /// Mean revenue of the same scope over `years`, skipping `period.year`.
    pub fn average_revenue(
        records: &[BookingRecord],
        period: PeriodSelector,
        years: &[i32],
        rules: &ReportRules,
    ) -> f64 {
        let others: Vec<i32> = years
            .iter()
            .copied()
            .filter(|&year| year != period.year)
            .collect();
        let revenues = Self::yearly_revenue(records, &others, period.month, rules);
        let sum: f64 = revenues.iter().map(|entry| entry.revenue).sum();
        ratio(sum, revenues.len() as f64)
    }

    pub fn revenue_trend(current: f64, average: f64) -> RevenueTrend {
        if current >= average {
            RevenueTrend::Up
        } else {
            RevenueTrend::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn paid(y: i32, m: u32, revenue: f64) -> BookingRecord {
        BookingRecord::new("guest", NaiveDate::from_ymd_opt(y, m, 3))
            .with_stay(2.0, 2.0)
            .with_revenue(revenue)
            .with_payment("Virement")
    }

    fn dataset() -> PropertyDataset {
        let mut dataset = PropertyDataset::new();
        dataset.insert("Gree", vec![paid(2024, 1, 100.0), paid(2024, 7, 300.0), paid(2023, 7, 50.0)]);
        dataset.insert("Edmond", vec![paid(2024, 7, 200.0)]);
        dataset
    }

    #[test]
    fn year_scope_keys_each_property_and_the_total() {
        let series =
            SeriesService::monthly_revenue_series(&dataset(), &SeriesScope::Year(2024), &ReportRules::default());
        assert_eq!(series.len(), 3);
        let all = &series[&SeriesKey::AllProperties];
        assert_eq!(all.revenue(7), 500.0);
        assert_eq!(all.total, 600.0);
        assert_eq!(series[&SeriesKey::Property("Edmond".into())].total, 200.0);
    }

    #[test]
    fn every_series_has_twelve_buckets_summing_to_total() {
        let series = SeriesService::monthly_revenue_series(
            &dataset(),
            &SeriesScope::Years(vec![2024, 2023, 2019]),
            &ReportRules::default(),
        );
        for monthly in series.values() {
            assert_eq!(monthly.months.len(), 12);
            let sum: f64 = monthly.months.iter().map(|b| b.revenue).sum();
            assert_eq!(sum, monthly.total);
        }
        assert_eq!(series[&SeriesKey::Year(2019)].total, 0.0);
        assert_eq!(series[&SeriesKey::Year(2023)].revenue(7), 50.0);
    }

    #[test]
    fn empty_dataset_still_yields_full_series() {
        let series = SeriesService::monthly_revenue_series(
            &PropertyDataset::new(),
            &SeriesScope::Year(2024),
            &ReportRules::default(),
        );
        let all = &series[&SeriesKey::AllProperties];
        assert_eq!(all.months.len(), 12);
        assert_eq!(all.total, 0.0);
    }

    #[test]
    fn monthly_average_spreads_over_years() {
        let average =
            SeriesService::monthly_average_revenue(&dataset(), &[2024, 2023], &ReportRules::default());
        assert_eq!(average.len(), 12);
        assert_eq!(average[6].month, 7);
        assert_eq!(average[6].revenue, 275.0);
        assert_eq!(average[0].revenue, 50.0);
        let none = SeriesService::monthly_average_revenue(&dataset(), &[], &ReportRules::default());
        assert!(none.iter().all(|m| m.revenue == 0.0));
    }

    #[test]
    fn average_revenue_excludes_the_selected_year() {
        let records = dataset().records("Gree").to_vec();
        let rules = ReportRules::default();
        let average =
            SeriesService::average_revenue(&records, PeriodSelector::month(2024, 7), &[2024, 2023], &rules);
        assert_eq!(average, 50.0);
        assert_eq!(SeriesService::revenue_trend(300.0, average), RevenueTrend::Up);
        assert_eq!(SeriesService::revenue_trend(10.0, average), RevenueTrend::Down);
        assert_eq!(
            SeriesService::average_revenue(&records, PeriodSelector::year(2024), &[2024], &rules),
            0.0
        );
    }

    #[test]
    fn yearly_revenue_and_peak() {
        let records = dataset().records("Gree").to_vec();
        let yearly =
            SeriesService::yearly_revenue(&records, &[2024, 2023], None, &ReportRules::default());
        assert_eq!(yearly[0].revenue, 400.0);
        assert_eq!(yearly[1].revenue, 50.0);
        assert_eq!(SeriesService::peak_revenue(&yearly), 400.0);
        assert_eq!(SeriesService::peak_revenue(&[]), 0.0);
    }
}
