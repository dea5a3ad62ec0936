//! Occupancy ratios: booked nights over the days of the period.

use chrono::Datelike;
use gites_domain::{
    days_in_month, days_in_year, elapsed_days_in_year, BookingRecord, PeriodSelector,
    ReportRules, YearOccupancy,
};

use crate::{
    filter::filter_by_period,
    stats_service::{ratio, total_nights},
    time::Clock,
};

pub struct OccupancyService;

impl OccupancyService {
    /// Booked nights divided by the days in the period. Can exceed 1.0 when
    /// the feed double-books.
    pub fn occupancy_ratio(
        records: &[BookingRecord],
        period: PeriodSelector,
        rules: &ReportRules,
        clock: &dyn Clock,
    ) -> f64 {
        let filtered = filter_by_period(records, period, rules);
        let days = Self::days_in_period(period, clock);
        ratio(total_nights(&filtered), days as f64)
    }

    /// One ratio per supplied year, the month filter applied to each.
    pub fn occupancy_per_year(
        records: &[BookingRecord],
        years: &[i32],
        month: Option<u32>,
        rules: &ReportRules,
        clock: &dyn Clock,
    ) -> Vec<YearOccupancy> {
        years
            .iter()
            .map(|&year| YearOccupancy {
                year,
                occupation: Self::occupancy_ratio(
                    records,
                    PeriodSelector { year, month },
                    rules,
                    clock,
                ),
            })
            .collect()
    }

    /// Calendar days of a month, or of a year. The current year only counts
    /// the days elapsed so far, today included.
    pub fn days_in_period(period: PeriodSelector, clock: &dyn Clock) -> u32 {
        match period.month {
            Some(month) => days_in_month(period.year, month),
            None => {
                let today = clock.today();
                if today.year() == period.year {
                    elapsed_days_in_year(today)
                } else {
                    days_in_year(period.year)
                }
            }
        }
    }
}
