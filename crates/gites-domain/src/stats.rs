//! Derived, stateless report views. Recomputed on every query.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub reservation_count: usize,
    pub total_nights: f64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    pub reservation_count: usize,
    pub total_nights: f64,
    pub total_revenue: f64,
    pub mean_stay_nights: f64,
    pub mean_price_per_night: f64,
    /// Keyed by the payment label as entered.
    pub revenue_by_payment_channel: BTreeMap<String, f64>,
    /// Guest-nights per payment group label.
    pub nights_by_payment_group: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearOccupancy {
    pub year: i32,
    pub occupation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRevenue {
    pub year: i32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: u32,
    pub revenue: f64,
}

/// Twelve monthly revenue buckets and their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub months: Vec<MonthlyRevenue>,
    pub total: f64,
}

impl MonthlySeries {
    /// A fully populated, zero-valued series for months 1-12.
    pub fn empty() -> Self {
        Self {
            months: (1..=12)
                .map(|month| MonthlyRevenue {
                    month,
                    revenue: 0.0,
                })
                .collect(),
            total: 0.0,
        }
    }

    /// Adds `revenue` to `month`; out-of-range months are ignored.
    pub fn add(&mut self, month: u32, revenue: f64) {
        if let Some(bucket) = self.months.iter_mut().find(|b| b.month == month) {
            bucket.revenue += revenue;
            self.total += revenue;
        }
    }

    pub fn revenue(&self, month: u32) -> f64 {
        self.months
            .iter()
            .find(|b| b.month == month)
            .map(|b| b.revenue)
            .unwrap_or(0.0)
    }
}

impl Default for MonthlySeries {
    fn default() -> Self {
        Self::empty()
    }
}

/// Grouping key of a monthly revenue series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeriesKey {
    Year(i32),
    Property(String),
    AllProperties,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Year(year) => write!(f, "{year}"),
            SeriesKey::Property(name) => f.write_str(name),
            SeriesKey::AllProperties => f.write_str("Tous"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesScope {
    /// One series per property (plus the all-properties total) for a year.
    Year(i32),
    /// One series per listed year, across every property in the dataset.
    Years(Vec<i32>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryShare {
    pub beneficiary: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrssafSplit {
    pub shares: Vec<BeneficiaryShare>,
}

impl UrssafSplit {
    /// Declared revenue for `beneficiary`; 0 when not configured.
    pub fn revenue_for(&self, beneficiary: &str) -> f64 {
        self.shares
            .iter()
            .find(|share| share.beneficiary == beneficiary)
            .map(|share| share.revenue)
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|share| share.revenue).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub gross: f64,
    pub contribution: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueTrend {
    Up,
    Down,
}

impl fmt::Display for RevenueTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevenueTrend::Up => f.write_str("↑"),
            RevenueTrend::Down => f.write_str("↓"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_has_twelve_zero_buckets() {
        let series = MonthlySeries::empty();
        assert_eq!(series.months.len(), 12);
        assert_eq!(series.months[0].month, 1);
        assert_eq!(series.months[11].month, 12);
        assert_eq!(series.total, 0.0);
    }

    #[test]
    fn add_ignores_out_of_range_months() {
        let mut series = MonthlySeries::empty();
        series.add(3, 120.0);
        series.add(13, 50.0);
        assert_eq!(series.revenue(3), 120.0);
        assert_eq!(series.total, 120.0);
    }

    #[test]
    fn series_keys_order_years_before_properties() {
        let mut keys = vec![
            SeriesKey::AllProperties,
            SeriesKey::Property("Gree".into()),
            SeriesKey::Year(2023),
        ];
        keys.sort();
        assert_eq!(keys[0], SeriesKey::Year(2023));
        assert_eq!(keys[2], SeriesKey::AllProperties);
    }

    #[test]
    fn urssaf_split_lookup_defaults_to_zero() {
        let split = UrssafSplit {
            shares: vec![BeneficiaryShare {
                beneficiary: "Soazig".into(),
                revenue: 250.0,
            }],
        };
        assert_eq!(split.revenue_for("Soazig"), 250.0);
        assert_eq!(split.revenue_for("Nobody"), 0.0);
        assert_eq!(split.total(), 250.0);
    }
}
