//! Plain-text report blocks built from the aggregation results. Nothing in
//! here prints; commands hand the lines to `output`.

use std::collections::BTreeMap;

use gites_domain::{
    month_label, GlobalStats, MonthlyRevenue, MonthlySeries, PeriodSelector, PropertyStats,
    RevenueTrend, SeriesKey, TaxSplit, UrssafSplit, YearOccupancy, YearRevenue,
};

use crate::cli::formatters::{format_amount, format_decimal, format_percent, format_quantity};
use crate::cli::table::{Table, TableColumn};

const GAUGE_WIDTH: usize = 20;

/// Everything shown on a property card.
#[derive(Debug, Clone)]
pub struct PropertyReport<'a> {
    pub name: &'a str,
    pub period: PeriodSelector,
    pub stats: &'a PropertyStats,
    pub average_revenue: f64,
    pub trend: RevenueTrend,
    pub occupancy: f64,
    pub tax: TaxSplit,
    pub contribution_rate: f64,
}

pub fn period_label(period: PeriodSelector) -> String {
    match period.month {
        Some(month) => format!("{} {}", month_label(month), period.year),
        None => format!("Année {}", period.year),
    }
}

/// Label/value pairs with the values aligned on one column.
pub fn two_column(entries: &[(&str, String)]) -> Vec<String> {
    let width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    entries
        .iter()
        .map(|(label, value)| {
            let padding = " ".repeat(width - label.chars().count());
            format!("  {label}{padding}  {value}")
        })
        .collect()
}

pub fn global_summary(stats: &GlobalStats, currency: &str) -> Vec<String> {
    two_column(&[
        ("Réservations", stats.reservation_count.to_string()),
        ("Nuits", format_quantity(stats.total_nights)),
        ("CA brut", format_amount(stats.total_revenue, currency)),
    ])
}

pub fn property_card(report: &PropertyReport<'_>, currency: &str) -> Vec<String> {
    let stats = report.stats;
    let mut lines = two_column(&[
        ("Réservations", stats.reservation_count.to_string()),
        ("Nuits", format_quantity(stats.total_nights)),
        (
            "CA brut",
            format!(
                "{} {} (moyenne {})",
                format_amount(stats.total_revenue, currency),
                report.trend,
                format_amount(report.average_revenue, currency)
            ),
        ),
        ("Durée moy.", format!("{} nuits", format_decimal(stats.mean_stay_nights, 1))),
        ("Prix moy/nuit", format_amount(stats.mean_price_per_night, currency)),
        ("Occupation", format_percent(report.occupancy)),
        (
            "Cotisations",
            format!(
                "{} ({}), net {}",
                format_amount(report.tax.contribution, currency),
                format_percent(report.contribution_rate),
                format_amount(report.tax.net, currency)
            ),
        ),
    ]);

    lines.push(String::new());
    if stats.revenue_by_payment_channel.is_empty() {
        lines.push("  Aucun paiement sur la période.".into());
    } else {
        let mut payments = Table::new(vec![TableColumn::left("Paiement"), TableColumn::right("CA")]);
        for (channel, revenue) in &stats.revenue_by_payment_channel {
            payments.push_row(vec![channel.clone(), format_amount(*revenue, currency)]);
        }
        lines.extend(indent(payments.render_lines()));
    }

    lines.push(String::new());
    let mut nights = Table::new(vec![TableColumn::left("Groupe"), TableColumn::right("Nuitées")]);
    for (group, value) in &stats.nights_by_payment_group {
        nights.push_row(vec![group.clone(), format_quantity(*value)]);
    }
    lines.extend(indent(nights.render_lines()));
    lines
}

/// One gauge per year, clamped to a full bar when the feed double-books.
pub fn occupancy_gauges(values: &[YearOccupancy]) -> Vec<String> {
    values
        .iter()
        .map(|entry| {
            format!(
                "  {}  {}  {}",
                entry.year,
                gauge(entry.occupation, 1.0),
                format_percent(entry.occupation)
            )
        })
        .collect()
}

/// Revenue bars scaled on `peak`.
pub fn revenue_bars(values: &[YearRevenue], peak: f64, currency: &str) -> Vec<String> {
    values
        .iter()
        .map(|entry| {
            format!(
                "  {}  {}  {}",
                entry.year,
                gauge(entry.revenue, peak),
                format_amount(entry.revenue, currency)
            )
        })
        .collect()
}

/// Month-by-month table, one column per series key and an optional average
/// column, closed by a total row.
pub fn monthly_table(
    series: &BTreeMap<SeriesKey, MonthlySeries>,
    average: Option<&[MonthlyRevenue]>,
    currency: &str,
) -> Vec<String> {
    let mut columns = vec![TableColumn::left("Mois")];
    columns.extend(series.keys().map(|key| TableColumn::right(key.to_string())));
    if average.is_some() {
        columns.push(TableColumn::right("Moyenne"));
    }
    let mut table = Table::new(columns);

    for month in 1..=12u32 {
        let mut row = vec![month_label(month).to_string()];
        row.extend(
            series
                .values()
                .map(|values| format_amount(values.revenue(month), currency)),
        );
        if let Some(average) = average {
            let value = average
                .iter()
                .find(|entry| entry.month == month)
                .map(|entry| entry.revenue)
                .unwrap_or(0.0);
            row.push(format_amount(value, currency));
        }
        table.push_row(row);
    }

    let mut total = vec!["Total".to_string()];
    total.extend(series.values().map(|values| format_amount(values.total, currency)));
    if let Some(average) = average {
        total.push(format_amount(average.iter().map(|entry| entry.revenue).sum(), currency));
    }
    table.push_row(total);

    indent(table.render_lines())
}

/// Declarable revenue per beneficiary with the contribution estimate.
pub fn urssaf_table(split: &UrssafSplit, taxes: &[TaxSplit], currency: &str) -> Vec<String> {
    let mut table = Table::new(vec![
        TableColumn::left("Bénéficiaire"),
        TableColumn::right("CA déclarable"),
        TableColumn::right("Cotisations"),
        TableColumn::right("Net"),
    ]);
    for (share, tax) in split.shares.iter().zip(taxes) {
        table.push_row(vec![
            share.beneficiary.clone(),
            format_amount(share.revenue, currency),
            format_amount(tax.contribution, currency),
            format_amount(tax.net, currency),
        ]);
    }
    table.push_row(vec![
        "Total".into(),
        format_amount(split.total(), currency),
        format_amount(taxes.iter().map(|tax| tax.contribution).sum(), currency),
        format_amount(taxes.iter().map(|tax| tax.net).sum(), currency),
    ]);
    indent(table.render_lines())
}

fn gauge(value: f64, scale: f64) -> String {
    let ratio = if scale > 0.0 && value.is_finite() {
        (value / scale).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * GAUGE_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
}

fn indent(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().map(|line| format!("  {line}")).collect()
}
