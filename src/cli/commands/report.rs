use chrono::Datelike;
use gites_core::{OccupancyService, SeriesService, StatsService, UrssafService};
use gites_domain::{PropertyDataset, ReportRules, SeriesScope, TaxSplit, YearRevenue};

use crate::cli::commands::dataset::parse_year;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::{format_amount, format_quantity};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render::{self, period_label, PropertyReport};
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Totaux de la période, tous gîtes confondus",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("gite", "Fiche détaillée d'un gîte", "gite <nom>", cmd_gite),
        CommandEntry::new(
            "occupancy",
            "Taux d'occupation d'un gîte par année",
            "occupancy <nom>",
            cmd_occupancy,
        ),
        CommandEntry::new(
            "revenue",
            "Chiffre d'affaires par année, pour un gîte ou tous",
            "revenue [nom]",
            cmd_revenue,
        ),
        CommandEntry::new(
            "monthly",
            "CA mensuel par gîte pour une année, ou par année",
            "monthly [année|all]",
            cmd_monthly,
        ),
        CommandEntry::new(
            "urssaf",
            "CA déclarable par bénéficiaire",
            "urssaf",
            cmd_urssaf,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dataset = context.require_dataset()?;
    let rules = context.rules();
    let currency = context.currency();
    let period = context.period;

    let global = StatsService::global_stats(dataset, period, rules);
    output::section(format!("Synthèse {}", period_label(period)));
    output::lines(render::global_summary(&global, currency));

    let mut table = Table::new(vec![
        TableColumn::left("Gîte"),
        TableColumn::right("Réservations"),
        TableColumn::right("Nuits"),
        TableColumn::right("CA brut"),
    ]);
    for name in report_order(dataset, rules) {
        let stats = StatsService::property_stats(dataset.records(name), period, rules);
        table.push_row(vec![
            name.to_string(),
            stats.reservation_count.to_string(),
            format_quantity(stats.total_nights),
            format_amount(stats.total_revenue, currency),
        ]);
    }
    output::info("");
    output::lines(table.render_lines().into_iter().map(|line| format!("  {line}")));
    Ok(())
}

fn cmd_gite(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = context.resolve_property(required_name(args, "gite <nom>")?)?;
    let dataset = context.require_dataset()?;
    let rules = context.rules();
    let period = context.period;
    let records = dataset.records(&name);
    let years = context.available_years()?;

    let stats = StatsService::property_stats(records, period, rules);
    let average_revenue = SeriesService::average_revenue(records, period, &years, rules);
    let report = PropertyReport {
        name: &name,
        period,
        stats: &stats,
        average_revenue,
        trend: SeriesService::revenue_trend(stats.total_revenue, average_revenue),
        occupancy: OccupancyService::occupancy_ratio(records, period, rules, context.clock.as_ref()),
        tax: UrssafService::tax_split(stats.total_revenue, rules),
        contribution_rate: rules.tax.contribution_rate,
    };

    output::section(format!("{} - {}", report.name, period_label(report.period)));
    output::lines(render::property_card(&report, context.currency()));
    Ok(())
}

fn cmd_occupancy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = context.resolve_property(required_name(args, "occupancy <nom>")?)?;
    let dataset = context.require_dataset()?;
    let years = context.available_years()?;
    let period = context.period;

    let occupancy = OccupancyService::occupancy_per_year(
        dataset.records(&name),
        &years,
        period.month,
        context.rules(),
        context.clock.as_ref(),
    );
    let scope = match period.month {
        Some(month) => gites_domain::month_label(month).to_string(),
        None => "année entière".to_string(),
    };
    output::section(format!("Occupation {} ({})", name, scope));
    if occupancy.is_empty() {
        output::info("  Aucune année disponible.");
    }
    output::lines(render::occupancy_gauges(&occupancy));
    Ok(())
}

fn cmd_revenue(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selected = match args.first() {
        Some(name) => Some(context.resolve_property(name)?),
        None => None,
    };
    let dataset = context.require_dataset()?;
    let rules = context.rules();
    let period = context.period;
    let years = context.available_years()?;

    let properties: Vec<&str> = match &selected {
        Some(name) => vec![name.as_str()],
        None => dataset.property_names().collect(),
    };

    let mut yearly: Vec<YearRevenue> = years
        .iter()
        .map(|&year| YearRevenue { year, revenue: 0.0 })
        .collect();
    let mut average = 0.0;
    for property in &properties {
        let records = dataset.records(property);
        for (total, entry) in yearly
            .iter_mut()
            .zip(SeriesService::yearly_revenue(records, &years, period.month, rules))
        {
            total.revenue += entry.revenue;
        }
        average += SeriesService::average_revenue(records, period, &years, rules);
    }
    let current = yearly
        .iter()
        .find(|entry| entry.year == period.year)
        .map(|entry| entry.revenue)
        .unwrap_or(0.0);
    let peak = SeriesService::peak_revenue(&yearly);
    let currency = context.currency();

    let label = selected.as_deref().unwrap_or("tous les gîtes");
    output::section(format!("Chiffre d'affaires {} ({})", label, period_label(period)));
    output::lines(render::revenue_bars(&yearly, peak, currency));
    output::info(format!(
        "  {} {} moyenne des autres années : {}",
        format_amount(current, currency),
        SeriesService::revenue_trend(current, average),
        format_amount(average, currency)
    ));
    Ok(())
}

fn cmd_monthly(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dataset = context.require_dataset()?;
    let rules = context.rules();
    let currency = context.currency();

    match args.first() {
        Some(token) if token.eq_ignore_ascii_case("all") => {
            let years = context.available_years()?;
            let series = SeriesService::monthly_revenue_series(
                dataset,
                &SeriesScope::Years(years.clone()),
                rules,
            );
            let average = SeriesService::monthly_average_revenue(dataset, &years, rules);
            output::section("CA mensuel par année");
            output::lines(render::monthly_table(&series, Some(&average), currency));
        }
        token => {
            let year = match token {
                Some(token) => parse_year(token, context.clock.today().year())?,
                None => context.period.year,
            };
            let series =
                SeriesService::monthly_revenue_series(dataset, &SeriesScope::Year(year), rules);
            output::section(format!("CA mensuel {}", year));
            output::lines(render::monthly_table(&series, None, currency));
        }
    }
    Ok(())
}

fn cmd_urssaf(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dataset = context.require_dataset()?;
    let rules = context.rules();
    let period = context.period;

    let split = UrssafService::urssaf_split(dataset, period, rules);
    let taxes: Vec<TaxSplit> = split
        .shares
        .iter()
        .map(|share| UrssafService::tax_split(share.revenue, rules))
        .collect();
    output::section(format!("URSSAF {}", period_label(period)));
    output::lines(render::urssaf_table(&split, &taxes, context.currency()));
    Ok(())
}

/// Configured properties first, in their configured order and even without
/// bookings, then any other property found in the feed.
fn report_order<'a>(dataset: &'a PropertyDataset, rules: &'a ReportRules) -> Vec<&'a str> {
    let mut names: Vec<&str> = rules.properties.iter().map(String::as_str).collect();
    for name in dataset.property_names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn required_name<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage : {usage}")))
}

#[cfg(test)]
mod tests {
    use crate::cli::core::test_support::{run, script_context};
    use crate::cli::core::CommandError;
    use gites_config::Config;
    use gites_core::StaticFeed;
    use serde_json::json;

    fn loaded_context() -> (crate::cli::core::ShellContext, tempfile::TempDir) {
        let (mut context, dir) = script_context(Config::default());
        let feed = StaticFeed::new(json!({
            "Edmond": [
                ["Dupont", "10/07/2024", "13/07/2024", 7, 3, 2, 100, 300, "Airbnb"],
                ["Troc", "20/07/2024", "22/07/2024", 7, 2, 1, 50, 100, "HomeExchange"]
            ],
            "Liberté": [
                ["Petit", "01/07/2023", "08/07/2023", 7, 7, 2, 110, 770, "Gites de France"]
            ]
        }));
        context.dataset = Some(gites_core::load_dataset(&feed).unwrap());
        (context, dir)
    }

    #[test]
    fn report_commands_run_on_a_loaded_feed() {
        let (mut context, _dir) = loaded_context();
        run(
            &mut context,
            &[
                "summary",
                "gite edmond",
                "occupancy Liberté",
                "revenue",
                "revenue Edmond",
                "monthly",
                "monthly 2023",
                "monthly all",
                "period 2024 7",
                "urssaf",
            ],
        )
        .unwrap();
    }

    #[test]
    fn summary_rows_follow_the_configured_order() {
        let (context, _dir) = loaded_context();
        let mut dataset = context.dataset.clone().unwrap();
        dataset.insert("Annexe", Vec::new());
        assert_eq!(
            super::report_order(&dataset, context.rules()),
            ["Phonsine", "Gree", "Edmond", "Liberté", "Annexe"]
        );
    }

    #[test]
    fn property_commands_need_a_name() {
        let (mut context, _dir) = loaded_context();
        assert!(matches!(
            run(&mut context, &["gite"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            run(&mut context, &["occupancy Manoir"]),
            Err(CommandError::UnknownProperty(_))
        ));
    }

    #[test]
    fn reports_need_a_feed() {
        let (mut context, _dir) = script_context(Config::default());
        for line in ["summary", "gite Gree", "revenue", "monthly", "urssaf", "years"] {
            assert!(matches!(
                run(&mut context, &[line]),
                Err(CommandError::FeedNotLoaded)
            ));
        }
    }
}
