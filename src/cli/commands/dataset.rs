use std::path::PathBuf;

use chrono::Datelike;
use gites_domain::PeriodSelector;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Charger le flux de réservations",
            "load [fichier.json]",
            cmd_load,
        ),
        CommandEntry::new(
            "period",
            "Choisir l'année et le mois analysés",
            "period <année|current> [mois|all]",
            cmd_period,
        ),
        CommandEntry::new(
            "years",
            "Lister les années présentes dans le flux",
            "years",
            cmd_years,
        ),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(path) => {
            let path = PathBuf::from(path);
            context.load_feed(path.clone())?;
            if context.config.feed_path.as_ref() != Some(&path) {
                context.config.feed_path = Some(path);
                context.persist_config()?;
            }
            Ok(())
        }
        None => {
            let path = context.resolve_feed_path().ok_or_else(|| {
                CommandError::InvalidArguments(
                    "aucun flux configuré : usage `load <fichier.json>`".into(),
                )
            })?;
            context.load_feed(path)
        }
    }
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(year_token) = args.first() else {
        output::info(format!("Période : {}", context.period));
        return Ok(());
    };
    let year = parse_year(year_token, context.clock.today().year())?;
    let period = match args.get(1) {
        None => PeriodSelector::year(year),
        Some(token) => match parse_month(token)? {
            Some(month) => PeriodSelector::month(year, month),
            None => PeriodSelector::year(year),
        },
    };
    context.set_period(period);
    Ok(())
}

fn cmd_years(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let years = context.available_years()?;
    if years.is_empty() {
        output::info("Aucune réservation datée dans le flux.");
        return Ok(());
    }
    let listed: Vec<String> = years.iter().map(i32::to_string).collect();
    output::info(format!("Années : {}", listed.join(", ")));
    Ok(())
}

pub(crate) fn parse_year(token: &str, current_year: i32) -> Result<i32, CommandError> {
    if token.eq_ignore_ascii_case("current") {
        return Ok(current_year);
    }
    token
        .parse::<i32>()
        .ok()
        .filter(|year| (1900..=9999).contains(year))
        .ok_or_else(|| CommandError::InvalidArguments(format!("année invalide `{token}`")))
}

/// `all` selects the whole year.
pub(crate) fn parse_month(token: &str) -> Result<Option<u32>, CommandError> {
    if token.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    token
        .parse::<u32>()
        .ok()
        .filter(|month| (1..=12).contains(month))
        .map(Some)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("mois invalide `{token}` (1-12 ou all)"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::test_support::{run, script_context};
    use gites_config::Config;

    #[test]
    fn period_tokens_parse() {
        assert_eq!(parse_year("current", 2031).unwrap(), 2031);
        assert_eq!(parse_year("2023", 2031).unwrap(), 2023);
        assert!(parse_year("23x", 2031).is_err());
        assert_eq!(parse_month("all").unwrap(), None);
        assert_eq!(parse_month("7").unwrap(), Some(7));
        assert!(parse_month("13").is_err());
        assert!(parse_month("0").is_err());
    }

    #[test]
    fn period_command_updates_the_selection() {
        let (mut context, _dir) = script_context(Config::default());
        run(&mut context, &["period 2023 7"]).unwrap();
        assert_eq!(context.period, PeriodSelector::month(2023, 7));
        run(&mut context, &["period current all"]).unwrap();
        assert_eq!(context.period, PeriodSelector::year(2024));
        assert!(run(&mut context, &["period 2024 juillet"]).is_err());
        assert_eq!(context.period, PeriodSelector::year(2024));
    }

    #[test]
    fn load_remembers_the_feed_path() {
        let (mut context, dir) = script_context(Config::default());
        let feed = dir.path().join("feed.json");
        std::fs::write(
            &feed,
            r#"{"Gree": [["a", "01/02/2023", "03/02/2023", 2, 2, 2, 50, 100, "Airbnb"]]}"#,
        )
        .unwrap();

        let line = format!("load '{}'", feed.display());
        run(&mut context, &[line.as_str()]).unwrap();
        assert_eq!(context.dataset.as_ref().unwrap().record_count(), 1);
        assert_eq!(context.available_years().unwrap(), vec![2023]);
        assert_eq!(context.config_manager.load().unwrap().feed_path, Some(feed));
    }

    #[test]
    fn load_without_path_or_config_is_rejected() {
        let (mut context, _dir) = script_context(Config::default());
        if std::env::var_os(gites_config::FEED_ENV).is_some() {
            return;
        }
        let err = run(&mut context, &["load"]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }
}
