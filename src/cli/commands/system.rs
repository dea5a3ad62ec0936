use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render::two_column;
use crate::utils::build_info;

const CONFIG_KEYS: &str = "locale|currency|feed_path|access_password|ui_color";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Afficher ou modifier les préférences",
            "config [show|set <clé> <valeur>]",
            cmd_config,
        ),
        CommandEntry::public(
            "help",
            "Afficher les commandes disponibles",
            "help [commande]",
            cmd_help,
        ),
        CommandEntry::public(
            "version",
            "Afficher les informations de build",
            "version",
            cmd_version,
        ),
        CommandEntry::public("exit", "Quitter le tableau de bord", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("set") if args.len() >= 3 => {
            let value = args[2..].join(" ");
            set_config_value(context, args[1], value.trim())
        }
        Some(_) => Err(CommandError::InvalidArguments(format!(
            "usage : config set <{CONFIG_KEYS}> <valeur>"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    let feed = context
        .resolve_feed_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(aucun)".into());
    let password = if config.access_password.is_some() {
        "défini"
    } else {
        "(aucun, accès libre)"
    };
    let loaded = context.feed_label.as_deref().unwrap_or("(non chargé)");
    output::lines(two_column(&[
        ("Fichier", context.config_manager.config_path().display().to_string()),
        ("Locale", config.locale.clone()),
        ("Devise", config.currency.clone()),
        ("Couleurs", on_off(config.ui_color_enabled).into()),
        ("Flux", feed),
        ("Flux chargé", loaded.to_string()),
        ("Mot de passe", password.into()),
        ("Gîtes", config.rules.properties.join(", ")),
        ("Paiements déclarables", config.rules.declarable_channels.join(", ")),
    ]));
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let cleared = value.is_empty() || value.eq_ignore_ascii_case("none");
    {
        let config = &mut context.config;
        match key.to_lowercase().as_str() {
            "locale" => config.locale = value.to_string(),
            "currency" => config.currency = value.to_uppercase(),
            "feed_path" => config.feed_path = (!cleared).then(|| PathBuf::from(value)),
            "access_password" => config.access_password = (!cleared).then(|| value.to_string()),
            "ui_color" => {
                config.ui_color_enabled = match value.to_lowercase().as_str() {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    _ => {
                        return Err(CommandError::InvalidArguments(
                            "ui_color attend on ou off".into(),
                        ))
                    }
                }
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "clé inconnue `{other}` ({CONFIG_KEYS})"
                )))
            }
        }
    }
    context.persist_config()?;
    context.apply_config();
    tracing::info!(key, "configuration updated");
    output::success("Configuration enregistrée.");
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Gîtes dashboard {}", meta.version));
    output::lines(two_column(&[
        ("Build", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Compilé le", meta.timestamp.to_string()),
        ("Cible", meta.target.to_string()),
        ("Profil", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use crate::cli::core::test_support::{run, script_context};
    use crate::cli::core::CommandError;
    use gites_config::Config;

    #[test]
    fn config_set_persists_and_rearms_the_gate() {
        let (mut context, _dir) = script_context(Config::default());
        assert!(context.auth.is_some());

        run(&mut context, &["config set access_password tellthem", "config set currency usd"])
            .unwrap();
        let stored = context.config_manager.load().unwrap();
        assert_eq!(stored.access_password.as_deref(), Some("tellthem"));
        assert_eq!(stored.currency, "USD");
        assert!(context.gate.requires_password());
        // the current session stays unlocked
        assert!(context.auth.is_some());

        run(&mut context, &["config set access_password none"]).unwrap();
        assert!(context.config_manager.load().unwrap().access_password.is_none());
    }

    #[test]
    fn config_rejects_unknown_keys() {
        let (mut context, _dir) = script_context(Config::default());
        assert!(matches!(
            run(&mut context, &["config set theme dark"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            run(&mut context, &["config set ui_color maybe"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            run(&mut context, &["config frobnicate"]),
            Err(CommandError::InvalidArguments(_))
        ));
        run(&mut context, &["config", "help config", "help nope", "version"]).unwrap();
    }
}
