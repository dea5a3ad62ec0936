//! Shell state, dispatch and error reporting.

use std::{io, path::PathBuf};

use chrono::Datelike;
use dialoguer::{theme::ColorfulTheme, Confirm};
use gites_config::{Config, ConfigError, ConfigManager, FEED_ENV};
use gites_core::{available_years, load_dataset, Clock, CoreError, SystemClock};
use gites_domain::{PeriodSelector, PropertyDataset, ReportRules};
use gites_feed_json::JsonFileFeed;
use strsim::levenshtein;

use crate::errors::{CliError, DashboardError};
use crate::session::{AccessError, AuthContext, SessionGate};

use super::commands;
use super::formatters::{set_number_style, NumberStyle};
use super::output::{self, OutputPreferences};
use super::registry::{Access, CommandEntry, CommandRegistry};
use super::render::period_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Everything a command can read or change during a session.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub gate: SessionGate,
    pub auth: Option<AuthContext>,
    pub dataset: Option<PropertyDataset>,
    pub feed_label: Option<String>,
    pub period: PeriodSelector,
    pub clock: Box<dyn Clock>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        let mut context = Self::with_parts(mode, config_manager, Box::new(SystemClock))?;
        context.auto_load_feed();
        Ok(context)
    }

    /// Builds a context without touching the feed.
    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let gate = SessionGate::new(config.access_password.clone());
        let auth = gate.open_context(clock.now());
        let period = PeriodSelector::year(clock.today().year());

        let context = ShellContext {
            mode,
            registry,
            config_manager,
            config,
            gate,
            auth,
            dataset: None,
            feed_label: None,
            period,
            clock,
            running: true,
        };
        context.apply_output_preferences();
        tracing::debug!(mode = ?mode, locked = context.auth.is_none(), "shell context ready");
        Ok(context)
    }

    pub(crate) fn prompt(&self) -> String {
        let lock = if self.auth.is_some() { "" } else { " (verrouillé)" };
        format!("gîtes [{}]{}> ", self.period, lock)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn rules(&self) -> &ReportRules {
        &self.config.rules
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency
    }

    pub(crate) fn require_dataset(&self) -> Result<&PropertyDataset, CommandError> {
        self.dataset.as_ref().ok_or(CommandError::FeedNotLoaded)
    }

    pub(crate) fn available_years(&self) -> Result<Vec<i32>, CommandError> {
        Ok(available_years(self.require_dataset()?))
    }

    /// Property name as stored in the dataset. Configured names match
    /// case-insensitively, then any property present in the feed.
    pub(crate) fn resolve_property(&self, name: &str) -> Result<String, CommandError> {
        let dataset = self.require_dataset()?;
        if let Some(configured) = self.rules().resolve_property(name) {
            return Ok(configured.to_string());
        }
        let needle = name.trim().to_lowercase();
        dataset
            .property_names()
            .find(|candidate| candidate.to_lowercase() == needle)
            .map(str::to_string)
            .ok_or_else(|| CommandError::UnknownProperty(name.trim().to_string()))
    }

    /// `$GITES_FEED`, else the configured feed path.
    pub(crate) fn resolve_feed_path(&self) -> Option<PathBuf> {
        let override_path = std::env::var_os(FEED_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.config.resolve_feed_path(override_path)
    }

    /// Fetches and parses the feed at `path`, replacing the current dataset.
    pub(crate) fn load_feed(&mut self, path: PathBuf) -> CommandResult {
        let feed = JsonFileFeed::new(path);
        let dataset = load_dataset(&feed)?;
        output::success(format!(
            "Flux chargé depuis {} : {} gîtes, {} réservations.",
            feed.path().display(),
            dataset.len(),
            dataset.record_count()
        ));
        self.feed_label = Some(feed.path().display().to_string());
        self.dataset = Some(dataset);
        Ok(())
    }

    /// Loads the configured feed once access is granted. Failures are
    /// reported and leave the shell usable.
    pub(crate) fn auto_load_feed(&mut self) {
        if self.auth.is_none() || self.dataset.is_some() {
            return;
        }
        let Some(path) = self.resolve_feed_path() else {
            return;
        };
        if let Err(err) = self.load_feed(path) {
            tracing::warn!(error = %err, "automatic feed load failed");
            output::warning(format!("Chargement automatique impossible : {err}"));
        }
    }

    pub(crate) fn set_period(&mut self, period: PeriodSelector) {
        self.period = period;
        output::info(format!("Période : {}", period_label(period)));
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Re-reads the settings that live outside `config`: output colours,
    /// number style and the password gate.
    pub(crate) fn apply_config(&mut self) {
        self.apply_output_preferences();
        self.gate = SessionGate::new(self.config.access_password.clone());
        if !self.gate.requires_password() && self.auth.is_none() {
            self.auth = self.gate.open_context(self.clock.now());
        }
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled && self.mode == CliMode::Interactive,
        });
        set_number_style(NumberStyle::from_locale(&self.config.locale));
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some((handler, access)) = self
            .registry
            .get(command)
            .map(|entry| (entry.handler, entry.access))
        else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };

        if access == Access::Protected && self.auth.is_none() {
            return Err(CommandError::AccessDenied);
        }

        tracing::debug!(command, args = args.len(), "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Commande inconnue `{}`. Tapez `help` pour la liste des commandes.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Vouliez-vous dire `{}` ?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Quitter le tableau de bord ?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("`help <commande>` pour l'usage.");
            }
            CommandError::FeedNotLoaded => {
                output::error(CommandError::FeedNotLoaded);
                output::hint("Essayez `load chemin/vers/flux.json`.");
            }
            other => {
                tracing::debug!(error = ?other, "command failed");
                output::error(other);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Aucune donnée chargée.")]
    FeedNotLoaded,
    #[error("Accès refusé. Connectez-vous avec `login`.")]
    AccessDenied,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Gîte inconnu : {0}")]
    UnknownProperty(String),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Dashboard(DashboardError::from(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Dashboard(DashboardError::from(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{run, script_context};
    use super::*;

    #[test]
    fn period_defaults_to_the_current_year() {
        let (context, _dir) = script_context(Config::default());
        assert_eq!(context.period, PeriodSelector::year(2024));
        assert!(context.auth.is_some());
        assert_eq!(context.prompt(), "gîtes [2024]> ");
    }

    #[test]
    fn protected_commands_need_login() {
        let config = Config {
            access_password: Some("tellthem".into()),
            ..Config::default()
        };
        let (mut context, _dir) = script_context(config);
        assert!(context.prompt().ends_with("(verrouillé)> "));

        let err = run(&mut context, &["summary"]).expect_err("locked");
        assert!(matches!(err, CommandError::AccessDenied));
        // help stays public
        run(&mut context, &["help"]).expect("help");

        let err = run(&mut context, &["login nope"]).expect_err("wrong password");
        assert!(matches!(err, CommandError::Access(AccessError::WrongPassword)));

        run(&mut context, &["login tellthem"]).expect("login");
        let err = run(&mut context, &["summary"]).expect_err("no feed");
        assert!(matches!(err, CommandError::FeedNotLoaded));

        run(&mut context, &["logout"]).expect("logout");
        assert!(context.auth.is_none());
    }

    #[test]
    fn unknown_commands_do_not_fail() {
        let (mut context, _dir) = script_context(Config::default());
        assert_eq!(
            context.process_line("sumary").expect("suggest"),
            LoopControl::Continue
        );
        assert_eq!(context.process_line("exit").expect("exit"), LoopControl::Exit);
    }

    #[test]
    fn properties_resolve_case_insensitively() {
        let (mut context, _dir) = script_context(Config::default());
        let mut dataset = PropertyDataset::new();
        dataset.insert("Liberté", Vec::new());
        dataset.insert("Annexe", Vec::new());
        context.dataset = Some(dataset);

        assert_eq!(context.resolve_property("liberté").expect("configured"), "Liberté");
        assert_eq!(context.resolve_property(" ANNEXE ").expect("feed only"), "Annexe");
        assert!(matches!(
            context.resolve_property("Manoir"),
            Err(CommandError::UnknownProperty(name)) if name == "Manoir"
        ));
    }
}
