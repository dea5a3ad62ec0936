use gites_config::ConfigError;
use gites_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures of the layers below the shell: feed loading and configuration.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Feed error: {0}")]
    Feed(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fatal shell error; ends the process with a non-zero status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Dashboard(DashboardError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Dashboard(DashboardError::from(err))
    }
}
