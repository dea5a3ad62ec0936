use std::path::PathBuf;

use gites_domain::ReportRules;
use serde::{Deserialize, Serialize};

/// Dashboard preferences and the rules the reports are computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// JSON booking feed read by `load` when no path is given.
    pub feed_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Shared password for the session gate. Absent means open access.
    pub access_password: Option<String>,

    #[serde(default)]
    pub rules: ReportRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            feed_path: None,
            access_password: None,
            rules: ReportRules::default(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "fr-FR".into()
    }

    pub fn default_currency() -> String {
        "EUR".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Feed path to use, the `override_path` (usually from the environment)
    /// taking precedence over the stored one.
    pub fn resolve_feed_path(&self, override_path: Option<PathBuf>) -> Option<PathBuf> {
        override_path.or_else(|| self.feed_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"currency":"CHF"}"#).unwrap();
        assert_eq!(config.currency, "CHF");
        assert_eq!(config.locale, "fr-FR");
        assert_eq!(config.rules, ReportRules::default());
        assert!(config.access_password.is_none());
    }

    #[test]
    fn override_path_wins() {
        let config = Config {
            feed_path: Some(PathBuf::from("stored.json")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_feed_path(Some(PathBuf::from("env.json"))),
            Some(PathBuf::from("env.json"))
        );
        assert_eq!(config.resolve_feed_path(None), Some(PathBuf::from("stored.json")));
        assert_eq!(Config::default().resolve_feed_path(None), None);
    }
}
