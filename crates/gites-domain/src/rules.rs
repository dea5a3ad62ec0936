//! Business rules that shape the aggregates.
//!
//! Every constant the reports depend on lives here so it can be overridden
//! from configuration and exercised in tests without touching the services.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROPERTIES: [&str; 4] = ["Phonsine", "Gree", "Edmond", "Liberté"];
pub const DEFAULT_EXCLUDED_CHANNEL: &str = "homeexchange";
pub const DEFAULT_UNDEFINED_CHANNEL_LABEL: &str = "Indéfini";
pub const DEFAULT_DECLARABLE_CHANNELS: [&str; 5] =
    ["Abritel", "Airbnb", "Chèque", "Virement", "Gites de France"];

/// A named bucket of payment channels, matched by substring on the
/// normalised channel label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentGroup {
    pub label: String,
    pub patterns: Vec<String>,
}

impl PaymentGroup {
    pub fn new(label: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            label: label.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// A person declaring the revenue of a set of properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub name: String,
    pub properties: Vec<String>,
}

impl Beneficiary {
    pub fn new(name: impl Into<String>, properties: &[&str]) -> Self {
        Self {
            name: name.into(),
            properties: properties.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Simplified social-contribution ratios applied to gross revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    pub contribution_rate: f64,
    pub net_rate: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            contribution_rate: 0.06,
            net_rate: 0.94,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRules {
    #[serde(default = "ReportRules::default_properties")]
    pub properties: Vec<String>,
    /// Compared against the trimmed, lower-cased payment label.
    #[serde(default = "ReportRules::default_excluded_channel")]
    pub excluded_channel: String,
    #[serde(default = "ReportRules::default_undefined_channel_label")]
    pub undefined_channel_label: String,
    /// Ordered by precedence: the first matching group wins.
    #[serde(default = "ReportRules::default_payment_groups")]
    pub payment_groups: Vec<PaymentGroup>,
    #[serde(default = "ReportRules::default_beneficiaries")]
    pub beneficiaries: Vec<Beneficiary>,
    /// Exact, case-sensitive channel names counted in the declaration split.
    #[serde(default = "ReportRules::default_declarable_channels")]
    pub declarable_channels: Vec<String>,
    #[serde(default)]
    pub tax: TaxRates,
}

impl Default for ReportRules {
    fn default() -> Self {
        Self {
            properties: Self::default_properties(),
            excluded_channel: Self::default_excluded_channel(),
            undefined_channel_label: Self::default_undefined_channel_label(),
            payment_groups: Self::default_payment_groups(),
            beneficiaries: Self::default_beneficiaries(),
            declarable_channels: Self::default_declarable_channels(),
            tax: TaxRates::default(),
        }
    }
}

impl ReportRules {
    pub fn default_properties() -> Vec<String> {
        DEFAULT_PROPERTIES.iter().map(|p| p.to_string()).collect()
    }

    pub fn default_excluded_channel() -> String {
        DEFAULT_EXCLUDED_CHANNEL.into()
    }

    pub fn default_undefined_channel_label() -> String {
        DEFAULT_UNDEFINED_CHANNEL_LABEL.into()
    }

    pub fn default_payment_groups() -> Vec<PaymentGroup> {
        vec![
            PaymentGroup::new("Airbnb", &["airbnb"]),
            PaymentGroup::new("Abritel", &["abritel"]),
            PaymentGroup::new("Gites de France", &["gites de france"]),
            PaymentGroup::new("Virement / chèque", &["virement", "chèque", "cheque"]),
        ]
    }

    pub fn default_beneficiaries() -> Vec<Beneficiary> {
        vec![
            Beneficiary::new("Sébastien", &["Phonsine", "Gree", "Edmond"]),
            Beneficiary::new("Soazig", &["Liberté"]),
        ]
    }

    pub fn default_declarable_channels() -> Vec<String> {
        DEFAULT_DECLARABLE_CHANNELS
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    pub fn is_declarable(&self, channel: &str) -> bool {
        self.declarable_channels.iter().any(|c| c == channel)
    }

    /// Case-insensitive lookup of a configured property name.
    pub fn resolve_property(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.properties
            .iter()
            .find(|p| p.to_lowercase() == needle)
            .map(String::as_str)
    }
}
