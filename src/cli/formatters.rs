//! Number rendering driven by the configured locale. French style by
//! default: `1 234,56 €`, `45,2 %`.

use std::sync::{OnceLock, RwLock};

/// Thousands and decimal separators of a locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberStyle {
    pub thousands: char,
    pub decimal: char,
}

impl NumberStyle {
    pub const FRENCH: NumberStyle = NumberStyle {
        thousands: ' ',
        decimal: ',',
    };

    /// Style for a `lang-REGION` tag; unknown languages fall back to French.
    pub fn from_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => NumberStyle {
                thousands: ',',
                decimal: '.',
            },
            "de" | "es" | "it" | "nl" | "pt" => NumberStyle {
                thousands: '.',
                decimal: ',',
            },
            _ => Self::FRENCH,
        }
    }
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self::FRENCH
    }
}

static NUMBER_STYLE: OnceLock<RwLock<NumberStyle>> = OnceLock::new();

pub fn set_number_style(style: NumberStyle) {
    let lock = NUMBER_STYLE.get_or_init(|| RwLock::new(NumberStyle::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = style;
    }
}

pub fn current_number_style() -> NumberStyle {
    NUMBER_STYLE
        .get_or_init(|| RwLock::new(NumberStyle::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Fixed-decimal rendering in the current locale style.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format_decimal_with(value, decimals, current_number_style())
}

/// Fixed-decimal rendering with grouped thousands.
pub fn format_decimal_with(value: f64, decimals: usize, style: NumberStyle) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let is_zero = rendered.chars().all(|ch| ch == '0' || ch == '.');

    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(integer, style.thousands));
    if let Some(fraction) = fraction {
        out.push(style.decimal);
        out.push_str(fraction);
    }
    out
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{} {}", format_decimal(amount, 2), currency_symbol(currency))
}

/// Whole quantities without decimals, fractional ones with one.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_decimal(value, 0)
    } else {
        format_decimal(value, 1)
    }
}

/// Ratio rendered as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{} %", format_decimal(ratio * 100.0, 1))
}

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "CHF" => "CHF",
        other => other,
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_french_grouping() {
        assert_eq!(format_amount(1234.56, "EUR"), "1 234,56 €");
        assert_eq!(format_amount(0.0, "EUR"), "0,00 €");
        assert_eq!(format_amount(1_000_000.0, "EUR"), "1 000 000,00 €");
        assert_eq!(format_amount(-42.5, "USD"), "-42,50 $");
        assert_eq!(format_amount(12.0, "JPY"), "12,00 JPY");
    }

    #[test]
    fn negative_zero_drops_the_sign() {
        assert_eq!(format_decimal(-0.001, 2), "0,00");
        assert_eq!(format_decimal(f64::NAN, 1), "0,0");
    }

    #[test]
    fn quantities_and_percentages() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2,5");
        assert_eq!(format_quantity(1500.0), "1 500");
        assert_eq!(format_percent(0.4523), "45,2 %");
        assert_eq!(format_percent(1.0), "100,0 %");
    }

    #[test]
    fn locale_picks_the_separators() {
        let english = NumberStyle::from_locale("en-US");
        assert_eq!(format_decimal_with(1234567.891, 2, english), "1,234,567.89");
        let german = NumberStyle::from_locale("de_DE");
        assert_eq!(format_decimal_with(1234.5, 1, german), "1.234,5");
        assert_eq!(NumberStyle::from_locale("fr-FR"), NumberStyle::FRENCH);
        assert_eq!(NumberStyle::from_locale(""), NumberStyle::FRENCH);
    }
}
