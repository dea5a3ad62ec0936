//! Payment label normalisation.

/// Lower-cases and folds the French accents found in channel labels
/// (`éèêë` to `e`, `àâ` to `a`).
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'à' | 'â' => 'a',
            other => other,
        })
        .collect()
}

/// Trimmed, lower-cased label, used for the exclusion check.
pub fn canonical_label(label: &str) -> String {
    label.trim().to_lowercase()
}
