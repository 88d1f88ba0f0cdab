//! Number and name formatting shared by the sections.

use chrono::{DateTime, Utc};

use krump_hal::clamp_probability;

/// Probability as a percentage with a fixed number of decimals.
pub fn format_percent(probability: f64, decimals: usize) -> String {
    let pct = clamp_probability(probability) * 100.0;
    format!("{pct:.decimals$}%")
}

/// Coordinate with one decimal, so output does not depend on float noise.
pub(crate) fn coord(value: f64) -> String {
    format!("{value:.1}")
}

/// Lowercase ASCII slug for filenames, `circuit` when nothing usable remains.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
        if slug.len() >= 40 {
            break;
        }
    }

    if slug.is_empty() {
        "circuit".to_string()
    } else {
        slug
    }
}

/// `YYYYMMDD_HHMMSS`, used as the default unique part of filenames.
pub fn timestamp_slug(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Keep at most `max` characters, marking truncation with an ellipsis.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
