//! Text formatting helpers shared by the document renderers and the terminal
//! output.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::error::{ReportError, ReportResult};

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Format a percentage with one decimal, e.g. `80.0%`
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format a change with an explicit sign for non-negative values, e.g. `+20.0%`
pub fn format_signed_percentage(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Keep the first `max_chars` characters of `s`, followed by an ellipsis
/// when anything was cut
///
/// Counts characters, not bytes, so accented text is never split.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars).collect();
        format!("{}{}", kept, ELLIPSIS)
    }
}

/// Lower-case a label and replace whitespace runs with single hyphens
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut in_space = false;
    for ch in label.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(ch);
            in_space = false;
        }
    }
    slug
}

/// Format a date with a strftime pattern
///
/// An unknown or incomplete specifier is a configuration error.
pub fn format_date(date: NaiveDate, pattern: &str) -> ReportResult<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| ReportError::Config(format!("Invalid date format '{}'", pattern)))?;
    Ok(out)
}
