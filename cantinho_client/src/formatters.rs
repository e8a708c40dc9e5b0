//! Display formatting shared by the GUI and the CLI.

use chrono::{DateTime, Utc};

pub fn format_currency(value: f64) -> String {
    format!("R$ {value:.2}")
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Profit percentage, or "-" when the buy price is zero
pub fn format_optional_percentage(value: Option<f64>) -> String {
    value.map(format_percentage).unwrap_or_else(|| "-".to_string())
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parses a user-typed decimal that may use a comma as the separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
