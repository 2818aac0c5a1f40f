//! Typed raw cells and their text rendering.

use chrono::NaiveDateTime;

/// Display hint attached to a numeric cell by its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    #[default]
    General,
    /// Render as a whole-number percentage (`0.98` → `98%`).
    Percent,
    /// Render with thousands separators and a fixed number of decimals.
    Grouped { decimals: usize },
}

/// One cell as delivered by a source, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number { value: f64, format: NumberFormat },
    Bool(bool),
    Date(NaiveDateTime),
}

impl RawCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number {
            value,
            format: NumberFormat::General,
        }
    }

    /// Normalized text: dates as `DD Month YYYY`, hinted numbers formatted,
    /// everything trimmed.
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => clean(text),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Date(date) => date.format("%d %B %Y").to_string(),
            Self::Number { value, format } => match format {
                NumberFormat::General => format_general(*value),
                NumberFormat::Percent => format!("{:.0}%", value * 100.0),
                NumberFormat::Grouped { decimals } => format_grouped(*value, *decimals),
            },
        }
    }
}

fn clean(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn format_general(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        grouped.push('-');
    }
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
