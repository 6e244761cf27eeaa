//! Number, currency and date formatting driven by settings

use chrono::{DateTime, Datelike, Utc};

use super::NumberFormat;

const COMPACT_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Format a number according to the selected number format
pub fn format_number(value: f64, format: NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match format {
        NumberFormat::Comma => group_fixed(value, 3, true),
        NumberFormat::Compact => format_compact(value),
        // Decimal has no formatter of its own and shows the raw value
        NumberFormat::Standard | NumberFormat::Decimal => value.to_string(),
    }
}

/// Compact notation with at most one fraction digit (1.2K, 45M)
fn format_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let mut scaled = value.abs();
    let mut tier = 0;
    while scaled >= 1000.0 && tier < COMPACT_SUFFIXES.len() - 1 {
        scaled /= 1000.0;
        tier += 1;
    }
    let mut rounded = (scaled * 10.0).round() / 10.0;
    // 999_950 rounds up to 1000K; carry into the next tier
    if rounded >= 1000.0 && tier < COMPACT_SUFFIXES.len() - 1 {
        rounded = ((rounded / 1000.0) * 10.0).round() / 10.0;
        tier += 1;
    }
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}{}{}", sign, trim_fraction(rounded, 1), COMPACT_SUFFIXES[tier])
}

/// Format a currency amount with the symbol for its ISO code
pub fn format_currency(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let (prefix, digits) = match currency {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "JPY" => ("¥", 0),
        "CAD" => ("CA$", 2),
        _ => ("", 2),
    };
    let body = group_fixed(value.abs(), digits, false);
    let sign = if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if prefix.is_empty() {
        format!("{}{}\u{a0}{}", sign, currency, body)
    } else {
        format!("{}{}{}", sign, prefix, body)
    }
}

/// Render a date with a `YYYY`/`MM`/`DD` pattern such as `MM/DD/YYYY`
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    pattern
        .replace("YYYY", &format!("{:04}", date.year()))
        .replace("MM", &format!("{:02}", date.month()))
        .replace("DD", &format!("{:02}", date.day()))
}

/// Round to `digits` fraction digits and insert thousands separators.
/// With `trim`, trailing fraction zeros are dropped.
fn group_fixed(value: f64, digits: usize, trim: bool) -> String {
    let fixed = format!("{:.*}", digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = if trim {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };
    let is_zero = grouped.chars().all(|c| c == '0' || c == ',') && frac.chars().all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

fn trim_fraction(value: f64, digits: usize) -> String {
    let fixed = format!("{:.*}", digits, value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
