use colored::*;
use serde_json::Value;

use crate::ingest::{Record, UploadMetadata};
use crate::settings::{SCHEMES, Settings, hex_channels};

/// Rows shown by the record preview
pub(crate) const PREVIEW_ROWS: usize = 5;

/// Widest a preview cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 18;

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub(crate) fn print_note(msg: &str) {
    eprintln!("{}: {}", "note".cyan().bold(), msg);
}

pub(crate) fn print_saved(what: &str, path: &std::path::Path) {
    eprintln!("{} {} to: {}", "saved".green().bold(), what, path.display());
}

pub(crate) fn print_metadata(meta: &UploadMetadata, settings: &Settings) {
    println!("{} {}", style_label("File:"), meta.name);
    println!(
        "{} {} bytes, {}",
        style_label("Size:"),
        settings.format_number(meta.size as f64),
        meta.mime_type
    );
    if let Some(modified) = &meta.last_modified {
        println!("{} {}", style_label("Modified:"), settings.format_date(modified));
    }
    println!(
        "{} {}",
        style_label("Records:"),
        settings.format_number(meta.record_count as f64)
    );
    println!("{} {}", style_label("Columns:"), meta.columns.join(", "));
    println!();
}

/// Table of the first rows, numbers shown in the configured format
pub(crate) fn print_preview(records: &[Record], columns: &[String], settings: &Settings) {
    if records.is_empty() || columns.is_empty() {
        println!("(no records)");
        return;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .take(PREVIEW_ROWS)
        .map(|record| {
            columns
                .iter()
                .map(|c| truncate(&cell_text(record.get(c), settings)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(truncate(c).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", truncate(c), w = *w))
        .collect();
    println!("{}", style_label(&header.join("  ")));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        println!("{}", cells.join("  "));
    }

    if records.len() > PREVIEW_ROWS {
        println!("... {} more", records.len() - PREVIEW_ROWS);
    }
}

fn cell_text(value: Option<&Value>, settings: &Settings) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|v| settings.format_number(v))
            .unwrap_or_else(|| n.to_string()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}~", head)
    }
}

/// Color block for a hex color; plain text when the color is not hex
pub(crate) fn swatch(color: &str) -> String {
    match hex_channels(color) {
        Some((r, g, b)) => format!("{} {}", "  ".on_truecolor(r, g, b), color),
        None => color.to_string(),
    }
}

pub(crate) fn print_palettes(current: &Settings) {
    for info in SCHEMES.iter() {
        let marker = if info.scheme == current.color_scheme {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {:<10} {:<18} {}",
            marker,
            info.name,
            info.label,
            style_label(info.category)
        );
        let swatches: Vec<String> = info.colors.iter().map(|c| swatch(c)).collect();
        println!("    {}", swatches.join(" "));
    }
}

pub(crate) fn print_settings(settings: &Settings) {
    for key in crate::settings::SettingKey::ALL {
        let value = settings.get(key);
        let shown = if key == crate::settings::SettingKey::ColorScheme {
            let colors: Vec<String> = settings
                .palette(crate::settings::PALETTE_SIZE)
                .iter()
                .map(|c| swatch(c))
                .collect();
            format!("{}  {}", value, colors.join(" "))
        } else {
            value
        };
        println!("{:<16} {}", style_label(key.name()), shown);
    }
}
