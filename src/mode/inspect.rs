//! Upload inspection mode

use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::normalize::{ChartInput, ChartKind, FieldMapping, normalize};
use crate::output::{print_metadata, print_preview, print_warning};
use crate::settings::Settings;

use super::load_upload;

/// Print upload metadata, a preview of the first records and the detected shape
pub fn run_inspect(path: &Path, settings: &Settings) -> Result<()> {
    let parsed = load_upload(path)?;
    print_metadata(&parsed.metadata, settings);
    print_preview(&parsed.records, &parsed.metadata.columns, settings);
    println!();

    let input = match ChartInput::from_records(parsed.records) {
        Ok(input) => input,
        Err(e) => {
            print_warning(&e.to_string());
            return Ok(());
        }
    };
    println!("{} {}", "Shape:".bold(), input.describe());

    let data = normalize(&input, ChartKind::Bar, &FieldMapping::default(), settings);
    if !data.is_empty() {
        let totals: Vec<String> = data
            .series
            .iter()
            .map(|s| format!("{} {}", s.name, settings.format_currency(s.total())))
            .collect();
        println!("{} {}", "Totals:".bold(), totals.join(", "));
    }
    Ok(())
}
