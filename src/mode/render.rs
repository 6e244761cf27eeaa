//! Chart rendering and export mode

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::chart::{ChartOptions, ChartTheme, ExportFormat, build_chart, export_chart};
use crate::normalize::{ChartInput, ChartKind, FieldMapping, normalize};
use crate::output::{print_error, print_saved};
use crate::settings::Settings;

use super::load_upload;

/// Options for one render invocation
pub struct RenderArgs {
    pub file: PathBuf,
    pub kind: ChartKind,
    pub formats: Vec<ExportFormat>,
    pub out_dir: PathBuf,
    pub name: Option<String>,
    pub fields: FieldMapping,
    pub title: Option<String>,
    pub theme: ChartTheme,
}

/// Load a data file, normalize it and export the chart in every requested format
pub fn run_render(args: &RenderArgs, settings: &Settings) -> Result<()> {
    if !args.out_dir.is_dir() {
        bail!("Directory does not exist: {}", args.out_dir.display());
    }

    let parsed = load_upload(&args.file)?;
    let input = ChartInput::from_records(parsed.records)
        .with_context(|| format!("Cannot chart {}", parsed.metadata.name))?;

    let data = normalize(&input, args.kind, &args.fields, settings);
    tracing::debug!(
        "normalized {} series over {} categories",
        data.series.len(),
        data.categories.len()
    );

    let options = ChartOptions {
        title: args.title.clone(),
        theme: args.theme,
    };
    let chart = build_chart(&data, args.kind, settings, &options)
        .with_context(|| format!("Cannot render {}", parsed.metadata.name))?;

    let base = args
        .name
        .clone()
        .unwrap_or_else(|| base_name(&args.file, args.kind));
    let outcomes = export_chart(
        &chart,
        &args.formats,
        &args.out_dir,
        &base,
        settings,
        Utc::now(),
    );

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => print_saved(&format!("{} chart", args.kind.name()), &outcome.path),
            Err(e) => {
                failed += 1;
                print_error(&format!("{} export failed: {}", outcome.format.extension(), e));
            }
        }
    }

    if failed == outcomes.len() {
        bail!("No chart was exported");
    }
    Ok(())
}

/// File stem of the input, or the chart type when the stem is unusable
fn base_name(file: &Path, kind: ChartKind) -> String {
    file.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-chart", kind.name()))
}
