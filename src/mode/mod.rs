//! CLI mode implementations

mod inspect;
mod render;
mod sample;
mod settings;

pub use inspect::run_inspect;
pub use render::{RenderArgs, run_render};
pub use sample::run_sample;
pub use settings::{SettingsCommand, run_palettes, run_settings};

use std::path::Path;

use anyhow::{Context, Result};

use crate::ingest::{self, ParsedUpload, UploadedFile};

/// Validate and parse an uploaded data file
pub fn load_upload(path: &Path) -> Result<ParsedUpload> {
    let file = UploadedFile::from_path(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;

    let mut outcome = None;
    ingest::upload(&file, |result| outcome = Some(result));

    let parsed = outcome
        .context("Upload did not complete")?
        .with_context(|| format!("Cannot load {}", file.name()))?;
    Ok(parsed)
}
