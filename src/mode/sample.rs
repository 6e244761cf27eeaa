//! Sample dataset mode

use std::path::Path;

use anyhow::{Context, Result};

use crate::normalize::ChartInput;
use crate::output::{print_note, print_saved};
use crate::sample::SampleKind;

/// Print a bundled dataset, or write it to `output`
pub fn run_sample(kind: SampleKind, output: Option<&Path>) -> Result<()> {
    let dataset = kind.dataset();
    let shape = ChartInput::from_value(dataset.clone())?.describe();
    let text = serde_json::to_string_pretty(&dataset)?;

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(kind.file_name())
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, text + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_saved("sample data", &path);
        }
        None => println!("{}", text),
    }
    print_note(&format!(
        "{}; render it with -k {}",
        shape,
        kind.chart_kind().name()
    ));
    Ok(())
}
