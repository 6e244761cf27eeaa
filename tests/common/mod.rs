//! Common test utilities

use std::path::{Path, PathBuf};

/// Monthly sales rows with a header
pub const SALES_CSV: &str = "month,users,revenue
Jan,120,1500.50
Feb,150,1720
Mar,90,1310.25
Apr,175,2010
";

/// Chart.js shaped document with two datasets
pub fn chartjs_json() -> String {
    serde_json::json!({
        "labels": ["Q1", "Q2", "Q3", "Q4"],
        "datasets": [
            {"label": "North", "data": [10, 14, 9, 17]},
            {"label": "South", "data": [7, 11, 13, 12]}
        ]
    })
    .to_string()
}

/// Record-set document keyed by country
pub fn records_json() -> String {
    serde_json::json!([
        {"country": "USA", "value": 45},
        {"country": "Canada", "value": 25},
        {"country": "UK", "value": 20}
    ])
    .to_string()
}

/// Write `content` to `dir/name`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Files in `dir` whose name starts with `prefix` and ends with `.ext`
pub fn exported(dir: &Path, prefix: &str, ext: &str) -> Vec<PathBuf> {
    let suffix = format!(".{}", ext);
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix) && n.ends_with(&suffix))
        })
        .collect();
    found.sort();
    found
}

/// True if `name` looks like `{base}_YYYY-MM-DDTHH-MM-SS.{ext}`
pub fn is_timestamped(name: &str, base: &str, ext: &str) -> bool {
    let Some(rest) = name.strip_prefix(&format!("{}_", base)) else {
        return false;
    };
    let Some(stamp) = rest.strip_suffix(&format!(".{}", ext)) else {
        return false;
    };
    let shape = "dddd-dd-ddTdd-dd-dd";
    stamp.len() == shape.len()
        && stamp.chars().zip(shape.chars()).all(|(c, s)| match s {
            'd' => c.is_ascii_digit(),
            other => c == other,
        })
}
