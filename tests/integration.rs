//! Integration tests for dashchart CLI

mod common;

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the dashchart binary
fn dashchart_bin() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("dashchart");
    path
}

/// Run dashchart with a settings file inside `dir`
fn run_dashchart(dir: &TempDir, args: &[&str]) -> std::process::Output {
    let settings = dir.path().join("settings.json");
    Command::new(dashchart_bin())
        .arg("--no-color")
        .arg("--settings")
        .arg(&settings)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute dashchart")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Basic functionality tests
// =============================================================================

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    let output = run_dashchart(&dir, &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Chart dashboard toolkit"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("inspect"));
    assert!(stdout.contains("settings"));
    assert!(stdout.contains("palettes"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    let output = run_dashchart(&dir, &["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dashchart"));
}

// =============================================================================
// Render mode
// =============================================================================

#[test]
fn test_render_csv_to_json_options() {
    let dir = TempDir::new().unwrap();
    let csv = common::write_file(dir.path(), "sales.csv", common::SALES_CSV);

    let output = run_dashchart(
        &dir,
        &[
            "render",
            path_str(&csv),
            "-k",
            "line",
            "-f",
            "json",
            "-o",
            path_str(dir.path()),
        ],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let files = common::exported(dir.path(), "sales_", "json");
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_str().unwrap();
    assert!(common::is_timestamped(name, "sales", "json"), "{}", name);

    let option: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(option["animationDuration"], 1000);
    let text = option.to_string();
    assert!(text.contains("Jan"));
    assert!(text.contains("users"));
}

#[test]
fn test_render_multiple_formats() {
    let dir = TempDir::new().unwrap();
    let json = common::write_file(dir.path(), "quarters.json", &common::chartjs_json());

    let output = run_dashchart(
        &dir,
        &[
            "render",
            path_str(&json),
            "-f",
            "json",
            "-f",
            "html",
            "-o",
            path_str(dir.path()),
            "--name",
            "report",
            "--title",
            "Quarterly Sales",
        ],
    );
    assert!(output.status.success());

    assert_eq!(common::exported(dir.path(), "report_", "json").len(), 1);
    let html = common::exported(dir.path(), "report_", "html");
    assert_eq!(html.len(), 1);
    let content = std::fs::read_to_string(&html[0]).unwrap();
    assert!(content.contains("Quarterly Sales"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("saved"));
}

#[test]
fn test_render_png() {
    let dir = TempDir::new().unwrap();
    let json = common::write_file(dir.path(), "countries.json", &common::records_json());

    let output = run_dashchart(
        &dir,
        &["render", path_str(&json), "-k", "pie", "-o", path_str(dir.path())],
    );
    assert!(output.status.success());

    let files = common::exported(dir.path(), "countries_", "png");
    assert_eq!(files.len(), 1, "PNG file should be created");
    assert!(
        std::fs::metadata(&files[0]).unwrap().len() > 1000,
        "PNG file should have reasonable size"
    );
}

#[test]
fn test_render_pdf() {
    let dir = TempDir::new().unwrap();
    let csv = common::write_file(dir.path(), "sales.csv", common::SALES_CSV);

    let output = run_dashchart(
        &dir,
        &["render", path_str(&csv), "-f", "pdf", "-o", path_str(dir.path())],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let files = common::exported(dir.path(), "sales_", "pdf");
    assert_eq!(files.len(), 1, "PDF file should be created");
    let bytes = std::fs::read(&files[0]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000, "PDF should embed the chart image");
}

#[test]
fn test_render_organization_tree() {
    let dir = TempDir::new().unwrap();

    let output = run_dashchart(&dir, &["sample", "organization", "-o", path_str(dir.path())]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-k tree"));
    let written = dir.path().join("organization-sample-data.json");

    let output = run_dashchart(
        &dir,
        &[
            "render",
            path_str(&written),
            "-k",
            "tree",
            "-f",
            "json",
            "-o",
            path_str(dir.path()),
        ],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let files = common::exported(dir.path(), "organization-sample-data_", "json");
    assert_eq!(files.len(), 1);
    let option: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(option["series"][0]["type"], "tree");
    assert_eq!(option["series"][0]["data"][0]["name"], "Company");
}

#[test]
fn test_render_with_field_mapping() {
    let dir = TempDir::new().unwrap();
    let csv = common::write_file(dir.path(), "sales.csv", common::SALES_CSV);

    let output = run_dashchart(
        &dir,
        &[
            "render",
            path_str(&csv),
            "--x",
            "month",
            "--y",
            "revenue",
            "-f",
            "json",
            "-o",
            path_str(dir.path()),
        ],
    );
    assert!(output.status.success());

    let files = common::exported(dir.path(), "sales_", "json");
    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert!(text.contains("revenue"));
    assert!(text.contains("1720"));
}

#[test]
fn test_render_uses_settings_palette() {
    let dir = TempDir::new().unwrap();
    let json = common::write_file(dir.path(), "quarters.json", &common::chartjs_json());

    let set = run_dashchart(&dir, &["settings", "set", "colorScheme", "green"]);
    assert!(set.status.success());

    let output = run_dashchart(
        &dir,
        &["render", path_str(&json), "-f", "json", "-o", path_str(dir.path())],
    );
    assert!(output.status.success());

    let files = common::exported(dir.path(), "quarters_", "json");
    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert!(text.contains("#10B981"));
    assert!(!text.contains("#3B82F6"));
}

// =============================================================================
// Inspect and sample modes
// =============================================================================

#[test]
fn test_inspect_csv() {
    let dir = TempDir::new().unwrap();
    let csv = common::write_file(dir.path(), "sales.csv", common::SALES_CSV);

    let output = run_dashchart(&dir, &["inspect", path_str(&csv)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sales.csv"));
    assert!(stdout.contains("text/csv"));
    assert!(stdout.contains("Records: 4"));
    assert!(stdout.contains("month, users, revenue"));
    assert!(stdout.contains("Feb"));
    assert!(stdout.contains("record set"));
    assert!(stdout.contains("Totals: users $535.00"));

    let set = run_dashchart(&dir, &["settings", "set", "currency", "EUR"]);
    assert!(set.status.success());
    let output = run_dashchart(&dir, &["inspect", path_str(&csv)]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users €535.00"));
}

#[test]
fn test_inspect_chartjs_json() {
    let dir = TempDir::new().unwrap();
    let json = common::write_file(dir.path(), "quarters.json", &common::chartjs_json());

    let output = run_dashchart(&dir, &["inspect", path_str(&json)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("chart data, 2 series over 4 categories"));
}

#[test]
fn test_sample_to_stdout_and_file() {
    let dir = TempDir::new().unwrap();

    let output = run_dashchart(&dir, &["sample", "sales"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["labels"].as_array().unwrap().len(), 12);

    let output = run_dashchart(&dir, &["sample", "geographic", "-o", path_str(dir.path())]);
    assert!(output.status.success());
    let written = dir.path().join("geographic-sample-data.json");
    assert!(written.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("record set, 6 records; render it with -k bar"));

    // A written sample renders straight away
    let output = run_dashchart(
        &dir,
        &["render", path_str(&written), "-f", "json", "-o", path_str(dir.path())],
    );
    assert!(output.status.success());
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_settings_persist_across_runs() {
    let dir = TempDir::new().unwrap();

    let output = run_dashchart(&dir, &["settings", "get", "numberFormat"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "standard");

    let output = run_dashchart(&dir, &["settings", "set", "numberFormat", "compact"]);
    assert!(output.status.success());
    assert!(dir.path().join("settings.json").exists());

    let output = run_dashchart(&dir, &["settings", "get", "numberFormat"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "compact");

    let output = run_dashchart(&dir, &["settings", "reset"]);
    assert!(output.status.success());

    let output = run_dashchart(&dir, &["settings", "get", "numberFormat"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "standard");
}

#[test]
fn test_settings_show_lists_every_key() {
    let dir = TempDir::new().unwrap();
    let output = run_dashchart(&dir, &["settings", "show"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in [
        "colorScheme",
        "showGrid",
        "showLegend",
        "animationSpeed",
        "numberFormat",
        "currency",
        "dateFormat",
        "timezone",
    ] {
        assert!(stdout.contains(key), "missing {}", key);
    }
}

#[test]
fn test_settings_reject_bad_input() {
    let dir = TempDir::new().unwrap();

    let output = run_dashchart(&dir, &["settings", "set", "fontSize", "12"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown setting"));

    let output = run_dashchart(&dir, &["settings", "set", "colorScheme", "plaid"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"));

    let output = run_dashchart(&dir, &["settings", "get", "colorScheme"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "blue");
}

#[test]
fn test_malformed_settings_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    common::write_file(dir.path(), "settings.json", "{ not json");

    let output = run_dashchart(&dir, &["settings", "get", "showGrid"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");
}

#[test]
fn test_palettes_listing() {
    let dir = TempDir::new().unwrap();
    let output = run_dashchart(&dir, &["palettes"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("blue"));
    assert!(stdout.contains("emerald"));
    assert!(stdout.contains("#3B82F6"));

    let output = run_dashchart(&dir, &["palettes", "nosuch"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("#3B82F6"));
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn test_wrong_extension_error() {
    let dir = TempDir::new().unwrap();
    let txt = common::write_file(dir.path(), "data.txt", "a,b\n1,2\n");

    let output = run_dashchart(&dir, &["render", path_str(&txt), "-o", path_str(dir.path())]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid file type"));
}

#[test]
fn test_invalid_json_error() {
    let dir = TempDir::new().unwrap();
    let json = common::write_file(dir.path(), "broken.json", "{\"labels\": [");

    let output = run_dashchart(&dir, &["inspect", path_str(&json)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON format"));
}

#[test]
fn test_nonexistent_file_error() {
    let dir = TempDir::new().unwrap();
    let output = run_dashchart(&dir, &["inspect", "/nonexistent/file.csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
}

#[test]
fn test_missing_output_directory_error() {
    let dir = TempDir::new().unwrap();
    let csv = common::write_file(dir.path(), "sales.csv", common::SALES_CSV);
    let missing = dir.path().join("nope");

    let output = run_dashchart(&dir, &["render", path_str(&csv), "-o", path_str(&missing)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory does not exist"));
}

#[test]
fn test_empty_data_error() {
    let dir = TempDir::new().unwrap();
    let json = common::write_file(dir.path(), "empty.json", "[]");

    let output = run_dashchart(&dir, &["render", path_str(&json), "-o", path_str(dir.path())]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No data to render"));
}
