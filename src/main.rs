mod chart;
mod ingest;
mod mode;
mod normalize;
mod output;
mod sample;
mod settings;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chart::{ChartTheme, ExportFormat};
use mode::{RenderArgs, SettingsCommand};
use normalize::{ChartKind, FieldMapping};
use output::{print_error, print_warning};
use sample::SampleKind;
use settings::{FileStorage, MemoryStorage, SettingsStorage, SettingsStore};

#[derive(Parser)]
#[command(
    name = "dashchart",
    version,
    about = "Chart dashboard toolkit: turn CSV/JSON data into styled chart exports",
    after_help = "Examples:
  dashchart render sales.csv                          Bar chart as PNG
  dashchart render data.json -k line -f svg -f html   Line chart as SVG and HTML
  dashchart render users.csv --x region --y users     Pick the category and value columns
  dashchart render org.json -k tree -f pdf            Tree chart as a PDF page
  dashchart inspect data.json                         Show metadata and the first rows
  dashchart sample sales -o .                         Write the bundled sales dataset
  dashchart settings set colorScheme green            Change the chart palette
  dashchart palettes                                  List color schemes"
)]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a data file as a chart and export it
    Render {
        /// Data file (.csv or .json)
        file: PathBuf,

        /// Chart type
        #[arg(short, long, value_enum, default_value = "bar")]
        kind: ChartKind,

        /// Export format (repeat for several)
        #[arg(short, long = "format", value_enum, default_value = "png")]
        formats: Vec<ExportFormat>,

        /// Output directory
        #[arg(short, long, default_value = ".", value_name = "DIR")]
        output: PathBuf,

        /// Base file name (defaults to the input file stem)
        #[arg(long, value_name = "BASE")]
        name: Option<String>,

        /// Category field for record data
        #[arg(long, value_name = "FIELD")]
        x: Option<String>,

        /// Value field for record data
        #[arg(long, value_name = "FIELD")]
        y: Option<String>,

        /// Chart title
        #[arg(long, value_name = "TEXT")]
        title: Option<String>,

        /// Chart background theme
        #[arg(long, value_enum, default_value = "light")]
        theme: ChartTheme,
    },

    /// Show file metadata and a preview of its records
    Inspect {
        /// Data file (.csv or .json)
        file: PathBuf,
    },

    /// Print or write a bundled sample dataset
    Sample {
        #[arg(value_enum)]
        kind: SampleKind,

        /// Output file or directory
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// List color schemes, or show one palette
    Palettes {
        /// Scheme name
        name: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run<S: SettingsStorage>(command: Command, mut store: SettingsStore<S>) -> Result<()> {
    match command {
        Command::Render {
            file,
            kind,
            formats,
            output,
            name,
            x,
            y,
            title,
            theme,
        } => {
            let args = RenderArgs {
                file,
                kind,
                formats,
                out_dir: output,
                name,
                fields: FieldMapping {
                    category: x,
                    value: y,
                },
                title,
                theme,
            };
            mode::run_render(&args, store.settings())
        }
        Command::Inspect { file } => mode::run_inspect(&file, store.settings()),
        Command::Sample { kind, output } => mode::run_sample(kind, output.as_deref()),
        Command::Settings { command } => mode::run_settings(&mut store, &command),
        Command::Palettes { name } => {
            mode::run_palettes(&store, name.as_deref());
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }

    init_logging(args.verbose);

    let storage = match args.settings {
        Some(path) => Some(FileStorage::new(path)),
        None => FileStorage::default_location().ok(),
    };

    let result = match storage {
        Some(storage) => {
            tracing::debug!("settings file: {}", storage.path().display());
            run(args.command, SettingsStore::open(storage))
        }
        None => {
            print_warning("No config directory found; settings will not be saved");
            run(args.command, SettingsStore::open(MemoryStorage::default()))
        }
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
