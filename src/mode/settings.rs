//! Settings and palette modes

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::output::{print_palettes, print_settings, print_warning, swatch};
use crate::settings::{ColorScheme, SettingKey, SettingsStorage, SettingsStore, palette_by_name};

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show every setting
    Show,
    /// Print one setting
    Get {
        /// Setting name (e.g. colorScheme, numberFormat)
        key: String,
    },
    /// Change one setting and persist it
    Set { key: String, value: String },
    /// Restore the defaults
    Reset,
}

/// Run a settings subcommand against the store
pub fn run_settings<S: SettingsStorage>(
    store: &mut SettingsStore<S>,
    command: &SettingsCommand,
) -> Result<()> {
    store.subscribe(|settings| {
        tracing::info!(
            "settings changed: scheme={} format={} animation={}ms",
            settings.color_scheme,
            settings.number_format,
            settings.animation_duration_ms()
        );
    });

    match command {
        SettingsCommand::Show => print_settings(store.settings()),
        SettingsCommand::Get { key } => {
            let key = key
                .parse::<SettingKey>()
                .map_err(|_| crate::settings::SettingsError::UnknownKey(key.clone()))?;
            println!("{}", store.settings().get(key));
        }
        SettingsCommand::Set { key, value } => {
            store
                .update_named(key, value)
                .with_context(|| format!("Cannot set {}", key))?;
            println!("{} = {}", key.bold(), value);
        }
        SettingsCommand::Reset => {
            store.reset();
            print_settings(store.settings());
        }
    }
    Ok(())
}

/// List every palette, or show the colors of one
pub fn run_palettes<S: SettingsStorage>(store: &SettingsStore<S>, name: Option<&str>) {
    let Some(name) = name else {
        print_palettes(store.settings());
        return;
    };

    if name.parse::<ColorScheme>().is_err() {
        print_warning(&format!("Unknown color scheme '{}', showing blue", name));
    }
    for color in palette_by_name(name) {
        println!("{}", swatch(color));
    }
}
