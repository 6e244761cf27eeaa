//! Display preferences shared by every chart, and the values derived from them

mod format;
mod palette;
mod storage;


use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use palette::{ColorScheme, PALETTE_SIZE, SCHEMES, hex_channels, palette_by_name, with_alpha};
pub use storage::{FileStorage, MemoryStorage, SettingsStorage, StorageError};

/// Animation speed preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    pub fn duration_ms(self) -> u32 {
        match self {
            AnimationSpeed::Slow => 2000,
            AnimationSpeed::Medium => 1000,
            AnimationSpeed::Fast => 500,
        }
    }
}

/// Number display style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Standard,
    Comma,
    Compact,
    Decimal,
}

macro_rules! keyword_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const NAMES: &'static [&'static str] = &[$($name),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

keyword_enum!(AnimationSpeed {
    Slow => "slow",
    Medium => "medium",
    Fast => "fast",
});

keyword_enum!(NumberFormat {
    Standard => "standard",
    Comma => "comma",
    Compact => "compact",
    Decimal => "decimal",
});

keyword_enum!(SettingKey {
    ColorScheme => "colorScheme",
    ShowGrid => "showGrid",
    ShowLegend => "showLegend",
    AnimationSpeed => "animationSpeed",
    NumberFormat => "numberFormat",
    Currency => "currency",
    DateFormat => "dateFormat",
    Timezone => "timezone",
});

/// Name of one field of [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ColorScheme,
    ShowGrid,
    ShowLegend,
    AnimationSpeed,
    NumberFormat,
    Currency,
    DateFormat,
    Timezone,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::ColorScheme,
        SettingKey::ShowGrid,
        SettingKey::ShowLegend,
        SettingKey::AnimationSpeed,
        SettingKey::NumberFormat,
        SettingKey::Currency,
        SettingKey::DateFormat,
        SettingKey::Timezone,
    ];
}

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("unknown setting '{0}' (expected one of: {keys})", keys = SettingKey::NAMES.join(", "))]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: SettingKey,
        value: String,
        expected: String,
    },
}

/// Full settings record. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub color_scheme: ColorScheme,
    pub show_grid: bool,
    pub show_legend: bool,
    pub animation_speed: AnimationSpeed,
    pub number_format: NumberFormat,
    pub currency: String,
    pub date_format: String,
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Blue,
            show_grid: true,
            show_legend: true,
            animation_speed: AnimationSpeed::Medium,
            number_format: NumberFormat::Standard,
            currency: "USD".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

/// Stroke and point styling for one line-type series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub border_color: String,
    pub background_color: String,
    pub point_border_color: String,
    pub border_width: f64,
    pub point_radius: f64,
    pub point_hover_radius: f64,
}

/// Alpha applied to a series color for its area fill
const FILL_ALPHA: f64 = 0.1;

impl Settings {
    /// Current value of one field, in its persisted text form
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::ColorScheme => self.color_scheme.to_string(),
            SettingKey::ShowGrid => self.show_grid.to_string(),
            SettingKey::ShowLegend => self.show_legend.to_string(),
            SettingKey::AnimationSpeed => self.animation_speed.to_string(),
            SettingKey::NumberFormat => self.number_format.to_string(),
            SettingKey::Currency => self.currency.clone(),
            SettingKey::DateFormat => self.date_format.clone(),
            SettingKey::Timezone => self.timezone.clone(),
        }
    }

    /// Replace one field after checking the value against its domain
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        let invalid = |expected: &str| SettingsError::InvalidValue {
            key,
            value: value.to_string(),
            expected: expected.to_string(),
        };

        match key {
            SettingKey::ColorScheme => {
                self.color_scheme = value.parse().map_err(|_| {
                    let names: Vec<&str> = SCHEMES.iter().map(|s| s.name).collect();
                    invalid(&format!("one of {}", names.join(", ")))
                })?;
            }
            SettingKey::ShowGrid => {
                self.show_grid = value.parse().map_err(|_| invalid("true or false"))?;
            }
            SettingKey::ShowLegend => {
                self.show_legend = value.parse().map_err(|_| invalid("true or false"))?;
            }
            SettingKey::AnimationSpeed => {
                self.animation_speed = value
                    .parse()
                    .map_err(|_| invalid(&format!("one of {}", AnimationSpeed::NAMES.join(", "))))?;
            }
            SettingKey::NumberFormat => {
                self.number_format = value
                    .parse()
                    .map_err(|_| invalid(&format!("one of {}", NumberFormat::NAMES.join(", "))))?;
            }
            SettingKey::Currency => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
                    return Err(invalid("a three-letter ISO 4217 code such as USD"));
                }
                self.currency = value.to_string();
            }
            SettingKey::DateFormat => {
                if !["YYYY", "MM", "DD"].iter().all(|token| value.contains(token)) {
                    return Err(invalid("a pattern containing YYYY, MM and DD"));
                }
                self.date_format = value.to_string();
            }
            SettingKey::Timezone => {
                if value.is_empty() || value.chars().any(char::is_whitespace) {
                    return Err(invalid("a timezone name such as UTC"));
                }
                self.timezone = value.to_string();
            }
        }
        Ok(())
    }

    /// Build a record from a persisted blob, key by key over the defaults.
    /// Keys that are unknown or out of domain are logged and skipped.
    pub fn from_blob(blob: &str) -> Settings {
        let mut settings = Settings::default();
        let map = match serde_json::from_str::<Value>(blob) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("discarding settings blob: not a JSON object");
                return settings;
            }
            Err(e) => {
                tracing::warn!("discarding settings blob: {}", e);
                return settings;
            }
        };

        for (name, value) in &map {
            let key = match name.parse::<SettingKey>() {
                Ok(k) => k,
                Err(_) => {
                    tracing::warn!("ignoring unknown setting '{}'", name);
                    continue;
                }
            };
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if let Err(e) = settings.set(key, &raw) {
                tracing::warn!("ignoring stored setting: {}", e);
            }
        }
        settings
    }

    /// First `count` colors of the selected palette, clamped to the palette size
    pub fn palette(&self, count: usize) -> Vec<&'static str> {
        self.color_scheme
            .colors()
            .iter()
            .take(count)
            .copied()
            .collect()
    }

    /// Palette color for a series index, wrapping past the palette size
    pub fn color_at(&self, index: usize) -> &'static str {
        self.color_scheme.colors()[index % PALETTE_SIZE]
    }

    /// Styling for line-type series. The first series gets a heavier stroke.
    pub fn series_style(&self, index: usize, total: usize) -> SeriesStyle {
        let color = self.color_at(index);
        let border_width = if index == 0 || total <= 1 { 3.0 } else { 2.5 };
        SeriesStyle {
            border_color: color.to_string(),
            background_color: with_alpha(color, FILL_ALPHA),
            point_border_color: "#ffffff".to_string(),
            border_width,
            point_radius: 6.0,
            point_hover_radius: 10.0,
        }
    }

    pub fn format_number(&self, value: f64) -> String {
        format::format_number(value, self.number_format)
    }

    pub fn format_currency(&self, value: f64) -> String {
        format::format_currency(value, &self.currency)
    }

    pub fn format_date(&self, date: &DateTime<Utc>) -> String {
        format::format_date(date, &self.date_format)
    }

    pub fn animation_duration_ms(&self) -> u32 {
        self.animation_speed.duration_ms()
    }
}

type Observer = Box<dyn Fn(&Settings)>;

/// Owner of the live settings record.
///
/// Every successful `update` or `reset` persists the whole record and then
/// notifies subscribers with the new snapshot. Persistence failures are
/// logged and never surface to the caller.
pub struct SettingsStore<S: SettingsStorage> {
    settings: Settings,
    storage: S,
    observers: Vec<Observer>,
}

impl<S: SettingsStorage> SettingsStore<S> {
    pub fn open(storage: S) -> Self {
        let settings = read_settings(&storage);
        Self {
            settings,
            storage,
            observers: Vec::new(),
        }
    }

    /// Re-read the persisted record, falling back to defaults
    pub fn load(&mut self) -> &Settings {
        self.settings = read_settings(&self.storage);
        &self.settings
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        self.settings.set(key, value)?;
        tracing::debug!("setting {} = {}", key, value);
        self.commit();
        Ok(())
    }

    /// Like [`update`](Self::update), with the key given by name
    pub fn update_named(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let key = key
            .parse::<SettingKey>()
            .map_err(|_| SettingsError::UnknownKey(key.to_string()))?;
        self.update(key, value)
    }

    pub fn reset(&mut self) {
        self.settings = Settings::default();
        tracing::debug!("settings reset to defaults");
        self.commit();
    }

    pub fn subscribe(&mut self, observer: impl Fn(&Settings) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn palette(&self, count: usize) -> Vec<&'static str> {
        self.settings.palette(count)
    }

    pub fn series_style(&self, index: usize, total: usize) -> SeriesStyle {
        self.settings.series_style(index, total)
    }

    pub fn format_number(&self, value: f64) -> String {
        self.settings.format_number(value)
    }

    pub fn animation_duration_ms(&self) -> u32 {
        self.settings.animation_duration_ms()
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    fn commit(&mut self) {
        match serde_json::to_string_pretty(&self.settings) {
            Ok(blob) => {
                if let Err(e) = self.storage.write(&blob) {
                    tracing::warn!("settings not persisted: {}", e);
                }
            }
            Err(e) => tracing::warn!("settings not serialized: {}", e),
        }
        for observer in &self.observers {
            observer(&self.settings);
        }
    }
}

fn read_settings(storage: &impl SettingsStorage) -> Settings {
    match storage.read() {
        Some(blob) => Settings::from_blob(&blob),
        None => Settings::default(),
    }
}
