//! Canonical chart series built from uploaded or bundled data
//!
//! Input is resolved once into a [`ChartInput`]: either data that already has
//! the chart shape (Chart.js `{labels, datasets}` or canonical
//! `{categories, series}`), a `{name, children}` hierarchy, or a flat
//! record set. [`normalize`] then merges it
//! with styling derived from the current settings snapshot.

mod chartjs;


use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ingest::Record;
use crate::settings::Settings;

/// Category keys tried in order when a record set has no explicit mapping
pub const CATEGORY_KEYS: [&str; 5] = ["x", "label", "category", "month", "country"];

/// Value keys tried in order when a record set has no explicit mapping
pub const VALUE_KEYS: [&str; 3] = ["y", "value", "users"];

/// Series name used when no value field could be identified
const DEFAULT_SERIES_NAME: &str = "value";

const DEFAULT_TENSION: f64 = 0.4;
const DEFAULT_BAR_BORDER_WIDTH: f64 = 1.0;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error(
        "Invalid data format: {0}. Expected Chart.js data with labels and datasets, \
         an object with categories and series, a tree with name and children, \
         or an array of records."
    )]
    InvalidFormat(String),
}

/// Visual type of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Scatter,
    Heatmap,
    Tree,
}

impl ChartKind {
    /// Line-type series get stroke and point styling from settings
    pub fn is_line_type(self) -> bool {
        matches!(self, ChartKind::Line | ChartKind::Area)
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Tree => "tree",
        }
    }
}

/// A color given once for the whole series, or once per data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    PerPoint(Vec<String>),
}

impl ColorValue {
    /// The series-wide color: the single value or the first of the list
    pub fn first(&self) -> Option<&str> {
        match self {
            ColorValue::Single(c) => Some(c),
            ColorValue::PerPoint(list) => list.first().map(String::as_str),
        }
    }

    /// Color for one data point; lists wrap around
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            ColorValue::Single(c) => Some(c),
            ColorValue::PerPoint(list) if list.is_empty() => None,
            ColorValue::PerPoint(list) => Some(&list[index % list.len()]),
        }
    }
}

impl From<&str> for ColorValue {
    fn from(color: &str) -> Self {
        ColorValue::Single(color.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(color: String) -> Self {
        ColorValue::Single(color)
    }
}

/// Optional style attributes carried by a series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

/// One named series of values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    #[serde(default)]
    pub values: Vec<f64>,
    /// `[x, y]` pairs for scatter data
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub style: StyleFields,
}

impl Series {
    /// Sum of the values, or of the y coordinates for point data
    pub fn total(&self) -> f64 {
        if self.points.is_empty() {
            self.values.iter().sum()
        } else {
            self.points.iter().map(|p| p[1]).sum()
        }
    }
}

/// One node of hierarchical data. Leaves carry the values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeData>,
}

impl TreeData {
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        TreeData {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// Leaves in depth-first order
    pub fn leaves(&self) -> Vec<&TreeData> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(TreeData::leaves).collect()
    }
}

/// Canonical chart input consumed by the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(default)]
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Hierarchy drawn by tree charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeData>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        let no_tree = self.tree.as_ref().is_none_or(|t| t.children.is_empty());
        no_tree
            && self
                .series
                .iter()
                .all(|s| s.values.is_empty() && s.points.is_empty())
    }
}

/// Explicit field choices for record sets, overriding the conventional keys
#[derive(Debug, Clone, Default)]
pub struct FieldMapping {
    pub category: Option<String>,
    pub value: Option<String>,
}

/// Chart data resolved at the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ChartInput {
    Shaped(ChartData),
    Tree(TreeData),
    Records(Vec<Record>),
}

impl ChartInput {
    /// Classify a decoded JSON document
    pub fn from_value(value: Value) -> Result<ChartInput, NormalizeError> {
        match value {
            Value::Object(map) => classify_object(&map).unwrap_or_else(|| {
                Err(NormalizeError::InvalidFormat(
                    "object has neither labels/datasets, categories/series nor children"
                        .to_string(),
                ))
            }),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(map) => Ok(map),
                    _ => Err(NormalizeError::InvalidFormat(format!(
                        "array element {} is not an object",
                        i
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ChartInput::Records),
            _ => Err(NormalizeError::InvalidFormat(
                "expected an object or an array".to_string(),
            )),
        }
    }

    /// Classify a parsed record set. A JSON upload holding a single
    /// chart-shaped or hierarchical object arrives as a one-record set.
    pub fn from_records(records: Vec<Record>) -> Result<ChartInput, NormalizeError> {
        if let [only] = records.as_slice()
            && let Some(input) = classify_object(only)
        {
            return input;
        }
        Ok(ChartInput::Records(records))
    }

    pub fn describe(&self) -> String {
        match self {
            ChartInput::Shaped(data) => format!(
                "chart data, {} series over {} categories",
                data.series.len(),
                data.categories.len()
            ),
            ChartInput::Tree(root) => format!(
                "tree '{}', {} leaves",
                root.name,
                root.leaves().len()
            ),
            ChartInput::Records(records) => format!("record set, {} records", records.len()),
        }
    }
}

/// `None` when the object is a plain record
fn classify_object(map: &Map<String, Value>) -> Option<Result<ChartInput, NormalizeError>> {
    let parsed = if map.contains_key("datasets") {
        chartjs::from_chartjs(map).map(ChartInput::Shaped)
    } else if map.contains_key("categories") && map.contains_key("series") {
        serde_json::from_value::<ChartData>(Value::Object(map.clone()))
            .map(ChartInput::Shaped)
            .map_err(|e| NormalizeError::InvalidFormat(e.to_string()))
    } else if map.contains_key("name") && matches!(map.get("children"), Some(Value::Array(_))) {
        serde_json::from_value::<TreeData>(Value::Object(map.clone()))
            .map(ChartInput::Tree)
            .map_err(|e| NormalizeError::InvalidFormat(e.to_string()))
    } else {
        return None;
    };
    Some(parsed)
}

/// Produce render-ready chart data styled from a settings snapshot.
/// The same input and settings always yield the same output.
pub fn normalize(
    input: &ChartInput,
    kind: ChartKind,
    fields: &FieldMapping,
    settings: &Settings,
) -> ChartData {
    let mut data = match input {
        ChartInput::Shaped(data) => data.clone(),
        ChartInput::Tree(root) => tree_to_chart(root),
        ChartInput::Records(records) => records_to_chart(records, kind, fields),
    };
    if kind == ChartKind::Tree && data.tree.is_none() {
        data.tree = Some(tree_from_series(&data));
    }
    apply_style(data, kind, settings)
}

/// Leaves become the categories of a single series named after the root
fn tree_to_chart(root: &TreeData) -> ChartData {
    let leaves = root.leaves();
    ChartData {
        categories: leaves.iter().map(|leaf| leaf.name.clone()).collect(),
        series: vec![Series {
            name: root.name.clone(),
            values: leaves.iter().map(|leaf| leaf.value.unwrap_or(0.0)).collect(),
            ..Default::default()
        }],
        tree: Some(root.clone()),
    }
}

/// One-level tree: the first series as root, its categories as leaves
fn tree_from_series(data: &ChartData) -> TreeData {
    let Some(series) = data.series.first() else {
        return TreeData::default();
    };
    TreeData {
        name: series.name.clone(),
        value: None,
        children: data
            .categories
            .iter()
            .zip(&series.values)
            .map(|(c, v)| TreeData::leaf(c.as_str(), *v))
            .collect(),
    }
}

fn records_to_chart(records: &[Record], kind: ChartKind, fields: &FieldMapping) -> ChartData {
    let category_keys = candidate_keys(fields.category.as_deref(), &CATEGORY_KEYS);
    let value_keys = candidate_keys(fields.value.as_deref(), &VALUE_KEYS);

    let mut categories = Vec::with_capacity(records.len());
    let mut values = Vec::with_capacity(records.len());
    let mut series_name: Option<&str> = None;

    for (i, record) in records.iter().enumerate() {
        let label = match first_present(record, &category_keys) {
            Some((_, v)) => value_label(v),
            None => {
                tracing::debug!("record {} has no category field; using its position", i + 1);
                (i + 1).to_string()
            }
        };
        categories.push(label);

        let value = match first_present(record, &value_keys) {
            Some((key, v)) => {
                series_name.get_or_insert(key);
                numeric(v)
            }
            None => None,
        };
        values.push(value.unwrap_or_else(|| {
            tracing::warn!("record {} has no numeric value; using 0", i + 1);
            0.0
        }));
    }

    let points = if kind == ChartKind::Scatter {
        categories
            .iter()
            .zip(&values)
            .enumerate()
            .filter_map(|(i, (c, v))| match c.trim().parse::<f64>() {
                Ok(x) => Some([x, *v]),
                Err(_) => {
                    tracing::warn!(
                        "record {}: x value '{}' is not numeric; point skipped",
                        i + 1,
                        c
                    );
                    None
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let name = fields
        .value
        .as_deref()
        .or(series_name)
        .unwrap_or(DEFAULT_SERIES_NAME)
        .to_string();

    ChartData {
        categories,
        series: vec![Series {
            name,
            values,
            points,
            ..Default::default()
        }],
        tree: None,
    }
}

fn apply_style(mut data: ChartData, kind: ChartKind, settings: &Settings) -> ChartData {
    let total = data.series.len();
    for (i, series) in data.series.iter_mut().enumerate() {
        let style = &mut series.style;
        if kind.is_line_type() {
            let derived = settings.series_style(i, total);
            style.border_color.get_or_insert(derived.border_color.into());
            style
                .background_color
                .get_or_insert(derived.background_color.into());
            style
                .point_border_color
                .get_or_insert(derived.point_border_color);
            style.border_width.get_or_insert(derived.border_width);
            style.point_radius.get_or_insert(derived.point_radius);
            style
                .point_hover_radius
                .get_or_insert(derived.point_hover_radius);
            style.fill.get_or_insert(true);
            style.tension.get_or_insert(DEFAULT_TENSION);
        } else if matches!(kind, ChartKind::Bar | ChartKind::Heatmap) {
            style.border_width.get_or_insert(DEFAULT_BAR_BORDER_WIDTH);
        }

        if series.color.is_none() {
            let color = if kind.is_line_type() {
                style.border_color.as_ref().and_then(ColorValue::first)
            } else {
                None
            };
            series.color = Some(
                color
                    .unwrap_or_else(|| settings.color_at(i))
                    .to_string(),
            );
        }
    }
    data
}

fn candidate_keys<'a>(explicit: Option<&'a str>, defaults: &[&'a str]) -> Vec<&'a str> {
    match explicit {
        Some(key) => vec![key],
        None => defaults.to_vec(),
    }
}

fn first_present<'r, 'k>(record: &'r Record, keys: &[&'k str]) -> Option<(&'k str, &'r Value)> {
    keys.iter()
        .find_map(|key| match record.get(*key) {
            Some(Value::Null) | None => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(v) => Some((*key, v)),
        })
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numbers pass through; numeric strings (as produced by CSV) are parsed
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
