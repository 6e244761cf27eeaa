//! Chart.js `{labels, datasets}` documents to canonical chart data

use serde_json::{Map, Value};

use super::{ChartData, ColorValue, NormalizeError, Series, StyleFields, numeric, value_label};

pub(super) fn from_chartjs(doc: &Map<String, Value>) -> Result<ChartData, NormalizeError> {
    let categories = match doc.get("labels") {
        Some(Value::Array(labels)) => labels.iter().map(value_label).collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            return Err(NormalizeError::InvalidFormat(
                "labels must be an array".to_string(),
            ));
        }
    };

    let datasets = match doc.get("datasets") {
        Some(Value::Array(datasets)) => datasets,
        _ => {
            return Err(NormalizeError::InvalidFormat(
                "datasets must be an array".to_string(),
            ));
        }
    };

    let series = datasets
        .iter()
        .enumerate()
        .map(|(i, dataset)| match dataset {
            Value::Object(map) => Ok(dataset_to_series(i, map)),
            _ => Err(NormalizeError::InvalidFormat(format!(
                "dataset {} is not an object",
                i
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChartData {
        categories,
        series,
        tree: None,
    })
}

fn dataset_to_series(index: usize, dataset: &Map<String, Value>) -> Series {
    let name = match dataset.get("label") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => format!("Series {}", index + 1),
    };

    let mut values = Vec::new();
    let mut points = Vec::new();
    if let Some(Value::Array(data)) = dataset.get("data") {
        for (i, item) in data.iter().enumerate() {
            match item {
                Value::Object(point) => {
                    let x = point.get("x").and_then(numeric);
                    let y = point.get("y").and_then(numeric);
                    match (x, y) {
                        (Some(x), Some(y)) => points.push([x, y]),
                        _ => tracing::warn!("{}: point {} lacks numeric x/y; skipped", name, i + 1),
                    }
                }
                other => values.push(numeric(other).unwrap_or_else(|| {
                    tracing::warn!("{}: value {} is not numeric; using 0", name, i + 1);
                    0.0
                })),
            }
        }
    }

    let text = |key: &str| match dataset.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    };
    let number = |key: &str| dataset.get(key).and_then(Value::as_f64);

    let border_color = color_value(dataset.get("borderColor"));
    let background_color = color_value(dataset.get("backgroundColor"));
    // Uploaded colors win over the palette
    let color = background_color
        .as_ref()
        .or(border_color.as_ref())
        .and_then(ColorValue::first)
        .map(str::to_string);

    Series {
        name,
        values,
        points,
        color,
        style: StyleFields {
            border_color,
            background_color,
            point_border_color: text("pointBorderColor"),
            border_width: number("borderWidth"),
            point_radius: number("pointRadius"),
            point_hover_radius: number("pointHoverRadius"),
            fill: dataset.get("fill").and_then(Value::as_bool),
            tension: number("tension"),
        },
    }
}

/// A color string, or an array of color strings for per-point colors
fn color_value(value: Option<&Value>) -> Option<ColorValue> {
    match value? {
        Value::String(s) => Some(ColorValue::Single(s.clone())),
        Value::Array(items) => {
            let colors: Vec<String> = items
                .iter()
                .filter_map(|c| c.as_str().map(str::to_string))
                .collect();
            if colors.is_empty() {
                None
            } else {
                Some(ColorValue::PerPoint(colors))
            }
        }
        _ => None,
    }
}
