//! CSV and JSON text to record sets

use serde_json::Value;

use super::{IngestError, Record};

/// Decode JSON text. An array is the record set; a lone object becomes a
/// one-element set.
pub fn parse_json(content: &str) -> Result<Vec<Record>, IngestError> {
    let value: Value = serde_json::from_str(strip_bom(content))
        .map_err(|e| IngestError::InvalidJson(e.to_string()))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(IngestError::InvalidJson(format!(
                    "element {} is {}, expected an object",
                    i,
                    json_kind(&other)
                ))),
            })
            .collect(),
        Value::Object(map) => Ok(vec![map]),
        other => Err(IngestError::InvalidJson(format!(
            "top-level value is {}, expected an array or object",
            json_kind(&other)
        ))),
    }
}

/// Split comma-delimited text into records keyed by the header row.
/// No quoting or escaping is recognized.
pub fn parse_csv(content: &str) -> Result<Vec<Record>, IngestError> {
    let lines: Vec<&str> = strip_bom(content)
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(IngestError::InvalidCsv(
            "CSV file must have at least a header and one data row".to_string(),
        ));
    }

    let headers: Vec<&str> = lines[0].split(',').map(str::trim).collect();

    let records = lines[1..]
        .iter()
        .map(|line| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).copied().unwrap_or_default();
                    (header.to_string(), Value::String(value.to_string()))
                })
                .collect::<Record>()
        })
        .collect();

    Ok(records)
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
