//! Unit tests for ingest module

use std::cell::Cell;

use serde_json::json;

use super::*;

fn upload_bytes(name: &str, content: &str) -> Result<ParsedUpload, IngestError> {
    ingest(&UploadedFile::from_bytes(name, content.as_bytes().to_vec()))
}

#[test]
fn test_csv_header_and_row() {
    let parsed = upload_bytes("data.csv", "a,b\n1,2\n").unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(
        serde_json::Value::Object(parsed.records[0].clone()),
        json!({"a": "1", "b": "2"})
    );
}

#[test]
fn test_csv_short_row_padded() {
    let records = parse_csv("a,b,c\n1,2").unwrap();
    assert_eq!(
        serde_json::Value::Object(records[0].clone()),
        json!({"a": "1", "b": "2", "c": ""})
    );
}

#[test]
fn test_csv_extra_values_dropped() {
    let records = parse_csv("a,b\n1,2,3").unwrap();
    assert_eq!(records[0].len(), 2);
    assert_eq!(records[0]["b"], "2");
}

#[test]
fn test_csv_trims_and_skips_blank_lines() {
    let records = parse_csv("\r\n month , users \r\n\r\nJan, 10\r\n   \nFeb,20\r\n").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["month"], "Jan");
    assert_eq!(records[0]["users"], "10");
    assert_eq!(records[1]["users"], "20");
}

#[test]
fn test_csv_requires_data_row() {
    for content in ["", "a,b", "a,b\n\n   \n"] {
        let err = parse_csv(content).unwrap_err();
        assert!(
            err.to_string()
                .contains("must have at least a header and one data row"),
            "{:?} gave {}",
            content,
            err
        );
    }
}

#[test]
fn test_csv_columns_keep_header_order() {
    let parsed = upload_bytes("d.csv", "zeta,alpha,mid\n1,2,3").unwrap();
    assert_eq!(parsed.metadata.columns, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_json_object_wrapped() {
    let records = parse_json(r#"{"x":1}"#).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["x"], 1);
}

#[test]
fn test_json_array_unchanged() {
    let records = parse_json(r#"[{"x":1},{"x":2}]"#).unwrap();
    let values: Vec<_> = records.into_iter().map(serde_json::Value::Object).collect();
    assert_eq!(values, vec![json!({"x": 1}), json!({"x": 2})]);
}

#[test]
fn test_json_invalid() {
    let err = parse_json("{broken").unwrap_err();
    assert!(matches!(err, IngestError::InvalidJson(_)));
    assert!(err.to_string().starts_with("Invalid JSON format"));

    assert!(matches!(parse_json("42"), Err(IngestError::InvalidJson(_))));
    assert!(matches!(parse_json("[1, 2]"), Err(IngestError::InvalidJson(_))));
}

#[test]
fn test_json_array_with_non_object_rejected_whole() {
    let err = parse_json(r#"[{"x": "a", "y": 1}, "stray", {"x": "b", "y": 2}]"#).unwrap_err();
    assert!(matches!(err, IngestError::InvalidJson(_)));
    let text = err.to_string();
    assert!(text.starts_with("Invalid JSON format"));
    assert!(text.contains("element 1"), "{}", text);
}

#[test]
fn test_extension_checked_case_insensitively() {
    assert_eq!(FileKind::from_name("REPORT.CSV"), Some(FileKind::Csv));
    assert_eq!(FileKind::from_name("x.Json"), Some(FileKind::Json));
    assert_eq!(FileKind::from_name("notes.txt"), None);
    assert_eq!(FileKind::from_name("csv"), None);
}

#[test]
fn test_wrong_type_rejected_before_parse() {
    // Content would be valid JSON; the extension alone decides.
    let err = upload_bytes("data.txt", r#"{"x":1}"#).unwrap_err();
    assert!(matches!(err, IngestError::InvalidType { .. }));
    assert!(err.to_string().contains(".csv or .json"));
}

#[test]
fn test_size_cap() {
    let at_cap = UploadedFile::from_bytes("ok.csv", {
        let mut body = b"a\n1\n".to_vec();
        body.resize(MAX_UPLOAD_BYTES as usize, b' ');
        body
    });
    assert!(validate(&at_cap).is_ok());

    let over = UploadedFile::from_bytes("big.json", vec![b' '; MAX_UPLOAD_BYTES as usize + 1]);
    let err = ingest(&over).unwrap_err();
    assert!(matches!(err, IngestError::TooLarge { .. }));
    assert!(err.to_string().contains("too large"));
}

#[test]
fn test_type_checked_before_size() {
    let file = UploadedFile::from_bytes("big.txt", vec![b' '; MAX_UPLOAD_BYTES as usize + 1]);
    assert!(matches!(validate(&file), Err(IngestError::InvalidType { .. })));
}

#[test]
fn test_metadata_populated() {
    let parsed = upload_bytes("sales.json", r#"[{"month":"Jan","value":3},{"month":"Feb"}]"#).unwrap();
    let meta = &parsed.metadata;
    assert_eq!(meta.name, "sales.json");
    assert_eq!(meta.mime_type, "application/json");
    assert_eq!(meta.record_count, 2);
    assert_eq!(meta.columns, vec!["month", "value"]);
    assert!(meta.size > 0);
}

#[test]
fn test_empty_json_array_has_no_columns() {
    let parsed = upload_bytes("empty.json", "[]").unwrap();
    assert_eq!(parsed.metadata.record_count, 0);
    assert!(parsed.metadata.columns.is_empty());
}

#[test]
fn test_upload_invokes_callback_once() {
    let calls = Cell::new(0);
    let file = UploadedFile::from_bytes("a.csv", b"a\n1".to_vec());
    upload(&file, |result| {
        calls.set(calls.get() + 1);
        assert_eq!(result.unwrap().records.len(), 1);
    });
    assert_eq!(calls.get(), 1);

    let bad = UploadedFile::from_bytes("a.xml", Vec::new());
    upload(&bad, |result| {
        calls.set(calls.get() + 1);
        assert!(result.is_err());
    });
    assert_eq!(calls.get(), 2);
}
