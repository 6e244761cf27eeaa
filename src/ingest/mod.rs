//! Uploaded data files: validation gates and parsing into record sets

mod parse;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub use parse::{parse_csv, parse_json};

/// One parsed row: column name to value
pub type Record = Map<String, Value>;

/// Largest accepted upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted extensions, lowercase with leading dot
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".csv", ".json"];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid file type. Please upload a {} file.", ACCEPTED_EXTENSIONS.join(" or "))]
    InvalidType { name: String },
    #[error("File size too large. Please upload a file smaller than 10MB.")]
    TooLarge { size: u64 },
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Invalid CSV format: {0}")]
    InvalidCsv(String),
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
}

/// Parser selected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Json,
}

impl FileKind {
    /// Case-insensitive suffix match against the accepted extensions
    pub fn from_name(name: &str) -> Option<FileKind> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(FileKind::Csv)
        } else if lower.ends_with(".json") {
            Some(FileKind::Json)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileKind::Csv => "text/csv",
            FileKind::Json => "application/json",
        }
    }
}

enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A user-selected file. Content is read only after validation passes.
pub struct UploadedFile {
    name: String,
    size: u64,
    last_modified: Option<DateTime<Utc>>,
    source: FileSource,
}

impl UploadedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            name,
            size: meta.len(),
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            last_modified: None,
            source: FileSource::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    fn read_text(&self) -> Result<String, IngestError> {
        let bytes = match &self.source {
            FileSource::Path(path) => std::fs::read(path)?,
            FileSource::Memory(bytes) => bytes.clone(),
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Descriptive data about a parsed upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub record_count: usize,
    pub columns: Vec<String>,
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct ParsedUpload {
    pub records: Vec<Record>,
    pub metadata: UploadMetadata,
}

/// Check extension then size, returning the parser to use
pub fn validate(file: &UploadedFile) -> Result<FileKind, IngestError> {
    let kind = FileKind::from_name(&file.name).ok_or_else(|| IngestError::InvalidType {
        name: file.name.clone(),
    })?;
    if file.size > MAX_UPLOAD_BYTES {
        return Err(IngestError::TooLarge { size: file.size });
    }
    Ok(kind)
}

/// Validate, read and parse a file into a record set
pub fn ingest(file: &UploadedFile) -> Result<ParsedUpload, IngestError> {
    let kind = validate(file)?;
    let content = file.read_text()?;
    let records = match kind {
        FileKind::Json => parse_json(&content)?,
        FileKind::Csv => parse_csv(&content)?,
    };

    let columns = records
        .first()
        .map(|r| r.keys().cloned().collect())
        .unwrap_or_default();

    tracing::info!(
        "parsed {} records from {} ({} bytes)",
        records.len(),
        file.name,
        file.size
    );

    Ok(ParsedUpload {
        metadata: UploadMetadata {
            name: file.name.clone(),
            size: file.size,
            mime_type: kind.mime_type().to_string(),
            last_modified: file.last_modified,
            record_count: records.len(),
            columns,
        },
        records,
    })
}

/// Run [`ingest`] and hand the outcome to `on_complete` exactly once
pub fn upload<F>(file: &UploadedFile, on_complete: F)
where
    F: FnOnce(Result<ParsedUpload, IngestError>),
{
    on_complete(ingest(file))
}
