//! Durable storage for the settings blob

use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the settings blob inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no settings location available")]
    NoLocation,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage rejected write: {0}")]
    Rejected(String),
}

/// Backend holding a single serialized settings blob
pub trait SettingsStorage {
    /// Return the persisted blob, or `None` when nothing was stored yet
    fn read(&self) -> Option<String>;

    fn write(&mut self, blob: &str) -> Result<(), StorageError>;
}

/// Blob stored as a JSON file on disk
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/dashchart/settings.json`
    pub fn default_location() -> Result<Self, StorageError> {
        let dir = dirs::config_dir().ok_or(StorageError::NoLocation)?;
        Ok(Self::new(dir.join("dashchart").join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStorage for FileStorage {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        let wrap = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }
        std::fs::write(&self.path, blob.as_bytes()).map_err(wrap)
    }
}

/// In-memory blob; can be told to reject writes
#[derive(Default)]
pub struct MemoryStorage {
    blob: Option<String>,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            blob: None,
            fail_writes: true,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SettingsStorage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.blob.clone()
    }

    fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Rejected("quota exceeded".to_string()));
        }
        self.blob = Some(blob.to_string());
        Ok(())
    }
}
