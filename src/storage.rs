//! File persistence for the record store
//!
//! JSON files (e.g. `projects_data.json`) hold a bare array of records.
//! TOML files hold the same records under a `[[records]]` array of tables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tracker::{Record, RecordStore};

/// On-disk encoding of the data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataFormat {
    Json,
    Toml,
}

impl DataFormat {
    /// Pick the format from the file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DataFormat::Toml,
            _ => DataFormat::Json,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlFile {
    records: Vec<Record>,
}

#[derive(Serialize)]
struct TomlFileRef<'a> {
    records: &'a [Record],
}

pub struct Storage {
    file_path: PathBuf,
    format: DataFormat,
}

impl Storage {
    /// Create storage for `file_path`, inferring the format from its extension
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let format = DataFormat::from_path(file_path.as_ref());
        Self::with_format(file_path, format)
    }

    pub fn with_format(file_path: impl AsRef<Path>, format: DataFormat) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Load the store; a missing or blank file yields an empty store
    pub fn load(&self) -> Result<RecordStore> {
        if !self.file_path.exists() {
            tracing::info!(path = %self.file_path.display(), "data file not found, starting empty");
            return Ok(RecordStore::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(RecordStore::new());
        }

        let records: Vec<Record> = match self.format {
            DataFormat::Json => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON in {}", self.file_path.display()))?,
            DataFormat::Toml => {
                let file: TomlFile = toml::from_str(&content).with_context(|| {
                    format!("Failed to parse TOML in {}", self.file_path.display())
                })?;
                file.records
            }
        };

        let store = RecordStore::from_records(records);
        tracing::info!(
            path = %self.file_path.display(),
            records = store.len(),
            "loaded records"
        );
        Ok(store)
    }

    /// Write every record to the data file
    pub fn save(&self, store: &RecordStore) -> Result<()> {
        let content = match self.format {
            DataFormat::Json => serde_json::to_string_pretty(store.all())?,
            DataFormat::Toml => toml::to_string_pretty(&TomlFileRef {
                records: store.all(),
            })?,
        };
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        tracing::debug!(
            path = %self.file_path.display(),
            records = store.len(),
            "saved records"
        );
        Ok(())
    }
}
