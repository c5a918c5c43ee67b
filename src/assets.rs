//! Asset loading with embedded fallbacks
//!
//! The binary ships with a default thread table and a default config so it
//! works without any files on disk:
//!
//! - If no external path is configured: use the embedded asset
//! - If an external path is configured and exists: read it from disk
//! - If an external path is configured but missing: fall back to embedded for
//!   config, fail for the thread table (an explicit table that cannot be read
//!   is an error)

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the embedded thread table.
pub const TABLE_FILE: &str = "dmc_color_codes.csv";

/// Embedded thread reference tables
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.csv"]
struct EmbeddedTables;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Table,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from --config or CONFIG_FILE)
    config_file: Option<PathBuf>,
    /// External thread table (from --table or the config)
    table_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the user supplied them. If `None`,
    /// embedded assets are used exclusively.
    pub fn new(config_file: Option<PathBuf>, table_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            table_file,
        }
    }

    /// Same loader, reading the thread table from `path` instead.
    pub fn with_table(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.table_file = path;
        }
        self
    }

    /// Configured config file, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Configured thread table file, if any
    pub fn table_file(&self) -> Option<&Path> {
        self.table_file.as_deref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "Config file not found, using embedded default");
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the thread table
    ///
    /// An explicitly configured table is read from disk with no fallback.
    pub fn read_table(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.table_file {
            tracing::trace!(path = %path.display(), "Loading thread table from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        EmbeddedTables::get(TABLE_FILE)
            .map(|f| {
                tracing::trace!("Loading thread table from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Embedded {TABLE_FILE} not found"),
                )
            })
    }

    /// Read the thread table as a UTF-8 string
    pub fn read_table_string(&self) -> io::Result<String> {
        let bytes = self.read_table()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Human readable source of the thread table
    pub fn table_source(&self) -> String {
        match self.table_file {
            Some(ref path) => path.display().to_string(),
            None => format!("embedded ({TABLE_FILE})"),
        }
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// `table_path` and `config_path` default to the current directory.
    pub fn init(
        categories: &[AssetCategory],
        table_path: Option<&Path>,
        config_path: Option<&Path>,
        force: bool,
    ) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            let (path, data) = match category {
                AssetCategory::Table => (
                    table_path.map_or_else(|| PathBuf::from(TABLE_FILE), Path::to_path_buf),
                    EmbeddedTables::get(TABLE_FILE).map(|f| f.data),
                ),
                AssetCategory::Config => (
                    config_path.map_or_else(|| PathBuf::from("config.yaml"), Path::to_path_buf),
                    EmbeddedConfig::get("config.yaml").map(|f| f.data),
                ),
            };

            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            if let Some(data) = data {
                fs::write(&path, &*data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Table => EmbeddedTables::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}
