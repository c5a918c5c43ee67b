//! Test application factory for integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crossstitch::assets::AssetLoader;
use crossstitch::error::AppError;
use crossstitch::models::AppConfig;
use crossstitch::services::{self, PatternPipeline, PatternRequest, PipelineReport};

/// Scratch workspace with an output directory and a pipeline writing into it
pub struct TestApp {
    dir: TempDir,
    pub config: AppConfig,
}

impl TestApp {
    /// Create a workspace using the default config and the embedded table
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a workspace with a custom config; `output_dir` is redirected
    /// into the scratch directory
    pub fn with_config(mut config: AppConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        config.output_dir = dir.path().join("results");
        Self { dir, config }
    }

    /// Root of the scratch directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the documents end up
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Write a file into the scratch directory and return its path
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    /// Build a pipeline against the table the config points at
    pub fn pipeline(&self) -> Result<PatternPipeline, AppError> {
        let loader = AssetLoader::default().with_table(self.config.reference_table.clone());
        let (table, _) = services::load_from_assets(&loader)?;
        Ok(PatternPipeline::new(
            Arc::new(self.config.clone()),
            Arc::new(table),
        ))
    }

    /// Run the full pipeline
    pub fn run(
        &self,
        image: &Path,
        colors: usize,
        method: &str,
        count: u32,
    ) -> Result<PipelineReport, AppError> {
        let request = PatternRequest::new(image, colors, method, count)?;
        self.pipeline()?.run(&request)
    }

    /// Read an output document
    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output_dir().join(name))
            .unwrap_or_else(|e| panic!("Failed to read {name}: {e}"))
    }

    /// Names of the files in the output directory, sorted
    pub fn output_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.output_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
