use std::path::PathBuf;
use std::sync::Arc;

use stitch_pattern::{Pattern, PixelGrid, QuantizeMethod, ReferenceEntry, ReferenceTable, StitchPattern};

use crate::error::AppError;
use crate::models::AppConfig;
use crate::services::image_loader;
use crate::services::pattern_writer::{self, RenderedFile};

/// Validated inputs of one pattern run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRequest {
    pub image: PathBuf,
    pub colors: usize,
    pub method: QuantizeMethod,
    pub stitches: u32,
}

impl PatternRequest {
    /// Check the command line values before anything is read from disk.
    pub fn new(
        image: impl Into<PathBuf>,
        colors: usize,
        method: &str,
        stitches: u32,
    ) -> Result<Self, AppError> {
        if colors == 0 {
            return Err(AppError::Config("COLORS must be at least 1".to_string()));
        }
        let method: QuantizeMethod = method.parse()?;
        if stitches == 0 {
            return Err(AppError::Config("COUNT must be at least 1".to_string()));
        }
        Ok(Self {
            image: image.into(),
            colors,
            method,
            stitches,
        })
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Files written, charts first and the key last
    pub written: Vec<PathBuf>,
    /// Thread per palette index
    pub threads: Vec<ReferenceEntry>,
    pub width: usize,
    pub height: usize,
    /// Cells rewritten by smoothing
    pub smoothed: usize,
}

/// Pipeline that orchestrates load → quantize → match → smooth → render → write
pub struct PatternPipeline {
    config: Arc<AppConfig>,
    table: Arc<ReferenceTable>,
}

impl PatternPipeline {
    pub fn new(config: Arc<AppConfig>, table: Arc<ReferenceTable>) -> Self {
        Self { config, table }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Build the pattern for an already resized pixel grid.
    pub fn build(&self, request: &PatternRequest, pixels: &PixelGrid) -> Result<Pattern, AppError> {
        let pattern = StitchPattern::new(request.method, request.colors)
            .smoothing(self.config.smoothing)
            .build(pixels, self.table.as_ref())?;
        Ok(pattern)
    }

    /// Render every configured document into memory.
    pub fn render(&self, pattern: &Pattern) -> Vec<RenderedFile> {
        let config = &self.config;
        let mut files: Vec<RenderedFile> = config
            .variants
            .iter()
            .map(|&variant| {
                let mode = variant.mode().center_marks(config.center_marks);
                let doc = pattern.render_chart(config.cell_size, mode);
                tracing::debug!(
                    ?variant,
                    width = doc.width(),
                    height = doc.height(),
                    "Rendered chart"
                );
                RenderedFile::new(config.file_name(variant), doc.finish())
            })
            .collect();

        let key = pattern.render_key(config.key_row_height, config.key_variant.mode());
        files.push(RenderedFile::new(config.key_file.as_str(), key.finish()));
        files
    }

    /// Run the whole pipeline for one image.
    ///
    /// Every document is rendered before the first file is written, so an
    /// error leaves the output directory untouched.
    pub fn run(&self, request: &PatternRequest) -> Result<PipelineReport, AppError> {
        let pixels = image_loader::load_pixels(&request.image, request.stitches)?;
        let pattern = self.build(request, &pixels)?;
        let files = self.render(&pattern);

        let written = pattern_writer::write_all(&self.config.output_dir, &files)?;

        Ok(PipelineReport {
            written,
            threads: pattern.resolved().iter().cloned().collect(),
            width: pattern.grid().width(),
            height: pattern.grid().height(),
            smoothed: pattern.smoothed_cells(),
        })
    }
}
