use crate::assets::AssetLoader;
use crate::error::AppError;
use serde::Deserialize;
use std::path::PathBuf;
use stitch_pattern::RenderMode;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the documents are written to
    pub output_dir: PathBuf,

    /// File name of the colour chart
    pub pattern_file: String,

    /// File name of the key
    pub key_file: String,

    /// Side length of one stitch
    pub cell_size: u32,

    /// Row height of the key
    pub key_row_height: u32,

    /// Chart variants to write
    pub variants: Vec<PatternVariant>,

    /// Presentation of the key swatches
    pub key_variant: PatternVariant,

    /// Arrows marking the centre row and column
    pub center_marks: bool,

    /// Remove isolated stitches after quantization
    pub smoothing: bool,

    /// Thread table on disk; `None` uses the embedded table
    pub reference_table: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
            pattern_file: "pattern.svg".to_string(),
            key_file: "key.svg".to_string(),
            cell_size: 10,
            key_row_height: 40,
            variants: vec![PatternVariant::Color],
            key_variant: PatternVariant::ColorSymbols,
            center_marks: false,
            smoothing: true,
            reference_table: None,
        }
    }
}

/// Chart presentation written to its own file.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PatternVariant {
    /// Thread colours, no symbols or cell outlines
    Color,
    /// Thread colours with symbols and cell outlines
    ColorSymbols,
    /// White cells with symbols, for printing in black and white
    Monochrome,
}

impl PatternVariant {
    /// File names used by the variants that do not follow `pattern_file`.
    pub const FIXED_FILE_NAMES: [&'static str; 2] = ["color_with_symbol.svg", "black_white.svg"];

    /// Render mode for this variant.
    pub fn mode(self) -> RenderMode {
        match self {
            PatternVariant::Color => RenderMode::color(),
            PatternVariant::ColorSymbols => RenderMode::color_symbols(),
            PatternVariant::Monochrome => RenderMode::monochrome(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        output_dir = %config.output_dir.display(),
                        cell_size = config.cell_size,
                        variants = config.variants.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Check values that would produce an unusable document.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.cell_size == 0 {
            return Err(AppError::Config("cell_size must be at least 1".to_string()));
        }
        if self.key_row_height == 0 {
            return Err(AppError::Config(
                "key_row_height must be at least 1".to_string(),
            ));
        }
        if self.variants.is_empty() {
            return Err(AppError::Config(
                "at least one pattern variant is required".to_string(),
            ));
        }
        let names = [self.pattern_file.as_str(), self.key_file.as_str()];
        if names.iter().any(|n| n.is_empty() || n.contains(['/', '\\'])) {
            return Err(AppError::Config(
                "pattern_file and key_file must be plain file names".to_string(),
            ));
        }
        if self.pattern_file == self.key_file {
            return Err(AppError::Config(
                "pattern_file and key_file must differ".to_string(),
            ));
        }
        if let Some(clash) = names
            .into_iter()
            .find(|n| PatternVariant::FIXED_FILE_NAMES.contains(n))
        {
            return Err(AppError::Config(format!(
                "{clash} is reserved for a pattern variant"
            )));
        }
        Ok(())
    }

    /// Output file name for a chart variant.
    pub fn file_name(&self, variant: PatternVariant) -> &str {
        match variant {
            PatternVariant::Color => &self.pattern_file,
            PatternVariant::ColorSymbols => PatternVariant::FIXED_FILE_NAMES[0],
            PatternVariant::Monochrome => PatternVariant::FIXED_FILE_NAMES[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.key_row_height, 40);
        assert_eq!(config.variants, vec![PatternVariant::Color]);
        assert_eq!(config.key_variant, PatternVariant::ColorSymbols);
        assert!(config.smoothing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = AppConfig::load_from_assets(&AssetLoader::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "cell_size: 16\nvariants: [color, monochrome]\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.cell_size, 16);
        assert_eq!(
            config.variants,
            vec![PatternVariant::Color, PatternVariant::Monochrome]
        );
        assert_eq!(config.key_file, "key.svg");
    }

    #[test]
    fn test_variant_names() {
        let config: AppConfig = serde_yaml::from_str("key_variant: color-symbols").unwrap();
        assert_eq!(config.key_variant, PatternVariant::ColorSymbols);
        assert!(serde_yaml::from_str::<AppConfig>("key_variant: sepia").is_err());
    }

    #[test]
    fn test_file_names() {
        let config = AppConfig::default();
        assert_eq!(config.file_name(PatternVariant::Color), "pattern.svg");
        assert_eq!(
            config.file_name(PatternVariant::ColorSymbols),
            "color_with_symbol.svg"
        );
        assert_eq!(config.file_name(PatternVariant::Monochrome), "black_white.svg");
    }

    #[test]
    fn test_validate_rejects_zero_cell_size() {
        let config = AppConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_paths_as_file_names() {
        let config = AppConfig {
            key_file: "../key.svg".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_reserved_variant_names() {
        for name in ["black_white.svg", "color_with_symbol.svg"] {
            let key = AppConfig {
                key_file: name.to_string(),
                ..Default::default()
            };
            assert!(matches!(key.validate(), Err(AppError::Config(_))), "key_file {name}");

            let pattern = AppConfig {
                pattern_file: name.to_string(),
                ..Default::default()
            };
            assert!(pattern.validate().is_err(), "pattern_file {name}");
        }
    }
}
