use stitch_pattern::{PatternError, QuantizeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid arguments: {0}")]
    Config(String),

    #[error("Unsupported quantization method: {0}")]
    UnsupportedMethod(String),

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scrape error: {0}")]
    Scrape(String),
}

impl From<QuantizeError> for AppError {
    fn from(e: QuantizeError) -> Self {
        match e {
            QuantizeError::UnsupportedMethod(name) => AppError::UnsupportedMethod(name),
            QuantizeError::InvalidColorCount => AppError::Config(e.to_string()),
        }
    }
}
