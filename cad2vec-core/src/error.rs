//! Error types for the cad2vec-core pipeline

use thiserror::Error;

/// Main error type for the raster-to-vector pipeline.
///
/// Every variant is tagged with the stage that raised it so the external
/// boundary can report precisely where a conversion failed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("[{stage}] invalid image: {message}")]
    InvalidImage { stage: &'static str, message: String },

    #[error("[{stage}] unsupported format: {format}")]
    UnsupportedFormat { stage: &'static str, format: String },

    #[error("[{stage}] unknown method selector: {selector}")]
    UnknownMethod { stage: &'static str, selector: String },

    #[error("[{stage}] processing failed: {message}")]
    ProcessingFailed {
        stage: &'static str,
        message: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PipelineError {
    pub fn invalid_image(stage: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidImage {
            stage,
            message: message.into(),
        }
    }

    pub fn unsupported_format(stage: &'static str, format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            stage,
            format: format.into(),
        }
    }

    pub fn unknown_method(stage: &'static str, selector: impl Into<String>) -> Self {
        Self::UnknownMethod {
            stage,
            selector: selector.into(),
        }
    }

    pub fn processing_failed(stage: &'static str, message: impl Into<String>) -> Self {
        Self::ProcessingFailed {
            stage,
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap a lower-level failure as `ProcessingFailed`, preserving the cause.
    pub fn wrap(
        stage: &'static str,
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ProcessingFailed {
            stage,
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }
}

/// Result type alias used throughout the pipeline stages.
pub type StageResult<T> = Result<T, PipelineError>;
