//! Error types for fileconvert.

use std::path::PathBuf;

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Every way a single conversion can fail. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("input file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input path has no extension to look up.
    #[error("input file has no extension: {}", path.display())]
    MissingExtension { path: PathBuf },

    /// The input extension has no entry in the conversion table.
    #[error("unsupported input file type: {ext}")]
    UnsupportedInput { ext: String },

    /// The table has the input, but not this target.
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedPair { from: String, to: String },

    /// The image delegate rejected the input or the target encoder.
    #[error("image conversion failed: {0}")]
    ImageConversionFailed(String),

    /// No transcoder template is wired up for this target.
    #[error("unsupported media conversion to {ext}")]
    UnsupportedMediaConversion { ext: String },

    /// The transcoder exited non-zero, or was killed (no code).
    #[error("media conversion failed with error code: {}", describe_code(*code))]
    MediaConversionFailed { code: Option<i32> },

    /// A required external tool is not available.
    #[error("{tool} is not installed or not in PATH")]
    ToolNotFound { tool: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

impl ConvertError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }
}
