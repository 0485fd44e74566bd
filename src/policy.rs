//! Which conversions are allowed, and the checks run before any delegate.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Source extension (dotted) to the bare extensions it may be converted into.
/// Self-conversions are deliberately absent.
pub const CONVERSION_TABLE: &[(&str, &[&str])] = &[
    (".png", &["jpeg", "jpg", "webp", "bmp", "tiff"]),
    (".jpg", &["png", "jpeg", "webp", "bmp", "tiff"]),
    (".webp", &["jpeg", "png", "jpg", "bmp", "tiff"]),
    (".jpeg", &["jpg", "png", "webp", "bmp", "tiff"]),
    (".bmp", &["png", "jpg", "jpeg", "webp", "tiff"]),
    (".tiff", &["png", "jpg", "jpeg", "webp", "bmp"]),
    (".mp4", &["mp3", "gif"]),
    (".pdf", &["docx"]),
    (".docx", &["pdf"]),
];

/// Extensions handled by the image delegate when both sides belong here.
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".bmp", ".tiff"];

/// A lower-cased, dot-prefixed file extension. Empty when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExtensionToken(String);

impl ExtensionToken {
    /// Extract and normalize the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension() {
            Some(ext) if !ext.is_empty() => Self::parse(&ext.to_string_lossy()),
            _ => Self::default(),
        }
    }

    /// Normalize a bare (`PNG`) or dotted (`.png`) extension string.
    pub fn parse(s: &str) -> Self {
        let bare = s.strip_prefix('.').unwrap_or(s);
        if bare.is_empty() {
            return Self::default();
        }
        Self(format!(".{}", bare.to_lowercase()))
    }

    /// Dotted form, as used for table keys.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare form, as used for table values and output file names.
    pub fn name(&self) -> &str {
        self.0.strip_prefix('.').unwrap_or(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ExtensionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `normalizeExtension`: the lower-cased, dotted extension of `path`, or "".
pub fn normalize_extension(path: impl AsRef<Path>) -> ExtensionToken {
    ExtensionToken::from_path(path)
}

/// The bare target extensions permitted for `input`, if it is a table key.
pub fn permitted_targets(input: &ExtensionToken) -> Option<&'static [&'static str]> {
    CONVERSION_TABLE
        .iter()
        .find(|(key, _)| *key == input.as_str())
        .map(|(_, targets)| *targets)
}

pub fn is_supported_conversion(input: &ExtensionToken, output: &ExtensionToken) -> bool {
    permitted_targets(input).is_some_and(|targets| targets.contains(&output.name()))
}

pub fn is_image_conversion(input: &ExtensionToken, output: &ExtensionToken) -> bool {
    IMAGE_EXTENSIONS.contains(&input.as_str()) && IMAGE_EXTENSIONS.contains(&output.as_str())
}

/// A validated (input path, target extension) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub input_ext: ExtensionToken,
    pub output_ext: ExtensionToken,
}

impl ConversionRequest {
    pub fn is_image_conversion(&self) -> bool {
        is_image_conversion(&self.input_ext, &self.output_ext)
    }
}

/// Checks that `input` exists, has an extension, and that the table knows it.
/// Returns the normalized input extension.
pub fn validate_input(input: &Path) -> Result<ExtensionToken> {
    if !input.exists() {
        return Err(ConvertError::file_not_found(input));
    }

    let input_ext = normalize_extension(input);
    if input_ext.is_empty() {
        return Err(ConvertError::MissingExtension {
            path: input.to_path_buf(),
        });
    }

    if permitted_targets(&input_ext).is_none() {
        return Err(ConvertError::UnsupportedInput {
            ext: input_ext.to_string(),
        });
    }

    Ok(input_ext)
}

/// `validateRequest`. Check order is existence, extension, input key, pair.
pub fn validate_request(input: impl AsRef<Path>, output_type: &str) -> Result<ConversionRequest> {
    let input = input.as_ref();
    let input_ext = validate_input(input)?;
    let output_ext = ExtensionToken::parse(output_type);

    if !is_supported_conversion(&input_ext, &output_ext) {
        return Err(ConvertError::UnsupportedPair {
            from: input_ext.to_string(),
            to: output_ext.to_string(),
        });
    }

    Ok(ConversionRequest {
        input: input.to_path_buf(),
        input_ext,
        output_ext,
    })
}
