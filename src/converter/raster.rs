use std::path::Path;

use image::DynamicImage;

use super::Converter;
use crate::error::{ConvertError, Result};
use crate::policy::ExtensionToken;

/// Image delegate backed by the `image` crate. The source format is sniffed
/// from content, the destination codec is chosen by the output extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterConverter;

impl RasterConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Converter for RasterConverter {
    fn convert(&self, input: &Path, output: &Path, target: &ExtensionToken) -> Result<()> {
        let image = image::ImageReader::open(input)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| ConvertError::ImageConversionFailed(e.to_string()))?
            .decode()
            .map_err(|e| ConvertError::ImageConversionFailed(e.to_string()))?;

        log::debug!(
            "decoded {} ({}x{}, {:?})",
            input.display(),
            image.width(),
            image.height(),
            image.color()
        );

        // jpeg has no alpha channel
        let image = match target.name() {
            "jpg" | "jpeg" if image.color().has_alpha() => {
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
            _ => image,
        };

        image
            .save(output)
            .map_err(|e| ConvertError::ImageConversionFailed(e.to_string()))?;
        Ok(())
    }
}
