use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::policy::{ConversionRequest, ExtensionToken};

mod ffmpeg;
mod raster;

pub use {
    ffmpeg::{FfmpegConverter, SystemRunner},
    raster::RasterConverter,
};

/// A delegate that turns `input` into `output`, encoded as `target`.
pub trait Converter {
    fn convert(&self, input: &Path, output: &Path, target: &ExtensionToken) -> Result<()>;
}

/// `<stem>_converted.<ext>`, placed in `output_dir` or left relative to the
/// working directory. The input's own directory is dropped.
pub fn output_path(request: &ConversionRequest, output_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = request
        .input
        .file_stem()
        .ok_or_else(|| ConvertError::MissingExtension {
            path: request.input.clone(),
        })?;

    let mut name = OsString::from(stem);
    name.push("_converted.");
    name.push(request.output_ext.name());

    Ok(match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    })
}

/// Route a validated request to the image or the media delegate.
pub fn dispatch(
    request: &ConversionRequest,
    output_dir: Option<&Path>,
    image: &dyn Converter,
    media: &dyn Converter,
) -> Result<PathBuf> {
    let output = output_path(request, output_dir)?;

    let converter = if request.is_image_conversion() {
        log::info!("Converting image {} -> {}", request.input_ext, request.output_ext);
        image
    } else {
        log::info!("Converting media {} -> {}", request.input_ext, request.output_ext);
        media
    };

    converter.convert(&request.input, &output, &request.output_ext)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(PathBuf, PathBuf, String)>>,
        fail: bool,
    }

    impl Converter for Recording {
        fn convert(&self, input: &Path, output: &Path, target: &ExtensionToken) -> Result<()> {
            self.calls.borrow_mut().push((
                input.to_path_buf(),
                output.to_path_buf(),
                target.name().to_string(),
            ));
            if self.fail {
                return Err(ConvertError::ImageConversionFailed("corrupt".into()));
            }
            Ok(())
        }
    }

    fn request(input: &str, output: &str) -> ConversionRequest {
        ConversionRequest {
            input: PathBuf::from(input),
            input_ext: ExtensionToken::from_path(input),
            output_ext: ExtensionToken::parse(output),
        }
    }

    #[test]
    fn output_name_drops_directory_and_appends_suffix() {
        let path = output_path(&request("some/dir/photo.PNG", "jpg"), None).unwrap();
        assert_eq!(path, PathBuf::from("photo_converted.jpg"));
    }

    #[test]
    fn output_name_respects_output_dir() {
        let path = output_path(&request("clip.mp4", "mp3"), Some(Path::new("out"))).unwrap();
        assert_eq!(path, Path::new("out").join("clip_converted.mp3"));
    }

    #[test]
    fn image_pairs_go_to_image_delegate() {
        let image = Recording::default();
        let media = Recording::default();

        let out = dispatch(&request("photo.PNG", "jpg"), None, &image, &media).unwrap();

        assert_eq!(out, PathBuf::from("photo_converted.jpg"));
        assert_eq!(image.calls.borrow().len(), 1);
        assert!(media.calls.borrow().is_empty());
        assert_eq!(image.calls.borrow()[0].2, "jpg");
    }

    #[test]
    fn everything_else_goes_to_media_delegate() {
        let image = Recording::default();
        let media = Recording::default();

        dispatch(&request("clip.mp4", "gif"), None, &image, &media).unwrap();
        dispatch(&request("report.pdf", "docx"), None, &image, &media).unwrap();

        assert!(image.calls.borrow().is_empty());
        let calls = media.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, PathBuf::from("clip_converted.gif"));
        assert_eq!(calls[1].2, "docx");
    }

    #[test]
    fn delegate_errors_propagate() {
        let image = Recording {
            fail: true,
            ..Default::default()
        };
        let media = Recording::default();

        let err = dispatch(&request("a.bmp", "png"), None, &image, &media).unwrap_err();
        assert!(matches!(err, ConvertError::ImageConversionFailed(_)));
    }
}
