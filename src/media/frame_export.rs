// SPDX-License-Identifier: MPL-2.0
//! Still-frame export for the shutter capture path.
//!
//! Captured frames are written with the `image` crate; default filenames
//! carry a timestamp so repeated captures never collide.

use crate::error::{Error, MediaError, Result};
use crate::media::ImageData;
use image_rs::{ImageBuffer, ImageFormat, Rgba};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory name under the platform picture dir for captures.
const CAPTURE_DIR: &str = "IcedShutter";

/// Supported export formats for frame capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// PNG format (lossless, best quality).
    #[default]
    Png,
    /// JPEG format (lossy, smaller file size).
    Jpeg,
    /// WebP format (modern, good compression).
    WebP,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Detects format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    /// Detects format from a file path extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// A decoded frame ready to be written to disk or shown on screen.
///
/// Uses `Arc<Vec<u8>>` so the frame can travel through messages without
/// copying the pixel buffer; the data is only cloned at the encode boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportableFrame {
    /// RGBA pixel data (shared reference to avoid expensive clones).
    pub rgba_data: Arc<Vec<u8>>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl ExportableFrame {
    /// Creates a new exportable frame from RGBA data.
    #[must_use]
    pub fn new(rgba_data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            rgba_data: Arc::new(rgba_data),
            width,
            height,
        }
    }

    /// Converts to display data for the annotation canvas.
    #[must_use]
    pub fn to_image_data(&self) -> ImageData {
        ImageData::from_rgba(self.width, self.height, (*self.rgba_data).clone())
    }

    /// Writes the frame to `path`. The format is taken from the extension
    /// when not given explicitly; PNG is the fallback.
    pub fn save_to_file(&self, path: &Path, format: Option<ExportFormat>) -> Result<()> {
        let format = format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or_default();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let buffer =
            ImageBuffer::<Rgba<u8>, _>::from_raw(self.width, self.height, (*self.rgba_data).clone())
                .ok_or_else(|| {
                    Error::Media(MediaError::Other("frame buffer size mismatch".into()))
                })?;

        buffer
            .save_with_format(path, format.image_format())
            .map_err(|e| Error::Media(MediaError::from_message(&e.to_string())))
    }
}

/// Default capture location: `<pictures>/IcedShutter/capture_<timestamp>.png`,
/// falling back to the current directory when no picture dir exists.
#[must_use]
pub fn default_capture_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let file = format!("capture_{stamp}.png");
    match dirs::picture_dir() {
        Some(mut dir) => {
            dir.push(CAPTURE_DIR);
            dir.push(file);
            dir
        }
        None => PathBuf::from(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn solid_frame(width: u32, height: u32) -> ExportableFrame {
        ExportableFrame::new(vec![200u8; (width * height * 4) as usize], width, height)
    }

    #[test]
    fn format_round_trips_through_extensions() {
        for format in [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP] {
            assert_eq!(ExportFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(ExportFormat::from_extension("tiff"), None);
    }

    #[test]
    fn format_detected_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("/tmp/frame.JPG")),
            Some(ExportFormat::Jpeg)
        );
        assert_eq!(ExportFormat::from_path(Path::new("/tmp/frame")), None);
    }

    #[test]
    fn save_writes_a_decodable_png() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("frame.png");

        solid_frame(4, 3)
            .save_to_file(&path, None)
            .expect("save frame");

        let reloaded = image_rs::open(&path).expect("reload png");
        assert_eq!(reloaded.width(), 4);
        assert_eq!(reloaded.height(), 3);
    }

    #[test]
    fn save_rejects_mismatched_buffer() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.png");
        let frame = ExportableFrame::new(vec![0u8; 7], 4, 3);
        assert!(frame.save_to_file(&path, None).is_err());
    }

    #[test]
    fn to_image_data_preserves_dimensions() {
        let image = solid_frame(6, 2).to_image_data();
        assert_eq!(image.width, 6);
        assert_eq!(image.height, 2);
    }

    #[test]
    fn default_capture_path_is_timestamped_png() {
        let path = default_capture_path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("capture_"));
        assert!(name.ends_with(".png"));
    }
}
