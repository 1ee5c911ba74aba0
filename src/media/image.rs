// SPDX-License-Identifier: MPL-2.0
//! Still image loading.

use crate::error::{MediaError, Result};
use std::path::Path;

/// Decoded image ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: iced::widget::image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Builds display data from raw RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: iced::widget::image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Loads and decodes an image file into RGBA display data.
pub fn load(path: &Path) -> Result<ImageData> {
    let decoded = image_rs::open(path)
        .map_err(|e| MediaError::from_message(&e.to_string()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(ImageData::from_rgba(width, height, decoded.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn load_decodes_a_real_png() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("pixel.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");

        let image = load(&path).expect("load png");
        assert_eq!(image.width, 3);
        assert_eq!(image.height, 2);
    }

    #[test]
    fn load_reports_missing_files_as_media_errors() {
        let result = load(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(Error::Media(_))));
    }

    #[test]
    fn from_rgba_preserves_dimensions() {
        let image = ImageData::from_rgba(4, 3, vec![0; 4 * 3 * 4]);
        assert_eq!(image.width, 4);
        assert_eq!(image.height, 3);
    }
}
