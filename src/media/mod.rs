// SPDX-License-Identifier: MPL-2.0
//! Media loading and type detection.
//!
//! The capture screen works with one loaded media item at a time: either a
//! still image or a video. Loading is synchronous and meant to be driven
//! through `Task::perform` from the update loop.

pub mod frame_export;
pub mod image;
pub mod thumbnails;
pub mod video;

pub use frame_export::{ExportFormat, ExportableFrame};
pub use image::ImageData;
pub use video::VideoData;

use crate::error::{MediaError, Result};
use std::path::Path;

/// File extensions recognized as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "ico"];

/// File extensions recognized as videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi", "m4v"];

/// Coarse media classification derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Loaded media ready for preview and editing.
#[derive(Debug, Clone)]
pub enum MediaData {
    Image(ImageData),
    Video(VideoData),
}

impl MediaData {
    /// The image shown on the capture screen: the still itself, or the
    /// video's poster frame.
    #[must_use]
    pub fn preview(&self) -> &ImageData {
        match self {
            MediaData::Image(image) => image,
            MediaData::Video(video) => &video.poster,
        }
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self, MediaData::Video(_))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.preview().width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.preview().height
    }
}

/// Classifies a path by its extension, if recognized.
#[must_use]
pub fn detect_kind(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Some(MediaKind::Image);
    }
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Some(MediaKind::Video);
    }
    None
}

/// Loads a media file, dispatching on the detected kind.
pub fn load_media(path: &Path) -> Result<MediaData> {
    match detect_kind(path) {
        Some(MediaKind::Image) => Ok(MediaData::Image(image::load(path)?)),
        Some(MediaKind::Video) => Ok(MediaData::Video(video::probe(path)?)),
        None => Err(MediaError::UnsupportedFormat.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    #[test]
    fn detect_kind_recognizes_images_case_insensitively() {
        assert_eq!(
            detect_kind(&PathBuf::from("photo.JPG")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            detect_kind(&PathBuf::from("photo.png")),
            Some(MediaKind::Image)
        );
    }

    #[test]
    fn detect_kind_recognizes_videos() {
        assert_eq!(
            detect_kind(&PathBuf::from("clip.mp4")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            detect_kind(&PathBuf::from("clip.MOV")),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn detect_kind_rejects_unknown_extensions() {
        assert_eq!(detect_kind(&PathBuf::from("notes.txt")), None);
        assert_eq!(detect_kind(&PathBuf::from("no_extension")), None);
    }

    #[test]
    fn load_media_rejects_unsupported_format() {
        let result = load_media(&PathBuf::from("document.pdf"));
        assert!(matches!(
            result,
            Err(Error::Media(MediaError::UnsupportedFormat))
        ));
    }
}
