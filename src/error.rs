// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
}

/// Specific error types for media loading and capture issues.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone)]
pub enum MediaError {
    /// File format is not supported (e.g., unknown extension)
    UnsupportedFormat,

    /// File appears corrupted or has invalid data
    CorruptedFile,

    /// File exists but contains no video stream
    NoVideoStream,

    /// Decoding a frame failed (thumbnails, poster, frame capture)
    DecodeFailed(String),

    /// I/O error (file not found, permission denied, etc.)
    IoError(String),

    /// Generic error with raw message
    Other(String),
}

impl MediaError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MediaError::UnsupportedFormat => "error-media-unsupported-format",
            MediaError::CorruptedFile => "error-media-corrupted",
            MediaError::NoVideoStream => "error-media-no-video-stream",
            MediaError::DecodeFailed(_) => "error-media-decode-failed",
            MediaError::IoError(_) => "error-media-io",
            MediaError::Other(_) => "error-media-general",
        }
    }

    /// Attempts to parse a raw error message into a specific `MediaError` type.
    /// This is used to categorize errors surfaced by FFmpeg and the image decoder.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return MediaError::IoError(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("no video track") {
            return MediaError::NoVideoStream;
        }

        if msg_lower.contains("corrupt")
            || msg_lower.contains("invalid data")
            || msg_lower.contains("malformed")
        {
            return MediaError::CorruptedFile;
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("decode")
            || msg_lower.contains("scaling")
            || msg_lower.contains("seek")
            || msg_lower.contains("unsupported")
        {
            return MediaError::DecodeFailed(msg.to_string());
        }

        MediaError::Other(msg.to_string())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::UnsupportedFormat => write!(f, "Unsupported media format"),
            MediaError::CorruptedFile => write!(f, "Media file is corrupted"),
            MediaError::NoVideoStream => write!(f, "No video stream found"),
            MediaError::DecodeFailed(msg) => write!(f, "Decoding failed: {}", msg),
            MediaError::IoError(msg) => write!(f, "I/O error: {}", msg),
            MediaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn media_error_from_message_io() {
        let err = MediaError::from_message("No such file or directory");
        assert!(matches!(err, MediaError::IoError(_)));
    }

    #[test]
    fn media_error_from_message_no_stream() {
        let err = MediaError::from_message("No video stream found in file");
        assert!(matches!(err, MediaError::NoVideoStream));
    }

    #[test]
    fn media_error_from_message_corrupted() {
        let err = MediaError::from_message("Invalid data found when processing input");
        assert!(matches!(err, MediaError::CorruptedFile));
    }

    #[test]
    fn media_error_from_message_decoding() {
        let err = MediaError::from_message("Packet send failed: error");
        assert!(matches!(err, MediaError::DecodeFailed(_)));
    }

    #[test]
    fn media_error_i18n_keys() {
        assert_eq!(
            MediaError::UnsupportedFormat.i18n_key(),
            "error-media-unsupported-format"
        );
        assert_eq!(MediaError::CorruptedFile.i18n_key(), "error-media-corrupted");
        assert_eq!(
            MediaError::NoVideoStream.i18n_key(),
            "error-media-no-video-stream"
        );
    }
}
