// SPDX-License-Identifier: MPL-2.0
//! Capture screen: media preview plus the shutter bar.
//!
//! The shutter captures a still (tap) or records a clip range (hold) from
//! the loaded media; both hand off to the annotate or trim screens through
//! parent events.

pub mod shutter;
mod view;

pub use view::view;

use crate::media::MediaData;
use std::path::PathBuf;
use std::time::Duration;

/// Messages consumed by [`State::update`].
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Shutter(shutter::Message),
    /// Empty-state button: pick a media file.
    OpenFile,
    /// Toolbar button: open the trim strip for the loaded video.
    OpenTrim,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// Show the file picker.
    PickFile,
    /// Capture the current frame into the annotate screen.
    CaptureStill,
    /// A hold-recording completed; select this clip range for trimming.
    ClipRecorded { duration: Duration },
    /// Open the trim screen.
    OpenTrim,
}

/// Local state of the capture screen.
#[derive(Debug)]
pub struct State {
    media: Option<MediaData>,
    media_path: Option<PathBuf>,
    shutter: shutter::State,
    pub is_loading: bool,
}

impl State {
    #[must_use]
    pub fn new(max_clip_secs: u32) -> Self {
        Self {
            media: None,
            media_path: None,
            shutter: shutter::State::new(max_clip_secs),
            is_loading: false,
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Shutter(message) => {
                if self.media.is_none() {
                    // No media loaded: the shutter is decorative.
                    return Event::None;
                }
                match self.shutter.handle(message) {
                    shutter::Effect::CaptureStill => Event::CaptureStill,
                    shutter::Effect::RecordingStarted => Event::None,
                    shutter::Effect::RecordingFinished { duration } => {
                        if self.has_video() {
                            Event::ClipRecorded { duration }
                        } else {
                            // Holding over a still image degrades to a
                            // capture.
                            Event::CaptureStill
                        }
                    }
                    shutter::Effect::None => Event::None,
                }
            }
            Message::OpenFile => Event::PickFile,
            Message::OpenTrim => {
                if self.has_video() {
                    Event::OpenTrim
                } else {
                    Event::None
                }
            }
        }
    }

    pub fn set_media(&mut self, media: MediaData, path: PathBuf) {
        self.media = Some(media);
        self.media_path = Some(path);
        self.is_loading = false;
    }

    #[must_use]
    pub fn media(&self) -> Option<&MediaData> {
        self.media.as_ref()
    }

    #[must_use]
    pub fn media_path(&self) -> Option<&std::path::Path> {
        self.media_path.as_deref()
    }

    #[must_use]
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        self.media.as_ref().is_some_and(MediaData::is_video)
    }

    #[must_use]
    pub fn shutter(&self) -> &shutter::State {
        &self.shutter
    }

    /// Whether the app tick subscription must stay alive for this screen.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.shutter.is_engaged()
    }
}
