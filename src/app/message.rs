// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::{ExportableFrame, MediaData};
use crate::ui::annotate;
use crate::ui::capture;
use crate::ui::notifications;
use crate::ui::trim;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Capture(capture::Message),
    Annotate(annotate::Message),
    Trim(trim::Message),
    Notification(notifications::NotificationMessage),
    /// Async media loading finished.
    MediaLoaded {
        path: PathBuf,
        result: Result<MediaData, Error>,
    },
    /// Async still-frame capture finished.
    FrameCaptured(Result<ExportableFrame, Error>),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Periodic tick for the shutter ring, gesture timers, animations and
    /// notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional media path to preload on startup.
    pub file_path: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
}
