// SPDX-License-Identifier: MPL-2.0
//! Message handlers and side-effect tasks for the application root.

use super::{App, Message, Screen};
use crate::error::Error;
use crate::media::{self, frame_export, thumbnails, MediaData};
use crate::ui::annotate;
use crate::ui::capture::{self, shutter};
use crate::ui::notifications::Notification;
use crate::ui::trim;
use iced::Task;
use std::path::PathBuf;
use std::time::Instant;

pub(super) fn handle_capture_message(app: &mut App, message: capture::Message) -> Task<Message> {
    let event = app.capture.update(message);
    handle_capture_event(app, event)
}

pub(super) fn handle_capture_event(app: &mut App, event: capture::Event) -> Task<Message> {
    match event {
        capture::Event::None => Task::none(),
        capture::Event::PickFile => open_file_dialog(),
        capture::Event::CaptureStill => capture_still(app),
        capture::Event::ClipRecorded { duration } => {
            open_trim(app, Some(duration.as_secs_f64()))
        }
        capture::Event::OpenTrim => open_trim(app, None),
    }
}

pub(super) fn handle_annotate_message(
    app: &mut App,
    message: annotate::Message,
) -> Task<Message> {
    let Some(state) = app.annotate.as_mut() else {
        return Task::none();
    };
    match state.update(message) {
        annotate::Event::None => {}
        annotate::Event::Exit => {
            app.annotate = None;
            app.screen = Screen::Capture;
        }
    }
    Task::none()
}

pub(super) fn handle_trim_message(app: &mut App, message: trim::Message) -> Task<Message> {
    let Some(state) = app.trim.as_mut() else {
        return Task::none();
    };
    match state.update(message) {
        trim::Event::None | trim::Event::SelectionChanged(_) => {}
        trim::Event::LoadFailed => {
            app.notifications
                .push(Notification::error("notification-trim-thumbnails-error"));
        }
        trim::Event::Exit => {
            app.screen = Screen::Capture;
        }
    }
    Task::none()
}

pub(super) fn handle_media_loaded(
    app: &mut App,
    path: PathBuf,
    result: Result<MediaData, Error>,
) -> Task<Message> {
    app.capture.is_loading = false;
    match result {
        Ok(data) => {
            log::info!("loaded {}", path.display());
            app.capture.set_media(data, path);
            // Loading new media discards derived screens.
            app.annotate = None;
            app.trim = None;
            app.screen = Screen::Capture;
        }
        Err(err) => {
            log::warn!("failed to load {}: {err}", path.display());
            app.notifications.push(Notification::error(error_key(&err)));
        }
    }
    Task::none()
}

pub(super) fn handle_frame_captured(
    app: &mut App,
    result: Result<media::ExportableFrame, Error>,
) -> Task<Message> {
    match result {
        Ok(frame) => {
            let path = frame_export::default_capture_path();
            match frame.save_to_file(&path, None) {
                Ok(()) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    app.notifications.push(
                        Notification::success("notification-capture-saved")
                            .with_arg("filename", name),
                    );
                }
                Err(err) => {
                    log::warn!("frame export failed: {err}");
                    app.notifications
                        .push(Notification::error("notification-capture-save-error"));
                }
            }
            app.annotate = Some(annotate::State::new(
                frame.to_image_data(),
                app.trash_radius,
            ));
            app.screen = Screen::Annotate;
        }
        Err(err) => {
            log::warn!("frame capture failed: {err}");
            app.notifications.push(Notification::error(error_key(&err)));
        }
    }
    Task::none()
}

pub(super) fn handle_tick(app: &mut App, now: Instant) -> Task<Message> {
    app.notifications.tick();

    let event = app
        .capture
        .update(capture::Message::Shutter(shutter::Message::Tick(now)));
    let task = handle_capture_event(app, event);

    if let Some(state) = app.annotate.as_mut() {
        let _ = state.update(annotate::Message::Tick(now));
    }

    task
}

/// Captures the current frame: directly for stills, through a seek/decode
/// task for videos (at the trim in-point).
fn capture_still(app: &mut App) -> Task<Message> {
    match app.capture.media() {
        Some(MediaData::Image(image)) => {
            app.annotate = Some(annotate::State::new(image.clone(), app.trash_radius));
            app.screen = Screen::Annotate;
            Task::none()
        }
        Some(MediaData::Video(video)) => {
            let path = video.path.clone();
            let position = app
                .trim
                .as_ref()
                .map(|t| t.selection().start_secs())
                .unwrap_or(0.0);
            Task::perform(
                async move { thumbnails::frame_at(&path, position) },
                Message::FrameCaptured,
            )
        }
        None => Task::none(),
    }
}

/// Switches to the trim screen, creating its state and kicking off
/// thumbnail extraction on first entry. `clip_secs` applies a recorded clip
/// range.
fn open_trim(app: &mut App, clip_secs: Option<f64>) -> Task<Message> {
    let Some(MediaData::Video(video)) = app.capture.media() else {
        return Task::none();
    };
    let duration = video.duration_secs;
    let path = video.path.clone();

    if app.trim.is_none() {
        app.trim = Some(trim::State::new(duration));
    }
    let Some(state) = app.trim.as_mut() else {
        return Task::none();
    };
    if let Some(clip) = clip_secs {
        state.select_clip(clip);
    }
    app.screen = Screen::Trim;

    if state.strip().is_none() && state.is_loading {
        let count = app.strip_thumbnails;
        Task::perform(
            async move { thumbnails::extract_strip(&path, count) },
            |result| Message::Trim(trim::Message::ThumbnailsLoaded(result)),
        )
    } else {
        Task::none()
    }
}

pub(super) fn open_file_dialog() -> Task<Message> {
    Task::perform(
        async {
            let extensions: Vec<&str> = media::IMAGE_EXTENSIONS
                .iter()
                .chain(media::VIDEO_EXTENSIONS)
                .copied()
                .collect();
            rfd::AsyncFileDialog::new()
                .add_filter("Media", &extensions)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

pub(super) fn load_media_task(path: PathBuf) -> Task<Message> {
    let load_path = path.clone();
    Task::perform(
        async move { media::load_media(&load_path) },
        move |result| Message::MediaLoaded {
            path: path.clone(),
            result,
        },
    )
}

/// Notification key for a load/capture error.
fn error_key(err: &Error) -> &'static str {
    match err {
        Error::Media(media_err) => media_err.i18n_key(),
        _ => "error-media-general",
    }
}
