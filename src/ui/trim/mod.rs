// SPDX-License-Identifier: MPL-2.0
//! Video trim screen: a thumbnail strip with draggable in/out handles.
//!
//! Handle drags use the same origin-snapshot pattern as the overlay
//! gestures: the handle's time position is captured when grabbed and every
//! move recomputes from that snapshot and the cumulative pixel delta.

mod view;

pub use view::view;

use crate::error::Error;
use crate::media::ImageData;
use iced::{Point, Rectangle};

/// Shortest selectable clip, in seconds.
pub const MIN_CLIP_SECS: f64 = 0.5;

/// Distance within which a press grabs a handle, in pixels.
const HANDLE_GRAB_DISTANCE: f32 = 16.0;

/// The kept range of the video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimSelection {
    start_secs: f64,
    end_secs: f64,
}

impl TrimSelection {
    /// The whole video.
    #[must_use]
    pub fn full(duration_secs: f64) -> Self {
        Self {
            start_secs: 0.0,
            end_secs: duration_secs.max(MIN_CLIP_SECS),
        }
    }

    /// Builds a selection clamped to the video bounds and minimum length.
    #[must_use]
    pub fn clamped(start_secs: f64, end_secs: f64, duration_secs: f64) -> Self {
        let duration = duration_secs.max(MIN_CLIP_SECS);
        let start = start_secs.clamp(0.0, duration - MIN_CLIP_SECS);
        let end = end_secs.clamp(start + MIN_CLIP_SECS, duration);
        Self {
            start_secs: start,
            end_secs: end,
        }
    }

    #[must_use]
    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    #[must_use]
    pub fn end_secs(&self) -> f64 {
        self.end_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Extracted strip thumbnails plus the source duration.
#[derive(Debug, Clone)]
pub struct ThumbnailStrip {
    pub thumbnails: Vec<ImageData>,
    pub duration_secs: f64,
}

/// Which handle a drag owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    In,
    Out,
}

/// Origin snapshot of an active handle drag.
#[derive(Debug, Clone, Copy)]
struct DragState {
    handle: Handle,
    grab_x: f32,
    origin_secs: f64,
}

/// Pointer events from the strip canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StripEvent {
    Pressed(Point),
    Moved(Point),
    Released,
}

/// Messages consumed by [`State::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// Async thumbnail extraction finished.
    ThumbnailsLoaded(Result<Vec<ImageData>, Error>),
    /// Pointer event over the strip, with the strip bounds for time
    /// mapping.
    Strip { event: StripEvent, bounds: Rectangle },
    /// Toolbar request to leave the screen.
    Back,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    None,
    SelectionChanged(TrimSelection),
    /// Thumbnail extraction failed; the parent shows a notification.
    LoadFailed,
    Exit,
}

/// Local state of the trim screen.
#[derive(Debug)]
pub struct State {
    duration_secs: f64,
    strip: Option<ThumbnailStrip>,
    pub is_loading: bool,
    selection: TrimSelection,
    drag: Option<DragState>,
    /// Scrub preview position while a handle is being dragged.
    scrub_secs: Option<f64>,
}

impl State {
    /// Creates the screen for a video of `duration_secs`.
    #[must_use]
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs: duration_secs.max(MIN_CLIP_SECS),
            strip: None,
            is_loading: true,
            selection: TrimSelection::full(duration_secs),
            drag: None,
            scrub_secs: None,
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ThumbnailsLoaded(Ok(thumbnails)) => {
                self.is_loading = false;
                self.strip = Some(ThumbnailStrip {
                    thumbnails,
                    duration_secs: self.duration_secs,
                });
                Event::None
            }
            Message::ThumbnailsLoaded(Err(err)) => {
                log::warn!("trim strip extraction failed: {err}");
                self.is_loading = false;
                Event::LoadFailed
            }
            Message::Strip { event, bounds } => self.handle_strip_event(event, bounds),
            Message::Back => Event::Exit,
        }
    }

    fn handle_strip_event(&mut self, event: StripEvent, bounds: Rectangle) -> Event {
        match event {
            StripEvent::Pressed(position) => {
                let in_x = self.secs_to_x(self.selection.start_secs, bounds);
                let out_x = self.secs_to_x(self.selection.end_secs, bounds);

                let to_in = (position.x - in_x).abs();
                let to_out = (position.x - out_x).abs();

                let grabbed = if to_in <= to_out && to_in <= HANDLE_GRAB_DISTANCE {
                    Some((Handle::In, self.selection.start_secs))
                } else if to_out <= HANDLE_GRAB_DISTANCE {
                    Some((Handle::Out, self.selection.end_secs))
                } else {
                    None
                };

                match grabbed {
                    Some((handle, origin_secs)) => {
                        self.drag = Some(DragState {
                            handle,
                            grab_x: position.x,
                            origin_secs,
                        });
                        self.scrub_secs = Some(origin_secs);
                    }
                    None => {
                        // Plain press scrubs the preview.
                        self.scrub_secs = Some(self.x_to_secs(position.x, bounds));
                    }
                }
                Event::None
            }
            StripEvent::Moved(position) => {
                let Some(drag) = self.drag else {
                    return Event::None;
                };
                // Cumulative pixel delta from the grab point, applied to the
                // origin snapshot.
                let delta_secs =
                    f64::from(position.x - drag.grab_x) * self.secs_per_pixel(bounds);
                let target = drag.origin_secs + delta_secs;

                let updated = match drag.handle {
                    Handle::In => TrimSelection::clamped(
                        target,
                        self.selection.end_secs,
                        self.duration_secs,
                    ),
                    Handle::Out => TrimSelection::clamped(
                        self.selection.start_secs,
                        target,
                        self.duration_secs,
                    ),
                };

                self.scrub_secs = Some(match drag.handle {
                    Handle::In => updated.start_secs,
                    Handle::Out => updated.end_secs,
                });

                if updated != self.selection {
                    self.selection = updated;
                    Event::SelectionChanged(updated)
                } else {
                    Event::None
                }
            }
            StripEvent::Released => {
                let was_dragging = self.drag.take().is_some();
                self.scrub_secs = None;
                if was_dragging {
                    Event::SelectionChanged(self.selection)
                } else {
                    Event::None
                }
            }
        }
    }

    /// Applies a recorded clip range starting at the current in-point.
    pub fn select_clip(&mut self, clip_secs: f64) {
        let start = self.selection.start_secs;
        self.selection = TrimSelection::clamped(start, start + clip_secs, self.duration_secs);
    }

    #[must_use]
    pub fn selection(&self) -> TrimSelection {
        self.selection
    }

    #[must_use]
    pub fn strip(&self) -> Option<&ThumbnailStrip> {
        self.strip.as_ref()
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    #[must_use]
    pub fn scrub_secs(&self) -> Option<f64> {
        self.scrub_secs
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn secs_per_pixel(&self, bounds: Rectangle) -> f64 {
        if bounds.width <= 0.0 {
            return 0.0;
        }
        self.duration_secs / f64::from(bounds.width)
    }

    fn secs_to_x(&self, secs: f64, bounds: Rectangle) -> f32 {
        ((secs / self.duration_secs) * f64::from(bounds.width)) as f32
    }

    fn x_to_secs(&self, x: f32, bounds: Rectangle) -> f64 {
        (f64::from(x) * self.secs_per_pixel(bounds)).clamp(0.0, self.duration_secs)
    }
}
