// SPDX-License-Identifier: MPL-2.0
//! Text-overlay annotation screen.
//!
//! This module follows the "state down, messages up" pattern of the other
//! screens. It composes the interaction core (`overlay::*`): the recognizer
//! turns pointer streams into gesture events, the coordinator turns those
//! into effects, and this facade applies the effects to the registry and
//! the screen chrome.
//!
//! Fades and the tap-to-edit pose transition are modeled as pending
//! animation states; overlay removal and chrome restoration are sequenced
//! strictly after the corresponding animation completes.

pub mod editing;
pub mod recognizer;
mod view;

pub use editing::EditingSession;
pub use recognizer::{PointerEvent, PointerId, PointerRecognizer};
pub use view::view;

use crate::media::ImageData;
use crate::overlay::{
    CanvasRegistry, Effect, GestureCoordinator, GestureEvent, OverlayId, OverlayStyle,
    OverlayTransform, TextOverlay, TrashZone,
};
use editing::Outcome;
use iced::{Point, Rectangle, Size};
use std::time::{Duration, Instant};

/// Fade-out duration before a trashed overlay is removed.
const FADE_OUT_DURATION: Duration = Duration::from_millis(180);

/// Pose-transition duration before the edit panel opens.
const POSE_DURATION: Duration = Duration::from_millis(160);

/// Messages consumed by [`State::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer event from the canvas, with the canvas size for zone
    /// anchoring.
    Canvas {
        event: PointerEvent,
        viewport: Size,
    },
    Editing(editing::Message),
    /// Toolbar request to create a new overlay.
    AddOverlay,
    /// Periodic tick driving long-press detection and animations.
    Tick(Instant),
    /// Toolbar request to leave the screen.
    Done,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// Leave the annotate screen.
    Exit,
}

/// Animation whose completion gates removal and chrome restoration.
#[derive(Debug, Clone)]
enum PendingAnimation {
    /// Trashed overlay fading out; removed on completion.
    RemoveAfterFade {
        overlay: OverlayId,
        started_at: Instant,
        emit_ended: bool,
    },
    /// Tapped overlay moving to the presentation pose; the edit panel opens
    /// on completion.
    EditAfterPose {
        overlay: OverlayId,
        pre_tap: OverlayTransform,
        started_at: Instant,
        emit_ended: bool,
    },
}

impl PendingAnimation {
    fn defer_ended(&mut self) {
        match self {
            PendingAnimation::RemoveAfterFade { emit_ended, .. }
            | PendingAnimation::EditAfterPose { emit_ended, .. } => *emit_ended = true,
        }
    }
}

/// Local state of the annotation screen.
#[derive(Debug)]
pub struct State {
    backdrop: ImageData,
    registry: CanvasRegistry,
    coordinator: GestureCoordinator,
    recognizer: PointerRecognizer,
    trash_radius: f32,
    /// Long-press drag in flight: dim the canvas and show the zone.
    trash_active: bool,
    /// Any tracked touch point is currently inside the zone.
    trash_armed: bool,
    /// Toolbar suppressed while a manipulation owns the canvas.
    chrome_hidden: bool,
    editing: Option<EditingSession>,
    pending: Option<PendingAnimation>,
    /// Style used for the next new overlay; follows the last commit.
    last_style: OverlayStyle,
    viewport: Option<Size>,
}

impl State {
    /// Creates the screen over the image being annotated.
    #[must_use]
    pub fn new(backdrop: ImageData, trash_radius: f32) -> Self {
        Self {
            backdrop,
            registry: CanvasRegistry::new(),
            coordinator: GestureCoordinator::new(),
            recognizer: PointerRecognizer::new(),
            trash_radius,
            trash_active: false,
            trash_armed: false,
            chrome_hidden: false,
            editing: None,
            pending: None,
            last_style: OverlayStyle::default(),
            viewport: None,
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Canvas { event, viewport } => {
                self.viewport = Some(viewport);
                // The edit panel is modal; the canvas is inert underneath.
                if self.editing.is_none() {
                    let gestures = self.recognizer.handle(event, Instant::now(), &self.registry);
                    self.process_gestures(gestures);
                }
                Event::None
            }
            Message::Tick(now) => {
                let gestures = self.recognizer.poll(now);
                self.process_gestures(gestures);
                self.advance_animations(now);
                Event::None
            }
            Message::AddOverlay => {
                if self.editing.is_none() && self.pending.is_none() {
                    self.editing = Some(EditingSession::create(
                        self.last_style,
                        self.presentation_pose(),
                    ));
                }
                Event::None
            }
            Message::Editing(message) => {
                if let Some(session) = &mut self.editing {
                    if let Some(outcome) = session.update(message) {
                        self.editing = None;
                        match outcome {
                            Outcome::Committed(Some(overlay)) => {
                                self.last_style = overlay.style;
                                self.registry.add(overlay);
                            }
                            Outcome::Cancelled(Some(overlay)) => {
                                self.registry.add(overlay);
                            }
                            Outcome::Committed(None) | Outcome::Cancelled(None) => {}
                        }
                    }
                }
                Event::None
            }
            Message::Done => Event::Exit,
        }
    }

    /// Whether the app tick subscription must stay alive for this screen.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.recognizer.needs_poll() || self.pending.is_some()
    }

    fn process_gestures(&mut self, gestures: Vec<GestureEvent>) {
        for gesture in gestures {
            let effects = self.coordinator.handle(gesture, &self.registry);
            self.apply_effects(effects);
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        // Set when an effect in this batch starts a completion-gated
        // animation; the trailing ManipulationEnded then waits for it.
        let mut defer_ended = false;

        for effect in effects {
            match effect {
                Effect::ManipulationStarted(id) => {
                    self.registry.begin_capture(id);
                    self.chrome_hidden = true;
                }
                Effect::TransformChanged { overlay, transform } => {
                    if let Some(o) = self.registry.get_mut(overlay) {
                        o.transform = transform;
                    }
                }
                Effect::ManipulationEnded(_) => {
                    if defer_ended {
                        if let Some(pending) = &mut self.pending {
                            pending.defer_ended();
                        }
                    } else {
                        self.registry.end_capture();
                        self.chrome_hidden = false;
                    }
                }
                Effect::EditRequested(id) => {
                    let Some(pre_tap) = self.registry.get(id).map(|o| o.transform) else {
                        continue;
                    };
                    let pose = self.presentation_pose();
                    if let Some(o) = self.registry.get_mut(id) {
                        o.transform = pose;
                    }
                    self.pending = Some(PendingAnimation::EditAfterPose {
                        overlay: id,
                        pre_tap,
                        started_at: Instant::now(),
                        emit_ended: false,
                    });
                    defer_ended = true;
                }
                Effect::LongPressBegan {
                    overlay,
                    touch_points,
                } => {
                    self.trash_active = true;
                    self.trash_armed = self.zone_contains(&touch_points);
                    if let Some(o) = self.registry.get_mut(overlay) {
                        o.visible = false;
                    }
                }
                Effect::LongPressMoved { touch_points, .. } => {
                    self.trash_armed = self.zone_contains(&touch_points);
                }
                Effect::LongPressReleased {
                    overlay,
                    touch_points,
                    cancelled,
                } => {
                    let armed = !cancelled && self.zone_contains(&touch_points);
                    // Zone and dimming always deactivate, whatever the
                    // outcome.
                    self.trash_active = false;
                    self.trash_armed = false;

                    if armed {
                        self.pending = Some(PendingAnimation::RemoveAfterFade {
                            overlay,
                            started_at: Instant::now(),
                            emit_ended: false,
                        });
                        defer_ended = true;
                    } else if let Some(o) = self.registry.get_mut(overlay) {
                        o.visible = true;
                    }
                }
            }
        }
    }

    fn advance_animations(&mut self, now: Instant) {
        let Some(pending) = self.pending.clone() else {
            return;
        };
        match pending {
            PendingAnimation::RemoveAfterFade {
                overlay,
                started_at,
                emit_ended,
            } => {
                if now.duration_since(started_at) >= FADE_OUT_DURATION {
                    self.registry.remove(overlay);
                    self.pending = None;
                    if emit_ended {
                        self.registry.end_capture();
                        self.chrome_hidden = false;
                    }
                }
            }
            PendingAnimation::EditAfterPose {
                overlay,
                pre_tap,
                started_at,
                emit_ended,
            } => {
                if now.duration_since(started_at) >= POSE_DURATION {
                    let removed = self.registry.remove(overlay);
                    self.pending = None;
                    if emit_ended {
                        self.registry.end_capture();
                        self.chrome_hidden = false;
                    }
                    if let Some(overlay) = removed {
                        self.editing = Some(EditingSession::edit(&overlay, pre_tap));
                    }
                }
            }
        }
    }

    /// Canonical pose for tapped and newly created overlays: horizontally
    /// centered in the upper part of the canvas, upright, unscaled.
    fn presentation_pose(&self) -> OverlayTransform {
        match self.viewport {
            Some(size) => OverlayTransform::at(Point::new(size.width / 2.0, size.height / 3.0)),
            None => OverlayTransform::default(),
        }
    }

    /// The deletion zone for the current viewport.
    #[must_use]
    pub fn trash_zone(&self) -> Option<TrashZone> {
        self.viewport.map(|size| {
            TrashZone::anchored_in(Rectangle::new(Point::ORIGIN, size), self.trash_radius)
        })
    }

    fn zone_contains(&self, points: &[Point]) -> bool {
        self.trash_zone()
            .is_some_and(|zone| zone.contains_any(points))
    }

    // ────────────────────────────────────────────────────────────────────
    // Accessors
    // ────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn backdrop(&self) -> &ImageData {
        &self.backdrop
    }

    #[must_use]
    pub fn registry(&self) -> &CanvasRegistry {
        &self.registry
    }

    /// Seeds the canvas with an overlay; used by tests and restored drafts.
    pub fn insert_overlay(&mut self, overlay: TextOverlay) -> OverlayId {
        self.registry.add(overlay)
    }

    #[must_use]
    pub fn is_trash_active(&self) -> bool {
        self.trash_active
    }

    #[must_use]
    pub fn is_trash_armed(&self) -> bool {
        self.trash_armed
    }

    #[must_use]
    pub fn is_chrome_hidden(&self) -> bool {
        self.chrome_hidden
    }

    #[must_use]
    pub fn editing(&self) -> Option<&EditingSession> {
        self.editing.as_ref()
    }
}
