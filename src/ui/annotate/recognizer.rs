// SPDX-License-Identifier: MPL-2.0
//! Pointer-to-gesture synthesis for the annotation canvas.
//!
//! Mouse and touch streams are folded into the discrete gesture events the
//! coordinator consumes. A single pointer pans (or taps, or long-presses);
//! two pointers additionally pinch and rotate around their midpoint. All
//! emitted payloads are cumulative since gesture start, with two-finger
//! geometry snapshotted when the pair forms.

use crate::overlay::{CanvasRegistry, GestureEvent, GesturePhase, GestureUpdate, OverlayId};
use iced::{Point, Radians, Vector};
use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};
use std::time::{Duration, Instant};

/// Movement below this distance keeps a press eligible for tap/long-press.
pub const TAP_SLOP: f32 = 8.0;

/// Hold duration that promotes a still press into a long-press.
pub const LONG_PRESS_DELAY: Duration = Duration::from_millis(450);

/// Finger distances below this yield no usable pinch ratio.
const MIN_PINCH_DISTANCE: f32 = 10.0;

/// A pointer source; the mouse behaves as one more finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Low-level pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { pointer: PointerId, position: Point },
    Moved { pointer: PointerId, position: Point },
    Released { pointer: PointerId, position: Point },
    /// The system dropped the pointer (e.g. a grab was stolen).
    Lost { pointer: PointerId },
}

/// Two-finger geometry captured when the pair forms.
#[derive(Debug, Clone, Copy)]
struct TwoFingerOrigin {
    distance: f32,
    angle: f32,
    /// Last cumulative values, replayed on the end events.
    last_scale: f32,
    last_rotation: f32,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    /// Single pointer down on an overlay; tap/pan/long-press undecided.
    Pending {
        overlay: OverlayId,
        origin: Point,
        pressed_at: Instant,
    },
    /// Pan in progress; pinch/rotate ride along while two pointers are down.
    Transforming {
        overlay: OverlayId,
        /// Translation accumulated across pointer-set changes.
        pan_base: Vector,
        /// Anchor the current pointer set is measured against.
        anchor: Point,
        pivot: Option<TwoFingerOrigin>,
    },
    LongPress {
        overlay: OverlayId,
    },
}

/// Folds pointer streams into gesture events.
#[derive(Debug)]
pub struct PointerRecognizer {
    pointers: BTreeMap<PointerId, Point>,
    phase: Phase,
}

impl Default for PointerRecognizer {
    fn default() -> Self {
        Self {
            pointers: BTreeMap::new(),
            phase: Phase::Idle,
        }
    }
}

impl PointerRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a press is waiting on the long-press timer; the caller must
    /// keep ticking [`Self::poll`] while this is true.
    #[must_use]
    pub fn needs_poll(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Whether any gesture phase is in flight.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Promotes an overdue still press into a long-press.
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        if let Phase::Pending {
            overlay,
            pressed_at,
            ..
        } = self.phase
        {
            if now.duration_since(pressed_at) >= LONG_PRESS_DELAY {
                self.phase = Phase::LongPress { overlay };
                return vec![GestureEvent::new(
                    overlay,
                    GesturePhase::Began,
                    GestureUpdate::LongPress {
                        touch_points: self.touch_points(),
                    },
                )];
            }
        }
        Vec::new()
    }

    /// Feeds one pointer event, producing zero or more gesture events.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        now: Instant,
        registry: &CanvasRegistry,
    ) -> Vec<GestureEvent> {
        match event {
            PointerEvent::Pressed { pointer, position } => {
                self.on_pressed(pointer, position, now, registry)
            }
            PointerEvent::Moved { pointer, position } => self.on_moved(pointer, position),
            PointerEvent::Released { pointer, position } => self.on_released(pointer, position),
            PointerEvent::Lost { pointer } => self.on_lost(pointer),
        }
    }

    fn on_pressed(
        &mut self,
        pointer: PointerId,
        position: Point,
        now: Instant,
        registry: &CanvasRegistry,
    ) -> Vec<GestureEvent> {
        let prev_anchor = self.anchor_value();
        let prev_pair = self.pair_ids();
        self.pointers.insert(pointer, position);

        let mut out = Vec::new();
        match self.phase {
            Phase::Idle => {
                if self.pointers.len() == 1 {
                    if let Some(overlay) = registry.hit_test(position) {
                        self.phase = Phase::Pending {
                            overlay,
                            origin: position,
                            pressed_at: now,
                        };
                    }
                }
            }
            Phase::Pending { overlay, .. } => {
                // A second finger settles the classification: this is a
                // two-finger transform.
                let anchor = self.anchor_value().unwrap_or(position);
                out.push(pan_event(overlay, GesturePhase::Began, Vector::new(0.0, 0.0)));
                self.phase = Phase::Transforming {
                    overlay,
                    pan_base: Vector::new(0.0, 0.0),
                    anchor,
                    pivot: None,
                };
                self.resync_pivot(None, &mut out);
            }
            Phase::Transforming { .. } => {
                self.reanchor(prev_anchor);
                self.resync_pivot(prev_pair, &mut out);
            }
            Phase::LongPress { overlay } => {
                // Extra fingers join the hold.
                out.push(GestureEvent::new(
                    overlay,
                    GesturePhase::Changed,
                    GestureUpdate::LongPress {
                        touch_points: self.touch_points(),
                    },
                ));
            }
        }
        out
    }

    fn on_moved(&mut self, pointer: PointerId, position: Point) -> Vec<GestureEvent> {
        if !self.pointers.contains_key(&pointer) {
            // Hover without a press.
            return Vec::new();
        }
        self.pointers.insert(pointer, position);

        let mut out = Vec::new();
        match self.phase {
            Phase::Idle => {}
            Phase::Pending { overlay, origin, .. } => {
                if distance(position, origin) > TAP_SLOP {
                    self.phase = Phase::Transforming {
                        overlay,
                        pan_base: Vector::new(0.0, 0.0),
                        anchor: origin,
                        pivot: None,
                    };
                    out.push(pan_event(overlay, GesturePhase::Began, Vector::new(0.0, 0.0)));
                    out.push(pan_event(
                        overlay,
                        GesturePhase::Changed,
                        Vector::new(position.x - origin.x, position.y - origin.y),
                    ));
                }
            }
            Phase::Transforming {
                overlay,
                pan_base,
                anchor,
                pivot,
            } => {
                if let Some(current) = self.anchor_value() {
                    let translation =
                        pan_base + Vector::new(current.x - anchor.x, current.y - anchor.y);
                    out.push(pan_event(overlay, GesturePhase::Changed, translation));
                }
                if let (Some(origin), Some((a, b))) = (pivot, self.pair_points()) {
                    let (dist, angle) = geometry(a, b);
                    let scale = if origin.distance > MIN_PINCH_DISTANCE {
                        dist / origin.distance
                    } else {
                        1.0
                    };
                    let rotation = wrap_angle(angle - origin.angle);
                    if let Phase::Transforming {
                        pivot: Some(live), ..
                    } = &mut self.phase
                    {
                        live.last_scale = scale;
                        live.last_rotation = rotation;
                    }
                    out.push(GestureEvent::new(
                        overlay,
                        GesturePhase::Changed,
                        GestureUpdate::Pinch { scale_factor: scale },
                    ));
                    out.push(GestureEvent::new(
                        overlay,
                        GesturePhase::Changed,
                        GestureUpdate::Rotate {
                            rotation: Radians(rotation),
                        },
                    ));
                }
            }
            Phase::LongPress { overlay } => {
                out.push(GestureEvent::new(
                    overlay,
                    GesturePhase::Changed,
                    GestureUpdate::LongPress {
                        touch_points: self.touch_points(),
                    },
                ));
            }
        }
        out
    }

    fn on_released(&mut self, pointer: PointerId, position: Point) -> Vec<GestureEvent> {
        if !self.pointers.contains_key(&pointer) {
            return Vec::new();
        }
        // Record the release position so final deltas use it.
        self.pointers.insert(pointer, position);
        let prev_anchor = self.anchor_value();
        let prev_pair = self.pair_ids();
        self.pointers.remove(&pointer);

        let mut out = Vec::new();
        match self.phase {
            Phase::Idle => {}
            Phase::Pending { overlay, .. } => {
                // Quick, still release: a tap.
                out.push(GestureEvent::new(
                    overlay,
                    GesturePhase::Began,
                    GestureUpdate::Tap,
                ));
                out.push(GestureEvent::new(
                    overlay,
                    GesturePhase::Ended,
                    GestureUpdate::Tap,
                ));
                self.phase = Phase::Idle;
            }
            Phase::Transforming {
                overlay,
                pan_base,
                anchor,
                pivot,
            } => {
                if self.pointers.is_empty() {
                    let translation = match prev_anchor {
                        Some(prev) => {
                            pan_base + Vector::new(prev.x - anchor.x, prev.y - anchor.y)
                        }
                        None => pan_base,
                    };
                    if let Some(origin) = pivot {
                        out.push(GestureEvent::new(
                            overlay,
                            GesturePhase::Ended,
                            GestureUpdate::Pinch {
                                scale_factor: origin.last_scale,
                            },
                        ));
                        out.push(GestureEvent::new(
                            overlay,
                            GesturePhase::Ended,
                            GestureUpdate::Rotate {
                                rotation: Radians(origin.last_rotation),
                            },
                        ));
                    }
                    out.push(pan_event(overlay, GesturePhase::Ended, translation));
                    self.phase = Phase::Idle;
                } else {
                    self.reanchor(prev_anchor);
                    self.resync_pivot(prev_pair, &mut out);
                }
            }
            Phase::LongPress { overlay } => {
                if self.pointers.is_empty() {
                    out.push(GestureEvent::new(
                        overlay,
                        GesturePhase::Ended,
                        GestureUpdate::LongPress {
                            touch_points: vec![position],
                        },
                    ));
                    self.phase = Phase::Idle;
                } else {
                    out.push(GestureEvent::new(
                        overlay,
                        GesturePhase::Changed,
                        GestureUpdate::LongPress {
                            touch_points: self.touch_points(),
                        },
                    ));
                }
            }
        }
        out
    }

    fn on_lost(&mut self, pointer: PointerId) -> Vec<GestureEvent> {
        if self.pointers.remove(&pointer).is_none() {
            return Vec::new();
        }

        let mut out = Vec::new();
        match self.phase {
            Phase::Idle => {}
            Phase::Pending { .. } => {
                // No session existed yet; nothing to cancel.
            }
            Phase::Transforming { overlay, pivot, .. } => {
                if let Some(origin) = pivot {
                    out.push(GestureEvent::new(
                        overlay,
                        GesturePhase::Cancelled,
                        GestureUpdate::Pinch {
                            scale_factor: origin.last_scale,
                        },
                    ));
                    out.push(GestureEvent::new(
                        overlay,
                        GesturePhase::Cancelled,
                        GestureUpdate::Rotate {
                            rotation: Radians(origin.last_rotation),
                        },
                    ));
                }
                out.push(pan_event(
                    overlay,
                    GesturePhase::Cancelled,
                    Vector::new(0.0, 0.0),
                ));
            }
            Phase::LongPress { overlay } => {
                out.push(GestureEvent::new(
                    overlay,
                    GesturePhase::Cancelled,
                    GestureUpdate::LongPress {
                        touch_points: Vec::new(),
                    },
                ));
            }
        }
        // A stolen pointer invalidates the whole stream.
        self.pointers.clear();
        self.phase = Phase::Idle;
        out
    }

    /// Keeps pan translation continuous when the pointer set changes.
    fn reanchor(&mut self, prev_anchor: Option<Point>) {
        let new_anchor = anchor_of(&self.pointers);
        if let Phase::Transforming {
            pan_base, anchor, ..
        } = &mut self.phase
        {
            if let Some(prev) = prev_anchor {
                *pan_base = *pan_base + Vector::new(prev.x - anchor.x, prev.y - anchor.y);
            }
            if let Some(next) = new_anchor {
                *anchor = next;
            }
        }
    }

    /// Ends and restarts the pinch/rotate pair when the tracked fingers
    /// changed.
    fn resync_pivot(
        &mut self,
        prev_pair: Option<(PointerId, PointerId)>,
        out: &mut Vec<GestureEvent>,
    ) {
        let new_pair = pair_ids_of(&self.pointers);
        let new_points = pair_points_of(&self.pointers);

        let Phase::Transforming { overlay, pivot, .. } = &mut self.phase else {
            return;
        };
        let overlay = *overlay;
        if new_pair == prev_pair && pivot.is_some() == new_pair.is_some() {
            return;
        }

        if let Some(origin) = pivot.take() {
            out.push(GestureEvent::new(
                overlay,
                GesturePhase::Ended,
                GestureUpdate::Pinch {
                    scale_factor: origin.last_scale,
                },
            ));
            out.push(GestureEvent::new(
                overlay,
                GesturePhase::Ended,
                GestureUpdate::Rotate {
                    rotation: Radians(origin.last_rotation),
                },
            ));
        }

        if let Some((a, b)) = new_points {
            let (distance, angle) = geometry(a, b);
            *pivot = Some(TwoFingerOrigin {
                distance,
                angle,
                last_scale: 1.0,
                last_rotation: 0.0,
            });
            out.push(GestureEvent::new(
                overlay,
                GesturePhase::Began,
                GestureUpdate::Pinch { scale_factor: 1.0 },
            ));
            out.push(GestureEvent::new(
                overlay,
                GesturePhase::Began,
                GestureUpdate::Rotate {
                    rotation: Radians(0.0),
                },
            ));
        }
    }

    fn touch_points(&self) -> Vec<Point> {
        self.pointers.values().copied().collect()
    }

    fn anchor_value(&self) -> Option<Point> {
        anchor_of(&self.pointers)
    }

    fn pair_ids(&self) -> Option<(PointerId, PointerId)> {
        pair_ids_of(&self.pointers)
    }

    fn pair_points(&self) -> Option<(Point, Point)> {
        pair_points_of(&self.pointers)
    }
}

fn pan_event(overlay: OverlayId, phase: GesturePhase, translation: Vector) -> GestureEvent {
    GestureEvent::new(overlay, phase, GestureUpdate::Pan { translation })
}

/// Single pointer: its position. Two or more: midpoint of the tracked pair.
fn anchor_of(pointers: &BTreeMap<PointerId, Point>) -> Option<Point> {
    match pair_points_of(pointers) {
        Some((a, b)) => Some(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)),
        None => pointers.values().next().copied(),
    }
}

fn pair_points_of(pointers: &BTreeMap<PointerId, Point>) -> Option<(Point, Point)> {
    let mut iter = pointers.values();
    match (iter.next(), iter.next()) {
        (Some(a), Some(b)) => Some((*a, *b)),
        _ => None,
    }
}

fn pair_ids_of(pointers: &BTreeMap<PointerId, Point>) -> Option<(PointerId, PointerId)> {
    let mut iter = pointers.keys();
    match (iter.next(), iter.next()) {
        (Some(a), Some(b)) => Some((*a, *b)),
        _ => None,
    }
}

fn geometry(a: Point, b: Point) -> (f32, f32) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx.hypot(dy), dy.atan2(dx))
}

fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Wraps an angle difference into `(-π, π]`.
fn wrap_angle(diff: f32) -> f32 {
    let wrapped = (diff + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
