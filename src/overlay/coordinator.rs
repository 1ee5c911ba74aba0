// SPDX-License-Identifier: MPL-2.0
//! Per-kind gesture state machines over origin snapshots.
//!
//! Each gesture kind runs an independent `Idle → Active → Idle` machine per
//! overlay. A session snapshots the overlay's transform when the gesture
//! begins; every `Changed` event recomputes that session's transform
//! component from the snapshot and the cumulative delta. Concurrent kinds
//! (pan + pinch + rotate during a two-finger drag) therefore never read each
//! other's partial writes: each owns exactly one component.
//!
//! `Ended`, `Cancelled` and `Failed` all tear the session down the same way;
//! cancellation merely skips the final delta application.

use super::gesture::{GestureEvent, GestureKind, GesturePhase, GestureUpdate};
use super::registry::{CanvasRegistry, OverlayId};
use super::transform::{OverlayTransform, TransformDelta};
use iced::Point;

/// The lifetime of one active recognizer on one overlay.
#[derive(Debug, Clone)]
struct GestureSession {
    overlay: OverlayId,
    kind: GestureKind,
    /// Transform captured at gesture begin; the base for cumulative deltas.
    origin: OverlayTransform,
}

/// Effects the annotate screen applies after feeding an event in.
///
/// Effects are ordered: transform and long-press payloads come before the
/// `ManipulationEnded` marker for the same event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// First gesture of an overlap window became active on the overlay.
    /// Fired exactly once until the matching `ManipulationEnded`.
    ManipulationStarted(OverlayId),
    /// The overlay's transform was recomputed from a session origin.
    TransformChanged {
        overlay: OverlayId,
        transform: OverlayTransform,
    },
    /// The last active gesture on the overlay reached a terminal phase.
    ManipulationEnded(OverlayId),
    /// A tap completed: open the edit flow for this overlay.
    EditRequested(OverlayId),
    /// A long-press became active; the deletion flow starts.
    LongPressBegan {
        overlay: OverlayId,
        touch_points: Vec<Point>,
    },
    /// Long-press touch points moved; re-evaluate the trash zone.
    LongPressMoved {
        overlay: OverlayId,
        touch_points: Vec<Point>,
    },
    /// The long-press reached a terminal phase. `cancelled` is true for
    /// `Cancelled`/`Failed`, which must behave like a release outside the
    /// trash zone.
    LongPressReleased {
        overlay: OverlayId,
        touch_points: Vec<Point>,
        cancelled: bool,
    },
}

/// Routes discrete gesture events into per-kind sessions and emits effects.
#[derive(Debug, Default)]
pub struct GestureCoordinator {
    sessions: Vec<GestureSession>,
}

impl GestureCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay currently owning the touch stream, if any session is active.
    #[must_use]
    pub fn active_overlay(&self) -> Option<OverlayId> {
        self.sessions.first().map(|s| s.overlay)
    }

    /// Whether any gesture session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.sessions.is_empty()
    }

    /// Whether a session of `kind` is active on `overlay`.
    #[must_use]
    pub fn has_session(&self, overlay: OverlayId, kind: GestureKind) -> bool {
        self.session_index(overlay, kind).is_some()
    }

    /// Feeds one gesture event through the state machines.
    ///
    /// The registry is only read (for origin snapshots and liveness checks);
    /// transform writes happen in the caller when it applies
    /// [`Effect::TransformChanged`].
    pub fn handle(&mut self, event: GestureEvent, registry: &CanvasRegistry) -> Vec<Effect> {
        match event.phase {
            GesturePhase::Began => self.handle_began(event, registry),
            GesturePhase::Changed => self.handle_changed(event, registry),
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                self.handle_terminal(event, registry)
            }
        }
    }

    fn handle_began(&mut self, event: GestureEvent, registry: &CanvasRegistry) -> Vec<Effect> {
        let kind = event.kind();

        let Some(overlay) = registry.get(event.overlay) else {
            // Recognizer not attached to a known overlay: ignore.
            log::trace!("gesture {kind:?} began on unknown overlay, ignoring");
            return Vec::new();
        };

        // One overlay owns the stream at a time; late touches on a different
        // overlay are dropped for the duration of the manipulation.
        if let Some(active) = self.active_overlay() {
            if active != event.overlay {
                log::trace!("gesture {kind:?} began while another overlay is captured, ignoring");
                return Vec::new();
            }
        }

        // Simultaneity policy: a kind incompatible with any active session
        // on this overlay is suppressed (tap vs everything).
        let blocked = self
            .sessions
            .iter()
            .any(|s| s.overlay == event.overlay && !kind.recognizes_simultaneously_with(s.kind));
        if blocked {
            return Vec::new();
        }

        // A stale session of the same kind is replaced by the fresh one.
        self.sessions
            .retain(|s| !(s.overlay == event.overlay && s.kind == kind));

        let first_for_overlay = !self.has_any_session(event.overlay);
        self.sessions.push(GestureSession {
            overlay: event.overlay,
            kind,
            origin: overlay.transform,
        });

        let mut effects = Vec::new();
        if first_for_overlay {
            effects.push(Effect::ManipulationStarted(event.overlay));
        }
        if let GestureUpdate::LongPress { touch_points } = event.update {
            effects.push(Effect::LongPressBegan {
                overlay: event.overlay,
                touch_points,
            });
        }
        effects
    }

    fn handle_changed(&mut self, event: GestureEvent, registry: &CanvasRegistry) -> Vec<Effect> {
        let kind = event.kind();
        let Some(index) = self.session_index(event.overlay, kind) else {
            // Changed without an active session: silent no-op.
            return Vec::new();
        };
        let origin = self.sessions[index].origin;

        match event.update {
            GestureUpdate::LongPress { touch_points } => vec![Effect::LongPressMoved {
                overlay: event.overlay,
                touch_points,
            }],
            update => component_change(event.overlay, origin, &update, registry)
                .into_iter()
                .collect(),
        }
    }

    fn handle_terminal(&mut self, event: GestureEvent, registry: &CanvasRegistry) -> Vec<Effect> {
        let kind = event.kind();
        let Some(index) = self.session_index(event.overlay, kind) else {
            // End without an active session: silent no-op, not an error.
            return Vec::new();
        };
        let session = self.sessions.remove(index);

        let mut effects = Vec::new();
        match (&event.phase, event.update) {
            (GesturePhase::Ended, GestureUpdate::Tap) => {
                effects.push(Effect::EditRequested(event.overlay));
            }
            (GesturePhase::Ended, GestureUpdate::LongPress { touch_points }) => {
                effects.push(Effect::LongPressReleased {
                    overlay: event.overlay,
                    touch_points,
                    cancelled: false,
                });
            }
            (GesturePhase::Ended, update) => {
                // A final cumulative delta may ride on the end event.
                effects.extend(component_change(
                    event.overlay,
                    session.origin,
                    &update,
                    registry,
                ));
            }
            (_, GestureUpdate::LongPress { .. }) => {
                // Cancelled/Failed long-press: identical cleanup to a release
                // outside the zone.
                effects.push(Effect::LongPressReleased {
                    overlay: event.overlay,
                    touch_points: Vec::new(),
                    cancelled: true,
                });
            }
            // Cancelled/Failed transforms keep the last applied value; only
            // the session is torn down.
            (_, _) => {}
        }

        if !self.has_any_session(event.overlay) {
            effects.push(Effect::ManipulationEnded(event.overlay));
        }
        effects
    }

    fn session_index(&self, overlay: OverlayId, kind: GestureKind) -> Option<usize> {
        self.sessions
            .iter()
            .position(|s| s.overlay == overlay && s.kind == kind)
    }

    fn has_any_session(&self, overlay: OverlayId) -> bool {
        self.sessions.iter().any(|s| s.overlay == overlay)
    }
}

/// Projects one cumulative delta from the session origin onto the live
/// transform, touching only the component owned by the gesture kind.
fn component_change(
    id: OverlayId,
    origin: OverlayTransform,
    update: &GestureUpdate,
    registry: &CanvasRegistry,
) -> Option<Effect> {
    let live = registry.get(id)?.transform;

    let transform = match update {
        GestureUpdate::Pan { translation } => OverlayTransform {
            position: origin
                .applying(TransformDelta::translation(*translation))
                .position,
            ..live
        },
        GestureUpdate::Pinch { scale_factor } => OverlayTransform {
            scale: origin.applying(TransformDelta::scale(*scale_factor)).scale,
            ..live
        },
        GestureUpdate::Rotate { rotation } => OverlayTransform {
            rotation: origin
                .applying(TransformDelta::rotation(*rotation))
                .rotation,
            ..live
        },
        GestureUpdate::Tap | GestureUpdate::LongPress { .. } => return None,
    };

    Some(Effect::TransformChanged {
        overlay: id,
        transform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{OverlayStyle, Scale, TextOverlay};
    use iced::{Radians, Vector};
    use std::f32::consts::PI;

    fn setup() -> (GestureCoordinator, CanvasRegistry, OverlayId) {
        let mut registry = CanvasRegistry::new();
        let id = registry.add(TextOverlay::new(
            "note",
            OverlayStyle::default(),
            Point::new(100.0, 100.0),
        ));
        (GestureCoordinator::new(), registry, id)
    }

    fn apply(registry: &mut CanvasRegistry, effects: &[Effect]) {
        for effect in effects {
            if let Effect::TransformChanged { overlay, transform } = effect {
                if let Some(o) = registry.get_mut(*overlay) {
                    o.transform = *transform;
                }
            }
        }
    }

    fn pan(overlay: OverlayId, phase: GesturePhase, x: f32, y: f32) -> GestureEvent {
        GestureEvent::new(
            overlay,
            phase,
            GestureUpdate::Pan {
                translation: Vector::new(x, y),
            },
        )
    }

    #[test]
    fn cumulative_pan_deltas_do_not_accumulate_per_event() {
        // Worked example: origin (100, 100); two `changed` events whose
        // cumulative deltas are (+20, -5) then (+40, -10) end at (140, 95),
        // not (160, 85).
        let (mut coordinator, mut registry, id) = setup();

        let effects = coordinator.handle(pan(id, GesturePhase::Began, 0.0, 0.0), &registry);
        assert_eq!(effects, vec![Effect::ManipulationStarted(id)]);

        let effects = coordinator.handle(pan(id, GesturePhase::Changed, 20.0, -5.0), &registry);
        apply(&mut registry, &effects);
        let effects = coordinator.handle(pan(id, GesturePhase::Changed, 40.0, -10.0), &registry);
        apply(&mut registry, &effects);

        assert_eq!(
            registry.get(id).unwrap().transform.position,
            Point::new(140.0, 90.0)
        );

        let effects = coordinator.handle(pan(id, GesturePhase::Ended, 40.0, -5.0), &registry);
        apply(&mut registry, &effects);
        assert_eq!(
            registry.get(id).unwrap().transform.position,
            Point::new(140.0, 95.0)
        );
        assert!(effects.contains(&Effect::ManipulationEnded(id)));
    }

    #[test]
    fn final_transform_is_independent_of_changed_granularity() {
        let (mut coordinator, mut registry, id) = setup();
        coordinator.handle(pan(id, GesturePhase::Began, 0.0, 0.0), &registry);
        // Many intermediate updates, all superseded by the final delta.
        for i in 1..50 {
            let effects =
                coordinator.handle(pan(id, GesturePhase::Changed, i as f32, 0.0), &registry);
            apply(&mut registry, &effects);
        }
        let effects = coordinator.handle(pan(id, GesturePhase::Ended, 7.0, 3.0), &registry);
        apply(&mut registry, &effects);

        assert_eq!(
            registry.get(id).unwrap().transform.position,
            Point::new(107.0, 103.0)
        );
    }

    #[test]
    fn manipulation_notifications_fire_once_per_overlap_window() {
        let (mut coordinator, registry, id) = setup();

        let began = |update| GestureEvent::new(id, GesturePhase::Began, update);
        let ended = |update| GestureEvent::new(id, GesturePhase::Ended, update);

        let first = coordinator.handle(
            began(GestureUpdate::Pan {
                translation: Vector::new(0.0, 0.0),
            }),
            &registry,
        );
        assert_eq!(first, vec![Effect::ManipulationStarted(id)]);

        // Pinch joins the same overlap window: no second start notification.
        let second = coordinator.handle(began(GestureUpdate::Pinch { scale_factor: 1.0 }), &registry);
        assert!(second.is_empty());

        // Pan ends but pinch is still active: no end notification yet.
        let pan_end = coordinator.handle(
            ended(GestureUpdate::Pan {
                translation: Vector::new(5.0, 0.0),
            }),
            &registry,
        );
        assert!(!pan_end.contains(&Effect::ManipulationEnded(id)));

        // Last gesture ends: exactly one end notification.
        let pinch_end = coordinator.handle(ended(GestureUpdate::Pinch { scale_factor: 1.2 }), &registry);
        assert_eq!(
            pinch_end
                .iter()
                .filter(|e| matches!(e, Effect::ManipulationEnded(_)))
                .count(),
            1
        );
    }

    #[test]
    fn simultaneous_pan_pinch_rotate_compose_per_component() {
        let (mut coordinator, mut registry, id) = setup();

        for update in [
            GestureUpdate::Pan {
                translation: Vector::new(0.0, 0.0),
            },
            GestureUpdate::Pinch { scale_factor: 1.0 },
            GestureUpdate::Rotate {
                rotation: Radians(0.0),
            },
        ] {
            let effects =
                coordinator.handle(GestureEvent::new(id, GesturePhase::Began, update), &registry);
            apply(&mut registry, &effects);
        }

        // Interleaved updates; each kind only touches its own component.
        let updates = [
            GestureUpdate::Pinch { scale_factor: 2.0 },
            GestureUpdate::Pan {
                translation: Vector::new(30.0, 0.0),
            },
            GestureUpdate::Rotate {
                rotation: Radians(PI / 2.0),
            },
            GestureUpdate::Pan {
                translation: Vector::new(30.0, 10.0),
            },
            GestureUpdate::Pinch { scale_factor: 1.5 },
        ];
        for update in updates {
            let effects =
                coordinator.handle(GestureEvent::new(id, GesturePhase::Changed, update), &registry);
            apply(&mut registry, &effects);
        }

        let transform = registry.get(id).unwrap().transform;
        assert_eq!(transform.position, Point::new(130.0, 110.0));
        assert_eq!(transform.scale.value(), 1.5);
        assert!((transform.rotation.0 - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn late_pinch_snapshots_the_live_scale() {
        let (mut coordinator, mut registry, id) = setup();

        // First pinch doubles the scale and ends.
        for (phase, factor) in [
            (GesturePhase::Began, 1.0),
            (GesturePhase::Changed, 2.0),
            (GesturePhase::Ended, 2.0),
        ] {
            let effects = coordinator.handle(
                GestureEvent::new(id, phase, GestureUpdate::Pinch { scale_factor: factor }),
                &registry,
            );
            apply(&mut registry, &effects);
        }
        assert_eq!(registry.get(id).unwrap().transform.scale, Scale::new(2.0));

        // A later pinch composes onto the new base, not the original one.
        for (phase, factor) in [(GesturePhase::Began, 1.0), (GesturePhase::Changed, 1.5)] {
            let effects = coordinator.handle(
                GestureEvent::new(id, phase, GestureUpdate::Pinch { scale_factor: factor }),
                &registry,
            );
            apply(&mut registry, &effects);
        }
        assert_eq!(registry.get(id).unwrap().transform.scale, Scale::new(3.0));
    }

    #[test]
    fn tap_is_suppressed_while_another_gesture_is_active() {
        let (mut coordinator, registry, id) = setup();
        coordinator.handle(pan(id, GesturePhase::Began, 0.0, 0.0), &registry);

        let tap_began = coordinator.handle(
            GestureEvent::new(id, GesturePhase::Began, GestureUpdate::Tap),
            &registry,
        );
        assert!(tap_began.is_empty());
        assert!(!coordinator.has_session(id, GestureKind::Tap));

        // The orphaned tap end is a silent no-op.
        let tap_end = coordinator.handle(
            GestureEvent::new(id, GesturePhase::Ended, GestureUpdate::Tap),
            &registry,
        );
        assert!(tap_end.is_empty());
    }

    #[test]
    fn tap_requests_the_edit_flow() {
        let (mut coordinator, registry, id) = setup();
        coordinator.handle(
            GestureEvent::new(id, GesturePhase::Began, GestureUpdate::Tap),
            &registry,
        );
        let effects = coordinator.handle(
            GestureEvent::new(id, GesturePhase::Ended, GestureUpdate::Tap),
            &registry,
        );
        assert_eq!(
            effects,
            vec![Effect::EditRequested(id), Effect::ManipulationEnded(id)]
        );
    }

    #[test]
    fn cancelled_matches_ended_cleanup_without_delta_application() {
        let (mut coordinator, mut registry, id) = setup();
        coordinator.handle(pan(id, GesturePhase::Began, 0.0, 0.0), &registry);
        let effects = coordinator.handle(pan(id, GesturePhase::Changed, 10.0, 0.0), &registry);
        apply(&mut registry, &effects);

        let effects = coordinator.handle(pan(id, GesturePhase::Cancelled, 50.0, 50.0), &registry);
        // No dangling session, ended notification fired, and the cancelled
        // event's delta was not applied.
        assert_eq!(effects, vec![Effect::ManipulationEnded(id)]);
        assert!(!coordinator.is_active());
        assert_eq!(
            registry.get(id).unwrap().transform.position,
            Point::new(110.0, 100.0)
        );
    }

    #[test]
    fn failed_is_treated_like_cancelled() {
        let (mut coordinator, registry, id) = setup();
        coordinator.handle(pan(id, GesturePhase::Began, 0.0, 0.0), &registry);
        let effects = coordinator.handle(pan(id, GesturePhase::Failed, 5.0, 5.0), &registry);
        assert_eq!(effects, vec![Effect::ManipulationEnded(id)]);
        assert!(!coordinator.is_active());
    }

    #[test]
    fn long_press_lifecycle_reports_touch_points() {
        let (mut coordinator, registry, id) = setup();
        let points = vec![Point::new(10.0, 10.0), Point::new(14.0, 12.0)];

        let began = coordinator.handle(
            GestureEvent::new(
                id,
                GesturePhase::Began,
                GestureUpdate::LongPress {
                    touch_points: points.clone(),
                },
            ),
            &registry,
        );
        assert_eq!(
            began,
            vec![
                Effect::ManipulationStarted(id),
                Effect::LongPressBegan {
                    overlay: id,
                    touch_points: points.clone(),
                },
            ]
        );

        let moved = coordinator.handle(
            GestureEvent::new(
                id,
                GesturePhase::Changed,
                GestureUpdate::LongPress {
                    touch_points: points.clone(),
                },
            ),
            &registry,
        );
        assert_eq!(
            moved,
            vec![Effect::LongPressMoved {
                overlay: id,
                touch_points: points.clone(),
            }]
        );

        let released = coordinator.handle(
            GestureEvent::new(
                id,
                GesturePhase::Ended,
                GestureUpdate::LongPress {
                    touch_points: points.clone(),
                },
            ),
            &registry,
        );
        assert_eq!(
            released,
            vec![
                Effect::LongPressReleased {
                    overlay: id,
                    touch_points: points,
                    cancelled: false,
                },
                Effect::ManipulationEnded(id),
            ]
        );
    }

    #[test]
    fn cancelled_long_press_releases_as_not_contained() {
        let (mut coordinator, registry, id) = setup();
        coordinator.handle(
            GestureEvent::new(
                id,
                GesturePhase::Began,
                GestureUpdate::LongPress {
                    touch_points: vec![Point::new(0.0, 0.0)],
                },
            ),
            &registry,
        );
        let effects = coordinator.handle(
            GestureEvent::new(
                id,
                GesturePhase::Cancelled,
                GestureUpdate::LongPress {
                    touch_points: vec![Point::new(0.0, 0.0)],
                },
            ),
            &registry,
        );
        assert_eq!(
            effects,
            vec![
                Effect::LongPressReleased {
                    overlay: id,
                    touch_points: Vec::new(),
                    cancelled: true,
                },
                Effect::ManipulationEnded(id),
            ]
        );
    }

    #[test]
    fn events_for_unknown_overlays_are_ignored() {
        let (mut coordinator, mut registry, id) = setup();
        registry.remove(id);

        let effects = coordinator.handle(pan(id, GesturePhase::Began, 0.0, 0.0), &registry);
        assert!(effects.is_empty());
        assert!(!coordinator.is_active());
    }

    #[test]
    fn end_without_active_session_is_a_silent_no_op() {
        let (mut coordinator, registry, id) = setup();
        let effects = coordinator.handle(pan(id, GesturePhase::Ended, 0.0, 0.0), &registry);
        assert!(effects.is_empty());
    }

    #[test]
    fn a_second_overlay_cannot_join_an_active_manipulation() {
        let (mut coordinator, mut registry, first) = setup();
        let second = registry.add(TextOverlay::new(
            "other",
            OverlayStyle::default(),
            Point::new(300.0, 300.0),
        ));

        coordinator.handle(pan(first, GesturePhase::Began, 0.0, 0.0), &registry);
        let effects = coordinator.handle(pan(second, GesturePhase::Began, 0.0, 0.0), &registry);
        assert!(effects.is_empty());
        assert_eq!(coordinator.active_overlay(), Some(first));
    }
}
