// SPDX-License-Identifier: MPL-2.0
//! Discrete gesture events consumed by the coordinator.
//!
//! The input layer (see `ui::annotate::recognizer`) delivers one event per
//! recognizer state change, with a kind-specific payload that is always
//! *cumulative since the gesture began*. The coordinator never sees raw
//! pointer streams.

use super::registry::OverlayId;
use iced::{Point, Radians, Vector};

/// Recognizer kinds arbitrated by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    Pan,
    Pinch,
    Rotate,
    LongPress,
}

impl GestureKind {
    pub const ALL: [GestureKind; 5] = [
        GestureKind::Tap,
        GestureKind::Pan,
        GestureKind::Pinch,
        GestureKind::Rotate,
        GestureKind::LongPress,
    ];

    /// Whether two kinds may be active on the same overlay at the same time.
    ///
    /// Declared as a lookup table rather than ad-hoc checks: tap is exclusive
    /// against every other kind, the continuous kinds all compose.
    #[must_use]
    pub fn recognizes_simultaneously_with(self, other: GestureKind) -> bool {
        COMPATIBILITY[self.table_index()][other.table_index()]
    }

    fn table_index(self) -> usize {
        match self {
            GestureKind::Tap => 0,
            GestureKind::Pan => 1,
            GestureKind::Pinch => 2,
            GestureKind::Rotate => 3,
            GestureKind::LongPress => 4,
        }
    }
}

/// Pairwise simultaneous-recognition policy, indexed by `table_index`.
/// Order: tap, pan, pinch, rotate, long-press.
const COMPATIBILITY: [[bool; 5]; 5] = [
    [false, false, false, false, false], // tap
    [false, true, true, true, true],     // pan
    [false, true, true, true, true],     // pinch
    [false, true, true, true, true],     // rotate
    [false, true, true, true, true],     // long-press
];

/// Recognizer lifecycle phase, as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Whether this phase terminates the gesture session.
    /// `Cancelled` and `Failed` normalize to the same cleanup as `Ended`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed
        )
    }
}

/// Kind-specific gesture payload. All values are cumulative since the
/// gesture's `Began` event, not frame-to-frame increments.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureUpdate {
    Tap,
    Pan {
        translation: Vector,
    },
    Pinch {
        scale_factor: f32,
    },
    Rotate {
        rotation: Radians,
    },
    /// Long-press carries every tracked touch point (multi-touch holds are
    /// supported) in canvas coordinates.
    LongPress {
        touch_points: Vec<Point>,
    },
}

impl GestureUpdate {
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureUpdate::Tap => GestureKind::Tap,
            GestureUpdate::Pan { .. } => GestureKind::Pan,
            GestureUpdate::Pinch { .. } => GestureKind::Pinch,
            GestureUpdate::Rotate { .. } => GestureKind::Rotate,
            GestureUpdate::LongPress { .. } => GestureKind::LongPress,
        }
    }
}

/// One recognizer state change targeting one overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub overlay: OverlayId,
    pub phase: GesturePhase,
    pub update: GestureUpdate,
}

impl GestureEvent {
    #[must_use]
    pub fn new(overlay: OverlayId, phase: GesturePhase, update: GestureUpdate) -> Self {
        Self {
            overlay,
            phase,
            update,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GestureKind {
        self.update.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_is_exclusive_against_all_kinds() {
        for kind in GestureKind::ALL {
            assert!(!GestureKind::Tap.recognizes_simultaneously_with(kind));
            assert!(!kind.recognizes_simultaneously_with(GestureKind::Tap));
        }
    }

    #[test]
    fn continuous_kinds_compose_with_each_other() {
        let continuous = [
            GestureKind::Pan,
            GestureKind::Pinch,
            GestureKind::Rotate,
            GestureKind::LongPress,
        ];
        for a in continuous {
            for b in continuous {
                assert!(a.recognizes_simultaneously_with(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn compatibility_table_is_symmetric() {
        for a in GestureKind::ALL {
            for b in GestureKind::ALL {
                assert_eq!(
                    a.recognizes_simultaneously_with(b),
                    b.recognizes_simultaneously_with(a),
                    "{a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn terminal_phases_are_terminal() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
        assert!(GesturePhase::Failed.is_terminal());
    }

    #[test]
    fn update_reports_its_kind() {
        assert_eq!(GestureUpdate::Tap.kind(), GestureKind::Tap);
        assert_eq!(
            GestureUpdate::Pan {
                translation: Vector::new(1.0, 1.0)
            }
            .kind(),
            GestureKind::Pan
        );
        assert_eq!(
            GestureUpdate::LongPress {
                touch_points: vec![]
            }
            .kind(),
            GestureKind::LongPress
        );
    }
}
