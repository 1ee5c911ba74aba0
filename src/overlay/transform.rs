// SPDX-License-Identifier: MPL-2.0
//! Overlay transform state and delta composition.
//!
//! The transform of an overlay is only ever recomputed from an origin
//! snapshot captured at gesture start, composed with the gesture's
//! cumulative delta. Frame-to-frame increments are never applied: with
//! several recognizers updating the same overlay within one frame, repeated
//! small increments accumulate rounding drift, while `snapshot ∘ cumulative`
//! stays exact regardless of event granularity.

use iced::{Point, Radians, Vector};
use std::f32::consts::TAU;

/// Overlay scale bounds.
pub mod scale_bounds {
    /// Minimum scale factor.
    pub const MIN: f32 = 0.2;
    /// Maximum scale factor.
    pub const MAX: f32 = 8.0;
    /// Default scale factor (unscaled).
    pub const DEFAULT: f32 = 1.0;
}

/// Overlay scale, guaranteed to be strictly positive and within bounds.
///
/// The clamp keeps the `scale > 0` invariant at the type level, so no call
/// site can produce a degenerate (mirrored or vanishing) overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f32);

impl Scale {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(factor.clamp(scale_bounds::MIN, scale_bounds::MAX))
    }

    /// Returns the raw scale factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns this scale multiplied by `factor`, clamped to the valid range.
    #[must_use]
    pub fn multiplied(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }

    /// Returns whether the scale is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= scale_bounds::MIN
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= scale_bounds::MAX
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(scale_bounds::DEFAULT)
    }
}

/// Position, rotation and scale of a manipulable overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    pub position: Point,
    pub rotation: Radians,
    pub scale: Scale,
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            rotation: Radians(0.0),
            scale: Scale::default(),
        }
    }
}

impl OverlayTransform {
    /// Creates a transform at `position` with no rotation and unit scale.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Composes a component-wise delta onto this transform: translation is
    /// added, rotation is added modulo 2π, scale is multiplied.
    ///
    /// Callers must pass the *cumulative* delta since gesture start and call
    /// this on the origin snapshot, never on the live value.
    #[must_use]
    pub fn applying(self, delta: TransformDelta) -> Self {
        Self {
            position: self.position + delta.translation,
            rotation: normalize_radians(Radians(self.rotation.0 + delta.rotation.0)),
            scale: self.scale.multiplied(delta.scale_factor),
        }
    }
}

/// Cumulative change reported by a gesture since its begin event.
///
/// The default value is the identity delta: zero translation, zero rotation,
/// unit scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDelta {
    pub translation: Vector,
    pub rotation: Radians,
    pub scale_factor: f32,
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self {
            translation: Vector::new(0.0, 0.0),
            rotation: Radians(0.0),
            scale_factor: 1.0,
        }
    }
}

impl TransformDelta {
    /// A pure translation delta.
    #[must_use]
    pub fn translation(translation: Vector) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// A pure rotation delta.
    #[must_use]
    pub fn rotation(rotation: Radians) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// A pure scale delta.
    #[must_use]
    pub fn scale(scale_factor: f32) -> Self {
        Self {
            scale_factor,
            ..Self::default()
        }
    }
}

/// Wraps an angle into `[0, 2π)`.
fn normalize_radians(angle: Radians) -> Radians {
    let wrapped = angle.0.rem_euclid(TAU);
    Radians(if wrapped.is_finite() { wrapped } else { 0.0 })
}
