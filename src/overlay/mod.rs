// SPDX-License-Identifier: MPL-2.0
//! Manipulable text overlays and their gesture arbitration.
//!
//! This module owns the interaction core of the annotation canvas,
//! independent of any widget code:
//!
//! - [`transform`]: per-overlay position/rotation/scale with snapshot-based
//!   delta composition
//! - [`gesture`]: the discrete gesture-event vocabulary and the
//!   simultaneous-recognition policy
//! - [`coordinator`]: per-kind gesture state machines over origin snapshots
//! - [`registry`]: the ordered overlay collection and hit-test arbitration
//! - [`trash`]: the drag-to-trash containment evaluator
//!
//! The UI layer feeds events in and applies the resulting effects; nothing
//! here draws or schedules anything.

pub mod coordinator;
pub mod gesture;
pub mod registry;
pub mod style;
pub mod transform;
pub mod trash;

pub use coordinator::{Effect, GestureCoordinator};
pub use gesture::{GestureEvent, GestureKind, GesturePhase, GestureUpdate};
pub use registry::{CanvasRegistry, OverlayId};
pub use style::{FontSize, OverlayColor, OverlayStyle};
pub use transform::{OverlayTransform, Scale, TransformDelta};
pub use trash::TrashZone;

use iced::{Point, Size, Vector};

/// Approximate glyph advance as a fraction of the font size, used for
/// hit-test bounds. Real text measurement lives in the renderer; the
/// interaction core only needs a stable estimate.
const GLYPH_ADVANCE_FACTOR: f32 = 0.55;

/// Line height as a fraction of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Extra grab padding around the text bounds, in unscaled pixels.
const HIT_PADDING: f32 = 12.0;

/// A text overlay placed on the annotation canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    id: OverlayId,
    pub content: String,
    pub style: OverlayStyle,
    pub transform: OverlayTransform,
    /// Render visibility; suppressed while the overlay is dragged toward the
    /// trash zone, restored when the drag ends outside it.
    pub visible: bool,
}

impl TextOverlay {
    /// Creates a new overlay with a fresh id at the given position.
    #[must_use]
    pub fn new(content: impl Into<String>, style: OverlayStyle, position: Point) -> Self {
        Self {
            id: OverlayId::next(),
            content: content.into(),
            style,
            transform: OverlayTransform::at(position),
            visible: true,
        }
    }

    /// Rebuilds an overlay from parts, keeping an existing transform.
    /// Used by the edit flow when re-inserting an updated overlay.
    #[must_use]
    pub fn with_transform(
        content: impl Into<String>,
        style: OverlayStyle,
        transform: OverlayTransform,
    ) -> Self {
        Self {
            id: OverlayId::next(),
            content: content.into(),
            style,
            transform,
            visible: true,
        }
    }

    #[must_use]
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Estimated unscaled text extent, derived from line count and the
    /// longest line.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let font_size = self.style.font_size.value();
        let mut lines = 0usize;
        let mut longest = 0usize;
        for line in self.content.lines() {
            lines += 1;
            longest = longest.max(line.chars().count());
        }
        // An empty overlay still has a grabbable line.
        lines = lines.max(1);
        longest = longest.max(1);

        Size::new(
            longest as f32 * font_size * GLYPH_ADVANCE_FACTOR,
            lines as f32 * font_size * LINE_HEIGHT_FACTOR,
        )
    }

    /// Whether `point` (in canvas coordinates) falls within the overlay's
    /// transformed bounds. The point is mapped into overlay-local space by
    /// inverting the transform, then tested against the padded text extent.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let scale = self.transform.scale.value();
        let offset = Vector::new(
            point.x - self.transform.position.x,
            point.y - self.transform.position.y,
        );

        let angle = -self.transform.rotation.0;
        let (sin, cos) = angle.sin_cos();
        let local_x = (offset.x * cos - offset.y * sin) / scale;
        let local_y = (offset.x * sin + offset.y * cos) / scale;

        let size = self.content_size();
        let half_width = size.width / 2.0 + HIT_PADDING;
        let half_height = size.height / 2.0 + HIT_PADDING;

        local_x.abs() <= half_width && local_y.abs() <= half_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn overlay_at(x: f32, y: f32) -> TextOverlay {
        TextOverlay::new("hello", OverlayStyle::default(), Point::new(x, y))
    }

    #[test]
    fn new_overlays_are_visible_with_identity_pose() {
        let overlay = overlay_at(50.0, 60.0);
        assert!(overlay.visible);
        assert_eq!(overlay.transform.position, Point::new(50.0, 60.0));
        assert_eq!(overlay.transform.scale.value(), 1.0);
    }

    #[test]
    fn overlay_ids_are_unique() {
        assert_ne!(overlay_at(0.0, 0.0).id(), overlay_at(0.0, 0.0).id());
    }

    #[test]
    fn contains_center_and_rejects_far_points() {
        let overlay = overlay_at(100.0, 100.0);
        assert!(overlay.contains(Point::new(100.0, 100.0)));
        assert!(!overlay.contains(Point::new(400.0, 400.0)));
    }

    #[test]
    fn contains_respects_scale() {
        let mut overlay = overlay_at(100.0, 100.0);
        let near_edge = Point::new(100.0 + overlay.content_size().width, 100.0);
        assert!(!overlay.contains(near_edge));

        overlay.transform.scale = Scale::new(3.0);
        assert!(overlay.contains(near_edge));
    }

    #[test]
    fn contains_respects_rotation() {
        let mut overlay = TextOverlay::new(
            "a long overlay label",
            OverlayStyle::default(),
            Point::new(0.0, 0.0),
        );
        let size = overlay.content_size();
        // Wide but short: a point beyond the text height, directly above the
        // center, is outside until the overlay is rotated upright.
        let above = Point::new(0.0, -(size.width / 2.0));
        assert!(!overlay.contains(above));

        overlay.transform.rotation = iced::Radians(PI / 2.0);
        assert!(overlay.contains(above));
    }

    #[test]
    fn content_size_grows_with_lines() {
        let single = TextOverlay::new("abc", OverlayStyle::default(), Point::ORIGIN);
        let double = TextOverlay::new("abc\ndef", OverlayStyle::default(), Point::ORIGIN);
        assert!(double.content_size().height > single.content_size().height);
        assert_eq!(double.content_size().width, single.content_size().width);
    }

    #[test]
    fn empty_content_still_has_grabbable_bounds() {
        let overlay = TextOverlay::new("", OverlayStyle::default(), Point::new(10.0, 10.0));
        assert!(overlay.contains(Point::new(10.0, 10.0)));
    }
}
