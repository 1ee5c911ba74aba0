// SPDX-License-Identifier: MPL-2.0
//! Drag-to-trash containment evaluation.
//!
//! The zone is a stateless evaluator: the annotate screen feeds it the
//! tracked touch points on every long-press update and renders the "armed"
//! state it reports. Whether release deletes or restores the overlay is
//! decided by the last evaluation before the gesture ended.

use iced::{Point, Rectangle};

/// Vertical inset of the zone center from the bottom edge of the canvas.
const BOTTOM_INSET: f32 = 56.0;

/// A circular deletion target region in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrashZone {
    pub center: Point,
    pub radius: f32,
}

impl TrashZone {
    /// Creates a zone; non-positive radii collapse to a minimal hit circle.
    #[must_use]
    pub fn new(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(1.0),
        }
    }

    /// Places the zone at the mobile-style position: horizontally centered,
    /// just above the bottom edge of `bounds`.
    #[must_use]
    pub fn anchored_in(bounds: Rectangle, radius: f32) -> Self {
        Self::new(
            Point::new(
                bounds.x + bounds.width / 2.0,
                bounds.y + bounds.height - BOTTOM_INSET,
            ),
            radius,
        )
    }

    /// Whether a single point lies within the zone (boundary inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Whether *any* tracked touch point lies within the zone. Multi-touch
    /// holds arm the zone as soon as one finger reaches it.
    #[must_use]
    pub fn contains_any<'a>(&self, points: impl IntoIterator<Item = &'a Point>) -> bool {
        points.into_iter().any(|point| self.contains(*point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    #[test]
    fn contains_is_boundary_inclusive() {
        let zone = TrashZone::new(Point::new(100.0, 100.0), 40.0);
        assert!(zone.contains(Point::new(100.0, 100.0)));
        assert!(zone.contains(Point::new(140.0, 100.0)));
        assert!(!zone.contains(Point::new(140.1, 100.0)));
    }

    #[test]
    fn contains_any_needs_only_one_point_inside() {
        let zone = TrashZone::new(Point::new(0.0, 0.0), 10.0);
        let outside = Point::new(500.0, 500.0);
        let inside = Point::new(3.0, -4.0);

        assert!(zone.contains_any([&outside, &inside]));
        assert!(!zone.contains_any([&outside]));
        assert!(!zone.contains_any(std::iter::empty::<&Point>()));
    }

    #[test]
    fn anchored_in_sits_above_the_bottom_center() {
        let bounds = Rectangle::new(Point::new(0.0, 0.0), Size::new(400.0, 800.0));
        let zone = TrashZone::anchored_in(bounds, 48.0);
        assert_eq!(zone.center.x, 200.0);
        assert!(zone.center.y < 800.0);
        assert!(zone.center.y > 700.0);
    }

    #[test]
    fn degenerate_radius_is_clamped() {
        let zone = TrashZone::new(Point::ORIGIN, -5.0);
        assert!(zone.radius > 0.0);
    }
}
