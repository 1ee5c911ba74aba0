// SPDX-License-Identifier: MPL-2.0
//! Ordered overlay collection and hit-test arbitration.
//!
//! The registry is the single owner of every overlay on the canvas. Z-order
//! is insertion order (later additions render on top). While a gesture
//! session is active the registry captures the touch stream: hit-testing
//! resolves to the captured overlay regardless of the queried point, so a
//! drag can leave the overlay's own bounds without losing the gesture.

use super::TextOverlay;
use iced::Point;

/// Unique identifier for an overlay on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    /// Allocates the next unique overlay id.
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered set of overlays plus the capture arbitration state.
#[derive(Debug, Default)]
pub struct CanvasRegistry {
    /// Bottom-to-top in render order.
    overlays: Vec<TextOverlay>,
    /// Overlay currently owning the touch stream, if any.
    captured: Option<OverlayId>,
}

impl CanvasRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an overlay on top of the stack and returns its id.
    pub fn add(&mut self, overlay: TextOverlay) -> OverlayId {
        let id = overlay.id();
        self.overlays.push(overlay);
        id
    }

    /// Removes an overlay by id, returning it when present.
    /// Removing the captured overlay releases the capture.
    pub fn remove(&mut self, id: OverlayId) -> Option<TextOverlay> {
        if self.captured == Some(id) {
            self.captured = None;
        }
        let index = self.overlays.iter().position(|o| o.id() == id)?;
        Some(self.overlays.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&TextOverlay> {
        self.overlays.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut TextOverlay> {
        self.overlays.iter_mut().find(|o| o.id() == id)
    }

    /// Overlays bottom-to-top, the order they should be rendered in.
    pub fn iter(&self) -> impl Iterator<Item = &TextOverlay> {
        self.overlays.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Marks `id` as owning the touch stream for the duration of a
    /// manipulation. Ignored when the overlay is unknown.
    pub fn begin_capture(&mut self, id: OverlayId) {
        if self.get(id).is_some() {
            self.captured = Some(id);
        }
    }

    /// Releases the touch-stream capture.
    pub fn end_capture(&mut self) {
        self.captured = None;
    }

    /// Overlay currently owning the touch stream.
    #[must_use]
    pub fn captured(&self) -> Option<OverlayId> {
        self.captured
    }

    /// Resolves the overlay at `point`.
    ///
    /// While a manipulation is active this always returns the captured
    /// overlay; otherwise the topmost overlay whose bounds contain the point
    /// wins, or `None` when nothing does.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<OverlayId> {
        if let Some(active) = self.captured {
            return Some(active);
        }
        self.overlays
            .iter()
            .rev()
            .find(|overlay| overlay.contains(point))
            .map(TextOverlay::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayStyle;

    fn overlay_at(x: f32, y: f32) -> TextOverlay {
        TextOverlay::new("note", OverlayStyle::default(), Point::new(x, y))
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut registry = CanvasRegistry::new();
        let id = registry.add(overlay_at(10.0, 10.0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id).map(TextOverlay::id), Some(id));
    }

    #[test]
    fn remove_returns_the_overlay_and_shrinks_the_set() {
        let mut registry = CanvasRegistry::new();
        let id = registry.add(overlay_at(10.0, 10.0));
        let removed = registry.remove(id);
        assert!(removed.is_some());
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn hit_test_prefers_the_topmost_overlay() {
        let mut registry = CanvasRegistry::new();
        let bottom = registry.add(overlay_at(100.0, 100.0));
        let top = registry.add(overlay_at(100.0, 100.0));
        assert_ne!(bottom, top);
        assert_eq!(registry.hit_test(Point::new(100.0, 100.0)), Some(top));
    }

    #[test]
    fn hit_test_misses_empty_space() {
        let mut registry = CanvasRegistry::new();
        registry.add(overlay_at(100.0, 100.0));
        assert_eq!(registry.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn capture_overrides_hit_testing_everywhere() {
        let mut registry = CanvasRegistry::new();
        let bottom = registry.add(overlay_at(100.0, 100.0));
        registry.add(overlay_at(100.0, 100.0));

        registry.begin_capture(bottom);
        // Points over the topmost overlay and points over nothing both
        // resolve to the captured overlay while the session lasts.
        assert_eq!(registry.hit_test(Point::new(100.0, 100.0)), Some(bottom));
        assert_eq!(registry.hit_test(Point::new(900.0, 900.0)), Some(bottom));

        registry.end_capture();
        assert_eq!(registry.hit_test(Point::new(900.0, 900.0)), None);
    }

    #[test]
    fn capturing_an_unknown_overlay_is_a_no_op() {
        let mut registry = CanvasRegistry::new();
        let ghost = {
            let mut scratch = CanvasRegistry::new();
            let id = scratch.add(overlay_at(0.0, 0.0));
            scratch.remove(id);
            id
        };
        registry.begin_capture(ghost);
        assert_eq!(registry.captured(), None);
    }

    #[test]
    fn removing_the_captured_overlay_releases_capture() {
        let mut registry = CanvasRegistry::new();
        let id = registry.add(overlay_at(50.0, 50.0));
        registry.begin_capture(id);
        registry.remove(id);
        assert_eq!(registry.captured(), None);
        assert_eq!(registry.hit_test(Point::new(50.0, 50.0)), None);
    }
}
