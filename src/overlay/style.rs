// SPDX-License-Identifier: MPL-2.0
//! Visual style of a text overlay.

use iced::Color;

/// Font size bounds for overlay text, in logical pixels.
pub mod font_bounds {
    /// Minimum font size.
    pub const MIN: f32 = 12.0;
    /// Maximum font size.
    pub const MAX: f32 = 96.0;
    /// Default font size for newly created overlays.
    pub const DEFAULT: f32 = 32.0;
}

/// Overlay font size, guaranteed to be within valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSize(f32);

impl FontSize {
    /// Creates a new font size, clamping the value to the valid range.
    #[must_use]
    pub fn new(pixels: f32) -> Self {
        Self(pixels.clamp(font_bounds::MIN, font_bounds::MAX))
    }

    /// Returns the raw pixel value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(font_bounds::DEFAULT)
    }
}

/// Fixed overlay color swatches, cycled by the edit panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayColor {
    #[default]
    White,
    Black,
    Sunset,
    Lime,
    Sky,
    Rose,
}

impl OverlayColor {
    pub const ALL: [OverlayColor; 6] = [
        OverlayColor::White,
        OverlayColor::Black,
        OverlayColor::Sunset,
        OverlayColor::Lime,
        OverlayColor::Sky,
        OverlayColor::Rose,
    ];

    /// Returns the next swatch in the cycle, wrapping around.
    #[must_use]
    pub fn cycled(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Returns the render color for this swatch.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            OverlayColor::White => Color::WHITE,
            OverlayColor::Black => Color::BLACK,
            OverlayColor::Sunset => Color::from_rgb(0.96, 0.49, 0.22),
            OverlayColor::Lime => Color::from_rgb(0.55, 0.86, 0.25),
            OverlayColor::Sky => Color::from_rgb(0.30, 0.65, 0.97),
            OverlayColor::Rose => Color::from_rgb(0.94, 0.33, 0.54),
        }
    }
}

/// Style of a text overlay: swatch color and font size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayStyle {
    pub color: OverlayColor,
    pub font_size: FontSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_clamps_to_valid_range() {
        assert_eq!(FontSize::new(2.0).value(), font_bounds::MIN);
        assert_eq!(FontSize::new(500.0).value(), font_bounds::MAX);
        assert_eq!(FontSize::new(48.0).value(), 48.0);
    }

    #[test]
    fn color_cycle_visits_every_swatch_once() {
        let mut color = OverlayColor::default();
        let mut seen = Vec::new();
        for _ in 0..OverlayColor::ALL.len() {
            seen.push(color);
            color = color.cycled();
        }
        assert_eq!(color, OverlayColor::default());
        for swatch in OverlayColor::ALL {
            assert!(seen.contains(&swatch));
        }
    }

    #[test]
    fn swatch_colors_are_distinct() {
        for (i, a) in OverlayColor::ALL.iter().enumerate() {
            for b in &OverlayColor::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
