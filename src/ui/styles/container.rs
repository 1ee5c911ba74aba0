// SPDX-License-Identifier: MPL-2.0
//! Container styles for panels, toolbars and toasts.

use crate::ui::design_tokens::{opacity, palette};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Semi-opaque surface floating above the canvas (edit panel, toolbars).
pub fn floating_panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base;
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base.color
        })),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Toast card colored by notification severity.
pub fn toast(severity_color: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..palette::GRAY_900
        })),
        border: Border {
            color: severity_color,
            width: 1.5,
            radius: 6.0.into(),
        },
        text_color: Some(palette::WHITE),
        ..container::Style::default()
    }
}

/// Full-bleed dark backdrop behind the capture preview.
pub fn capture_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        ..container::Style::default()
    }
}
