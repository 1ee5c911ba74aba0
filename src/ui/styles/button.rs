// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::palette;
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Primary action button (confirm, save).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_600,
        _ => palette::PRIMARY_500,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::WHITE,
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}

/// Low-emphasis button (cancel, back).
pub fn subtle(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Color {
            a: 0.8,
            ..palette::GRAY_700
        },
        _ => Color { a: 0.0, ..base.color },
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: theme.extended_palette().background.base.text,
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}
