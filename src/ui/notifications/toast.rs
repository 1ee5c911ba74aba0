// SPDX-License-Identifier: MPL-2.0
//! Toast rendering: a right-aligned column of dismissible cards.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

/// Renders the visible notifications as a toast stack.
pub fn view<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
    let cards = manager
        .visible()
        .map(|notification| card(notification, i18n))
        .collect::<Vec<_>>();

    container(column(cards).spacing(spacing::XS))
        .width(Length::Fill)
        .align_x(Alignment::End)
        .padding(spacing::MD)
        .into()
}

fn card<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
    let message = i18n.tr_with_args(notification.message_key(), notification.message_args());

    let content = row![
        text(message).size(typography::BODY),
        button(text("×").size(typography::TITLE))
            .style(styles::button::subtle)
            .on_press(Message::Dismiss(notification.id())),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let severity_color = notification.severity().color();
    container(content)
        .max_width(sizing::TOAST_WIDTH)
        .padding(spacing::SM)
        .style(move |_theme| styles::container::toast(severity_color))
        .into()
}
