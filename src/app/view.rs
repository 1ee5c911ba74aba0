// SPDX-License-Identifier: MPL-2.0
//! Screen dispatch and the toast overlay.

use super::{App, Message, Screen};
use crate::ui::annotate;
use crate::ui::capture;
use crate::ui::notifications;
use crate::ui::trim;
use iced::widget::Stack;
use iced::Element;

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let screen: Element<'_, Message> = match app.screen {
        Screen::Annotate => match app.annotate.as_ref() {
            Some(state) => annotate::view(state, &app.i18n).map(Message::Annotate),
            None => capture::view(&app.capture, &app.i18n).map(Message::Capture),
        },
        Screen::Trim => match app.trim.as_ref() {
            Some(state) => trim::view(state, &app.i18n).map(Message::Trim),
            None => capture::view(&app.capture, &app.i18n).map(Message::Capture),
        },
        Screen::Capture => capture::view(&app.capture, &app.i18n).map(Message::Capture),
    };

    let mut stack = Stack::new().push(screen);
    if app.notifications.has_notifications() {
        stack = stack.push(
            notifications::toast_view(&app.notifications, &app.i18n).map(Message::Notification),
        );
    }
    stack.into()
}
