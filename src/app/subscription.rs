// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard shortcuts and file drops are routed per screen; the periodic
//! tick only runs while something actually needs it (shutter engaged,
//! gesture timers, pending animations or visible notifications).

use super::{Message, Screen};
use crate::ui::annotate;
use crate::ui::capture::{self, shutter};
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Tick period for timers and animations.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates the native event subscription for the current screen.
///
/// - Capture: space bar drives the shutter, file drops load media
/// - Annotate: escape cancels an open edit panel
/// - Trim: no global shortcuts; the strip consumes its own events
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Capture => event::listen_with(|event, _status, _window| match event {
            event::Event::Window(iced::window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Space),
                repeat: false,
                ..
            }) => Some(Message::Capture(capture::Message::Shutter(
                shutter::Message::Pressed,
            ))),
            event::Event::Keyboard(keyboard::Event::KeyReleased {
                key: keyboard::Key::Named(keyboard::key::Named::Space),
                ..
            }) => Some(Message::Capture(capture::Message::Shutter(
                shutter::Message::Released,
            ))),
            _ => None,
        }),
        Screen::Annotate => event::listen_with(|event, status, _window| {
            if status == event::Status::Captured {
                return None;
            }
            match event {
                event::Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                }) => Some(Message::Annotate(annotate::Message::Editing(
                    annotate::editing::Message::Cancel,
                ))),
                _ => None,
            }
        }),
        Screen::Trim => Subscription::none(),
    }
}

/// Creates the periodic tick subscription when any timer is live.
pub fn create_tick_subscription(needs_tick: bool) -> Subscription<Message> {
    if needs_tick {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
