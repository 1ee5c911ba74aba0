// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the capture, annotate
//! and trim screens.
//!
//! The `App` struct wires together the screens, localization and persisted
//! preferences, and translates component events into side effects like
//! media loading or frame export. Policy decisions (window sizing, screen
//! hand-offs) stay close to the main update loop so user-facing behavior is
//! easy to audit.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::config;
use crate::i18n::fluent::I18n;
use crate::ui::annotate;
use crate::ui::capture;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use crate::ui::trim;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 360;
pub const MIN_WINDOW_HEIGHT: u32 = 560;

/// Root Iced application state bridging UI components, localization and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    capture: capture::State,
    annotate: Option<annotate::State>,
    trim: Option<trim::State>,
    notifications: notifications::Manager,
    theme_mode: ThemeMode,
    /// Trim strip thumbnail count from the config.
    strip_thumbnails: usize,
    /// Deletion zone radius from the config.
    trash_radius: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("capture_has_media", &self.capture.has_media())
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            screen: Screen::Capture,
            capture: capture::State::new(config::DEFAULT_CLIP_SECS),
            annotate: None,
            trim: None,
            notifications: notifications::Manager::new(),
            theme_mode: ThemeMode::System,
            strip_thumbnails: config::DEFAULT_STRIP_THUMBNAILS,
            trash_radius: config::DEFAULT_TRASH_RADIUS,
        }
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    let icon = crate::icon::load_window_icon();

    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        icon,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming them once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and optionally kicks off asynchronous
    /// media loading based on `Flags` received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);

        let mut app = App {
            i18n,
            capture: capture::State::new(config.max_clip_secs()),
            theme_mode: config.general.theme_mode,
            strip_thumbnails: config.strip_thumbnails(),
            trash_radius: config.trash_radius(),
            ..Self::default()
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        let task = match flags.file_path {
            Some(path) => {
                app.capture.is_loading = true;
                update::load_media_task(std::path::PathBuf::from(path))
            }
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self
            .capture
            .media_path()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
        {
            Some(file_name) => format!("{file_name} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let needs_tick = self.capture.needs_tick()
            || self.annotate.as_ref().is_some_and(annotate::State::needs_tick)
            || self.notifications.has_notifications();

        Subscription::batch([
            subscription::create_event_subscription(self.screen),
            subscription::create_tick_subscription(needs_tick),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Capture(message) => update::handle_capture_message(self, message),
            Message::Annotate(message) => update::handle_annotate_message(self, message),
            Message::Trim(message) => update::handle_trim_message(self, message),
            Message::Notification(message) => {
                self.notifications.handle_message(message);
                Task::none()
            }
            Message::MediaLoaded { path, result } => {
                update::handle_media_loaded(self, path, result)
            }
            Message::FrameCaptured(result) => update::handle_frame_captured(self, result),
            Message::OpenFileDialogResult(path) => match path {
                Some(path) => {
                    self.capture.is_loading = true;
                    update::load_media_task(path)
                }
                None => Task::none(),
            },
            Message::FileDropped(path) => {
                self.capture.is_loading = true;
                update::load_media_task(path)
            }
            Message::Tick(now) => update::handle_tick(self, now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
