// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Load, capture and save outcomes surface here instead of blocking error
//! panels. Messages are i18n keys resolved at render time.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::view as toast_view;
