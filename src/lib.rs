// SPDX-License-Identifier: MPL-2.0
//! `iced_shutter` is a camera-style media capture and annotation editor
//! built with the Iced GUI framework.
//!
//! Media opens on a capture screen with a shutter bar (tap for a still,
//! hold for a time-limited clip); stills flow into a gesture-driven text
//! annotation canvas, and videos into a thumbnail trim strip. The gesture
//! and transform core lives in [`overlay`], independent of any widget code.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod media;
pub mod overlay;
pub mod ui;
