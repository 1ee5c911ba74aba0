// SPDX-License-Identifier: MPL-2.0
//! Theme mode selection with system detection.

use serde::{Deserialize, Serialize};

/// User-selectable theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the OS preference, falling back to dark when undetectable.
    #[default]
    System,
}

impl ThemeMode {
    /// Resolves the effective dark/light choice.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => matches!(dark_light::detect(), Ok(dark_light::Mode::Dark)),
        }
    }

    /// Maps the mode onto an Iced theme.
    #[must_use]
    pub fn theme(self) -> iced::Theme {
        if self.is_dark() {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_resolve_directly() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
    }

    #[test]
    fn serde_round_trip_uses_lowercase() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            theme_mode: ThemeMode,
        }

        let serialized = toml::to_string(&Wrapper {
            theme_mode: ThemeMode::Dark,
        })
        .expect("serialize");
        assert!(serialized.contains("dark"));

        let parsed: Wrapper = toml::from_str("theme_mode = \"light\"").expect("deserialize");
        assert_eq!(parsed.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn default_is_system() {
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }
}
