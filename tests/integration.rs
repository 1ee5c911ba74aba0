// SPDX-License-Identifier: MPL-2.0
//! Cross-module integration tests: configuration + localization wiring and
//! the gesture pipeline driven through the public annotate API.

use iced::{Point, Size, Vector};
use iced_shutter::config::{self, Config, General};
use iced_shutter::i18n::fluent::I18n;
use iced_shutter::media::ImageData;
use iced_shutter::overlay::{
    CanvasRegistry, Effect, GestureCoordinator, GestureEvent, GesturePhase, GestureUpdate,
    OverlayStyle, TextOverlay,
};
use iced_shutter::ui::annotate::{Message, PointerEvent, PointerId, State};
use tempfile::tempdir;

#[test]
fn language_change_via_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let initial_config = Config {
        general: General {
            language: Some("en-US".to_string()),
            ..General::default()
        },
        ..Config::default()
    };
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("annotate-done"), "Done");

    // 2. Change config to fr
    let french_config = Config {
        general: General {
            language: Some("fr".to_string()),
            ..General::default()
        },
        ..Config::default()
    };
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("annotate-done"), "Terminé");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn cli_language_overrides_config() {
    let config = Config {
        general: General {
            language: Some("en-US".to_string()),
            ..General::default()
        },
        ..Config::default()
    };
    let i18n = I18n::new(Some("fr".to_string()), None, &config);
    assert_eq!(i18n.current_locale().to_string(), "fr");
}

/// The worked pan example from the interaction contract: cumulative deltas
/// relative to the origin, not additive per event.
#[test]
fn coordinator_pan_example_is_cumulative() {
    let mut registry = CanvasRegistry::new();
    let id = registry.add(TextOverlay::new(
        "label",
        OverlayStyle::default(),
        Point::new(100.0, 100.0),
    ));
    let mut coordinator = GestureCoordinator::new();

    let pan = |phase, x, y| {
        GestureEvent::new(
            id,
            phase,
            GestureUpdate::Pan {
                translation: Vector::new(x, y),
            },
        )
    };

    let mut apply = |coordinator: &mut GestureCoordinator,
                     registry: &mut CanvasRegistry,
                     event: GestureEvent| {
        let effects = coordinator.handle(event, registry);
        for effect in effects {
            if let Effect::TransformChanged { overlay, transform } = effect {
                registry.get_mut(overlay).unwrap().transform = transform;
            }
        }
    };

    apply(&mut coordinator, &mut registry, pan(GesturePhase::Began, 0.0, 0.0));
    apply(
        &mut coordinator,
        &mut registry,
        pan(GesturePhase::Changed, 20.0, -5.0),
    );
    apply(
        &mut coordinator,
        &mut registry,
        pan(GesturePhase::Changed, 40.0, -5.0),
    );
    apply(
        &mut coordinator,
        &mut registry,
        pan(GesturePhase::Ended, 40.0, -5.0),
    );

    assert_eq!(
        registry.get(id).unwrap().transform.position,
        Point::new(140.0, 95.0)
    );
}

/// Full pipeline through the annotate screen: pointer events in, moved
/// overlay out, chrome and capture arbitration along the way.
#[test]
fn annotate_screen_moves_an_overlay_end_to_end() {
    let mut state = State::new(ImageData::from_rgba(1, 1, vec![255; 4]), 48.0);
    let id = state.insert_overlay(TextOverlay::new(
        "hello",
        OverlayStyle::default(),
        Point::new(100.0, 100.0),
    ));

    let viewport = Size::new(400.0, 800.0);
    let canvas = |event| Message::Canvas { event, viewport };

    state.update(canvas(PointerEvent::Pressed {
        pointer: PointerId::Mouse,
        position: Point::new(100.0, 100.0),
    }));
    state.update(canvas(PointerEvent::Moved {
        pointer: PointerId::Mouse,
        position: Point::new(160.0, 130.0),
    }));

    // Mid-drag: chrome suppressed and hit-testing captured by the overlay.
    assert!(state.is_chrome_hidden());
    assert_eq!(state.registry().hit_test(Point::new(5.0, 5.0)), Some(id));

    state.update(canvas(PointerEvent::Released {
        pointer: PointerId::Mouse,
        position: Point::new(160.0, 130.0),
    }));

    assert!(!state.is_chrome_hidden());
    assert_eq!(
        state.registry().get(id).unwrap().transform.position,
        Point::new(160.0, 130.0)
    );
}

#[test]
fn missing_translation_keys_are_flagged_not_fatal() {
    let i18n = I18n::default();
    let resolved = i18n.tr("no-such-key-anywhere");
    assert!(resolved.starts_with("MISSING:"));
}
