// SPDX-License-Identifier: MPL-2.0
//! Capture screen composition: preview, empty state and the shutter bar.

use super::{shutter, Message, State};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::canvas::{self, Canvas, Frame, Path, Stroke};
use iced::widget::{button, column, container, image, mouse_area, row, text};
use iced::{mouse, Alignment, Element, Length, Point, Rectangle};
use std::f32::consts::PI;
use std::time::Instant;

/// Builds the capture screen.
pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match state.media() {
        Some(media) => container(
            image(media.preview().handle.clone())
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into(),
        None => empty_state(state, i18n),
    };

    let content = column![preview, shutter_bar(state, i18n)]
        .width(Length::Fill)
        .height(Length::Fill);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::capture_backdrop)
        .into()
}

fn empty_state<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let hint_key = if state.is_loading {
        "capture-loading"
    } else {
        "capture-empty-hint"
    };

    let content = column![
        text(i18n.tr(hint_key))
            .size(typography::TITLE)
            .color(palette::GRAY_200),
        button(text(i18n.tr("capture-open-file")).size(typography::BODY))
            .style(styles::button::primary)
            .on_press(Message::OpenFile),
    ]
    .spacing(spacing::MD)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center(Length::Fill)
        .into()
}

fn shutter_bar<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let shutter_button = mouse_area(
        Canvas::new(ShutterButton {
            progress: state.shutter().progress(Instant::now()),
            recording: state.shutter().is_recording(),
        })
        .width(Length::Fixed(sizing::SHUTTER_DIAMETER))
        .height(Length::Fixed(sizing::SHUTTER_DIAMETER)),
    )
    .on_press(Message::Shutter(shutter::Message::Pressed))
    .on_release(Message::Shutter(shutter::Message::Released));

    let mut bar = row![shutter_button]
        .spacing(spacing::LG)
        .align_y(Alignment::Center);

    if state.has_video() {
        bar = bar.push(
            button(text(i18n.tr("capture-open-trim")).size(typography::BODY))
                .style(styles::button::subtle)
                .on_press(Message::OpenTrim),
        );
    }

    container(bar)
        .width(Length::Fill)
        .align_x(Alignment::Center)
        .padding(spacing::LG)
        .into()
}

/// Canvas drawing the shutter circle and the recording progress ring.
struct ShutterButton {
    progress: f32,
    recording: bool,
}

impl<Message> canvas::Program<Message> for ShutterButton {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 2.0;

        // Outer ring.
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_width(sizing::SHUTTER_RING_WIDTH)
                .with_color(palette::WHITE),
        );

        // Inner disc shrinks and turns red while recording.
        let inner_radius = if self.recording {
            radius * 0.45
        } else {
            radius * 0.8
        };
        let inner_color = if self.recording {
            palette::RECORD_500
        } else {
            palette::WHITE
        };
        frame.fill(&Path::circle(center, inner_radius), inner_color);

        // Progress arc runs clockwise from the top while recording.
        if self.recording && self.progress > 0.0 {
            let start_angle = -PI / 2.0;
            let sweep = self.progress.clamp(0.0, 1.0) * 2.0 * PI;

            let mut arc = canvas::path::Builder::new();
            let segments = 48;
            for i in 0..=segments {
                let t = i as f32 / segments as f32;
                let angle = start_angle + sweep * t;
                let point = Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                );
                if i == 0 {
                    arc.move_to(point);
                } else {
                    arc.line_to(point);
                }
            }

            frame.stroke(
                &arc.build(),
                Stroke::default()
                    .with_width(sizing::SHUTTER_RING_WIDTH)
                    .with_color(palette::RECORD_500)
                    .with_line_cap(canvas::LineCap::Round),
            );
        }

        vec![frame.into_geometry()]
    }
}
