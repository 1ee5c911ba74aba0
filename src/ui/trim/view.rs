// SPDX-License-Identifier: MPL-2.0
//! Trim screen composition: thumbnail strip, selection shading and handles.

use super::{Message, State, StripEvent};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::canvas::{self, Canvas, Frame, Path, Stroke, Text};
use iced::widget::{button, column, container, image, row, text, Stack};
use iced::{mouse, Alignment, Color, Element, Length, Point, Rectangle, Size};

/// Builds the trim screen.
pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let header = row![
        button(text(i18n.tr("trim-back")).size(typography::BODY))
            .style(styles::button::subtle)
            .on_press(Message::Back),
        text(selection_label(state)).size(typography::BODY),
    ]
    .spacing(spacing::MD)
    .align_y(Alignment::Center);

    let strip: Element<'a, Message> = if state.is_loading {
        container(text(i18n.tr("trim-loading")).size(typography::BODY))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::TRIM_STRIP_HEIGHT))
            .center(Length::Fill)
            .into()
    } else {
        strip_view(state)
    };

    container(
        column![
            container(header).width(Length::Fill).padding(spacing::MD),
            container(strip)
                .width(Length::Fill)
                .padding(spacing::MD),
        ]
        .spacing(spacing::LG),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(styles::container::capture_backdrop)
    .into()
}

fn selection_label(state: &State) -> String {
    let selection = state.selection();
    format!(
        "{} – {}  ({})",
        format_secs(selection.start_secs()),
        format_secs(selection.end_secs()),
        format_secs(selection.duration_secs()),
    )
}

/// Formats seconds as M:SS.m for the selection label.
fn format_secs(secs: f64) -> String {
    let minutes = (secs / 60.0).floor() as u64;
    let rest = secs - (minutes as f64) * 60.0;
    format!("{minutes}:{rest:04.1}")
}

fn strip_view(state: &State) -> Element<'_, Message> {
    let thumbnails: Element<'_, Message> = match state.strip() {
        Some(strip) => row(strip.thumbnails.iter().map(|thumb| {
            image(thumb.handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(sizing::TRIM_STRIP_HEIGHT))
                .into()
        }))
        .width(Length::Fill)
        .into(),
        None => container(text(""))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::TRIM_STRIP_HEIGHT))
            .into(),
    };

    Stack::new()
        .push(thumbnails)
        .push(
            Canvas::new(TrimStrip { state })
                .width(Length::Fill)
                .height(Length::Fixed(sizing::TRIM_STRIP_HEIGHT)),
        )
        .into()
}

/// Canvas program over the thumbnail row: selection shading, handles and
/// the scrub indicator.
struct TrimStrip<'a> {
    state: &'a State,
}

impl<'a> TrimStrip<'a> {
    fn publish(
        event: StripEvent,
        bounds: Rectangle,
    ) -> Option<iced::widget::Action<Message>> {
        Some(
            iced::widget::Action::publish(Message::Strip {
                event,
                bounds: Rectangle::new(Point::ORIGIN, bounds.size()),
            })
            .and_capture(),
        )
    }
}

impl<'a> canvas::Program<Message> for TrimStrip<'a> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        let to_local =
            |position: Point| Point::new(position.x - bounds.x, position.y - bounds.y);

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                Self::publish(StripEvent::Pressed(position), bounds)
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                // Moves are delivered even outside the strip so a handle
                // drag can overshoot the edges.
                let position = cursor.position().map(to_local)?;
                Self::publish(StripEvent::Moved(position), bounds)
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | iced::Event::Mouse(mouse::Event::CursorLeft) => {
                Self::publish(StripEvent::Released, bounds)
            }
            iced::Event::Touch(touch_event) => match touch_event {
                iced::touch::Event::FingerPressed { position, .. } => {
                    if !bounds.contains(*position) {
                        return None;
                    }
                    Self::publish(StripEvent::Pressed(to_local(*position)), bounds)
                }
                iced::touch::Event::FingerMoved { position, .. } => {
                    Self::publish(StripEvent::Moved(to_local(*position)), bounds)
                }
                iced::touch::Event::FingerLifted { .. }
                | iced::touch::Event::FingerLost { .. } => {
                    Self::publish(StripEvent::Released, bounds)
                }
            },
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let width = bounds.width;
        let height = bounds.height;
        let duration = self.state.duration_secs();

        let selection = self.state.selection();
        let in_x = ((selection.start_secs() / duration) * f64::from(width)) as f32;
        let out_x = ((selection.end_secs() / duration) * f64::from(width)) as f32;

        // Shade the discarded ranges.
        let shade = Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        };
        if in_x > 0.0 {
            frame.fill_rectangle(Point::ORIGIN, Size::new(in_x, height), shade);
        }
        if out_x < width {
            frame.fill_rectangle(
                Point::new(out_x, 0.0),
                Size::new(width - out_x, height),
                shade,
            );
        }

        // Selection frame.
        frame.stroke(
            &Path::rectangle(Point::new(in_x, 0.0), Size::new(out_x - in_x, height)),
            Stroke::default()
                .with_width(2.0)
                .with_color(palette::PRIMARY_400),
        );

        // Handles.
        for x in [in_x, out_x] {
            frame.fill_rectangle(
                Point::new(x - sizing::TRIM_HANDLE_WIDTH / 2.0, 0.0),
                Size::new(sizing::TRIM_HANDLE_WIDTH, height),
                palette::PRIMARY_400,
            );
        }

        // Scrub indicator with a time readout.
        if let Some(scrub) = self.state.scrub_secs() {
            let x = ((scrub / duration) * f64::from(width)) as f32;
            frame.fill_rectangle(
                Point::new(x - 1.0, 0.0),
                Size::new(2.0, height),
                palette::WHITE,
            );
            frame.fill_text(Text {
                content: format_secs(scrub),
                position: Point::new(x + 4.0, 4.0),
                color: palette::WHITE,
                size: typography::LABEL.into(),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.state.is_dragging() {
            return mouse::Interaction::ResizingHorizontally;
        }
        match cursor.position_in(bounds) {
            Some(_) => mouse::Interaction::Pointer,
            None => mouse::Interaction::default(),
        }
    }
}
