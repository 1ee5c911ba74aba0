// SPDX-License-Identifier: MPL-2.0
//! Annotation screen composition: backdrop, overlay canvas, chrome and the
//! edit panel.

use super::{editing, Message, PointerEvent, PointerId, State};
use crate::i18n::fluent::I18n;
use crate::overlay::TextOverlay;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::canvas::{self, Canvas, Frame, Path, Stroke, Text};
use iced::widget::{button, column, container, image, row, slider, text, text_input, Stack};
use iced::{mouse, touch, Alignment, Color, Element, Length, Point, Rectangle, Vector};

/// Builds the annotate screen.
pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let backdrop = container(
        image(state.backdrop().handle.clone())
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    let canvas = Canvas::new(AnnotateCanvas { state })
        .width(Length::Fill)
        .height(Length::Fill);

    let mut stack = Stack::new().push(backdrop).push(canvas);

    if !state.is_chrome_hidden() && state.editing().is_none() {
        stack = stack.push(toolbar(i18n));
    }

    if let Some(session) = state.editing() {
        stack = stack.push(edit_panel(session, i18n));
    }

    container(stack)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::capture_backdrop)
        .into()
}

fn toolbar<'a>(i18n: &'a I18n) -> Element<'a, Message> {
    let bar = row![
        button(text(i18n.tr("annotate-add-text")).size(typography::BODY))
            .style(styles::button::primary)
            .on_press(Message::AddOverlay),
        button(text(i18n.tr("annotate-done")).size(typography::BODY))
            .style(styles::button::subtle)
            .on_press(Message::Done),
    ]
    .spacing(spacing::SM);

    container(bar)
        .width(Length::Fill)
        .align_x(Alignment::End)
        .padding(spacing::MD)
        .into()
}

fn edit_panel<'a>(session: &'a editing::EditingSession, i18n: &'a I18n) -> Element<'a, Message> {
    let style = session.style();

    let swatch = button(
        text("●").size(typography::TITLE).color(style.color.color()),
    )
    .style(styles::button::subtle)
    .on_press(Message::Editing(editing::Message::CycleColor));

    let content = column![
        text_input(&i18n.tr("annotate-edit-placeholder"), session.draft())
            .on_input(|value| Message::Editing(editing::Message::DraftChanged(value)))
            .on_submit(Message::Editing(editing::Message::Confirm))
            .size(typography::TITLE),
        row![
            swatch,
            slider(
                crate::overlay::style::font_bounds::MIN
                    ..=crate::overlay::style::font_bounds::MAX,
                style.font_size.value(),
                |value| Message::Editing(editing::Message::FontSizeChanged(value)),
            ),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center),
        row![
            button(text(i18n.tr("annotate-edit-cancel")).size(typography::BODY))
                .style(styles::button::subtle)
                .on_press(Message::Editing(editing::Message::Cancel)),
            button(text(i18n.tr("annotate-edit-confirm")).size(typography::BODY))
                .style(styles::button::primary)
                .on_press(Message::Editing(editing::Message::Confirm)),
        ]
        .spacing(spacing::SM),
    ]
    .spacing(spacing::MD)
    .max_width(360.0);

    container(
        container(content)
            .padding(spacing::LG)
            .style(styles::container::floating_panel),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center(Length::Fill)
    .into()
}

/// Canvas program: forwards pointer events and draws overlays, dimming and
/// the trash zone.
struct AnnotateCanvas<'a> {
    state: &'a State,
}

impl<'a> AnnotateCanvas<'a> {
    fn publish(
        event: PointerEvent,
        bounds: Rectangle,
    ) -> Option<iced::widget::Action<Message>> {
        Some(
            iced::widget::Action::publish(Message::Canvas {
                event,
                viewport: bounds.size(),
            })
            .and_capture(),
        )
    }
}

impl<'a> canvas::Program<Message> for AnnotateCanvas<'a> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        let to_local = |position: Point| {
            Point::new(position.x - bounds.x, position.y - bounds.y)
        };

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                Self::publish(
                    PointerEvent::Pressed {
                        pointer: PointerId::Mouse,
                        position,
                    },
                    bounds,
                )
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                // Deliver moves even outside the bounds so a drag can leave
                // the canvas without losing the gesture.
                let position = cursor.position().map(to_local)?;
                Self::publish(
                    PointerEvent::Moved {
                        pointer: PointerId::Mouse,
                        position,
                    },
                    bounds,
                )
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let position = cursor.position().map(to_local)?;
                Self::publish(
                    PointerEvent::Released {
                        pointer: PointerId::Mouse,
                        position,
                    },
                    bounds,
                )
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) => Self::publish(
                PointerEvent::Lost {
                    pointer: PointerId::Mouse,
                },
                bounds,
            ),
            iced::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                Self::publish(
                    PointerEvent::Pressed {
                        pointer: PointerId::Touch(id.0),
                        position: to_local(*position),
                    },
                    bounds,
                )
            }
            iced::Event::Touch(touch::Event::FingerMoved { id, position }) => Self::publish(
                PointerEvent::Moved {
                    pointer: PointerId::Touch(id.0),
                    position: to_local(*position),
                },
                bounds,
            ),
            iced::Event::Touch(touch::Event::FingerLifted { id, position }) => Self::publish(
                PointerEvent::Released {
                    pointer: PointerId::Touch(id.0),
                    position: to_local(*position),
                },
                bounds,
            ),
            iced::Event::Touch(touch::Event::FingerLost { id, .. }) => Self::publish(
                PointerEvent::Lost {
                    pointer: PointerId::Touch(id.0),
                },
                bounds,
            ),
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

        for overlay in self.state.registry().iter() {
            if overlay.visible {
                draw_overlay(&mut frame, overlay);
            }
        }

        if self.state.is_trash_active() {
            // Dim everything, then draw the zone indicator on top.
            frame.fill_rectangle(
                Point::ORIGIN,
                bounds.size(),
                Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..palette::BLACK
                },
            );
            if let Some(zone) = self.state.trash_zone() {
                draw_trash_zone(&mut frame, zone, self.state.is_trash_armed());
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.state.registry().hit_test(position).is_some() => {
                mouse::Interaction::Grab
            }
            _ => mouse::Interaction::default(),
        }
    }
}

fn draw_overlay(frame: &mut Frame, overlay: &TextOverlay) {
    let transform = overlay.transform;
    let size = overlay.content_size();

    frame.with_save(|frame| {
        frame.translate(Vector::new(transform.position.x, transform.position.y));
        frame.rotate(transform.rotation);
        frame.scale(transform.scale.value());

        frame.fill_text(Text {
            content: overlay.content.clone(),
            position: Point::new(-size.width / 2.0, -size.height / 2.0),
            color: overlay.style.color.color(),
            size: overlay.style.font_size.value().into(),
            ..Text::default()
        });
    });
}

fn draw_trash_zone(frame: &mut Frame, zone: crate::overlay::TrashZone, armed: bool) {
    let circle = Path::circle(zone.center, zone.radius);

    if armed {
        frame.fill(
            &circle,
            Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::ERROR_500
            },
        );
    }

    let ring_color = if armed {
        palette::ERROR_500
    } else {
        palette::WHITE
    };
    frame.stroke(
        &circle,
        Stroke::default()
            .with_width(sizing::TRASH_RING_WIDTH)
            .with_color(ring_color),
    );

    frame.fill_text(Text {
        content: "×".to_string(),
        position: Point::new(zone.center.x - 6.0, zone.center.y - 12.0),
        color: ring_color,
        size: 24.0.into(),
        ..Text::default()
    });
}
