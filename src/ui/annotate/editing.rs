// SPDX-License-Identifier: MPL-2.0
//! Text entry panel for creating and editing overlays.
//!
//! While the panel is open the overlay is off the canvas; confirming
//! re-inserts an updated overlay at the pre-tap transform, cancelling
//! re-inserts the original. Committing an empty draft drops the overlay,
//! matching the convention that deleting all text deletes the annotation.

use crate::overlay::{FontSize, OverlayStyle, OverlayTransform, TextOverlay};

/// Messages from the edit panel widgets.
#[derive(Debug, Clone)]
pub enum Message {
    DraftChanged(String),
    CycleColor,
    FontSizeChanged(f32),
    Confirm,
    Cancel,
}

/// Result of an edit interaction; `overlay` is what goes back on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Committed(Option<TextOverlay>),
    Cancelled(Option<TextOverlay>),
}

/// One open edit panel.
#[derive(Debug, Clone)]
pub struct EditingSession {
    draft: String,
    style: OverlayStyle,
    /// Transform the overlay returns to on commit or cancel.
    restore_transform: OverlayTransform,
    /// Content/style to restore on cancel; `None` for a brand-new overlay.
    original: Option<(String, OverlayStyle)>,
}

impl EditingSession {
    /// Opens the panel for a brand-new overlay.
    #[must_use]
    pub fn create(style: OverlayStyle, spawn_transform: OverlayTransform) -> Self {
        Self {
            draft: String::new(),
            style,
            restore_transform: spawn_transform,
            original: None,
        }
    }

    /// Opens the panel for an existing overlay, seeded with its content and
    /// style. `pre_tap_transform` is where the overlay returns afterwards.
    #[must_use]
    pub fn edit(overlay: &TextOverlay, pre_tap_transform: OverlayTransform) -> Self {
        Self {
            draft: overlay.content.clone(),
            style: overlay.style,
            restore_transform: pre_tap_transform,
            original: Some((overlay.content.clone(), overlay.style)),
        }
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    /// Handles a panel message. `Some` closes the panel with the outcome.
    pub fn update(&mut self, message: Message) -> Option<Outcome> {
        match message {
            Message::DraftChanged(draft) => {
                self.draft = draft;
                None
            }
            Message::CycleColor => {
                self.style.color = self.style.color.cycled();
                None
            }
            Message::FontSizeChanged(size) => {
                self.style.font_size = FontSize::new(size);
                None
            }
            Message::Confirm => {
                let trimmed = self.draft.trim();
                let overlay = if trimmed.is_empty() {
                    // Committing empty text deletes the annotation.
                    None
                } else {
                    Some(TextOverlay::with_transform(
                        trimmed,
                        self.style,
                        self.restore_transform,
                    ))
                };
                Some(Outcome::Committed(overlay))
            }
            Message::Cancel => {
                let overlay = self.original.as_ref().map(|(content, style)| {
                    TextOverlay::with_transform(content.clone(), *style, self.restore_transform)
                });
                Some(Outcome::Cancelled(overlay))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    fn existing_overlay() -> TextOverlay {
        TextOverlay::new("hello", OverlayStyle::default(), Point::new(40.0, 60.0))
    }

    #[test]
    fn confirm_reinserts_updated_content_at_the_restore_transform() {
        let overlay = existing_overlay();
        let pre_tap = overlay.transform;
        let mut session = EditingSession::edit(&overlay, pre_tap);

        session.update(Message::DraftChanged("updated".into()));
        let outcome = session.update(Message::Confirm).expect("panel closes");

        let Outcome::Committed(Some(updated)) = outcome else {
            panic!("expected a committed overlay");
        };
        assert_eq!(updated.content, "updated");
        assert_eq!(updated.transform, pre_tap);
        // Re-inserted overlays get a fresh identity.
        assert_ne!(updated.id(), overlay.id());
    }

    #[test]
    fn confirm_with_empty_draft_drops_the_overlay() {
        let overlay = existing_overlay();
        let mut session = EditingSession::edit(&overlay, overlay.transform);
        session.update(Message::DraftChanged("   ".into()));

        assert_eq!(
            session.update(Message::Confirm),
            Some(Outcome::Committed(None))
        );
    }

    #[test]
    fn cancel_restores_the_original_content_and_style() {
        let overlay = existing_overlay();
        let mut session = EditingSession::edit(&overlay, overlay.transform);
        session.update(Message::DraftChanged("scribble".into()));
        session.update(Message::CycleColor);

        let outcome = session.update(Message::Cancel).expect("panel closes");
        let Outcome::Cancelled(Some(restored)) = outcome else {
            panic!("expected the original overlay back");
        };
        assert_eq!(restored.content, "hello");
        assert_eq!(restored.style, OverlayStyle::default());
    }

    #[test]
    fn cancel_of_a_new_overlay_restores_nothing() {
        let mut session =
            EditingSession::create(OverlayStyle::default(), OverlayTransform::default());
        session.update(Message::DraftChanged("draft".into()));
        assert_eq!(session.update(Message::Cancel), Some(Outcome::Cancelled(None)));
    }

    #[test]
    fn style_edits_accumulate_in_the_session() {
        let mut session =
            EditingSession::create(OverlayStyle::default(), OverlayTransform::default());
        session.update(Message::CycleColor);
        session.update(Message::FontSizeChanged(64.0));

        assert_eq!(
            session.style().color,
            OverlayStyle::default().color.cycled()
        );
        assert_eq!(session.style().font_size.value(), 64.0);
    }
}
