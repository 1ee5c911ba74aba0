// SPDX-License-Identifier: MPL-2.0
//! Shutter button state machine.
//!
//! A press below the hold threshold captures a still on release; holding
//! past it starts a recording whose progress ring fills over the configured
//! maximum clip duration and auto-completes at the limit. Driven by the app
//! tick subscription; separate from the gesture coordinator.

use std::time::{Duration, Instant};

/// Hold duration separating a still capture from a recording.
pub const STILL_HOLD_THRESHOLD: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    /// Pressed, not yet promoted to a recording.
    Pressed { at: Instant },
    /// Recording since `started_at` (the original press).
    Recording { started_at: Instant },
}

/// Messages from the shutter button and the tick subscription.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Pressed,
    Released,
    Tick(Instant),
}

/// Effects for the capture screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Quick press-and-release: capture a still frame.
    CaptureStill,
    /// The hold threshold passed; the ring starts filling.
    RecordingStarted,
    /// Recording finished, either by release or by hitting the limit.
    RecordingFinished { duration: Duration },
}

/// Shutter button state.
#[derive(Debug)]
pub struct State {
    phase: Phase,
    max_clip: Duration,
}

impl State {
    /// Creates the shutter with the configured maximum clip duration.
    #[must_use]
    pub fn new(max_clip_secs: u32) -> Self {
        Self {
            phase: Phase::Idle,
            max_clip: Duration::from_secs(u64::from(max_clip_secs)),
        }
    }

    /// Handle a shutter message.
    pub fn handle(&mut self, message: Message) -> Effect {
        match (message, self.phase) {
            (Message::Pressed, Phase::Idle) => {
                self.phase = Phase::Pressed { at: Instant::now() };
                Effect::None
            }
            // A second press while engaged is noise from focus changes.
            (Message::Pressed, _) => Effect::None,

            (Message::Released, Phase::Pressed { .. }) => {
                // Promotion to recording is the tick's job; releasing before
                // it happened is a still capture.
                self.phase = Phase::Idle;
                Effect::CaptureStill
            }
            (Message::Released, Phase::Recording { started_at }) => {
                self.phase = Phase::Idle;
                Effect::RecordingFinished {
                    duration: started_at.elapsed().min(self.max_clip),
                }
            }
            (Message::Released, Phase::Idle) => Effect::None,

            (Message::Tick(now), Phase::Pressed { at }) => {
                if now.duration_since(at) >= STILL_HOLD_THRESHOLD {
                    self.phase = Phase::Recording { started_at: at };
                    Effect::RecordingStarted
                } else {
                    Effect::None
                }
            }
            (Message::Tick(now), Phase::Recording { started_at }) => {
                if now.duration_since(started_at) >= self.max_clip {
                    self.phase = Phase::Idle;
                    Effect::RecordingFinished {
                        duration: self.max_clip,
                    }
                } else {
                    Effect::None
                }
            }
            (Message::Tick(_), Phase::Idle) => Effect::None,
        }
    }

    /// Ring fill fraction at `now`, `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Recording { started_at } => {
                let elapsed = now.duration_since(started_at).as_secs_f32();
                (elapsed / self.max_clip.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.phase, Phase::Recording { .. })
    }

    /// Pressed or recording; the tick subscription must stay alive.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }
}
