//! Discrete input events and held-key tracking
//!
//! The front end turns raw terminal events into [`InputEvent`]s. Direction
//! keys become "held" state for the paddle. On terminals that never report key
//! releases a press is a short pulse, and keyboard auto-repeat keeps extending
//! it while the key is down.

use std::time::{Duration, Instant};

use crate::sim::{PaddleInput, TickInput};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Confirm,
    Digit(u8),
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// How long one press keeps a direction held when releases are not reported
pub const TAP_PULSE: Duration = Duration::from_millis(110);

/// Upper bound on a hold when the terminal reports releases, in case one is lost
pub const RELEASE_HOLD: Duration = Duration::from_secs(2);

/// Tracks which direction keys are held and whether quit was requested
#[derive(Debug, Clone)]
pub struct HeldKeys {
    hold: Duration,
    left_until: Option<Instant>,
    right_until: Option<Instant>,
    quit: bool,
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(TAP_PULSE)
    }
}

impl HeldKeys {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            left_until: None,
            right_until: None,
            quit: false,
        }
    }

    /// For terminals that send key release events
    pub fn with_release_events() -> Self {
        Self::new(RELEASE_HOLD)
    }

    /// Fold one event in, `now` being when it arrived
    pub fn apply(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(Key::Left) => {
                self.left_until = Some(now + self.hold);
                // Reversing direction releases the other key immediately
                self.right_until = None;
            }
            InputEvent::KeyDown(Key::Right) => {
                self.right_until = Some(now + self.hold);
                self.left_until = None;
            }
            InputEvent::KeyUp(Key::Left) => self.left_until = None,
            InputEvent::KeyUp(Key::Right) => self.right_until = None,
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => {}
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Direction keys held at `now`
    pub fn paddle(&self, now: Instant) -> PaddleInput {
        let held = |until: Option<Instant>| until.is_some_and(|t| now < t);
        PaddleInput {
            left: held(self.left_until),
            right: held(self.right_until),
        }
    }

    /// Input for the next simulation frame
    pub fn tick_input(&self, now: Instant) -> TickInput {
        TickInput {
            paddle: self.paddle(now),
            quit: self.quit,
        }
    }
}
