//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Movable, clamp_span};
use super::geometry::Rect;
use crate::config::GameConfig;

/// Which direction keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub left: bool,
    pub right: bool,
}

impl PaddleInput {
    /// -1, 0 or +1; both keys held cancel out
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Horizontal paddle; `pos` is the top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub height: f32,
    base_width: f32,
    speed: f32,
    screen_width: f32,
    small_factor: f32,
    small_duration: f32,
    /// Seconds left on the small-platform malus (0 = inactive)
    small_remaining: f32,
}

impl Movable for Paddle {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    /// Integrate velocity, count down the malus, then clamp into the screen
    fn advance(&mut self, dt: f32) {
        let center = self.center_x();
        if self.small_remaining > 0.0 {
            self.small_remaining = (self.small_remaining - dt).max(0.0);
            if self.small_remaining == 0.0 {
                log::debug!("Small platform malus expired");
                // Grow back around the same centre
                self.pos.x = center - self.width() / 2.0;
            }
        }
        self.integrate(dt);
        self.clamp_to_screen();
    }
}

impl Paddle {
    /// Centred horizontally, resting `paddle_bottom_margin` above the bottom
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                (config.screen_width - config.paddle_width) / 2.0,
                config.paddle_top(),
            ),
            vel: Vec2::ZERO,
            height: config.paddle_height,
            base_width: config.paddle_width,
            speed: config.paddle_speed,
            screen_width: config.screen_width,
            small_factor: config.small_paddle_factor,
            small_duration: config.small_paddle_secs,
            small_remaining: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        if self.is_small() {
            self.base_width * self.small_factor
        } else {
            self.base_width
        }
    }

    pub fn is_small(&self) -> bool {
        self.small_remaining > 0.0
    }

    /// Seconds until the malus wears off
    pub fn small_remaining(&self) -> f32 {
        self.small_remaining
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width() / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width(), self.height)
    }

    /// Set velocity from the held direction keys
    pub fn handle_input(&mut self, input: PaddleInput) {
        self.vel = Vec2::new(input.direction() * self.speed, 0.0);
    }

    /// Keep the paddle fully within `[0, screen_width]`
    pub fn clamp_to_screen(&mut self) {
        self.pos.x = clamp_span(self.pos.x, self.width(), self.screen_width);
    }

    /// Shrink the paddle for a fixed time. Picking another one while shrunk
    /// restarts the timer instead of shrinking further.
    pub fn apply_small_platform_malus(&mut self) {
        let center = self.center_x();
        self.small_remaining = self.small_duration;
        if self.small_remaining > 0.0 {
            self.pos.x = center - self.width() / 2.0;
            self.clamp_to_screen();
        }
    }
}
