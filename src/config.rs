//! Game configuration
//!
//! Screen size, brick layout and balance numbers live here and are handed to
//! the round, the level loader and the renderer explicitly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Draw thresholds deciding which bonus (if any) a destroyed brick drops.
///
/// A draw is a uniform integer in `[0, 100)`. Draws below `extra_life` give an
/// extra life, below `multi_ball` a multi-ball, below `small_platform` a
/// small-platform malus, anything else nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusThresholds {
    pub extra_life: u32,
    pub multi_ball: u32,
    pub small_platform: u32,
}

impl Default for BonusThresholds {
    fn default() -> Self {
        Self {
            extra_life: 5,
            multi_ball: 10,
            small_platform: 15,
        }
    }
}

/// Everything the simulation and layout need to know about the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Target frame rate; the simulation steps by exactly `1 / fps`
    pub fps: u32,

    // === Brick grid ===
    pub columns: u32,
    pub spacing: f32,
    pub brick_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    /// Vertical spawn position of fresh balls, as a fraction of screen height
    pub ball_spawn_fraction: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Gap between the paddle bottom edge and the screen bottom
    pub paddle_bottom_margin: f32,
    /// Horizontal deflection from hitting off-centre (0 = pure reflection)
    pub paddle_english: f32,
    /// Width multiplier while the small-platform malus is active
    pub small_paddle_factor: f32,
    /// Malus duration in seconds
    pub small_paddle_secs: f32,

    // === Bonuses ===
    pub bonus_size: f32,
    pub bonus_speed: f32,
    pub bonus_thresholds: BonusThresholds,
    /// Minimum number of balls in play after a multi-ball pickup
    pub multi_ball_count: usize,

    // === Lives and scoring ===
    pub starting_lives: u32,
    pub score_brick_hit: i64,
    pub score_brick_destroyed: i64,
    pub ball_lost_penalty: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,

            columns: BRICK_COLUMNS,
            spacing: SPACING,
            brick_height: BRICK_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_spawn_fraction: 0.55,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_margin: 40.0,
            paddle_english: 0.6,
            small_paddle_factor: 0.5,
            small_paddle_secs: 10.0,

            bonus_size: BONUS_SIZE,
            bonus_speed: BONUS_SPEED,
            bonus_thresholds: BonusThresholds::default(),
            multi_ball_count: 3,

            starting_lives: STARTING_LIVES,
            score_brick_hit: 10,
            score_brick_destroyed: 150,
            ball_lost_penalty: 50,
        }
    }
}

impl GameConfig {
    /// Brick width derived from the screen width, column count and spacing
    pub fn brick_width(&self) -> f32 {
        let columns = self.columns.max(1) as f32;
        (self.screen_width - (columns + 1.0) * self.spacing) / columns
    }

    /// Fixed simulation step in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Wall-clock budget for one frame
    pub fn frame_budget(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(self.dt())
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.screen_height - self.paddle_bottom_margin - self.paddle_height
    }

    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let config =
            Self::from_json(&json).with_context(|| format!("in config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.screen_width > 0.0 && self.screen_height > 0.0,
            "screen size must be positive"
        );
        anyhow::ensure!(self.fps > 0, "fps must be positive");
        anyhow::ensure!(self.starting_lives > 0, "starting_lives must be at least 1");
        anyhow::ensure!(self.columns > 0, "columns must be positive");
        anyhow::ensure!(self.brick_width() > 0.0, "bricks do not fit the screen width");
        anyhow::ensure!(
            self.paddle_width > 0.0 && self.paddle_width <= self.screen_width,
            "paddle must fit the screen"
        );
        let t = self.bonus_thresholds;
        anyhow::ensure!(
            t.extra_life <= t.multi_ball && t.multi_ball <= t.small_platform && t.small_platform <= 100,
            "bonus thresholds must be ascending and at most 100"
        );
        Ok(())
    }
}
