//! Round state and core simulation types
//!
//! Everything one round of play owns lives here; the loop in `tick` is the
//! only thing that mutates it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bonus::{Bonus, BonusKind};
use super::brick::Brick;
use super::paddle::Paddle;
use crate::config::GameConfig;

/// Where a round stands. Everything except `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active gameplay
    Running,
    /// Every brick destroyed
    Won,
    /// Lives exhausted
    Lost,
    /// Player asked to quit mid-round
    Aborted,
}

impl RoundPhase {
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundPhase::Running)
    }
}

/// Things that happened during one frame, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A brick lost a hit point but still stands
    BrickHit { index: usize },
    /// A brick lost its last hit point
    BrickDestroyed { index: usize },
    /// A destroyed brick dropped a bonus
    BonusSpawned { kind: BonusKind, index: usize },
    /// The paddle caught a bonus
    BonusCollected { kind: BonusKind },
    /// The last ball left through the bottom
    LifeLost { lives_left: u32 },
    /// A fresh ball entered play
    BallSpawned,
}

/// Source of uniform draws in `[0, 100)` for the bonus spawn roll
pub trait DrawSource {
    fn draw(&mut self) -> u32;
}

impl DrawSource for Pcg32 {
    fn draw(&mut self) -> u32 {
        self.random_range(0..100)
    }
}

/// Replays a fixed sequence of draws, then keeps returning `fallback`
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 99,
        }
    }

    /// Never drops a bonus
    pub fn never() -> Self {
        Self::new([])
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self) -> u32 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

/// Seeded RNG for the game
pub fn seeded_draws(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub config: GameConfig,
    /// Player lives
    pub lives: u32,
    /// Score (can go negative after early ball losses)
    pub score: i64,
    pub phase: RoundPhase,
    pub paddle: Paddle,
    /// Active balls
    pub balls: Vec<Ball>,
    /// Falling bonuses
    pub bonuses: Vec<Bonus>,
    /// The level's bricks; destroyed ones stay in place, flagged
    pub bricks: Vec<Brick>,
    /// Simulation frame counter
    pub frame: u64,
    /// Balls spawned so far, used to alternate launch direction
    balls_spawned: u32,
}

impl RoundState {
    /// Start a round on the given brick field with one ball in play
    pub fn new(config: GameConfig, bricks: Vec<Brick>) -> Self {
        let mut state = Self {
            // A round always starts with a life to lose
            lives: config.starting_lives.max(1),
            score: 0,
            phase: RoundPhase::Running,
            paddle: Paddle::new(&config),
            balls: Vec::new(),
            bonuses: Vec::new(),
            bricks,
            frame: 0,
            balls_spawned: 0,
            config,
        };
        state.spawn_ball();
        log::info!(
            "Round started: {} bricks, {} lives",
            state.bricks.len(),
            state.lives
        );
        state
    }

    /// Put a fresh ball in play at the usual spawn point, heading down toward
    /// the paddle at an angle
    pub fn spawn_ball(&mut self) {
        let y = self.config.screen_height * self.config.ball_spawn_fraction;
        self.spawn_ball_at(y);
    }

    /// Put a fresh ball in play at the top of the open field, just under the
    /// lowest standing brick
    pub fn spawn_ball_at_top(&mut self) {
        let field_bottom = self
            .bricks
            .iter()
            .filter(|b| !b.is_destroyed())
            .map(|b| b.rect.bottom())
            .fold(0.0, f32::max);
        let y = field_bottom + self.config.spacing + self.config.ball_radius;
        self.spawn_ball_at(y);
    }

    fn spawn_ball_at(&mut self, y: f32) {
        let config = &self.config;
        let side = if self.balls_spawned % 2 == 0 { 1.0 } else { -1.0 };
        let direction = Vec2::new(0.5 * side, 1.0).normalize();
        let ball = Ball::new(
            Vec2::new(config.screen_width / 2.0, y),
            direction * config.ball_speed,
            config.ball_radius,
            Vec2::new(config.screen_width, config.screen_height),
        );
        self.balls.push(ball);
        self.balls_spawned += 1;
    }

    /// Bricks still standing
    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| !b.is_destroyed()).count()
    }

    pub fn all_bricks_destroyed(&self) -> bool {
        self.bricks.iter().all(Brick::is_destroyed)
    }
}
