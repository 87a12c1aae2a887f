//! Casse Brique - a Breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, round state)
//! - `level`: Text layouts turned into brick fields
//! - `renderer`: Abstract drawing surface, software canvas, terminal output
//! - `input`: Discrete input events and held-key tracking
//! - `config`: Screen, layout and balance configuration

pub mod config;
pub mod input;
pub mod level;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;

/// Game configuration constants
///
/// These only seed [`GameConfig::default`]; the simulation reads the config.
pub mod consts {
    /// Target frame rate
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep, independent of measured frame time
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Brick grid
    pub const BRICK_COLUMNS: u32 = 10;
    pub const SPACING: f32 = 10.0;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED: f32 = 420.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 600.0;

    /// Bonus defaults
    pub const BONUS_SIZE: f32 = 20.0;
    pub const BONUS_SPEED: f32 = 150.0;

    pub const STARTING_LIVES: u32 = 3;
}
