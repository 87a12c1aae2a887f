//! Rendering module
//!
//! The game draws through the [`Surface`] trait, which has exactly four
//! primitives. [`Canvas`] is a software implementation of it and
//! [`TerminalPresenter`] puts a canvas on screen with crossterm.

pub mod canvas;
pub mod scene;
pub mod terminal;

pub use canvas::{Canvas, Label};
pub use scene::{draw_end_screen, draw_menu, draw_round};
pub use terminal::{TerminalPresenter, translate_event};

use glam::Vec2;

use crate::sim::Rect;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale brightness, `t` in [0, 1]
    pub fn dimmed(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgb(
            (self.r as f32 * t) as u8,
            (self.g as f32 * t) as u8,
            (self.b as f32 * t) as u8,
        )
    }
}

/// Drawing operations the game needs. Coordinates are playfield units.
pub trait Surface {
    fn fill_rect(&mut self, rect: &Rect, color: Color);
    /// Filled polygon from a vertex loop; fewer than three points draw nothing
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);

    /// Size `text` would occupy, for right/bottom alignment
    fn measure_text(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * 8.0, 16.0)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(12, 12, 24);
    pub const TEXT: Color = Color::rgb(235, 235, 235);
    pub const TITLE: Color = Color::rgb(255, 210, 90);
    pub const PADDLE: Color = Color::rgb(60, 200, 110);
    pub const PADDLE_SMALL: Color = Color::rgb(230, 90, 70);
    pub const BALL: Color = Color::rgb(255, 255, 255);
    /// Brick colours by remaining durability (1, 2, 3+)
    pub const BRICK: [Color; 3] = [
        Color::rgb(90, 160, 255),
        Color::rgb(170, 120, 255),
        Color::rgb(255, 120, 170),
    ];
    pub const BONUS_EXTRA_LIFE: Color = Color::rgb(90, 230, 90);
    pub const BONUS_MULTI_BALL: Color = Color::rgb(90, 220, 240);
    pub const BONUS_SMALL_PLATFORM: Color = Color::rgb(240, 80, 80);
}
