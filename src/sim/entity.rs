//! Shared movement contract for balls, the paddle and bonuses

use glam::Vec2;

/// Anything with a position and a velocity that the loop advances each frame
pub trait Movable {
    fn pos(&self) -> Vec2;
    fn set_pos(&mut self, pos: Vec2);
    fn vel(&self) -> Vec2;

    /// Integrate position: pos += vel * dt
    fn integrate(&mut self, dt: f32) {
        let pos = self.pos() + self.vel() * dt;
        self.set_pos(pos);
    }

    /// Advance one frame. Entities with boundary behaviour override this and
    /// call [`Movable::integrate`] themselves.
    fn advance(&mut self, dt: f32) {
        self.integrate(dt);
    }
}

/// Clamp a horizontal span `[x, x + width]` into `[0, screen_width]`
#[inline]
pub fn clamp_span(x: f32, width: f32, screen_width: f32) -> f32 {
    x.clamp(0.0, (screen_width - width).max(0.0))
}
