//! Falling bonus pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Movable;
use super::geometry::Rect;
use crate::config::BonusThresholds;

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// +1 life
    ExtraLife,
    /// Top up the balls in play
    MultiBall,
    /// Temporarily shrink the paddle
    SmallPlatform,
}

impl BonusKind {
    /// Map a draw in `[0, 100)` to a bonus, or `None` for no drop
    pub fn from_draw(draw: u32, thresholds: &BonusThresholds) -> Option<Self> {
        if draw < thresholds.extra_life {
            Some(BonusKind::ExtraLife)
        } else if draw < thresholds.multi_ball {
            Some(BonusKind::MultiBall)
        } else if draw < thresholds.small_platform {
            Some(BonusKind::SmallPlatform)
        } else {
            None
        }
    }
}

/// A falling bonus; `pos` is the top-left corner of its square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Movable for Bonus {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }
}

impl Bonus {
    pub fn new(kind: BonusKind, pos: Vec2, size: f32, fall_speed: f32) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::new(0.0, fall_speed),
            size,
        }
    }

    /// Spawned centred under a brick
    pub fn below(kind: BonusKind, brick: &Rect, size: f32, fall_speed: f32) -> Self {
        let pos = Vec2::new(brick.center().x - size / 2.0, brick.bottom());
        Self::new(kind, pos, size, fall_speed)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Past the bottom edge
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}
