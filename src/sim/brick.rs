//! Bricks: shape-aware hit tests, durability and one-shot event flags

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{
    CollisionResult, Rect, circle_polygon_collision, circle_rect_collision, intersects,
    point_in_polygon,
};

/// Brick geometry mode, chosen per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickShape {
    #[default]
    Rectangular,
    Triangular,
    Hexagonal,
}

impl BrickShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickShape::Rectangular => "Rectangular",
            BrickShape::Triangular => "Triangular",
            BrickShape::Hexagonal => "Hexagonal",
        }
    }
}

/// What happened to a brick during the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickEvent {
    /// Lost a hit point but is still standing
    Hit,
    /// Lost its last hit point
    Destroyed,
}

/// A brick in the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub shape: BrickShape,
    durability: u32,
    destroyed: bool,
    /// Set the frame the brick is destroyed, cleared by `take_event`
    just_destroyed: bool,
    /// Set the frame the brick is damaged without breaking, cleared by `take_event`
    hit: bool,
}

impl Brick {
    pub fn new(rect: Rect, shape: BrickShape, durability: u32) -> Self {
        Self {
            rect,
            shape,
            durability: durability.max(1),
            destroyed: false,
            just_destroyed: false,
            hit: false,
        }
    }

    pub fn durability(&self) -> u32 {
        self.durability
    }

    /// Once true, stays true for the rest of the round
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn was_just_destroyed(&self) -> bool {
        self.just_destroyed
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Vertex loop for polygonal shapes (empty for rectangles)
    pub fn outline(&self) -> Vec<Vec2> {
        let Rect { x, y, w, h } = self.rect;
        match self.shape {
            BrickShape::Rectangular => Vec::new(),
            BrickShape::Triangular => vec![
                Vec2::new(x, y + h),
                Vec2::new(x + w, y + h),
                Vec2::new(x + w / 2.0, y),
            ],
            BrickShape::Hexagonal => vec![
                Vec2::new(x + w / 4.0, y),
                Vec2::new(x + w * 3.0 / 4.0, y),
                Vec2::new(x + w, y + h / 2.0),
                Vec2::new(x + w * 3.0 / 4.0, y + h),
                Vec2::new(x + w / 4.0, y + h),
                Vec2::new(x, y + h / 2.0),
            ],
        }
    }

    /// Point membership using the brick's actual shape
    pub fn contains_point(&self, p: Vec2) -> bool {
        match self.shape {
            BrickShape::Rectangular => self.rect.contains_point(p),
            _ => self.rect.contains_point(p) && point_in_polygon(p, &self.outline()),
        }
    }

    /// Test a ball (circle) against this brick. Destroyed bricks never collide.
    pub fn collide(&self, center: Vec2, radius: f32) -> CollisionResult {
        if self.destroyed || !intersects(&Rect::around_circle(center, radius), &self.rect) {
            return CollisionResult::miss();
        }
        match self.shape {
            BrickShape::Rectangular => circle_rect_collision(center, radius, &self.rect),
            _ => circle_polygon_collision(center, radius, &self.outline()),
        }
    }

    /// Apply one hit. Sets exactly one of the frame flags.
    pub fn take_hit(&mut self) -> Option<BrickEvent> {
        if self.destroyed {
            return None;
        }
        self.durability = self.durability.saturating_sub(1);
        if self.durability == 0 {
            self.destroyed = true;
            self.just_destroyed = true;
            self.hit = false;
            Some(BrickEvent::Destroyed)
        } else {
            self.hit = true;
            Some(BrickEvent::Hit)
        }
    }

    /// Read and clear this frame's flags in one step
    pub fn take_event(&mut self) -> Option<BrickEvent> {
        let event = if self.just_destroyed {
            Some(BrickEvent::Destroyed)
        } else if self.hit {
            Some(BrickEvent::Hit)
        } else {
            None
        };
        self.just_destroyed = false;
        self.hit = false;
        event
    }
}
