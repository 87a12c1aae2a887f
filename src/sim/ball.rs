//! Ball movement and collision response

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::brick::Brick;
use super::entity::Movable;
use super::geometry::{Rect, circle_rect_collision, reflect_velocity};

/// Extra clearance when pushing the ball out of a surface
const SEPARATION: f32 = 0.5;

/// A ball entity; `pos` is the centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Playfield size for wall reflection
    bounds: Vec2,
}

impl Movable for Ball {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    /// Integrate, then bounce off the left, right and top walls.
    /// The bottom is open; the loop decides what leaving it means.
    fn advance(&mut self, dt: f32) {
        self.integrate(dt);

        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + self.radius > self.bounds.x {
            self.pos.x = self.bounds.x - self.radius;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = self.vel.y.abs();
        }
    }
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, bounds: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius,
            bounds,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Clamp the centre so the ball stays within the side walls and ceiling
    fn keep_inside_walls(&mut self) {
        let max_x = (self.bounds.x - self.radius).max(self.radius);
        self.pos.x = self.pos.x.clamp(self.radius, max_x);
        self.pos.y = self.pos.y.max(self.radius);
    }

    /// The ball's bounding box reached the bottom edge
    pub fn is_below(&self, screen_height: f32) -> bool {
        self.pos.y + self.radius >= screen_height
    }

    /// Bounce off the paddle if overlapping it.
    ///
    /// The ball always leaves upward and is placed just above the paddle so it
    /// cannot stick inside. `english` bends the outgoing direction by how far
    /// from the paddle centre the ball landed (0 = plain reflection).
    pub fn check_collision_with_paddle(&mut self, paddle: &Rect, english: f32) -> bool {
        let result = circle_rect_collision(self.pos, self.radius, paddle);
        if !result.hit {
            return false;
        }

        let speed = self.vel.length();
        let half_width = (paddle.w / 2.0).max(f32::EPSILON);
        let hit_offset = ((self.pos.x - paddle.center().x) / half_width).clamp(-1.0, 1.0);

        let base_reflect = Vec2::new(self.vel.x, -self.vel.y.abs());
        let deflection = Vec2::X * hit_offset * speed * english;
        let direction = (base_reflect + deflection).try_normalize().unwrap_or(Vec2::NEG_Y);
        // Never leave flatter than ~15 degrees above horizontal
        let direction = if direction.y > -0.25 {
            Vec2::new(direction.x.signum() * 0.968, -0.25)
        } else {
            direction
        };
        self.vel = direction * speed;

        self.pos.y = paddle.top() - self.radius - SEPARATION;
        true
    }

    /// Bounce off at most one brick per frame and damage it.
    ///
    /// When several live bricks overlap the ball, the one whose surface is
    /// closest to the ball centre takes the hit; equal distances go to the
    /// lower index. Returns the index of the brick that was struck.
    pub fn check_collision_with_bricks(&mut self, bricks: &mut [Brick]) -> Option<usize> {
        let (index, result) = bricks
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_destroyed())
            .map(|(i, b)| (i, b.collide(self.pos, self.radius)))
            .filter(|(_, r)| r.hit)
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance).then(a.0.cmp(&b.0)))?;

        // Only reflect if moving toward the surface
        if self.vel.dot(result.normal) < 0.0 {
            self.vel = reflect_velocity(self.vel, result.normal);
        }
        self.pos += result.normal * (result.penetration + SEPARATION);
        self.keep_inside_walls();

        bricks[index].take_hit();
        Some(index)
    }
}
