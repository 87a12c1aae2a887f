//! Software framebuffer
//!
//! Maps playfield coordinates onto a small pixel grid (one terminal cell is
//! one pixel wide and two pixels tall). Text is kept as labels and overlaid by
//! whoever presents the canvas.

use glam::Vec2;

use super::{Color, Surface};
use crate::sim::{Rect, polygon_spans};

/// Text placed on the canvas, in pixel coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub x: u32,
    pub y: u32,
    pub text: String,
    pub color: Color,
}

/// RGB pixel buffer with a playfield-to-pixel scale
pub struct Canvas {
    width: u32,
    height: u32,
    /// Pixels per playfield unit on each axis
    scale: Vec2,
    pixels: Vec<Color>,
    labels: Vec<Label>,
}

impl Canvas {
    /// A `width` x `height` pixel canvas showing a playfield of size `world`
    pub fn new(width: u32, height: u32, world: Vec2) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let scale = Vec2::new(
            width as f32 / world.x.max(1.0),
            height as f32 / world.y.max(1.0),
        );
        Self {
            width,
            height,
            scale,
            pixels: vec![Color::default(); (width * height) as usize],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Start a new frame
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.labels.clear();
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn to_pixels(&self, p: Vec2) -> Vec2 {
        p * self.scale
    }

    /// Fill pixels `x_start..=x_end` on row `y`, clipped to the canvas
    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x_start.max(0);
        let x1 = x_end.min(self.width as i32 - 1);
        if x0 > x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x0 as usize..=row + x1 as usize].fill(color);
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let min = self.to_pixels(rect.min()).round();
        let max = self.to_pixels(rect.max()).round();
        // Anything with area covers at least one pixel
        let x1 = (max.x as i32 - 1).max(min.x as i32);
        let y1 = (max.y as i32 - 1).max(min.y as i32);
        for y in min.y as i32..=y1 {
            self.fill_span(y, min.x as i32, x1, color);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let mapped: Vec<Vec2> = points.iter().map(|p| self.to_pixels(*p)).collect();
        for span in polygon_spans(&mapped) {
            self.fill_span(span.y, span.x_start, span.x_end, color);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = self.to_pixels(center);
        let r = (Vec2::splat(radius) * self.scale).max(Vec2::splat(0.5));

        let y0 = (c.y - r.y).floor() as i32;
        let y1 = (c.y + r.y).ceil() as i32;
        for y in y0..=y1 {
            let dy = (y as f32 + 0.5 - c.y) / r.y;
            if dy.abs() > 1.0 {
                continue;
            }
            let half = r.x * (1.0 - dy * dy).sqrt();
            let x_start = (c.x - half).round() as i32;
            let x_end = ((c.x + half).round() as i32 - 1).max(x_start);
            self.fill_span(y, x_start, x_end, color);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        let p = self.to_pixels(pos).max(Vec2::ZERO);
        self.labels.push(Label {
            x: p.x.round() as u32,
            // Labels sit on whole terminal rows
            y: (p.y.round() as u32) & !1,
            text: text.to_string(),
            color,
        });
    }

    /// One character per pixel column, one terminal row tall
    fn measure_text(&self, text: &str) -> Vec2 {
        Vec2::new(
            text.chars().count() as f32 / self.scale.x,
            2.0 / self.scale.y,
        )
    }
}
