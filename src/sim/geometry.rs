//! Geometry and collision primitives
//!
//! Axis-aligned rectangles for the paddle, bricks and bonuses, convex polygons
//! for shaped bricks, circles for balls. Everything here is pure.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `(x, y)` is the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive containment (points on the border are inside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Closest point of the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }
}

/// Rectangle overlap test.
///
/// True unless the rectangles are disjoint on one axis. Touching edges count
/// as intersecting.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Even-odd point membership for a polygon given as a vertex loop
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        let crosses = (pi.y > point.y) != (pj.y > point.y);
        // crosses implies pi.y != pj.y, so the division is safe
        if crosses && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Result of a circle-vs-shape check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point of the shape to the circle centre
    pub point: Vec2,
    /// Surface normal at the contact, pointing toward the circle
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
    /// Distance from the circle centre to `point` (0 when the centre is inside)
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
            distance: f32::INFINITY,
        }
    }
}

/// Circle against an axis-aligned rectangle.
///
/// The normal is always axis-aligned: whichever face (or the dominant axis at
/// a corner) the circle touches.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    if dist_sq > 0.0 {
        let distance = dist_sq.sqrt();
        let normal = if delta.x.abs() > delta.y.abs() {
            Vec2::new(delta.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, delta.y.signum())
        };
        return CollisionResult {
            hit: true,
            point: closest,
            normal,
            penetration: radius - distance,
            distance,
        };
    }

    // Centre inside the rectangle: leave through the nearest face
    let faces = [
        (center.x - rect.left(), Vec2::NEG_X),
        (rect.right() - center.x, Vec2::X),
        (center.y - rect.top(), Vec2::NEG_Y),
        (rect.bottom() - center.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::NEG_Y));

    CollisionResult {
        hit: true,
        point: center - normal * depth,
        normal,
        penetration: depth + radius,
        distance: 0.0,
    }
}

/// Closest point on segment `a..b` to `p`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-6 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Circle against a convex polygon.
///
/// Hits when the centre is inside the polygon or within `radius` of any edge.
/// The normal is the outward normal of the nearest edge when the centre is
/// inside, otherwise the direction from the contact point to the centre.
pub fn circle_polygon_collision(center: Vec2, radius: f32, polygon: &[Vec2]) -> CollisionResult {
    if polygon.len() < 3 {
        return CollisionResult::miss();
    }

    let centroid = polygon.iter().copied().sum::<Vec2>() / polygon.len() as f32;

    let mut best: Option<(f32, Vec2, Vec2)> = None; // (distance, point, edge normal)
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[j], polygon[i]);
        j = i;
        let edge = b - a;
        if edge.length_squared() < 1e-6 {
            continue;
        }
        let mut edge_normal = Vec2::new(edge.y, -edge.x).normalize();
        if edge_normal.dot((a + b) * 0.5 - centroid) < 0.0 {
            edge_normal = -edge_normal;
        }
        let closest = closest_point_on_segment(center, a, b);
        let distance = (center - closest).length();
        if best.is_none_or(|(d, _, _)| distance < d) {
            best = Some((distance, closest, edge_normal));
        }
    }

    let Some((distance, point, edge_normal)) = best else {
        return CollisionResult::miss();
    };

    if point_in_polygon(center, polygon) {
        return CollisionResult {
            hit: true,
            point,
            normal: edge_normal,
            penetration: distance + radius,
            distance: 0.0,
        };
    }

    if distance > radius {
        return CollisionResult::miss();
    }

    let normal = (center - point).try_normalize().unwrap_or(edge_normal);
    CollisionResult {
        hit: true,
        point,
        normal,
        penetration: radius - distance,
        distance,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// One horizontal run of a filled polygon, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

/// Scanline rasterization of a polygon into horizontal spans.
///
/// For every integer scanline between the polygon's min and max Y, the X
/// intersections with each crossing edge are sorted and paired up. Fewer than
/// three points produce nothing; horizontal edges never cross a scanline and
/// are skipped.
pub fn polygon_spans(points: &[Vec2]) -> Vec<Span> {
    if points.len() < 3 {
        return Vec::new();
    }

    let (min_y, max_y) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    if !min_y.is_finite() || !max_y.is_finite() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut nodes: Vec<f32> = Vec::with_capacity(points.len());

    for y in (min_y.round() as i32)..=(max_y.round() as i32) {
        let yf = y as f32;
        nodes.clear();

        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let (pi, pj) = (points[i], points[j]);
            j = i;
            if pi.y == pj.y {
                continue;
            }
            if (pi.y < yf && pj.y >= yf) || (pj.y < yf && pi.y >= yf) {
                nodes.push(pi.x + (yf - pi.y) * (pj.x - pi.x) / (pj.y - pi.y));
            }
        }

        nodes.sort_by(f32::total_cmp);
        for pair in nodes.chunks_exact(2) {
            spans.push(Span {
                y,
                x_start: pair[0].round() as i32,
                x_end: pair[1].round() as i32,
            });
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intersects_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(intersects(&a, &b));

        let c = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &c));

        let below = Rect::new(0.0, 11.0, 10.0, 10.0);
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_point_in_triangle() {
        let tri = [Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0), Vec2::new(5.0, 0.0)];
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &tri));
        assert!(!point_in_polygon(Vec2::new(1.0, 1.0), &tri));
        assert!(!point_in_polygon(Vec2::new(20.0, 5.0), &tri));
    }

    #[test]
    fn test_point_in_polygon_needs_three_points() {
        let line = [Vec2::ZERO, Vec2::new(10.0, 10.0)];
        assert!(!point_in_polygon(Vec2::new(5.0, 5.0), &line));
    }

    #[test]
    fn test_circle_rect_side_hit() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        // Ball just left of the brick, overlapping by 2
        let result = circle_rect_collision(Vec2::new(94.0, 110.0), 8.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_rect_bottom_hit() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        let result = circle_rect_collision(Vec2::new(125.0, 125.0), 8.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
    }

    #[test]
    fn test_circle_rect_miss() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        let result = circle_rect_collision(Vec2::new(125.0, 140.0), 8.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_center_inside() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let result = circle_rect_collision(Vec2::new(50.0, 3.0), 8.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!((result.penetration - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_polygon_edge_hit() {
        let tri = [Vec2::new(0.0, 100.0), Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0)];
        // Below the bottom edge, overlapping by 3
        let result = circle_polygon_collision(Vec2::new(50.0, 105.0), 8.0, &tri);
        assert!(result.hit);
        assert!(result.normal.y > 0.99);
        assert!((result.penetration - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_polygon_corner_of_bbox_misses() {
        // Top-left corner of the triangle's bounding box is outside the triangle
        let tri = [Vec2::new(0.0, 100.0), Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0)];
        let result = circle_polygon_collision(Vec2::new(2.0, 2.0), 8.0, &tri);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_polygon_center_inside() {
        let tri = [Vec2::new(0.0, 100.0), Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0)];
        let result = circle_polygon_collision(Vec2::new(50.0, 95.0), 8.0, &tri);
        assert!(result.hit);
        // Nearest edge is the bottom one, outward normal points down
        assert!(result.normal.y > 0.99);
        assert!((result.penetration - 13.0).abs() < 0.001);
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 50.0), Vec2::NEG_X);
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!((reflected.y - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_polygon_spans_needs_three_points() {
        assert!(polygon_spans(&[]).is_empty());
        assert!(polygon_spans(&[Vec2::ZERO, Vec2::new(10.0, 10.0)]).is_empty());
    }

    #[test]
    fn test_polygon_spans_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let spans = polygon_spans(&square);
        // Scanlines 1..=4 cross the vertical edges; 0 only touches the top edge
        assert_eq!(spans.len(), 4);
        for span in &spans {
            assert_eq!((span.x_start, span.x_end), (0, 10));
        }
    }

    #[test]
    fn test_polygon_spans_triangle_narrows() {
        let tri = [Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0), Vec2::new(10.0, 0.0)];
        let spans = polygon_spans(&tri);
        assert!(!spans.is_empty());
        let top = spans.first().unwrap();
        let bottom = spans.last().unwrap();
        assert!(top.x_end - top.x_start < bottom.x_end - bottom.x_start);
        assert_eq!(bottom.y, 10);
    }

    #[test]
    fn test_polygon_spans_degenerate_flat() {
        // All points on one scanline: no crossing edges, no panic
        let flat = [Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), Vec2::new(20.0, 5.0)];
        assert!(polygon_spans(&flat).is_empty());
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_rect_contains_its_center(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 0.0f32..200.0, h in 0.0f32..200.0) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.contains_point(r.center()));
            prop_assert!(intersects(&r, &r));
        }
    }
}
