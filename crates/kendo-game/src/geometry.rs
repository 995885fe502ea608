//! Collision primitives for slice and pop detection
//!
//! Everything works in normalized screen coordinates and compares squared
//! distances, so there is exactly one square root per segment test.

use kendo_core::Point;

/// Segments shorter than this are degenerate and never intersect
const MIN_SEGMENT_LENGTH: f32 = 1e-3;

/// Whether the segment `p1..p2` passes within `radius` of `center`.
///
/// The circle center is projected onto the segment's line, the projection
/// parameter is clamped to `[0, length]`, and the squared distance from the
/// center to that closest point is compared against `radius²`. The boundary
/// counts as a hit. Degenerate segments never intersect.
pub fn segment_intersects_circle(p1: Point, p2: Point, center: Point, radius: f32) -> bool {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let length = (dx * dx + dy * dy).sqrt();

    if length < MIN_SEGMENT_LENGTH {
        return false;
    }

    // Unit direction along the segment
    let ux = dx / length;
    let uy = dy / length;

    // Project the center onto the line, clamped to the segment
    let fx = center.x - p1.x;
    let fy = center.y - p1.y;
    let t = (fx * ux + fy * uy).clamp(0.0, length);

    let closest = Point::new(p1.x + t * ux, p1.y + t * uy);
    center.distance_sq(&closest) <= radius * radius
}

/// Whether `p` lies inside or on the circle at `center`.
pub fn point_in_circle(p: Point, center: Point, radius: f32) -> bool {
    p.distance_sq(&center) <= radius * radius
}
