//! Polyline routing for attention-flow arrows: straight runs with
//! auto-rounded corners, plus arrowhead construction.

use crate::surface::Node;
use std::f32::consts::PI;
use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<(f32, f32)> for Point {
    fn from(p: (f32, f32)) -> Point {
        Point { x: p.0, y: p.1 }
    }
}

impl From<[f32; 2]> for Point {
    fn from(p: [f32; 2]) -> Point {
        Point { x: p[0], y: p[1] }
    }
}

/// Build an SVG path string through `points` with corners rounded at
/// detected turns.
///
/// A turn is flagged when the dot product of the adjacent direction
/// vectors drops below the magnitude of their cross product. The
/// calling figures were tuned against this exact comparison; keep it
/// as-is rather than substituting an angle threshold. At a turn the
/// radius is clamped to half the shorter adjacent segment so short
/// segments never overshoot, then the path retreats by the clamped
/// radius on both sides and bridges with a single quadratic curve whose
/// control point is the original corner. With `radius <= 0`, or at
/// joins without a detected turn, segments connect straight.
///
/// Fewer than two points produce an empty string.
pub fn rounded_polyline(points: &[Point], radius: f32) -> String {
    if points.len() < 2 {
        return String::new();
    }

    let mut d = String::new();
    let _ = write!(d, "M {} {} ", points[0].x, points[0].y);

    for i in 1..points.len() - 1 {
        let prev = points[i - 1];
        let curr = points[i];
        let next = points[i + 1];

        let dx1 = curr.x - prev.x;
        let dy1 = curr.y - prev.y;
        let dx2 = next.x - curr.x;
        let dy2 = next.y - curr.y;

        let is_turn = dx1 * dx2 + dy1 * dy2 < (dx1 * dy2 - dy1 * dx2).abs();

        if is_turn && radius > 0.0 {
            let len1 = (dx1 * dx1 + dy1 * dy1).sqrt();
            let len2 = (dx2 * dx2 + dy2 * dy2).sqrt();
            let r = radius.min(len1 / 2.0).min(len2 / 2.0);

            let before_x = curr.x - dx1 / len1 * r;
            let before_y = curr.y - dy1 / len1 * r;
            let after_x = curr.x + dx2 / len2 * r;
            let after_y = curr.y + dy2 / len2 * r;

            let _ = write!(d, "L {} {} ", before_x, before_y);
            let _ = write!(d, "Q {} {} {} {} ", curr.x, curr.y, after_x, after_y);
        } else {
            let _ = write!(d, "L {} {} ", curr.x, curr.y);
        }
    }

    let last = points[points.len() - 1];
    let _ = write!(d, "L {} {}", last.x, last.y);
    d
}

/// Notched arrowhead polygon at `tip`, pointing along `angle` (radians),
/// with a fixed 30 degree half-angle spread.
pub fn arrow_head(tip: Point, angle: f32, head_len: f32) -> [Point; 4] {
    let spread = PI / 6.0;
    [
        tip,
        Point {
            x: tip.x - head_len * (angle - spread).cos(),
            y: tip.y - head_len * (angle - spread).sin(),
        },
        Point {
            x: tip.x - head_len * 0.6 * angle.cos(),
            y: tip.y - head_len * 0.6 * angle.sin(),
        },
        Point {
            x: tip.x - head_len * (angle + spread).cos(),
            y: tip.y - head_len * (angle + spread).sin(),
        },
    ]
}

/// Styling for [`draw_lines`].
#[derive(Clone, Debug)]
pub struct LineOptions {
    /// Corner rounding radius at detected turns.
    pub radius: f32,
    /// Stroke color.
    pub color: String,
    /// Stroke width.
    pub width: f32,
    /// Append an arrowhead at the final point.
    pub with_arrow: bool,
    /// Arrowhead length in pixels.
    pub head_len: f32,
}

impl Default for LineOptions {
    fn default() -> Self {
        LineOptions {
            radius: 10.0,
            color: "#9ca3af".to_string(),
            width: 1.5,
            with_arrow: false,
            head_len: 12.0,
        }
    }
}

/// Draw a connected line through `points` onto the surface, rounding
/// corners per [`rounded_polyline`] and optionally capping the end with
/// a filled arrowhead oriented along the last segment. Fewer than two
/// points draw nothing.
pub fn draw_lines(group: &mut Node, points: &[Point], opts: &LineOptions) {
    if points.len() < 2 {
        return;
    }

    let d = rounded_polyline(points, opts.radius);
    group.path(&d).fill("none").stroke(&opts.color, opts.width);

    if opts.with_arrow {
        let last = points[points.len() - 1];
        let prev = points[points.len() - 2];
        let angle = (last.y - prev.y).atan2(last.x - prev.x);
        let head = arrow_head(last, angle, opts.head_len);
        group.polygon(&head).fill(&opts.color);
    }
}
