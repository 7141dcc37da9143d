//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in canvas coordinates and
//! appended to a caller-owned buffer.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::vertex::{Vertex, colors::with_alpha};
use crate::ui::Rect;

fn tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Segment count that keeps small circles cheap and big ones round
fn segments_for(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(8, 48)
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    let segments = segments_for(radius);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        tri(
            out,
            center,
            center + Vec2::from_angle(theta1) * radius,
            center + Vec2::from_angle(theta2) * radius,
            color,
        );
    }
}

/// Circle that fades from `color` at the center to transparent at the rim
pub fn glow(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    let edge = with_alpha(color, 0.0);
    let segments = segments_for(radius);
    for i in 0..segments {
        let a = center + Vec2::from_angle((i as f32 / segments as f32) * TAU) * radius;
        let b = center + Vec2::from_angle(((i + 1) as f32 / segments as f32) * TAU) * radius;
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(a.x, a.y, edge));
        out.push(Vertex::new(b.x, b.y, edge));
    }
}

/// Hollow circle
pub fn ring(out: &mut Vec<Vertex>, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
    let segments = segments_for(outer);
    for i in 0..segments {
        let d1 = Vec2::from_angle((i as f32 / segments as f32) * TAU);
        let d2 = Vec2::from_angle(((i + 1) as f32 / segments as f32) * TAU);
        let (inner1, outer1) = (center + d1 * inner, center + d1 * outer);
        let (inner2, outer2) = (center + d2 * inner, center + d2 * outer);
        tri(out, inner1, outer1, inner2, color);
        tri(out, inner2, outer1, outer2, color);
    }
}

/// Flattened ring around a planet, drawn as a thin ellipse band
pub fn ellipse_band(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    thickness: f32,
    color: [f32; 4],
) {
    let segments = 32;
    let point = |t: f32, grow: f32| {
        let d = Vec2::from_angle(t);
        center + Vec2::new(d.x * (radii.x + grow), d.y * (radii.y + grow * 0.3))
    };
    for i in 0..segments {
        let t1 = (i as f32 / segments as f32) * TAU;
        let t2 = ((i + 1) as f32 / segments as f32) * TAU;
        let (a, b) = (point(t1, 0.0), point(t1, thickness));
        let (c, d) = (point(t2, 0.0), point(t2, thickness));
        tri(out, a, b, c, color);
        tri(out, c, b, d, color);
    }
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, r: Rect, color: [f32; 4]) {
    let tl = Vec2::new(r.x, r.y);
    let tr = Vec2::new(r.right(), r.y);
    let bl = Vec2::new(r.x, r.bottom());
    let br = Vec2::new(r.right(), r.bottom());
    tri(out, tl, tr, bl, color);
    tri(out, bl, tr, br, color);
}

/// Rectangle with quarter-circle corners
pub fn rounded_rect(out: &mut Vec<Vertex>, r: Rect, radius: f32, color: [f32; 4]) {
    let radius = radius.min(r.w * 0.5).min(r.h * 0.5);
    if radius <= 0.0 {
        rect(out, r, color);
        return;
    }

    // Center column and the two side strips
    rect(out, Rect::new(r.x + radius, r.y, r.w - 2.0 * radius, r.h), color);
    rect(out, Rect::new(r.x, r.y + radius, radius, r.h - 2.0 * radius), color);
    rect(
        out,
        Rect::new(r.right() - radius, r.y + radius, radius, r.h - 2.0 * radius),
        color,
    );

    let corners = [
        (Vec2::new(r.x + radius, r.y + radius), PI),
        (Vec2::new(r.right() - radius, r.y + radius), 1.5 * PI),
        (Vec2::new(r.right() - radius, r.bottom() - radius), 0.0),
        (Vec2::new(r.x + radius, r.bottom() - radius), FRAC_PI_2),
    ];
    let steps = 6;
    for (center, start) in corners {
        for i in 0..steps {
            let t1 = start + FRAC_PI_2 * i as f32 / steps as f32;
            let t2 = start + FRAC_PI_2 * (i + 1) as f32 / steps as f32;
            tri(
                out,
                center,
                center + Vec2::from_angle(t1) * radius,
                center + Vec2::from_angle(t2) * radius,
                color,
            );
        }
    }
}

/// Five-pointed star with inner radius half the outer, rotated by `angle`
pub fn star(out: &mut Vec<Vertex>, center: Vec2, size: f32, angle: f32, color: [f32; 4]) {
    let mut points = [Vec2::ZERO; 10];
    for (i, p) in points.iter_mut().enumerate() {
        // Points up at angle 0 (canvas y grows downward)
        let theta = -FRAC_PI_2 + angle + i as f32 * PI / 5.0;
        let r = if i % 2 == 0 { size } else { size * 0.5 };
        *p = center + Vec2::from_angle(theta) * r;
    }
    for i in 0..points.len() {
        tri(out, center, points[i], points[(i + 1) % points.len()], color);
    }
}

/// Upward-pointing ship inside a box of half extents `half`
pub fn ship(out: &mut Vec<Vertex>, center: Vec2, half: Vec2, hull: [f32; 4], cockpit: [f32; 4]) {
    let nose = center - Vec2::new(0.0, half.y);
    let left = center + Vec2::new(-half.x, half.y);
    let right = center + Vec2::new(half.x, half.y);
    let notch = center + Vec2::new(0.0, half.y * 0.5);
    tri(out, nose, left, notch, hull);
    tri(out, nose, notch, right, hull);
    circle(out, center, half.x * 0.25, cockpit);
}

/// Enemy saucer: body, dome and one eye
pub fn saucer(out: &mut Vec<Vertex>, center: Vec2, half: Vec2, body: [f32; 4], eye: [f32; 4]) {
    let hull = Rect::new(
        center.x - half.x,
        center.y - half.y * 0.3,
        half.x * 2.0,
        half.y * 1.1,
    );
    rounded_rect(out, hull, half.y * 0.5, body);
    circle(out, center - Vec2::new(0.0, half.y * 0.3), half.x * 0.45, body);
    circle(out, center, half.y * 0.3, eye);
}

/// Fading dots along recent positions (oldest first)
pub fn trail(out: &mut Vec<Vertex>, points: &[Vec2], size: f32, color: [f32; 4]) {
    let len = points.len() as f32;
    for (i, p) in points.iter().enumerate() {
        let t = i as f32 / len;
        let radius = size * t;
        if radius > 0.5 {
            circle(out, *p, radius, with_alpha(color, 0.8 * t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_emit_whole_triangles() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 10.0, [1.0; 4]);
        ring(&mut out, Vec2::ZERO, 5.0, 8.0, [1.0; 4]);
        rounded_rect(&mut out, Rect::new(0.0, 0.0, 100.0, 40.0), 10.0, [1.0; 4]);
        star(&mut out, Vec2::ZERO, 20.0, 0.0, [1.0; 4]);
        assert_eq!(out.len() % 3, 0);
    }

    #[test]
    fn test_star_points_up() {
        let mut out = Vec::new();
        star(&mut out, Vec2::new(50.0, 50.0), 20.0, 0.0, [1.0; 4]);
        let top = out
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert!((top - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let mut out = Vec::new();
        let r = Rect::new(10.0, 20.0, 200.0, 50.0);
        rounded_rect(&mut out, r, 15.0, [1.0; 4]);
        for v in &out {
            assert!(v.position[0] >= r.x - 1e-3 && v.position[0] <= r.right() + 1e-3);
            assert!(v.position[1] >= r.y - 1e-3 && v.position[1] <= r.bottom() + 1e-3);
        }
    }
}
