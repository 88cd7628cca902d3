//! Quadratic Bezier evaluation and subdivision.
//!
//! The free functions take control points directly and accept any real `t`;
//! callers that want on-curve results clamp `t` to [0, 1] themselves.

use glam::DVec2;

pub type Point = DVec2;

/// Position on the curve at parameter `t`.
#[inline]
pub fn point_at(t: f64, p0: Point, p1: Point, p2: Point) -> Point {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}

/// First derivative of the curve at `t`.
#[inline]
pub fn derivative_at(t: f64, p0: Point, p1: Point, p2: Point) -> Point {
    2.0 * (1.0 - t) * (p1 - p0) + 2.0 * t * (p2 - p1)
}

/// Direction of travel at `t` in degrees, measured like `atan2(dy, dx)`.
#[inline]
pub fn tangent_angle_at(t: f64, p0: Point, p1: Point, p2: Point) -> f64 {
    let d = derivative_at(t, p0, p1, p2);
    d.y.atan2(d.x).to_degrees()
}

/// De Casteljau subdivision at `t`: the part before and the part after.
pub fn split_at(t: f64, p0: Point, p1: Point, p2: Point) -> (QuadraticBezier, QuadraticBezier) {
    let mid1 = p0.lerp(p1, t);
    let mid2 = p1.lerp(p2, t);
    let split = mid1.lerp(mid2, t);
    (
        QuadraticBezier::new(p0, mid1, split),
        QuadraticBezier::new(split, mid2, p2),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadraticBezier {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn from_arrays(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2]) -> Self {
        Self::new(Point::from(p0), Point::from(p1), Point::from(p2))
    }

    pub fn point_at(&self, t: f64) -> Point {
        point_at(t, self.p0, self.p1, self.p2)
    }

    pub fn derivative_at(&self, t: f64) -> Point {
        derivative_at(t, self.p0, self.p1, self.p2)
    }

    pub fn tangent_angle_at(&self, t: f64) -> f64 {
        tangent_angle_at(t, self.p0, self.p1, self.p2)
    }

    pub fn split_at(&self, t: f64) -> (QuadraticBezier, QuadraticBezier) {
        split_at(t, self.p0, self.p1, self.p2)
    }

    /// SVG path data: `M x0 y0 Q x1 y1 x2 y2`.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y
        )
    }
}
