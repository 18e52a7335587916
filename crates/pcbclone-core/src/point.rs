use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A board coordinate in millimetres. Y grows downwards, as in KiCad.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move this point by `delta`.
    pub fn translate(&mut self, delta: Point) -> &mut Self {
        self.x += delta.x;
        self.y += delta.y;
        self
    }

    /// Rotate this point by `angle_deg` around `origin`.
    pub fn rotate_about(&mut self, angle_deg: f64, origin: Point) -> &mut Self {
        let p = rotate_point([self.x, self.y], angle_deg, [origin.x, origin.y]);
        self.x = p[0];
        self.y = p[1];
        self
    }

    /// Mirror this point across the horizontal line `y = axis_y`.
    pub fn mirror_y(&mut self, axis_y: f64) -> &mut Self {
        self.y = 2.0 * axis_y - self.y;
        self
    }

    #[must_use]
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_angle(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

fn rotate_vec(v: [f64; 2], angle_deg: f64) -> [f64; 2] {
    let a = angle_deg.to_radians();
    let (s, c) = a.sin_cos();
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}

fn rotate_point(p: [f64; 2], angle_deg: f64, origin: [f64; 2]) -> [f64; 2] {
    let translated = [p[0] - origin[0], p[1] - origin[1]];
    let rotated = rotate_vec(translated, angle_deg);
    [rotated[0] + origin[0], rotated[1] + origin[1]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn translate_adds_delta() {
        let mut p = Point::new(1.0, 2.0);
        p.translate(Point::new(20.0, -2.0));
        assert_abs_diff_eq!(p.x, 21.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_about_origin_quarter_turn() {
        let mut p = Point::new(1.0, 0.0);
        p.rotate_about(90.0, Point::ORIGIN);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn mirror_y_reflects_across_axis() {
        let mut p = Point::new(3.0, 5.0);
        p.mirror_y(1.0);
        assert_abs_diff_eq!(p.x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, -3.0, epsilon = 1e-9);
    }

    #[test]
    fn scaled_vector_sum() {
        let dx = Point::new(20.0, 0.0);
        let dy = Point::new(0.0, 15.0);
        let p = dx * 1.0 + dy * 2.0;
        assert_eq!(p, Point::new(20.0, 30.0));
    }

    #[test]
    fn normalize_angle_wraps_negative() {
        assert_abs_diff_eq!(normalize_angle(-90.0), 270.0, epsilon = 1e-9);
        assert_abs_diff_eq!(normalize_angle(720.0), 0.0, epsilon = 1e-9);
    }
}
