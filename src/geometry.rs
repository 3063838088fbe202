//! Core geometric value types: points and infinite 2D lines.
//!
//! Lines are kept in slope/intercept form because that is what the upstream
//! line extractor emits. A slope of `+infinity` denotes a vertical line, in
//! which case `intercept` is the x-offset rather than the y-intercept. Every
//! formula branches on the vertical case instead of dividing by zero.
//!
//! For bundling and clustering the normal form `ax + by + c = 0` (unit
//! normal) is more convenient; [`Line::normal_form`] and
//! [`Line::from_normal_form`] convert between the two.

use crate::angle::{angle_between_vectors_deg, normalize_half_turn_deg};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Slope-difference threshold below which two lines are treated as parallel.
///
/// Intersections of near-parallel lines are numerically unstable; returning
/// `None` for them is deliberate error avoidance, not a defect.
pub const PARALLEL_EPS: f64 = 1e-9;

const NORM_EPS: f64 = 1e-12;

/// Immutable 2D point in image pixel coordinates.
///
/// Equality is exact; identity comparisons are used during the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Infinite 2D line in slope/intercept form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Slope of the line; `+infinity` encodes a vertical line.
    pub slope: f64,
    /// y-intercept, or the x-offset when the line is vertical.
    pub intercept: f64,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Vertical line `x = offset`.
    pub fn vertical(offset: f64) -> Self {
        Self {
            slope: f64::INFINITY,
            intercept: offset,
        }
    }

    /// Line through two distinct points.
    pub fn through(a: Point, b: Point) -> Self {
        let dx = b.x - a.x;
        if dx.abs() < NORM_EPS {
            Self::vertical(a.x)
        } else {
            let slope = (b.y - a.y) / dx;
            Self::new(slope, a.y - slope * a.x)
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.slope.is_infinite()
    }

    /// Two lines are parallel when both are vertical, or neither is and the
    /// slope difference is below `epsilon`.
    pub fn is_parallel_to(&self, other: &Line, epsilon: f64) -> bool {
        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => (self.slope - other.slope).abs() < epsilon,
        }
    }

    /// Intersection point of two lines.
    ///
    /// Returns `None` for parallel lines (within [`PARALLEL_EPS`]) and for
    /// algebraically degenerate results.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        if self.is_parallel_to(other, PARALLEL_EPS) {
            return None;
        }
        let p = if self.is_vertical() {
            Point::new(self.intercept, other.slope * self.intercept + other.intercept)
        } else if other.is_vertical() {
            Point::new(other.intercept, self.slope * other.intercept + self.intercept)
        } else {
            let x = (other.intercept - self.intercept) / (self.slope - other.slope);
            Point::new(x, self.slope * x + self.intercept)
        };
        if p.x.is_finite() && p.y.is_finite() {
            Some(p)
        } else {
            None
        }
    }

    /// Unit direction vector along the line. Vertical lines point in +y,
    /// all others in +x.
    pub fn direction(&self) -> [f64; 2] {
        if self.is_vertical() {
            [0.0, 1.0]
        } else {
            let norm = (1.0 + self.slope * self.slope).sqrt();
            [1.0 / norm, self.slope / norm]
        }
    }

    /// Orientation of the line in degrees, in [0, 180). Vertical → 90.
    pub fn orientation_deg(&self) -> f64 {
        if self.is_vertical() {
            90.0
        } else {
            normalize_half_turn_deg(self.slope.atan().to_degrees())
        }
    }

    /// Angle between two lines in degrees, in [0, 180), measured between
    /// their canonical directions. Used as the vertex angle when the lines
    /// meet at a quadrilateral corner.
    pub fn angle_between_deg(&self, other: &Line) -> f64 {
        (self.orientation_deg() - other.orientation_deg()).abs()
    }

    /// Angle in degrees, in [0, 90], between this line and the ray from its
    /// axis anchor (y-axis crossing; x-axis crossing for verticals) to
    /// `point`. Zero when the point lies on the line; grows as the point
    /// swings off it. Used when scoring a vertex formed by two lines meeting
    /// near a point.
    pub fn angle_to_point_deg(&self, point: Point) -> f64 {
        let anchor = if self.is_vertical() {
            Point::new(self.intercept, 0.0)
        } else {
            Point::new(0.0, self.intercept)
        };
        let ray = [point.x - anchor.x, point.y - anchor.y];
        if ray[0].abs() < NORM_EPS && ray[1].abs() < NORM_EPS {
            return 0.0;
        }
        let angle = angle_between_vectors_deg(&self.direction(), &ray);
        if angle > 90.0 {
            180.0 - angle
        } else {
            angle
        }
    }

    /// Normal form `ax + by + c = 0` with `a² + b² = 1`, sign-canonicalised
    /// so that `a > 0`, or `b > 0` when `a` is zero.
    pub fn normal_form(&self) -> Vector3<f64> {
        let mut v = if self.is_vertical() {
            Vector3::new(1.0, 0.0, -self.intercept)
        } else {
            let inv = 1.0 / (1.0 + self.slope * self.slope).sqrt();
            Vector3::new(self.slope * inv, -inv, self.intercept * inv)
        };
        if v[0] < -NORM_EPS || (v[0].abs() <= NORM_EPS && v[1] < 0.0) {
            v = -v;
        }
        v
    }

    /// Reconstructs a line from a (not necessarily unit) normal form.
    /// Returns `None` for degenerate normals.
    pub fn from_normal_form(v: &Vector3<f64>) -> Option<Line> {
        let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
        if !norm.is_finite() || norm < NORM_EPS {
            return None;
        }
        let (a, b, c) = (v[0] / norm, v[1] / norm, v[2] / norm);
        if b.abs() < PARALLEL_EPS {
            Some(Line::vertical(-c / a))
        } else {
            Some(Line::new(-a / b, -c / b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parallel_lines_never_intersect() {
        let a = Line::new(2.0, 1.0);
        let b = Line::new(2.0, -3.0);
        assert!(a.is_parallel_to(&b, PARALLEL_EPS));
        assert!(a.intersection(&b).is_none());

        let v1 = Line::vertical(10.0);
        let v2 = Line::vertical(250.0);
        assert!(v1.is_parallel_to(&v2, PARALLEL_EPS));
        assert!(v1.intersection(&v2).is_none());

        // A line intersects itself nowhere under this policy either.
        assert!(a.intersection(&a).is_none());
    }

    #[test]
    fn oblique_intersection() {
        let a = Line::new(1.0, 0.0);
        let b = Line::new(-1.0, 2.0);
        let p = a.intersection(&b).unwrap();
        assert!(approx_eq(p.x, 1.0));
        assert!(approx_eq(p.y, 1.0));
    }

    #[test]
    fn vertical_intersection() {
        let v = Line::vertical(3.0);
        let h = Line::new(0.0, 7.0);
        let p = v.intersection(&h).unwrap();
        assert!(approx_eq(p.x, 3.0));
        assert!(approx_eq(p.y, 7.0));
        // Symmetric call order.
        let q = h.intersection(&v).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn vertical_is_not_parallel_to_steep() {
        let v = Line::vertical(0.0);
        let steep = Line::new(1e6, 0.0);
        assert!(!v.is_parallel_to(&steep, PARALLEL_EPS));
        assert!(v.intersection(&steep).is_some());
    }

    #[test]
    fn angle_between_lines() {
        let h = Line::new(0.0, 0.0);
        let v = Line::vertical(0.0);
        assert!(approx_eq(h.angle_between_deg(&v), 90.0));

        let d = Line::new(1.0, 0.0);
        assert!(approx_eq(h.angle_between_deg(&d), 45.0));
        assert!(approx_eq(d.angle_between_deg(&h), 45.0));
    }

    #[test]
    fn angle_to_point_zero_on_line() {
        let l = Line::new(0.5, 10.0);
        let on_line = Point::new(8.0, 0.5 * 8.0 + 10.0);
        assert!(l.angle_to_point_deg(on_line) < 1e-6);

        let v = Line::vertical(4.0);
        assert!(v.angle_to_point_deg(Point::new(4.0, 123.0)) < 1e-6);
    }

    #[test]
    fn angle_to_point_off_line() {
        let l = Line::new(0.0, 0.0);
        // 45° above the anchor at the origin.
        let a = l.angle_to_point_deg(Point::new(10.0, 10.0));
        assert!(approx_eq(a, 45.0));
    }

    #[test]
    fn normal_form_round_trip() {
        for line in [
            Line::new(0.0, 5.0),
            Line::new(-2.5, 40.0),
            Line::new(3.0, -7.0),
            Line::vertical(12.0),
        ] {
            let back = Line::from_normal_form(&line.normal_form()).unwrap();
            if line.is_vertical() {
                assert!(back.is_vertical());
                assert!(approx_eq(back.intercept, line.intercept));
            } else {
                assert!(approx_eq(back.slope, line.slope));
                assert!(approx_eq(back.intercept, line.intercept));
            }
        }
    }

    #[test]
    fn through_two_points() {
        let l = Line::through(Point::new(0.0, 1.0), Point::new(2.0, 5.0));
        assert!(approx_eq(l.slope, 2.0));
        assert!(approx_eq(l.intercept, 1.0));

        let v = Line::through(Point::new(3.0, 0.0), Point::new(3.0, 9.0));
        assert!(v.is_vertical());
        assert!(approx_eq(v.intercept, 3.0));
    }
}
