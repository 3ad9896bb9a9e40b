//! Core geometry types for tilework.
//!
//! ## Rust Lesson: Value Types
//!
//! `Point` is `Copy`, so every operation hands back a fresh value instead of
//! mutating the receiver. There is no "remember to clone first" rule: a point
//! you pass around can never be changed behind your back.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use lyon_geom::{ArcFlags, SvgArc, point, vector};
use serde::{Deserialize, Serialize};

/// Default closeness threshold for coordinate comparisons.
pub const EPSILON: f64 = 1e-9;

/// A 2D point (or vector) with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line through (or segment between) two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

/// A circular arc in SVG endpoint form.
///
/// `sweep == false` draws counter-clockwise on a +y-down screen, matching the
/// `A r r 0 large sweep x y` command it is written out as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub radius: f64,
    pub start: Point,
    pub end: Point,
    pub large_arc: bool,
    pub sweep: bool,
}

// ============================================================================
// POINT
// ============================================================================

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Modulus of the vector from the origin to this point.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    #[inline]
    pub fn normalize(&self) -> Point {
        let len = self.length();
        if len == 0.0 {
            return Point::zero();
        }
        Point::new(self.x / len, self.y / len)
    }

    /// Rotate around the origin by `angle` radians.
    #[inline]
    pub fn rotate(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Angle of this vector, as `atan2(y, x)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Signed angle from this vector to `other`, wrapped into [-pi, pi].
    pub fn angle_to(&self, other: Point) -> f64 {
        use std::f64::consts::PI;

        let mut angle = other.angle() - self.angle();
        if angle > PI {
            angle -= 2.0 * PI;
        }
        if angle < -PI {
            angle += 2.0 * PI;
        }
        angle
    }

    /// True when both coordinates differ by less than `eps`.
    #[inline]
    pub fn is_close(&self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }

    pub fn is_parallel(&self, other: Point, eps: f64) -> bool {
        self.length() * other.length() - self.dot(other).abs() < eps
    }

    pub fn is_perpendicular(&self, other: Point, eps: f64) -> bool {
        self.dot(other).abs() < eps
    }

    /// Projection of this vector onto the direction of `onto`.
    pub fn project_onto(&self, onto: Point) -> Point {
        let u = onto.normalize();
        u * self.dot(u)
    }

    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new(0.5 * (other.x + self.x), 0.5 * (other.y + self.y))
    }

    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

// ## Rust Lesson: Operator Overloading
//
// Implementing `Add`, `Sub`, ... lets us write `a + b * 2.0` for points.
// Because `Point` is `Copy`, the operands are copied, not moved away.

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    #[inline]
    fn div(self, k: f64) -> Point {
        Point::new(self.x / k, self.y / k)
    }
}

// ============================================================================
// LINE
// ============================================================================

impl Line {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Unit-length line starting at `p` pointing along `angle`.
    pub fn from_point_and_angle(p: Point, angle: f64) -> Self {
        Self::new(p, Point::new(p.x + angle.cos(), p.y + angle.sin()))
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    /// Vector from `p1` to `p2`.
    #[inline]
    pub fn parallel_vector(&self) -> Point {
        self.p2 - self.p1
    }

    /// Normal pointing to the left of `p1 -> p2` (unnormalized).
    #[inline]
    pub fn normal_left(&self) -> Point {
        Point::new(self.p1.y - self.p2.y, self.p2.x - self.p1.x)
    }

    /// Normal pointing to the right of `p1 -> p2` (unnormalized).
    ///
    /// On a +y-down screen this is the interior side of a polygon whose
    /// vertices run in descending-angle order.
    #[inline]
    pub fn normal_right(&self) -> Point {
        Point::new(self.p2.y - self.p1.y, self.p1.x - self.p2.x)
    }

    /// Perpendicular distance from `p` to the infinite line.
    pub fn distance_to(&self, p: Point) -> f64 {
        let d = self.parallel_vector();
        let len = d.length();
        if len == 0.0 {
            return p.distance(self.p1);
        }
        (d.x * (self.p1.y - p.y) - d.y * (self.p1.x - p.x)).abs() / len
    }

    /// Distance from `p` to the closest point of the segment.
    pub fn distance_to_segment(&self, p: Point) -> f64 {
        let l2 = self.p1.distance_squared(self.p2);
        if l2 == 0.0 {
            return p.distance(self.p1);
        }
        let delta = self.parallel_vector();
        let t = ((p - self.p1).dot(delta) / l2).clamp(0.0, 1.0);
        p.distance(self.p1 + delta * t)
    }

    /// Intersection of the two infinite lines.
    ///
    /// Returns `None` for parallel or coincident lines.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let (x1, y1, x2, y2) = (self.p1.x, self.p1.y, self.p2.x, self.p2.y);
        let (x3, y3, x4, y4) = (other.p1.x, other.p1.y, other.p2.x, other.p2.y);

        let dx12 = x1 - x2;
        let dy12 = y1 - y2;
        let dx34 = x3 - x4;
        let dy34 = y3 - y4;

        let denom = dx12 * dy34 - dy12 * dx34;
        if denom == 0.0 {
            return None;
        }

        let c12 = x1 * y2 - y1 * x2;
        let c34 = x3 * y4 - y3 * x4;

        Some(Point::new(
            (c12 * dx34 - dx12 * c34) / denom,
            (c12 * dy34 - dy12 * c34) / denom,
        ))
    }

    /// Line intersection, kept only when it falls within this segment's x-span.
    pub fn segment_intersection(&self, other: &Line) -> Option<Point> {
        let i = self.intersection(other)?;
        let x_min = self.p1.x.min(self.p2.x);
        let x_max = self.p1.x.max(self.p2.x);
        (i.x >= x_min && i.x <= x_max).then_some(i)
    }

    pub fn translate(&self, by: Point) -> Line {
        Line::new(self.p1 + by, self.p2 + by)
    }
}

// ============================================================================
// ARCS
// ============================================================================

impl CircularArc {
    /// Minor arc swept counter-clockwise (on screen) from `start` to `end`.
    pub fn new(radius: f64, start: Point, end: Point) -> Self {
        Self { radius, start, end, large_arc: false, sweep: false }
    }

    pub fn with_sweep(mut self, sweep: bool) -> Self {
        self.sweep = sweep;
        self
    }

    /// Approximate the arc with a polyline within `tolerance`.
    ///
    /// The first point is always `start` and the last is always `end`.
    pub fn flatten(&self, tolerance: f64) -> Vec<Point> {
        let arc = SvgArc {
            from: point(self.start.x, self.start.y),
            to: point(self.end.x, self.end.y),
            radii: vector(self.radius, self.radius),
            x_rotation: lyon_geom::Angle::radians(0.0),
            flags: ArcFlags { large_arc: self.large_arc, sweep: self.sweep },
        };

        let mut points = vec![self.start];
        if arc.is_straight_line() {
            points.push(self.end);
            return points;
        }
        arc.for_each_flattened(tolerance, &mut |segment| {
            points.push(Point::new(segment.to.x, segment.to.y));
        });
        if let Some(last) = points.last_mut() {
            *last = self.end;
        }
        points
    }
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Positive for counter-clockwise winding in a +y-up frame. On a +y-down
/// screen the sign flips: visually counter-clockwise rings come out negative.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}
