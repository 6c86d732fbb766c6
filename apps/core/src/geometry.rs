use std::f64::consts::{PI, TAU};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Point at `radius` along `angle` from `self`.
    pub fn polar_offset(self, angle: f64, radius: f64) -> Self {
        Self {
            x: angle.cos().mul_add(radius, self.x),
            y: angle.sin().mul_add(radius, self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Self;

    fn add(self, rhs: Vector2D) -> Self {
        Self {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

impl Sub for Point2D {
    type Output = Vector2D;

    fn sub(self, rhs: Self) -> Vector2D {
        Vector2D {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Bearing of `to` as seen from `from`, in radians (canvas orientation, y down).
pub fn bearing(from: Point2D, to: Point2D) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Shortest unsigned angle between two bearings, in `[0, π]`.
///
/// The operands are ordered before subtracting so the result is bit-for-bit
/// symmetric in `a` and `b`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let d = (high - low).rem_euclid(TAU);
    d.min(TAU - d).clamp(0.0, PI)
}

/// Wraps a coordinate into `[-margin, dimension + margin)`.
///
/// A value that escapes one edge re-enters from the opposite edge, keeping its
/// overshoot. Values already inside are returned untouched.
pub fn wrap_coordinate(value: f64, dimension: f64, margin: f64) -> f64 {
    let low = -margin;
    let high = dimension + margin;
    if (low..high).contains(&value) {
        return value;
    }
    let span = high - low;
    if !value.is_finite() || span <= 0.0 {
        return low;
    }
    let wrapped = low + (value - low).rem_euclid(span);
    // Rounding can land exactly on the open upper edge.
    if wrapped >= high {
        low
    } else {
        wrapped
    }
}
