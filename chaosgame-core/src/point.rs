use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D point/vector represented as two `f64` components.
///
/// Game points live in normalized device coordinates in `[-1, 1]`; label
/// layout reuses the same type for screen-pixel coordinates. This is a
/// lightweight, `Copy` type — we roll our own instead of pulling in a linear
/// algebra crate to keep the dependency graph minimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Sentinel position outside the visible canvas, used to park the cursor
    /// when the pointer leaves the board or a point is undone.
    pub const OFFSCREEN: Self = Self { x: 2.0, y: 2.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `x² + y²` without taking the square root.
    #[inline]
    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns `√(x² + y²)`.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length input returns [`Vec2::ZERO`] instead of NaN, so label
    /// layout over coincident points stays well-defined.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Linear interpolation: `self + t * (target - self)`.
    #[inline]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A renderable game point: a position plus the presentation flags the
/// render and label sinks care about.
///
/// `bordered` marks points drawn with an outline (anchors, the live cursor,
/// and the current generation point). History entries are immutable once
/// confirmed; only the cursor and the running current point toggle flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePoint {
    pub pos: Vec2,
    pub label: Option<String>,
    pub bordered: bool,
}

impl GamePoint {
    /// A plain, unlabeled, borderless point (the common generated case).
    pub fn plain(pos: Vec2) -> Self {
        Self {
            pos,
            label: None,
            bordered: false,
        }
    }

    /// An outlined point with no label.
    pub fn outlined(pos: Vec2) -> Self {
        Self {
            pos,
            label: None,
            bordered: true,
        }
    }

    /// An outlined, labeled point (anchors and the start point).
    pub fn labeled(pos: Vec2, label: impl Into<String>) -> Self {
        Self {
            pos,
            label: Some(label.into()),
            bordered: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn vector_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-0.5, 0.25);
        assert_eq!(a + b, Vec2::new(0.5, 2.25));
        assert_eq!(a - b, Vec2::new(1.5, 1.75));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn normalized_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalized();
        assert!((v.length() - 1.0).abs() < EPSILON);
        assert!((v.x - 0.6).abs() < EPSILON);
        assert!((v.y - 0.8).abs() < EPSILON);
    }

    #[test]
    fn normalized_zero_is_zero() {
        // Coincident anchor/centroid must not produce NaN.
        let v = Vec2::ZERO.normalized();
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec2::new(-1.0, -1.0);
        let b = Vec2::new(1.0, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::ZERO);
    }

    #[test]
    fn offscreen_is_outside_ndc() {
        assert!(Vec2::OFFSCREEN.x > 1.0);
        assert!(Vec2::OFFSCREEN.y > 1.0);
    }

    #[test]
    fn game_point_constructors() {
        let p = GamePoint::plain(Vec2::ZERO);
        assert!(!p.bordered);
        assert!(p.label.is_none());

        let a = GamePoint::labeled(Vec2::new(0.5, 0.5), "A");
        assert!(a.bordered);
        assert_eq!(a.label.as_deref(), Some("A"));
    }
}
