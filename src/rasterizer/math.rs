//! Vector math for the projection pipeline
//!
//! Fixed-size 2D/3D double precision vectors. Dimensions are part of the
//! type, so mixing a `Vec2` with a `Vec3` is a compile error rather than a
//! silently degenerate result.

use std::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// 3D Vector (world space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Squared length, i.e. `self.dot(self)`
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        self + -other
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector (screen plane)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(self, s: f64) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Rotate a quarter turn counter-clockwise: `[x, y] -> [-y, x]`
    pub fn rot90(self) -> Vec2 {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }

    /// Reciprocal (dual) vector of `self` for the basis `(self, other)`.
    ///
    /// Returns `v` with `v.dot(self) == 1` and `v.dot(other) == 0`. If the
    /// two vectors are parallel the result is non-finite, which makes every
    /// coordinate computed from it fail comparisons downstream.
    pub fn reciprocal(self, other: Vec2) -> Vec2 {
        let r = other.rot90();
        r.scale(1.0 / r.dot(self))
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        self + -other
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f64) -> Vec2 {
        self.scale(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < EPS);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(b.cross(a), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_vec3_cross_camera_axes() {
        // up x right = forward for the default camera
        let up = Vec3::new(0.0, 0.0, 1.0);
        let right = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(up.cross(right), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sub_is_add_of_negation() {
        let a = Vec3::new(3.0, -1.0, 2.5);
        let b = Vec3::new(0.5, 4.0, -2.0);
        assert_eq!(a - b, Vec3::new(2.5, -5.0, 4.5));
        assert_eq!(a - b, a + b * -1.0);
    }

    #[test]
    fn test_rot90() {
        assert_eq!(Vec2::new(1.0, 0.0).rot90(), Vec2::new(0.0, 1.0));
        assert_eq!(Vec2::new(2.0, 3.0).rot90(), Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_reciprocal_is_dual() {
        let pairs = [
            (Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)),
            (Vec2::new(3.0, 1.0), Vec2::new(-2.0, 5.0)),
            (Vec2::new(-0.25, 7.0), Vec2::new(4.0, 4.0)),
        ];
        for (a, b) in pairs {
            let v = a.reciprocal(b);
            assert!((v.dot(a) - 1.0).abs() < EPS, "{:?}", (a, b));
            assert!(v.dot(b).abs() < EPS, "{:?}", (a, b));
        }
    }

    #[test]
    fn test_reciprocal_parallel_is_not_finite() {
        let v = Vec2::new(1.0, 1.0).reciprocal(Vec2::new(2.0, 2.0));
        assert!(!v.x.is_finite() || !v.y.is_finite());
    }
}
