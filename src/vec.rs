//! Vector types for cloth geometry.

use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate axis of a [`Vec3`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

// --------------------------------------------------------------------------
// Vec2<F>: texture coordinates
// --------------------------------------------------------------------------

/// 2D vector, used for per-particle texture coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
}

// --------------------------------------------------------------------------
// Vec3<F>: positions, velocities, forces, normals
// --------------------------------------------------------------------------

/// 3D vector for particle state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn zero() -> Self { Vec3::new(F::zero(), F::zero(), F::zero()) }

    /// Unit vector along `axis`, negated when `negative` is set.
    pub fn unit(axis: Axis, negative: bool) -> Self {
        let mut v = Self::zero();
        v.set(axis, if negative { -F::one() } else { F::one() });
        v
    }

    pub fn get(self, axis: Axis) -> F {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: F) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed: `X.cross(Y) == Z`.
    pub fn cross(self, other: Self) -> Self {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn scale(self, s: F) -> Self {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(F::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

macro_rules! componentwise {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl<F: Float> $op for Vec3<F> {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self {
                Vec3::new(self.x $sym rhs.x, self.y $sym rhs.y, self.z $sym rhs.z)
            }
        }

        impl<F: Float> $assign for Vec3<F> {
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_length() {
        let v = Vec3::new(2.0f64, 3.0, 6.0);
        assert!((v.length() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn vec3_cross() {
        let i = Vec3::new(1.0f32, 0.0, 0.0);
        let j = Vec3::new(0.0f32, 1.0, 0.0);
        let k = i.cross(j);
        assert!((k.x - 0.0).abs() < 1e-6);
        assert!((k.y - 0.0).abs() < 1e-6);
        assert!((k.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let v = Vec3::<f64>::zero();
        assert_eq!(v.normalize(), Vec3::zero());
    }

    #[test]
    fn axis_access() {
        let mut v = Vec3::new(1.0f64, 2.0, 3.0);
        v.set(Axis::Z, -4.0);
        assert_eq!(v.get(Axis::X), 1.0);
        assert_eq!(v.get(Axis::Z), -4.0);
        assert_eq!(Vec3::<f64>::unit(Axis::Y, true), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn distance_calculation() {
        let a = Vec3::new(0.0f64, 0.0, 0.0);
        let b = Vec3::new(3.0f64, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }
}
