//! Scalar type the cloth is generic over.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// `f32` or `f64`. Square roots and absolute values go through `libm` so the
/// crate builds without `std`.
pub trait Float:
    Copy
    + Default
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    fn zero() -> Self;
    fn one() -> Self;
    fn two() -> Self;
    /// Lossless for `f64`; used for literals and grid indices.
    fn from_f32(v: f32) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;

    fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// `|self| < epsilon`.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

macro_rules! impl_float {
    ($t:ty, $sqrt:path, $fabs:path) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn two() -> Self { 2.0 }
            fn from_f32(v: f32) -> Self { v as $t }
            fn sqrt(self) -> Self { $sqrt(self) }
            fn abs(self) -> Self { $fabs(self) }
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
        }
    };
}

impl_float!(f32, libm::sqrtf, libm::fabsf);
impl_float!(f64, libm::sqrt, libm::fabs);
