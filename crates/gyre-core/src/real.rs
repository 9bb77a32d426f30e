//! Numeric policy shared by every gyre type
//!
//! All value types are generic over a single [`Real`] precision. The trait
//! carries the shared equality tolerance, the wider precision used for
//! accumulation, and the explicit conversion rules between precisions.
//!
//! Conversions are never implicit: widening (`f32 -> f64`) is exact, narrowing
//! (`f64 -> f32`) rounds to the nearest representable value.

use approx::{RelativeEq, UlpsEq};
use num_traits::{Float, FloatConst};
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// A real floating-point precision usable by every gyre type
///
/// Implemented for `f32` and `f64`. There is no stable extended-precision
/// primitive in Rust; a wider software float can be plugged in by
/// implementing this trait.
pub trait Real:
    Float
    + FloatConst
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + RelativeEq<Epsilon = Self>
    + UlpsEq<Epsilon = Self>
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// Absolute tolerance used by every `==` comparison in the crate
    const TOLERANCE: Self;

    /// Squared lengths below this value are treated as zero by normalize
    const DEGENERATE_LENGTH_SQ: Self;

    /// Precision used for internal accumulation (lengths, dot products)
    type Wide: Real;

    /// Exact conversion into the accumulation precision
    fn widen(self) -> Self::Wide;

    /// Round an accumulated value back to this precision
    fn narrow(wide: Self::Wide) -> Self;

    /// Build a value from an `f64` literal
    fn lit(value: f64) -> Self;

    /// The value as `f64` (exact for `f32` and `f64`)
    fn as_f64(self) -> f64;

    /// Convert to another precision
    ///
    /// Widening is exact, narrowing rounds to nearest.
    #[inline]
    fn cast<Q: Real>(self) -> Q {
        Q::lit(self.as_f64())
    }

    /// Whether a squared length is too small to divide by
    #[inline]
    fn is_degenerate_length_sq(self) -> bool {
        self < Self::DEGENERATE_LENGTH_SQ
    }
}

impl Real for f32 {
    const TOLERANCE: Self = 1e-5;
    const DEGENERATE_LENGTH_SQ: Self = 1e-20;

    type Wide = f64;

    #[inline]
    fn widen(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn narrow(wide: f64) -> Self {
        wide as f32
    }

    #[inline]
    fn lit(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Real for f64 {
    const TOLERANCE: Self = 1e-10;
    const DEGENERATE_LENGTH_SQ: Self = 1e-20;

    type Wide = f64;

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn narrow(wide: f64) -> Self {
        wide
    }

    #[inline]
    fn lit(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Clamp a value to `[min, max]`
#[inline]
pub fn clamp<P: Real>(value: P, min: P, max: P) -> P {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a value to `[0, 1]`
#[inline]
pub fn clamp01<P: Real>(value: P) -> P {
    clamp(value, P::zero(), P::one())
}

/// Linearly interpolate between two values, with `t` clamped to `[0, 1]`
#[inline]
pub fn lerp<P: Real>(start: P, end: P, t: P) -> P {
    lerp_unclamped(start, end, clamp01(t))
}

/// Linearly interpolate between two values without clamping `t`
#[inline]
pub fn lerp_unclamped<P: Real>(start: P, end: P, t: P) -> P {
    start + (end - start) * t
}

/// Absolute-difference comparison against [`Real::TOLERANCE`]
#[inline]
pub fn approx_eq<P: Real>(a: P, b: P) -> bool {
    (a - b).abs() < P::TOLERANCE
}

/// Square root of a sum of squares, accumulated in the wide precision
#[inline]
pub(crate) fn wide_norm<P: Real>(components: &[P]) -> P {
    let sum = components
        .iter()
        .fold(<P::Wide as num_traits::Zero>::zero(), |acc, &c| {
            let w = c.widen();
            acc + w * w
        });
    P::narrow(sum.sqrt())
}

/// Sum of squares, accumulated in the wide precision
#[inline]
pub(crate) fn wide_norm_squared<P: Real>(components: &[P]) -> P {
    let sum = components
        .iter()
        .fold(<P::Wide as num_traits::Zero>::zero(), |acc, &c| {
            let w = c.widen();
            acc + w * w
        });
    P::narrow(sum)
}

/// Tolerant `PartialEq` plus the `approx` traits for a type whose state is a
/// fixed array of scalars returned by `as_array()`
macro_rules! impl_component_eq {
    ($ty:ident) => {
        impl<P: $crate::Real> PartialEq for $ty<P> {
            fn eq(&self, other: &Self) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array().iter())
                    .all(|(&a, &b)| $crate::real::approx_eq(a, b))
            }
        }

        impl<P: $crate::Real> approx::AbsDiffEq for $ty<P> {
            type Epsilon = P;

            fn default_epsilon() -> P {
                P::TOLERANCE
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: P) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array().iter())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl<P: $crate::Real> approx::RelativeEq for $ty<P> {
            fn default_max_relative() -> P {
                <P as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: P, max_relative: P) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array().iter())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }

        impl<P: $crate::Real> approx::UlpsEq for $ty<P> {
            fn default_max_ulps() -> u32 {
                <P as approx::UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: P, max_ulps: u32) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array().iter())
                    .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
            }
        }
    };
}

pub(crate) use impl_component_eq;

/// `scalar * value` for the concrete precisions
macro_rules! impl_scalar_lhs_mul {
    ($ty:ident) => {
        impl std::ops::Mul<$ty<f32>> for f32 {
            type Output = $ty<f32>;

            fn mul(self, rhs: $ty<f32>) -> $ty<f32> {
                rhs * self
            }
        }

        impl std::ops::Mul<$ty<f64>> for f64 {
            type Output = $ty<f64>;

            fn mul(self, rhs: $ty<f64>) -> $ty<f64> {
                rhs * self
            }
        }
    };
}

pub(crate) use impl_scalar_lhs_mul;
