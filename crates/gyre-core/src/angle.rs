//! Wrapped angles
//!
//! [`Angle`] always stores radians. The constructors convert the input unit
//! once; nothing forces the stored value into a canonical range until
//! [`Angle::normalize`] is called.

use crate::real::{self, Real};
use crate::{Error, Result, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A rotation magnitude, stored in radians
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle<P: Real> {
    radians: P,
}

impl<P: Real> Angle<P> {
    /// An angle of `radians` radians
    #[inline]
    pub fn from_radians(radians: P) -> Self {
        Self { radians }
    }

    /// An angle of `degrees` degrees, converted once to radians
    #[inline]
    pub fn from_degrees(degrees: P) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// Like [`Angle::from_radians`], rejecting NaN and infinities
    pub fn try_from_radians(radians: P) -> Result<Self> {
        if !radians.is_finite() {
            return Err(Error::NonFinite("angle in radians"));
        }
        Ok(Self::from_radians(radians))
    }

    /// Like [`Angle::from_degrees`], rejecting NaN and infinities
    pub fn try_from_degrees(degrees: P) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(Error::NonFinite("angle in degrees"));
        }
        Ok(Self::from_degrees(degrees))
    }

    /// The zero angle
    pub fn zero() -> Self {
        Self::from_radians(P::zero())
    }

    /// A full turn (2π)
    pub fn full_turn() -> Self {
        Self::from_radians(P::TAU())
    }

    /// Half a turn (π)
    pub fn half_turn() -> Self {
        Self::from_radians(P::PI())
    }

    /// The stored value in radians
    #[inline]
    pub fn as_radians(&self) -> P {
        self.radians
    }

    /// The value converted to degrees
    #[inline]
    pub fn as_degrees(&self) -> P {
        self.radians.to_degrees()
    }

    /// Wrap into `[0, 2π)` in place
    pub fn normalize(&mut self) -> &mut Self {
        let full = P::TAU();
        let mut r = self.radians % full;
        if r < P::zero() {
            r += full;
        }
        // A tiny negative remainder can round up to exactly one full turn
        if r >= full {
            r = P::zero();
        }
        self.radians = r;
        self
    }

    /// A copy wrapped into `[0, 2π)`
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }

    /// Wrap into `(-π, π]` in place
    pub fn normalize_signed(&mut self) -> &mut Self {
        self.normalize();
        if self.radians > P::PI() {
            self.radians -= P::TAU();
        }
        self
    }

    /// A copy wrapped into `(-π, π]`
    #[inline]
    pub fn normalized_signed(&self) -> Self {
        let mut copy = *self;
        copy.normalize_signed();
        copy
    }

    /// Signed shortest rotation from `self` to `other`, in `(-π, π]`
    ///
    /// Opposite angles resolve to `+π`.
    pub fn delta_to(&self, other: &Self) -> Self {
        let full = P::TAU();
        let mut delta = (other.radians - self.radians) % full;
        if delta > P::PI() {
            delta -= full;
        }
        if delta <= -P::PI() {
            delta += full;
        }
        Self::from_radians(delta)
    }

    /// Straight linear interpolation with `t` clamped to `[0, 1]`
    ///
    /// No wrap-around correction is applied: interpolating from 350° to 10°
    /// sweeps back through 180°. Use [`Angle::short_lerp`] for rotations.
    #[inline]
    pub fn lerp(start: &Self, end: &Self, t: P) -> Self {
        Self::from_radians(real::lerp(start.radians, end.radians, t))
    }

    /// [`Angle::lerp`] on raw degree values
    #[inline]
    pub fn lerp_degrees(start_deg: P, end_deg: P, t: P) -> Self {
        Self::from_degrees(real::lerp(start_deg, end_deg, t))
    }

    /// Interpolate along the shorter arc, with `t` clamped to `[0, 1]`
    ///
    /// The result is `start + t * delta` where `delta` is the wrapped signed
    /// difference; it is not normalized. Halfway from 350° to 10° gives 360°,
    /// which only compares equal to 0° after [`Angle::normalize_signed`].
    #[inline]
    pub fn short_lerp(start: &Self, end: &Self, t: P) -> Self {
        let delta = start.delta_to(end);
        Self::from_radians(start.radians + delta.radians * real::clamp01(t))
    }

    /// [`Angle::short_lerp`] on raw degree values
    #[inline]
    pub fn short_lerp_degrees(start_deg: P, end_deg: P, t: P) -> Self {
        Self::short_lerp(&Self::from_degrees(start_deg), &Self::from_degrees(end_deg), t)
    }

    /// Unsigned angle between two 3D directions, in `[0, π]`
    ///
    /// Zero-length inputs are used as-is, giving a right angle.
    pub fn angle_between(a: &Vec3<P>, b: &Vec3<P>) -> Self {
        let dot = a.unit().dot(&b.unit());
        Self::acos(dot)
    }

    /// Unsigned angle between two 2D directions, in `[0, π]`
    pub fn angle_between_2d(a: &Vec2<P>, b: &Vec2<P>) -> Self {
        let dot = a.unit().dot(&b.unit());
        Self::acos(dot)
    }

    /// `asin` with its argument clamped to `[-1, 1]`
    #[inline]
    pub fn asin(value: P) -> Self {
        Self::from_radians(real::clamp(value, -P::one(), P::one()).asin())
    }

    /// `acos` with its argument clamped to `[-1, 1]`
    #[inline]
    pub fn acos(value: P) -> Self {
        Self::from_radians(real::clamp(value, -P::one(), P::one()).acos())
    }

    /// `atan` as an angle
    #[inline]
    pub fn atan(value: P) -> Self {
        Self::from_radians(value.atan())
    }

    /// Four-quadrant `atan2(y, x)` as an angle
    #[inline]
    pub fn atan2(y: P, x: P) -> Self {
        Self::from_radians(y.atan2(x))
    }

    #[inline]
    pub fn sin(&self) -> P {
        self.radians.sin()
    }

    #[inline]
    pub fn cos(&self) -> P {
        self.radians.cos()
    }

    #[inline]
    pub fn tan(&self) -> P {
        self.radians.tan()
    }

    #[inline]
    pub fn sin_cos(&self) -> (P, P) {
        self.radians.sin_cos()
    }

    /// Absolute value
    #[inline]
    pub fn abs(&self) -> Self {
        Self::from_radians(self.radians.abs())
    }

    /// Clamp between two bounds given in degrees
    pub fn clamp_degrees(&self, min_deg: P, max_deg: P) -> Self {
        Self::from_degrees(real::clamp(self.as_degrees(), min_deg, max_deg))
    }

    /// The same angle at another precision
    #[inline]
    pub fn as_precision<Q: Real>(&self) -> Angle<Q> {
        Angle::from_radians(self.radians.cast())
    }

    /// Tolerant comparison; same as `==`
    #[inline]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// Compares radians against [`Real::TOLERANCE`]
impl<P: Real> PartialEq for Angle<P> {
    fn eq(&self, other: &Self) -> bool {
        real::approx_eq(self.radians, other.radians)
    }
}

impl<P: Real> PartialOrd for Angle<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.radians.partial_cmp(&other.radians)
    }
}

impl<P: Real> approx::AbsDiffEq for Angle<P> {
    type Epsilon = P;

    fn default_epsilon() -> P {
        P::TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: P) -> bool {
        self.radians.abs_diff_eq(&other.radians, epsilon)
    }
}

impl<P: Real> approx::RelativeEq for Angle<P> {
    fn default_max_relative() -> P {
        <P as approx::RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: P, max_relative: P) -> bool {
        self.radians
            .relative_eq(&other.radians, epsilon, max_relative)
    }
}

impl<P: Real> approx::UlpsEq for Angle<P> {
    fn default_max_ulps() -> u32 {
        <P as approx::UlpsEq>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: P, max_ulps: u32) -> bool {
        self.radians.ulps_eq(&other.radians, epsilon, max_ulps)
    }
}

impl<P: Real> fmt::Display for Angle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.as_degrees())
    }
}

impl<P: Real> Add for Angle<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_radians(self.radians + rhs.radians)
    }
}

impl<P: Real> Sub for Angle<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_radians(self.radians - rhs.radians)
    }
}

impl<P: Real> Neg for Angle<P> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_radians(-self.radians)
    }
}

impl<P: Real> Mul<P> for Angle<P> {
    type Output = Self;

    fn mul(self, rhs: P) -> Self {
        Self::from_radians(self.radians * rhs)
    }
}

/// Division by zero returns the angle unchanged
impl<P: Real> Div<P> for Angle<P> {
    type Output = Self;

    fn div(self, rhs: P) -> Self {
        if rhs == P::zero() {
            return self;
        }
        Self::from_radians(self.radians / rhs)
    }
}

impl<P: Real> AddAssign for Angle<P> {
    fn add_assign(&mut self, rhs: Self) {
        self.radians += rhs.radians;
    }
}

impl<P: Real> SubAssign for Angle<P> {
    fn sub_assign(&mut self, rhs: Self) {
        self.radians -= rhs.radians;
    }
}

impl<P: Real> MulAssign<P> for Angle<P> {
    fn mul_assign(&mut self, rhs: P) {
        self.radians *= rhs;
    }
}

impl<P: Real> DivAssign<P> for Angle<P> {
    fn div_assign(&mut self, rhs: P) {
        if rhs == P::zero() {
            return;
        }
        self.radians /= rhs;
    }
}
