//! 2D and 3D vectors
//!
//! Plain coordinate tuples used by the rotation types. Storage is a single
//! ordered array; the named accessors index into it.

use crate::real::{self, impl_component_eq, impl_scalar_lhs_mul, wide_norm, wide_norm_squared};
use crate::{Angle, Error, Real, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector with components `(x, y, z)`
///
/// The axis helpers follow a Y-up, +Z-forward frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vec3<P: Real> {
    data: [P; 3],
}

impl<P: Real> Vec3<P> {
    /// Create a new vector from components
    #[inline]
    pub fn new(x: P, y: P, z: P) -> Self {
        Self { data: [x, y, z] }
    }

    /// Create from an `[x, y, z]` array
    #[inline]
    pub const fn from_array(data: [P; 3]) -> Self {
        Self { data }
    }

    /// All components set to `value`
    #[inline]
    pub fn splat(value: P) -> Self {
        Self { data: [value; 3] }
    }

    /// All components zero
    pub fn zero() -> Self {
        Self::splat(P::zero())
    }

    /// All components one
    pub fn one() -> Self {
        Self::splat(P::one())
    }

    /// Unit +X
    pub fn right() -> Self {
        Self::new(P::one(), P::zero(), P::zero())
    }

    /// Unit -X
    pub fn left() -> Self {
        Self::new(-P::one(), P::zero(), P::zero())
    }

    /// Unit +Y (up)
    pub fn up() -> Self {
        Self::new(P::zero(), P::one(), P::zero())
    }

    /// Unit -Y
    pub fn down() -> Self {
        Self::new(P::zero(), -P::one(), P::zero())
    }

    /// Unit +Z (forward)
    pub fn forward() -> Self {
        Self::new(P::zero(), P::zero(), P::one())
    }

    /// Unit -Z
    pub fn backward() -> Self {
        Self::new(P::zero(), P::zero(), -P::one())
    }

    /// Extend a 2D vector with a z component
    #[inline]
    pub fn from_vec2(xy: Vec2<P>, z: P) -> Self {
        Self::new(xy.x(), xy.y(), z)
    }

    /// X component
    #[inline]
    pub fn x(&self) -> P {
        self.data[0]
    }

    /// Y component
    #[inline]
    pub fn y(&self) -> P {
        self.data[1]
    }

    /// Z component
    #[inline]
    pub fn z(&self) -> P {
        self.data[2]
    }

    /// Set the X component
    #[inline]
    pub fn set_x(&mut self, x: P) {
        self.data[0] = x;
    }

    /// Set the Y component
    #[inline]
    pub fn set_y(&mut self, y: P) {
        self.data[1] = y;
    }

    /// Set the Z component
    #[inline]
    pub fn set_z(&mut self, z: P) {
        self.data[2] = z;
    }

    /// The components as an `[x, y, z]` array
    #[inline]
    pub fn as_array(&self) -> &[P; 3] {
        &self.data
    }

    /// Consume into an `[x, y, z]` array
    #[inline]
    pub fn to_array(self) -> [P; 3] {
        self.data
    }

    /// Component by index; the index is clamped to `0..=2`
    #[inline]
    pub fn get(&self, index: usize) -> P {
        self.data[index.min(2)]
    }

    /// Mutable component by index; the index is clamped to `0..=2`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut P {
        &mut self.data[index.min(2)]
    }

    /// The `(x, y)` part
    #[inline]
    pub fn xy(&self) -> Vec2<P> {
        Vec2::new(self.x(), self.y())
    }

    /// The `(x, z)` part
    #[inline]
    pub fn xz(&self) -> Vec2<P> {
        Vec2::new(self.x(), self.z())
    }

    /// The `(y, z)` part
    #[inline]
    pub fn yz(&self) -> Vec2<P> {
        Vec2::new(self.y(), self.z())
    }

    /// Components in reverse order
    #[inline]
    pub fn zyx(&self) -> Self {
        Self::new(self.z(), self.y(), self.x())
    }

    /// Euclidean length, accumulated at the wide precision
    #[inline]
    pub fn length(&self) -> P {
        wide_norm(&self.data)
    }

    /// Squared length, accumulated at the wide precision
    #[inline]
    pub fn length_squared(&self) -> P {
        wide_norm_squared(&self.data)
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> P {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Right-handed cross product `self × other`
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Distance between two points
    #[inline]
    pub fn distance(&self, other: &Self) -> P {
        (*other - *self).length()
    }

    /// Squared distance between two points
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> P {
        (*other - *self).length_squared()
    }

    /// Scale every component
    #[inline]
    pub fn scale(&self, s: P) -> Self {
        Self::new(self.x() * s, self.y() * s, self.z() * s)
    }

    /// Normalize in place; a zero-length vector is left unchanged
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.length_squared();
        if len_sq.is_degenerate_length_sq() {
            tracing::trace!("Skipping normalize of degenerate Vec3 {:?}", self.data);
            return self;
        }
        let inv = P::one() / self.length();
        for c in &mut self.data {
            *c *= inv;
        }
        self
    }

    /// A unit-length copy; a zero-length vector is returned unchanged
    #[inline]
    pub fn unit(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }

    /// A unit-length copy, or an error for a zero-length vector
    pub fn try_unit(&self) -> Result<Self> {
        if self.length_squared().is_degenerate_length_sq() {
            return Err(Error::DegenerateLength("Vec3"));
        }
        Ok(self.unit())
    }

    /// Interpolate towards `end`, with `t` clamped to `[0, 1]`
    #[inline]
    pub fn lerp(start: &Self, end: &Self, t: P) -> Self {
        Self::lerp_unclamped(start, end, real::clamp01(t))
    }

    /// Like [`Vec3::lerp`], extrapolating outside `[0, 1]`
    #[inline]
    pub fn lerp_unclamped(start: &Self, end: &Self, t: P) -> Self {
        Self::new(
            real::lerp_unclamped(start.x(), end.x(), t),
            real::lerp_unclamped(start.y(), end.y(), t),
            real::lerp_unclamped(start.z(), end.z(), t),
        )
    }

    /// Step from `current` towards `target` by at most `max_distance`
    pub fn move_towards(current: &Self, target: &Self, max_distance: P) -> Self {
        let delta = *target - *current;
        let dist_sq = delta.length_squared();
        if dist_sq == P::zero()
            || (max_distance >= P::zero() && dist_sq <= max_distance * max_distance)
        {
            return *target;
        }
        *current + delta.scale(max_distance / dist_sq.sqrt())
    }

    /// The same vector at another precision
    #[inline]
    pub fn as_precision<Q: Real>(&self) -> Vec3<Q> {
        Vec3::new(self.x().cast(), self.y().cast(), self.z().cast())
    }

    /// Tolerant comparison; same as `==`
    #[inline]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl_component_eq!(Vec3);
impl_scalar_lhs_mul!(Vec3);

impl<P: Real> From<[P; 3]> for Vec3<P> {
    fn from(data: [P; 3]) -> Self {
        Self { data }
    }
}

impl<P: Real> From<Vec3<P>> for [P; 3] {
    fn from(v: Vec3<P>) -> Self {
        v.data
    }
}

impl<P: Real> From<Vec2<P>> for Vec3<P> {
    fn from(xy: Vec2<P>) -> Self {
        Self::from_vec2(xy, P::zero())
    }
}

impl<P: Real> Index<usize> for Vec3<P> {
    type Output = P;

    fn index(&self, index: usize) -> &P {
        &self.data[index.min(2)]
    }
}

impl<P: Real> IndexMut<usize> for Vec3<P> {
    fn index_mut(&mut self, index: usize) -> &mut P {
        self.get_mut(index)
    }
}

impl<P: Real> Add for Vec3<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z())
    }
}

impl<P: Real> Sub for Vec3<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

impl<P: Real> Neg for Vec3<P> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z())
    }
}

impl<P: Real> Mul<P> for Vec3<P> {
    type Output = Self;

    fn mul(self, rhs: P) -> Self {
        self.scale(rhs)
    }
}

/// Division by zero returns the vector unchanged
impl<P: Real> Div<P> for Vec3<P> {
    type Output = Self;

    fn div(self, rhs: P) -> Self {
        if rhs == P::zero() {
            return self;
        }
        self.scale(P::one() / rhs)
    }
}

impl<P: Real> AddAssign for Vec3<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Real> SubAssign for Vec3<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: Real> MulAssign<P> for Vec3<P> {
    fn mul_assign(&mut self, rhs: P) {
        *self = *self * rhs;
    }
}

impl<P: Real> DivAssign<P> for Vec3<P> {
    fn div_assign(&mut self, rhs: P) {
        *self = *self / rhs;
    }
}

/// A 2D vector with components `(x, y)`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vec2<P: Real> {
    data: [P; 2],
}

impl<P: Real> Vec2<P> {
    /// Create a new vector from components
    #[inline]
    pub fn new(x: P, y: P) -> Self {
        Self { data: [x, y] }
    }

    /// Create from an `[x, y]` array
    #[inline]
    pub const fn from_array(data: [P; 2]) -> Self {
        Self { data }
    }

    /// All components zero
    pub fn zero() -> Self {
        Self::new(P::zero(), P::zero())
    }

    /// All components one
    pub fn one() -> Self {
        Self::new(P::one(), P::one())
    }

    /// Unit +X
    pub fn right() -> Self {
        Self::new(P::one(), P::zero())
    }

    /// Unit +Y
    pub fn up() -> Self {
        Self::new(P::zero(), P::one())
    }

    /// Unit vector at `angle` from the +X axis, counter-clockwise
    #[inline]
    pub fn from_angle(angle: Angle<P>) -> Self {
        let (sin, cos) = angle.as_radians().sin_cos();
        Self::new(cos, sin)
    }

    /// X component
    #[inline]
    pub fn x(&self) -> P {
        self.data[0]
    }

    /// Y component
    #[inline]
    pub fn y(&self) -> P {
        self.data[1]
    }

    /// Set the X component
    #[inline]
    pub fn set_x(&mut self, x: P) {
        self.data[0] = x;
    }

    /// Set the Y component
    #[inline]
    pub fn set_y(&mut self, y: P) {
        self.data[1] = y;
    }

    /// The components as an `[x, y]` array
    #[inline]
    pub fn as_array(&self) -> &[P; 2] {
        &self.data
    }

    /// Component by index; the index is clamped to `0..=1`
    #[inline]
    pub fn get(&self, index: usize) -> P {
        self.data[index.min(1)]
    }

    /// Append a z component
    #[inline]
    pub fn extend(&self, z: P) -> Vec3<P> {
        Vec3::from_vec2(*self, z)
    }

    /// Euclidean length, accumulated at the wide precision
    #[inline]
    pub fn length(&self) -> P {
        wide_norm(&self.data)
    }

    /// Squared length, accumulated at the wide precision
    #[inline]
    pub fn length_squared(&self) -> P {
        wide_norm_squared(&self.data)
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> P {
        self.x() * other.x() + self.y() * other.y()
    }

    /// Distance between two points
    #[inline]
    pub fn distance(&self, other: &Self) -> P {
        (*other - *self).length()
    }

    /// Squared distance between two points
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> P {
        (*other - *self).length_squared()
    }

    /// Direction of this vector measured from the +X axis
    #[inline]
    pub fn angle(&self) -> Angle<P> {
        Angle::atan2(self.y(), self.x())
    }

    /// Scale every component
    #[inline]
    pub fn scale(&self, s: P) -> Self {
        Self::new(self.x() * s, self.y() * s)
    }

    /// Normalize in place; a zero-length vector is left unchanged
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.length_squared();
        if len_sq.is_degenerate_length_sq() {
            tracing::trace!("Skipping normalize of degenerate Vec2 {:?}", self.data);
            return self;
        }
        let inv = P::one() / self.length();
        self.data[0] *= inv;
        self.data[1] *= inv;
        self
    }

    /// A unit-length copy; a zero-length vector is returned unchanged
    #[inline]
    pub fn unit(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }

    /// A unit-length copy, or an error for a zero-length vector
    pub fn try_unit(&self) -> Result<Self> {
        if self.length_squared().is_degenerate_length_sq() {
            return Err(Error::DegenerateLength("Vec2"));
        }
        Ok(self.unit())
    }

    /// Interpolate towards `end`, with `t` clamped to `[0, 1]`
    #[inline]
    pub fn lerp(start: &Self, end: &Self, t: P) -> Self {
        Self::lerp_unclamped(start, end, real::clamp01(t))
    }

    /// Like [`Vec2::lerp`], extrapolating outside `[0, 1]`
    #[inline]
    pub fn lerp_unclamped(start: &Self, end: &Self, t: P) -> Self {
        Self::new(
            real::lerp_unclamped(start.x(), end.x(), t),
            real::lerp_unclamped(start.y(), end.y(), t),
        )
    }

    /// The same vector at another precision
    #[inline]
    pub fn as_precision<Q: Real>(&self) -> Vec2<Q> {
        Vec2::new(self.x().cast(), self.y().cast())
    }
}

impl_component_eq!(Vec2);
impl_scalar_lhs_mul!(Vec2);

impl<P: Real> From<[P; 2]> for Vec2<P> {
    fn from(data: [P; 2]) -> Self {
        Self { data }
    }
}

/// Drops the z component
impl<P: Real> From<Vec3<P>> for Vec2<P> {
    fn from(v: Vec3<P>) -> Self {
        v.xy()
    }
}

impl<P: Real> Index<usize> for Vec2<P> {
    type Output = P;

    fn index(&self, index: usize) -> &P {
        &self.data[index.min(1)]
    }
}

impl<P: Real> Add for Vec2<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

impl<P: Real> Sub for Vec2<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y())
    }
}

impl<P: Real> Neg for Vec2<P> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x(), -self.y())
    }
}

impl<P: Real> Mul<P> for Vec2<P> {
    type Output = Self;

    fn mul(self, rhs: P) -> Self {
        self.scale(rhs)
    }
}

/// Division by zero returns the vector unchanged
impl<P: Real> Div<P> for Vec2<P> {
    type Output = Self;

    fn div(self, rhs: P) -> Self {
        if rhs == P::zero() {
            return self;
        }
        self.scale(P::one() / rhs)
    }
}

impl<P: Real> AddAssign for Vec2<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Real> SubAssign for Vec2<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
