//! Dual quaternions for rigid motions
//!
//! A dual quaternion `(real, dual)` encodes a rotation followed by a
//! translation. `real` is the rotation, and `dual = 0.5 * t ⊗ real` where `t`
//! is the translation embedded as a pure quaternion.
//!
//! Composition and blending work directly on the eight components, which
//! makes dual quaternions the natural representation for interpolating
//! rigid transforms without the shearing a matrix blend introduces.

use crate::real::{self, impl_scalar_lhs_mul};
use crate::{Error, Mat4, Quaternion, Real, Result, Vec3};
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg};

/// A rigid motion: rotation + translation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DualQuaternion<P: Real> {
    /// Rotation part
    pub real: Quaternion<P>,
    /// Translation-encoding part
    pub dual: Quaternion<P>,
}

impl<P: Real> DualQuaternion<P> {
    /// Create from the two parts, as given
    #[inline]
    pub fn new(real: Quaternion<P>, dual: Quaternion<P>) -> Self {
        Self { real, dual }
    }

    /// Like [`DualQuaternion::new`], rejecting a non-unit real part
    pub fn try_new(real: Quaternion<P>, dual: Quaternion<P>) -> Result<Self> {
        if !real.is_unit() {
            return Err(Error::NotUnit {
                what: "dual quaternion real part",
                length: real.length().as_f64(),
            });
        }
        Ok(Self::new(real, dual))
    }

    /// The motion that applies no rotation and no translation
    pub fn identity() -> Self {
        Self::new(Quaternion::identity(), Quaternion::new(P::zero(), P::zero(), P::zero(), P::zero()))
    }

    /// Rotate by `rotation`, then translate by `translation`
    ///
    /// The rotation is normalized.
    pub fn from_rotation_translation(rotation: Quaternion<P>, translation: Vec3<P>) -> Self {
        let real = rotation.unit();
        let dual = Quaternion::hamilton(&Quaternion::pure(translation), &real) * P::lit(0.5);
        Self { real, dual }
    }

    /// A pure rotation
    pub fn from_rotation(rotation: Quaternion<P>) -> Self {
        Self::from_rotation_translation(rotation, Vec3::zero())
    }

    /// A pure translation
    pub fn from_translation(translation: Vec3<P>) -> Self {
        Self::from_rotation_translation(Quaternion::identity(), translation)
    }

    /// The rotation part, re-normalized
    pub fn rotation(&self) -> Quaternion<P> {
        self.real.unit()
    }

    pub fn rotation_as<Q: Real>(&self) -> Quaternion<Q> {
        self.rotation().as_precision()
    }

    /// The translation: vector part of `2 * dual ⊗ conj(real)`
    pub fn translation(&self) -> Vec3<P> {
        let unit = self.unit();
        let t = Quaternion::hamilton(&unit.dual, &unit.real.conjugated());
        t.xyz() * P::lit(2.0)
    }

    pub fn translation_as<Q: Real>(&self) -> Vec3<Q> {
        self.translation().as_precision()
    }

    /// `(rotation, translation)`
    pub fn to_parts(&self) -> (Quaternion<P>, Vec3<P>) {
        (self.rotation(), self.translation())
    }

    /// Scale both parts by `1 / |real|`; a zero real part is left unchanged
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.real.length_squared();
        if len_sq.is_degenerate_length_sq() {
            tracing::trace!("Skipping normalize of degenerate dual quaternion {:?}", self);
            return self;
        }
        let inv = P::one() / self.real.length();
        self.real = self.real * inv;
        self.dual = self.dual * inv;
        self
    }

    /// A normalized copy; a zero real part is returned unchanged
    #[inline]
    pub fn unit(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }

    pub fn unit_as<Q: Real>(&self) -> DualQuaternion<Q> {
        self.unit().as_precision()
    }

    /// A normalized copy, or an error when the real part is zero
    pub fn try_unit(&self) -> Result<Self> {
        if self.real.length_squared().is_degenerate_length_sq() {
            return Err(Error::DegenerateLength("DualQuaternion"));
        }
        Ok(self.unit())
    }

    /// Quaternion-conjugate both parts in place
    pub fn conjugate(&mut self) -> &mut Self {
        self.real.conjugate();
        self.dual.conjugate();
        self
    }

    /// A conjugated copy
    #[inline]
    pub fn conjugated(&self) -> Self {
        let mut copy = *self;
        copy.conjugate();
        copy
    }

    pub fn conjugated_as<Q: Real>(&self) -> DualQuaternion<Q> {
        self.conjugated().as_precision()
    }

    /// The inverse rigid motion
    pub fn inverse(&self) -> Self {
        self.unit().conjugated()
    }

    /// Compose two motions: the result applies `other` first, then `self`
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            real: Quaternion::hamilton(&self.real, &other.real),
            dual: Quaternion::hamilton(&self.real, &other.dual)
                + Quaternion::hamilton(&self.dual, &other.real),
        }
    }

    /// Blend with `t` clamped to `[0, 1]`, then normalize
    pub fn lerp(a: &Self, b: &Self, t: P) -> Self {
        Self::lerp_unclamped(a, b, real::clamp01(t))
    }

    /// Blend without clamping `t`, then normalize
    ///
    /// `b` is negated when its rotation lies in the opposite hemisphere from
    /// `a`'s; it is the same motion and the blend takes the shorter path.
    pub fn lerp_unclamped(a: &Self, b: &Self, t: P) -> Self {
        let b = if a.real.dot(&b.real) < P::zero() { -*b } else { *b };
        let mut blended = *a * (P::one() - t) + b * t;
        blended.normalize();
        blended
    }

    /// Rotate then translate a point
    pub fn transform_point(&self, point: Vec3<P>) -> Vec3<P> {
        let unit = self.unit();
        let (rw, rv) = (unit.real.w(), unit.real.xyz());
        let (dw, dv) = (unit.dual.w(), unit.dual.xyz());
        let translation = (dv * rw - rv * dw + rv.cross(&dv)) * P::lit(2.0);
        unit.real.rotate_point(point) + translation
    }

    /// Rotate a direction; translation has no effect
    pub fn transform_vector(&self, vector: Vec3<P>) -> Vec3<P> {
        self.rotation().rotate_point(vector)
    }

    /// Homogeneous column-major matrix of the motion
    pub fn to_mat4(&self) -> Mat4<P> {
        let (rotation, translation) = self.to_parts();
        let mut m = rotation.to_mat4();
        m.set(0, 3, translation.x());
        m.set(1, 3, translation.y());
        m.set(2, 3, translation.z());
        m
    }

    /// Motion of a rigid homogeneous matrix; any scale or shear is discarded
    pub fn from_mat4(m: &Mat4<P>) -> Self {
        Self::from_rotation_translation(Quaternion::from_mat4(m), m.translation())
    }

    /// The same motion at another precision
    pub fn as_precision<Q: Real>(&self) -> DualQuaternion<Q> {
        DualQuaternion::new(self.real.as_precision(), self.dual.as_precision())
    }

    /// Tolerant comparison; same as `==`
    #[inline]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl<P: Real> Default for DualQuaternion<P> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<P: Real> PartialEq for DualQuaternion<P> {
    fn eq(&self, other: &Self) -> bool {
        self.real == other.real && self.dual == other.dual
    }
}

impl<P: Real> AbsDiffEq for DualQuaternion<P> {
    type Epsilon = P;

    fn default_epsilon() -> P {
        P::TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: P) -> bool {
        self.real.abs_diff_eq(&other.real, epsilon) && self.dual.abs_diff_eq(&other.dual, epsilon)
    }
}

impl<P: Real> RelativeEq for DualQuaternion<P> {
    fn default_max_relative() -> P {
        <P as RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: P, max_relative: P) -> bool {
        self.real.relative_eq(&other.real, epsilon, max_relative)
            && self.dual.relative_eq(&other.dual, epsilon, max_relative)
    }
}

impl<P: Real> UlpsEq for DualQuaternion<P> {
    fn default_max_ulps() -> u32 {
        <P as UlpsEq>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: P, max_ulps: u32) -> bool {
        self.real.ulps_eq(&other.real, epsilon, max_ulps)
            && self.dual.ulps_eq(&other.dual, epsilon, max_ulps)
    }
}

impl<P: Real> Mul for DualQuaternion<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<P: Real> Mul<P> for DualQuaternion<P> {
    type Output = Self;

    fn mul(self, rhs: P) -> Self {
        Self::new(self.real * rhs, self.dual * rhs)
    }
}

impl_scalar_lhs_mul!(DualQuaternion);

impl<P: Real> Add for DualQuaternion<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.real + rhs.real, self.dual + rhs.dual)
    }
}

impl<P: Real> Neg for DualQuaternion<P> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.real, -self.dual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> DualQuaternion<f64> {
        DualQuaternion::from_rotation_translation(
            Quaternion::from_euler(20.0, -35.0, 110.0),
            Vec3::new(1.5, -2.0, 4.0),
        )
    }

    #[test]
    fn test_try_new_rejects_non_unit_real_part() {
        let motion = sample();
        assert_eq!(DualQuaternion::try_new(motion.real, motion.dual).unwrap(), motion);

        let stretched = DualQuaternion::try_new(motion.real * 1.5, motion.dual);
        assert!(matches!(stretched, Err(Error::NotUnit { .. })));
    }

    #[test]
    fn test_identity() {
        let dq = DualQuaternion::<f64>::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(dq.transform_point(p), p);
        assert_eq!(dq.translation(), Vec3::zero());
        assert_eq!(DualQuaternion::<f32>::default(), DualQuaternion::identity());
    }

    #[test]
    fn test_rotate_then_translate() {
        let rotation = Quaternion::from_axis_angle(Vec3::up(), 90.0);
        let dq = DualQuaternion::from_rotation_translation(rotation, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(dq.transform_point(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(1.0, 0.0, 5.0));
    }

    #[test]
    fn test_transform_point_matches_parts() {
        let rotation = Quaternion::from_euler(20.0, -35.0, 110.0);
        let translation = Vec3::new(1.5, -2.0, 4.0);
        let dq = sample();
        for p in [Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(-3.0, 7.5, 0.25)] {
            assert_eq!(dq.transform_point(p), rotation.rotate_point(p) + translation);
        }
        assert_eq!(dq.transform_vector(Vec3::up()), rotation.rotate_point(Vec3::up()));
    }

    #[test]
    fn test_parts_roundtrip() {
        let dq = sample();
        let (rotation, translation) = dq.to_parts();
        assert_eq!(rotation, Quaternion::from_euler(20.0, -35.0, 110.0));
        assert_eq!(translation, Vec3::new(1.5, -2.0, 4.0));
        assert_eq!(DualQuaternion::from_rotation_translation(rotation, translation), dq);

        assert_eq!(DualQuaternion::from_rotation(rotation).translation(), Vec3::zero());
        assert_eq!(
            DualQuaternion::from_translation(translation).rotation(),
            Quaternion::identity()
        );
    }

    #[test]
    fn test_unnormalized_rotation_input() {
        let rotation = Quaternion::<f64>::from_axis_angle(Vec3::right(), 30.0);
        let t = Vec3::new(0.0, 1.0, 0.0);
        let dq = DualQuaternion::from_rotation_translation(rotation * 4.0, t);
        assert_relative_eq!(dq.real.length(), 1.0, epsilon = 1e-12);
        assert_eq!(dq.translation(), t);
    }

    #[test]
    fn test_composition_applies_right_first() {
        let a = sample();
        let b = DualQuaternion::from_rotation_translation(
            Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 45.0),
            Vec3::new(-1.0, 0.5, 2.0),
        );
        let p = Vec3::new(0.3, 0.2, -0.9);
        assert_eq!((a * b).transform_point(p), a.transform_point(b.transform_point(p)));
        assert_ne!((a * b).transform_point(p), (b * a).transform_point(p));
    }

    #[test]
    fn test_inverse() {
        let dq = sample();
        let p = Vec3::new(4.0, -1.0, 2.0);
        assert_eq!(dq.inverse().transform_point(dq.transform_point(p)), p);
        assert_eq!(dq * dq.inverse(), DualQuaternion::identity());
    }

    #[test]
    fn test_conjugate_twice() {
        let dq = sample();
        let mut c = dq;
        c.conjugate().conjugate();
        assert_eq!(c, dq);
        assert_eq!(dq.conjugated().real, dq.real.conjugated());
    }

    #[test]
    fn test_normalize() {
        let dq = sample();
        let mut scaled = dq * 3.0;
        scaled.normalize();
        assert_eq!(scaled, dq);
        assert_eq!((2.0 * dq).unit(), dq);

        let mut zero = DualQuaternion::new(Quaternion::new(0.0, 0.0, 0.0, 0.0), dq.dual);
        zero.normalize();
        assert_eq!(zero.dual, dq.dual);
        assert!(matches!(zero.try_unit(), Err(Error::DegenerateLength(_))));
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = DualQuaternion::<f64>::from_translation(Vec3::zero());
        let b = DualQuaternion::from_translation(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(DualQuaternion::lerp(&a, &b, 0.0), a);
        assert_eq!(DualQuaternion::lerp(&a, &b, 1.0), b);
        assert_eq!(DualQuaternion::lerp(&a, &b, 3.0), b);
        assert_eq!(DualQuaternion::lerp(&a, &b, 0.5).translation(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(
            DualQuaternion::lerp_unclamped(&a, &b, 2.0).translation(),
            Vec3::new(20.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_lerp_opposite_hemisphere() {
        let a = DualQuaternion::from_rotation(Quaternion::from_axis_angle(Vec3::up(), 10.0));
        let b = sample();
        let flipped = -b;
        assert_eq!(DualQuaternion::lerp(&a, &b, 0.4), DualQuaternion::lerp(&a, &flipped, 0.4));
    }

    #[test]
    fn test_mat4_roundtrip() {
        let dq = sample();
        let m = dq.to_mat4();
        let p = Vec3::new(-0.5, 2.0, 1.0);
        assert_eq!(m.transform_point(p), dq.transform_point(p));
        assert_eq!(m.translation(), Vec3::new(1.5, -2.0, 4.0));

        let back = DualQuaternion::from_mat4(&m);
        assert_eq!(back.transform_point(p), dq.transform_point(p));
    }

    #[test]
    fn test_precision_conversion() {
        let dq = sample();
        let narrow: DualQuaternion<f32> = dq.as_precision();
        let p = Vec3::new(1.0f32, 2.0, 3.0);
        let expected: Vec3<f32> = dq.transform_point(p.as_precision()).as_precision();
        assert_relative_eq!(narrow.transform_point(p), expected, epsilon = 1e-4);
        assert_relative_eq!(dq.translation_as::<f32>(), Vec3::new(1.5, -2.0, 4.0), epsilon = 1e-5);
        assert_eq!(dq.rotation_as::<f32>(), dq.unit_as::<f32>().real);
        assert_eq!(dq.conjugated_as::<f32>(), narrow.conjugated());
    }
}
