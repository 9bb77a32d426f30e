//! Quaternion implementation for 3D rotations
//!
//! Hamilton convention: `(w, x, y, z)` with `w` the scalar part. Rotations
//! are right-handed in a Y-up, +Z-forward frame, and composition `a * b`
//! applies `b` first.

use crate::config::Tolerance;
use crate::real::{self, impl_component_eq, impl_scalar_lhs_mul, wide_norm, wide_norm_squared};
use crate::{Angle, Error, Mat3, Mat4, Real, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A quaternion, usually (but not necessarily) of unit length
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quaternion<P: Real> {
    /// `[w, x, y, z]`
    data: [P; 4],
}

impl<P: Real> Quaternion<P> {
    /// Create from components, as given (not normalized)
    #[inline]
    pub fn new(w: P, x: P, y: P, z: P) -> Self {
        Self { data: [w, x, y, z] }
    }

    /// Create from a scalar part and a vector part
    #[inline]
    pub fn from_scalar_vector(w: P, v: Vec3<P>) -> Self {
        Self::new(w, v.x(), v.y(), v.z())
    }

    /// Create from a `[w, x, y, z]` array
    #[inline]
    pub const fn from_array(data: [P; 4]) -> Self {
        Self { data }
    }

    /// Identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self::new(P::one(), P::zero(), P::zero(), P::zero())
    }

    /// Pure quaternion embedding a point: zero scalar part
    #[inline]
    pub fn pure(v: Vec3<P>) -> Self {
        Self::from_scalar_vector(P::zero(), v)
    }

    /// Scalar part
    #[inline]
    pub fn w(&self) -> P {
        self.data[0]
    }

    /// X of the vector part
    #[inline]
    pub fn x(&self) -> P {
        self.data[1]
    }

    /// Y of the vector part
    #[inline]
    pub fn y(&self) -> P {
        self.data[2]
    }

    /// Z of the vector part
    #[inline]
    pub fn z(&self) -> P {
        self.data[3]
    }

    /// The vector part
    #[inline]
    pub fn xyz(&self) -> Vec3<P> {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// The vector part in reverse order
    #[inline]
    pub fn zyx(&self) -> Vec3<P> {
        Vec3::new(self.z(), self.y(), self.x())
    }

    /// Flat view in `w, x, y, z` order
    #[inline]
    pub fn as_array(&self) -> &[P; 4] {
        &self.data
    }

    /// The components at another precision, in `w, x, y, z` order
    pub fn wxyz_as<Q: Real>(&self) -> [Q; 4] {
        self.data.map(|c| c.cast())
    }

    /// 4D Euclidean length, accumulated at the wide precision
    #[inline]
    pub fn length(&self) -> P {
        wide_norm(&self.data)
    }

    /// Squared 4D length, accumulated at the wide precision
    #[inline]
    pub fn length_squared(&self) -> P {
        wide_norm_squared(&self.data)
    }

    /// 4D dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> P {
        self.w() * other.w() + self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Normalize in place; a zero quaternion is left unchanged
    pub fn normalize(&mut self) -> &mut Self {
        if self.length_squared().is_degenerate_length_sq() {
            tracing::trace!("Skipping normalize of degenerate quaternion {:?}", self.data);
            return self;
        }
        let inv = P::one() / self.length();
        for c in &mut self.data {
            *c *= inv;
        }
        self
    }

    /// A unit-length copy
    #[inline]
    pub fn unit(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }

    /// A unit-length copy at another precision
    ///
    /// Normalization happens at the source precision, then the result is
    /// converted.
    pub fn unit_as<Q: Real>(&self) -> Quaternion<Q> {
        self.unit().as_precision()
    }

    /// A unit-length copy, or an error for a zero quaternion
    pub fn try_unit(&self) -> Result<Self> {
        if self.length_squared().is_degenerate_length_sq() {
            return Err(Error::DegenerateLength("Quaternion"));
        }
        Ok(self.unit())
    }

    /// Whether the length is within the default unit tolerance of 1
    pub fn is_unit(&self) -> bool {
        self.is_unit_with(&Tolerance::default())
    }

    /// Whether the length is within `tolerance.unit_epsilon` of 1
    pub fn is_unit_with(&self, tolerance: &Tolerance<P>) -> bool {
        tolerance.is_unit_length(self.length())
    }

    /// Negate the vector part in place
    pub fn conjugate(&mut self) -> &mut Self {
        for c in &mut self.data[1..] {
            *c = -*c;
        }
        self
    }

    /// A conjugated copy
    #[inline]
    pub fn conjugated(&self) -> Self {
        let mut copy = *self;
        copy.conjugate();
        copy
    }

    pub fn conjugated_as<Q: Real>(&self) -> Quaternion<Q> {
        self.conjugated().as_precision()
    }

    /// Invert in place: `conjugate / |q|²`
    ///
    /// A zero quaternion has no inverse and is left unchanged. For a unit
    /// quaternion this is the same as [`conjugate`](Self::conjugate).
    pub fn invert(&mut self) -> &mut Self {
        let len_sq = self.length_squared();
        if len_sq.is_degenerate_length_sq() {
            tracing::trace!("Skipping invert of degenerate quaternion {:?}", self.data);
            return self;
        }
        self.conjugate();
        for c in &mut self.data {
            *c /= len_sq;
        }
        self
    }

    /// An inverted copy; a zero quaternion is returned unchanged
    #[inline]
    pub fn inverse(&self) -> Self {
        let mut copy = *self;
        copy.invert();
        copy
    }

    pub fn inverse_as<Q: Real>(&self) -> Quaternion<Q> {
        self.inverse().as_precision()
    }

    /// Raw Hamilton product `a ⊗ b`, without normalizing either operand
    pub fn hamilton(a: &Self, b: &Self) -> Self {
        let (aw, ax, ay, az) = (a.w(), a.x(), a.y(), a.z());
        let (bw, bx, by, bz) = (b.w(), b.x(), b.y(), b.z());
        Self::new(
            aw.mul_add(bw, -(ax * bx + ay * by + az * bz)),
            aw.mul_add(bx, ax * bw + ay * bz - az * by),
            aw.mul_add(by, ay * bw + az * bx - ax * bz),
            aw.mul_add(bz, az * bw + ax * by - ay * bx),
        )
    }

    /// Compose two rotations: the result applies `other` first, then `self`
    ///
    /// Both operands are normalized before the product, so accumulated drift
    /// in either input does not leak into the result.
    pub fn multiply(&self, other: &Self) -> Self {
        Self::hamilton(&self.unit(), &other.unit())
    }

    /// Rotation of `angle_deg` degrees about `axis`
    ///
    /// The axis is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3<P>, angle_deg: P) -> Self {
        Self::from_axis_rotation(axis, Angle::from_degrees(angle_deg))
    }

    /// Rotation by `angle` about `axis`; a zero axis yields the identity
    pub fn from_axis_rotation(axis: Vec3<P>, angle: Angle<P>) -> Self {
        if axis.length_squared().is_degenerate_length_sq() {
            tracing::trace!("Degenerate rotation axis {:?}, using identity", axis);
            return Self::identity();
        }
        let (s, c) = (angle / P::lit(2.0)).sin_cos();
        Self::from_scalar_vector(c, axis.unit() * s)
    }

    /// Like [`from_axis_angle`](Self::from_axis_angle), but a zero axis is an error
    pub fn try_from_axis_angle(axis: Vec3<P>, angle_deg: P) -> Result<Self> {
        if axis.length_squared().is_degenerate_length_sq() {
            return Err(Error::DegenerateLength("rotation axis"));
        }
        if !angle_deg.is_finite() {
            return Err(Error::NonFinite("rotation angle"));
        }
        Ok(Self::from_axis_angle(axis, angle_deg))
    }

    /// Unit axis and angle in `[0°, 360°]`
    ///
    /// A (near) identity rotation reports the +X axis with a zero angle.
    pub fn to_axis_angle(&self) -> (Vec3<P>, Angle<P>) {
        let q = self.unit();
        let w = real::clamp(q.w(), -P::one(), P::one());
        let angle = Angle::acos(w) * P::lit(2.0);
        let s = (P::one() - w * w).sqrt();
        if s < P::TOLERANCE {
            return (Vec3::right(), Angle::zero());
        }
        (q.xyz() / s, angle)
    }

    /// Rotation from Euler angles in degrees: pitch about X, yaw about Y,
    /// roll about Z
    ///
    /// Equivalent to `Rz(roll) * Ry(yaw) * Rx(pitch)`: pitch is applied first.
    pub fn from_euler(pitch_deg: P, yaw_deg: P, roll_deg: P) -> Self {
        let half = P::lit(0.5);
        let (sp, cp) = (pitch_deg.to_radians() * half).sin_cos();
        let (sy, cy) = (yaw_deg.to_radians() * half).sin_cos();
        let (sr, cr) = (roll_deg.to_radians() * half).sin_cos();
        Self::new(
            cp * cy * cr + sp * sy * sr,
            sp * cy * cr - cp * sy * sr,
            cp * sy * cr + sp * cy * sr,
            cp * cy * sr - sp * sy * cr,
        )
    }

    /// [`from_euler`](Self::from_euler) with `(pitch, yaw, roll)` packed in a vector
    #[inline]
    pub fn from_euler_vec(euler_deg: Vec3<P>) -> Self {
        Self::from_euler(euler_deg.x(), euler_deg.y(), euler_deg.z())
    }

    /// Euler angles `(pitch, yaw, roll)` in degrees, the inverse of
    /// [`from_euler`](Self::from_euler)
    ///
    /// Yaw is limited to `[-90°, 90°]`. Near ±90° yaw pitch and roll are
    /// coupled (gimbal lock) and only their combination is meaningful.
    pub fn to_euler(&self) -> Vec3<P> {
        let q = self.unit();
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());
        let one = P::one();
        let two = P::lit(2.0);

        let pitch = Angle::atan2(two * (w * x + y * z), one - two * (x * x + y * y));
        let yaw = Angle::asin(two * (w * y - z * x));
        let roll = Angle::atan2(two * (w * z + x * y), one - two * (y * y + z * z));
        Vec3::new(pitch.as_degrees(), yaw.as_degrees(), roll.as_degrees())
    }

    /// Rotate a point: the vector part of `q ⊗ p ⊗ q*`
    ///
    /// Expects a unit quaternion; a non-unit one also scales by `|q|²`.
    pub fn rotate_point(&self, point: Vec3<P>) -> Vec3<P> {
        let rotated = Self::hamilton(&Self::hamilton(self, &Self::pure(point)), &self.conjugated());
        rotated.xyz()
    }

    /// Like [`Quaternion::rotate_point`], but requires `self` to already be
    /// unit length instead of relying on the sandwich product's scaling
    pub fn try_rotate_point(&self, point: Vec3<P>) -> Result<Vec3<P>> {
        if !self.is_unit() {
            return Err(Error::NotUnit {
                what: "rotation quaternion",
                length: self.length().as_f64(),
            });
        }
        Ok(self.rotate_point(point))
    }

    /// Rotate a point about `pivot` instead of the origin
    pub fn rotate_point_around_pivot(&self, point: Vec3<P>, pivot: Vec3<P>) -> Vec3<P> {
        self.rotate_point(point - pivot) + pivot
    }

    /// Column-major rotation matrix of the normalized quaternion
    pub fn to_mat3(&self) -> Mat3<P> {
        let q = self.unit();
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());
        let one = P::one();
        let two = P::lit(2.0);

        Mat3::from_row_major([
            one - two * (y * y + z * z),
            two * (x * y - w * z),
            two * (x * z + w * y),
            two * (x * y + w * z),
            one - two * (x * x + z * z),
            two * (y * z - w * x),
            two * (x * z - w * y),
            two * (y * z + w * x),
            one - two * (x * x + y * y),
        ])
    }

    /// Homogeneous rotation matrix with zero translation
    pub fn to_mat4(&self) -> Mat4<P> {
        Mat4::from_mat3(&self.to_mat3())
    }

    /// Extract the rotation of a 3x3 rotation matrix
    ///
    /// Branches on the trace and the largest diagonal element to keep the
    /// divisor away from zero. The result is normalized.
    pub fn from_mat3(m: &Mat3<P>) -> Self {
        let one = P::one();
        let two = P::lit(2.0);
        let quarter = P::lit(0.25);
        let (m00, m11, m22) = (m.at(0, 0), m.at(1, 1), m.at(2, 2));
        let trace = m00 + m11 + m22;

        let q = if trace > P::zero() {
            let s = (trace + one).sqrt() * two;
            Self::new(
                quarter * s,
                (m.at(2, 1) - m.at(1, 2)) / s,
                (m.at(0, 2) - m.at(2, 0)) / s,
                (m.at(1, 0) - m.at(0, 1)) / s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).sqrt() * two;
            Self::new(
                (m.at(2, 1) - m.at(1, 2)) / s,
                quarter * s,
                (m.at(0, 1) + m.at(1, 0)) / s,
                (m.at(0, 2) + m.at(2, 0)) / s,
            )
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).sqrt() * two;
            Self::new(
                (m.at(0, 2) - m.at(2, 0)) / s,
                (m.at(0, 1) + m.at(1, 0)) / s,
                quarter * s,
                (m.at(1, 2) + m.at(2, 1)) / s,
            )
        } else {
            let s = (one + m22 - m00 - m11).sqrt() * two;
            Self::new(
                (m.at(1, 0) - m.at(0, 1)) / s,
                (m.at(0, 2) + m.at(2, 0)) / s,
                (m.at(1, 2) + m.at(2, 1)) / s,
                quarter * s,
            )
        };
        q.unit()
    }

    /// Extract the rotation from the upper-left block of a 4x4
    pub fn from_mat4(m: &Mat4<P>) -> Self {
        Self::from_mat3(&m.upper_left())
    }

    /// Orientation whose local +Z looks from `eye` towards `target`, with
    /// local +Y as close to `world_up` as possible
    ///
    /// Coincident `eye` and `target` yield the identity. When the view
    /// direction is parallel to `world_up` another axis is used as up.
    pub fn look_at(eye: Vec3<P>, target: Vec3<P>, world_up: Vec3<P>) -> Self {
        let to_target = target - eye;
        if to_target.length_squared().is_degenerate_length_sq() {
            tracing::debug!("look_at with coincident eye and target, using identity");
            return Self::identity();
        }
        let forward = to_target.unit();

        let mut right = world_up.cross(&forward);
        if right.length_squared().is_degenerate_length_sq() {
            let fallback = if forward.z().abs() < P::lit(0.9) {
                Vec3::forward()
            } else {
                Vec3::right()
            };
            tracing::debug!(
                "look_at direction {:?} is parallel to up {:?}, falling back to {:?}",
                forward,
                world_up,
                fallback
            );
            right = fallback.cross(&forward);
        }
        right.normalize();
        let up = forward.cross(&right);

        Self::from_mat3(&Mat3::from_column_vectors(right, up, forward))
    }

    /// Spherical interpolation with `t` clamped to `[0, 1]`
    pub fn slerp(a: &Self, b: &Self, t: P) -> Self {
        Self::slerp_with(a, b, t, &Tolerance::default())
    }

    /// Like [`Quaternion::slerp`], extrapolating outside `[0, 1]`
    pub fn slerp_unclamped(a: &Self, b: &Self, t: P) -> Self {
        Self::slerp_impl(a, b, t, Tolerance::default().slerp_threshold)
    }

    /// Spherical interpolation with `t` clamped, using the slerp threshold
    /// of `tolerance`
    pub fn slerp_with(a: &Self, b: &Self, t: P, tolerance: &Tolerance<P>) -> Self {
        Self::slerp_impl(a, b, real::clamp01(t), tolerance.slerp_threshold)
    }

    fn slerp_impl(a: &Self, b: &Self, t: P, threshold: P) -> Self {
        let a = a.unit();
        let mut b = b.unit();
        let mut dot = a.dot(&b);

        // q and -q are the same rotation; take the shorter arc
        if dot < P::zero() {
            b = -b;
            dot = -dot;
        }

        if dot > threshold {
            return (a + (b - a) * t).unit();
        }

        let theta_0 = real::clamp(dot, -P::one(), P::one()).acos();
        let sin_theta_0 = theta_0.sin();
        if sin_theta_0 < P::TOLERANCE {
            tracing::trace!("slerp between parallel rotations, using nlerp");
            return (a + (b - a) * t).unit();
        }
        let theta = theta_0 * t;
        let s0 = (theta_0 - theta).sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;
        a * s0 + b * s1
    }

    /// Normalized linear interpolation along the shorter arc, `t` clamped
    pub fn nlerp(a: &Self, b: &Self, t: P) -> Self {
        let t = real::clamp01(t);
        let b = if a.dot(b) < P::zero() { -*b } else { *b };
        (*a + (b - *a) * t).unit()
    }

    /// Rotation angle between two orientations, in `[0, π]`
    pub fn angular_distance(&self, other: &Self) -> Angle<P> {
        let dot = self.unit().dot(&other.unit()).abs().min(P::one());
        Angle::from_radians(P::lit(2.0) * dot.acos())
    }

    /// The same quaternion at another precision
    pub fn as_precision<Q: Real>(&self) -> Quaternion<Q> {
        Quaternion::from_array(self.wxyz_as())
    }

    /// Tolerant comparison; same as `==`
    ///
    /// Component-wise, so `q` and `-q` compare unequal even though they are
    /// the same rotation. Use [`angular_distance`](Self::angular_distance)
    /// to compare rotations.
    #[inline]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl_component_eq!(Quaternion);
impl_scalar_lhs_mul!(Quaternion);

impl<P: Real> Default for Quaternion<P> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<P: Real> From<[P; 4]> for Quaternion<P> {
    fn from(data: [P; 4]) -> Self {
        Self::from_array(data)
    }
}

impl<P: Real> Mul for Quaternion<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<P: Real> Mul<&Quaternion<P>> for Quaternion<P> {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self {
        self.multiply(rhs)
    }
}

impl<P: Real> Mul<Vec3<P>> for Quaternion<P> {
    type Output = Vec3<P>;

    fn mul(self, rhs: Vec3<P>) -> Vec3<P> {
        self.rotate_point(rhs)
    }
}

impl<P: Real> Mul<P> for Quaternion<P> {
    type Output = Self;

    fn mul(self, rhs: P) -> Self {
        Self::from_array(self.data.map(|c| c * rhs))
    }
}

impl<P: Real> Div<P> for Quaternion<P> {
    type Output = Self;

    /// Division by zero returns the quaternion unchanged
    fn div(self, rhs: P) -> Self {
        if rhs == P::zero() {
            tracing::trace!("Ignoring division of quaternion by zero");
            return self;
        }
        Self::from_array(self.data.map(|c| c / rhs))
    }
}

impl<P: Real> Add for Quaternion<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for (c, r) in out.data.iter_mut().zip(rhs.data) {
            *c += r;
        }
        out
    }
}

impl<P: Real> Sub for Quaternion<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for (c, r) in out.data.iter_mut().zip(rhs.data) {
            *c -= r;
        }
        out
    }
}

impl<P: Real> Neg for Quaternion<P> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_array(self.data.map(|c| -c))
    }
}
