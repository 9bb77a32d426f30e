//! Conversions to and from nalgebra
//!
//! Vectors, quaternions, dual quaternions and matrices convert losslessly to
//! their nalgebra counterparts and back at the same precision. [`Angle`] has
//! no nalgebra counterpart and stays a plain scalar. Both libraries store
//! matrices column-major, so the matrix conversions are plain copies.
//!
//! [`Angle`]: crate::Angle
//!
//! ```
//! use gyre_core::{Quaternion, Vec3};
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let q = Quaternion::<f64>::from_axis_angle(Vec3::up(), 90.0);
//! let uq: UnitQuaternion<f64> = q.into();
//! let p: Vec3<f64> = (uq * Vector3::new(0.0, 0.0, 1.0)).into();
//! assert_eq!(p, q.rotate_point(Vec3::forward()));
//! ```

use crate::{DualQuaternion, Mat3, Mat4, Quaternion, Real, Vec2, Vec3};
use nalgebra::{Matrix3, Matrix4, Point3, UnitQuaternion, Vector2, Vector3, Vector4};

impl<P: Real> From<Vec2<P>> for Vector2<P> {
    fn from(v: Vec2<P>) -> Self {
        Vector2::new(v.x(), v.y())
    }
}

impl<P: Real> From<Vector2<P>> for Vec2<P> {
    fn from(v: Vector2<P>) -> Self {
        Vec2::new(v[0], v[1])
    }
}

impl<P: Real> From<Vec3<P>> for Vector3<P> {
    fn from(v: Vec3<P>) -> Self {
        Vector3::new(v.x(), v.y(), v.z())
    }
}

impl<P: Real> From<Vector3<P>> for Vec3<P> {
    fn from(v: Vector3<P>) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl<P: Real> From<Vec3<P>> for Point3<P> {
    fn from(v: Vec3<P>) -> Self {
        Point3::new(v.x(), v.y(), v.z())
    }
}

impl<P: Real> From<Point3<P>> for Vec3<P> {
    fn from(p: Point3<P>) -> Self {
        Vec3::new(p[0], p[1], p[2])
    }
}

impl<P: Real> From<Quaternion<P>> for nalgebra::Quaternion<P> {
    fn from(q: Quaternion<P>) -> Self {
        // nalgebra stores the scalar last
        nalgebra::Quaternion::from_vector(Vector4::new(q.x(), q.y(), q.z(), q.w()))
    }
}

impl<P: Real> From<nalgebra::Quaternion<P>> for Quaternion<P> {
    fn from(q: nalgebra::Quaternion<P>) -> Self {
        let c = &q.coords;
        Quaternion::new(c[3], c[0], c[1], c[2])
    }
}

/// Normalizes first; a zero quaternion is passed through unnormalized
impl<P: Real> From<Quaternion<P>> for UnitQuaternion<P> {
    fn from(q: Quaternion<P>) -> Self {
        UnitQuaternion::new_unchecked(q.unit().into())
    }
}

impl<P: Real> From<UnitQuaternion<P>> for Quaternion<P> {
    fn from(q: UnitQuaternion<P>) -> Self {
        q.into_inner().into()
    }
}

impl<P: Real> From<DualQuaternion<P>> for nalgebra::DualQuaternion<P> {
    fn from(dq: DualQuaternion<P>) -> Self {
        nalgebra::DualQuaternion {
            real: dq.real.into(),
            dual: dq.dual.into(),
        }
    }
}

impl<P: Real> From<nalgebra::DualQuaternion<P>> for DualQuaternion<P> {
    fn from(dq: nalgebra::DualQuaternion<P>) -> Self {
        DualQuaternion::new(dq.real.into(), dq.dual.into())
    }
}

impl<P: Real> From<Mat3<P>> for Matrix3<P> {
    fn from(m: Mat3<P>) -> Self {
        Matrix3::from_column_slice(m.as_slice())
    }
}

impl<P: Real> From<Matrix3<P>> for Mat3<P> {
    fn from(m: Matrix3<P>) -> Self {
        let mut data = [P::zero(); 9];
        data.copy_from_slice(m.as_slice());
        Mat3::from_column_major(data)
    }
}

impl<P: Real> From<Mat4<P>> for Matrix4<P> {
    fn from(m: Mat4<P>) -> Self {
        Matrix4::from_column_slice(m.as_slice())
    }
}

impl<P: Real> From<Matrix4<P>> for Mat4<P> {
    fn from(m: Matrix4<P>) -> Self {
        let mut data = [P::zero(); 16];
        data.copy_from_slice(m.as_slice());
        Mat4::from_column_major(data)
    }
}
