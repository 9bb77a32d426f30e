//! Column-major 3x3 and 4x4 matrices
//!
//! These are conversion targets for rotations and rigid motions, not a
//! general linear-algebra toolkit: they support element access,
//! multiplication, and applying the transform to a [`Vec3`].
//!
//! Storage is a flat column-major array: flat index `k` holds
//! `(row = k % N, col = k / N)`. This is also the order expected by OpenGL
//! style uniform uploads and by nalgebra.

use crate::real::impl_component_eq;
use crate::{Real, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Mul};

macro_rules! square_matrix {
    ($(#[$meta:meta])* $name:ident, $n:literal, $len:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name<P: Real> {
            data: [P; $len],
        }

        impl<P: Real> $name<P> {
            /// Number of rows (and columns)
            pub const DIM: usize = $n;

            /// All entries zero
            pub fn zero() -> Self {
                Self {
                    data: [P::zero(); $len],
                }
            }

            /// The identity matrix
            pub fn identity() -> Self {
                let mut m = Self::zero();
                for i in 0..$n {
                    m.data[i * $n + i] = P::one();
                }
                m
            }

            /// Build from a flat column-major array
            #[inline]
            pub const fn from_column_major(data: [P; $len]) -> Self {
                Self { data }
            }

            /// Build from a flat array listed row by row, as a matrix is written on paper
            pub fn from_row_major(rows: [P; $len]) -> Self {
                let mut m = Self::zero();
                for row in 0..$n {
                    for col in 0..$n {
                        m.data[col * $n + row] = rows[row * $n + col];
                    }
                }
                m
            }

            /// Build from columns
            pub fn from_columns(columns: [[P; $n]; $n]) -> Self {
                let mut m = Self::zero();
                for (col, values) in columns.iter().enumerate() {
                    m.data[col * $n..(col + 1) * $n].copy_from_slice(values);
                }
                m
            }

            #[inline]
            fn index_of(row: usize, col: usize) -> usize {
                col.min($n - 1) * $n + row.min($n - 1)
            }

            /// Element at `(row, col)`; both indices are clamped into range
            #[inline]
            pub fn at(&self, row: usize, col: usize) -> P {
                self.data[Self::index_of(row, col)]
            }

            /// Mutable entry at `(row, col)`, both clamped
            #[inline]
            pub fn at_mut(&mut self, row: usize, col: usize) -> &mut P {
                &mut self.data[Self::index_of(row, col)]
            }

            /// Overwrite the entry at `(row, col)`, both clamped
            #[inline]
            pub fn set(&mut self, row: usize, col: usize, value: P) {
                self.data[Self::index_of(row, col)] = value;
            }

            /// Element at flat column-major index `k`, clamped into range
            #[inline]
            pub fn flat(&self, k: usize) -> P {
                self.data[k.min($len - 1)]
            }

            /// Flat column-major storage
            #[inline]
            pub fn as_array(&self) -> &[P; $len] {
                &self.data
            }

            /// Flat column-major storage as a slice
            #[inline]
            pub fn as_slice(&self) -> &[P] {
                &self.data
            }

            /// Column `col` (clamped) as an array
            pub fn column(&self, col: usize) -> [P; $n] {
                let mut out = [P::zero(); $n];
                for (row, value) in out.iter_mut().enumerate() {
                    *value = self.at(row, col);
                }
                out
            }

            /// Row `row` (clamped) as an array
            pub fn row(&self, row: usize) -> [P; $n] {
                let mut out = [P::zero(); $n];
                for (col, value) in out.iter_mut().enumerate() {
                    *value = self.at(row, col);
                }
                out
            }

            /// `self * rhs`: the result applies `rhs` first, then `self`
            pub fn multiply(&self, rhs: &Self) -> Self {
                let mut out = Self::zero();
                for col in 0..$n {
                    for row in 0..$n {
                        let mut sum = P::zero();
                        for k in 0..$n {
                            sum += self.data[k * $n + row] * rhs.data[col * $n + k];
                        }
                        out.data[col * $n + row] = sum;
                    }
                }
                out
            }

            /// The same matrix at another precision
            pub fn as_precision<Q: Real>(&self) -> $name<Q> {
                let mut data = [Q::zero(); $len];
                for (dst, src) in data.iter_mut().zip(self.data.iter()) {
                    *dst = src.cast();
                }
                $name { data }
            }

            /// Tolerant comparison; same as `==`
            #[inline]
            pub fn approx_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        impl_component_eq!($name);

        impl<P: Real> Default for $name<P> {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl<P: Real> Index<(usize, usize)> for $name<P> {
            type Output = P;

            fn index(&self, (row, col): (usize, usize)) -> &P {
                &self.data[Self::index_of(row, col)]
            }
        }

        impl<P: Real> IndexMut<(usize, usize)> for $name<P> {
            fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut P {
                self.at_mut(row, col)
            }
        }

        impl<P: Real> Index<usize> for $name<P> {
            type Output = P;

            fn index(&self, k: usize) -> &P {
                &self.data[k.min($len - 1)]
            }
        }

        impl<P: Real> Mul for $name<P> {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                self.multiply(&rhs)
            }
        }
    };
}

square_matrix!(
    /// A 3x3 column-major matrix, used for pure rotations
    Mat3,
    3,
    9
);

square_matrix!(
    /// A 4x4 column-major matrix, used for homogeneous rigid transforms
    Mat4,
    4,
    16
);

impl<P: Real> Mat3<P> {
    /// Build from three column vectors
    pub fn from_column_vectors(x: Vec3<P>, y: Vec3<P>, z: Vec3<P>) -> Self {
        Self::from_columns([x.to_array(), y.to_array(), z.to_array()])
    }

    /// `M * v`
    pub fn transform_vector(&self, v: Vec3<P>) -> Vec3<P> {
        Vec3::new(
            self.at(0, 0) * v.x() + self.at(0, 1) * v.y() + self.at(0, 2) * v.z(),
            self.at(1, 0) * v.x() + self.at(1, 1) * v.y() + self.at(1, 2) * v.z(),
            self.at(2, 0) * v.x() + self.at(2, 1) * v.y() + self.at(2, 2) * v.z(),
        )
    }

    /// Embed in the upper-left corner of an identity 4x4
    pub fn to_mat4(&self) -> Mat4<P> {
        Mat4::from_mat3(self)
    }
}

impl<P: Real> Mul<Vec3<P>> for Mat3<P> {
    type Output = Vec3<P>;

    fn mul(self, rhs: Vec3<P>) -> Vec3<P> {
        self.transform_vector(rhs)
    }
}

impl<P: Real> Mat4<P> {
    /// Pure translation
    pub fn from_translation(t: Vec3<P>) -> Self {
        let mut m = Self::identity();
        m.set(0, 3, t.x());
        m.set(1, 3, t.y());
        m.set(2, 3, t.z());
        m
    }

    /// Rotation block from a 3x3, identity elsewhere
    pub fn from_mat3(rotation: &Mat3<P>) -> Self {
        let mut m = Self::identity();
        for col in 0..3 {
            for row in 0..3 {
                m.set(row, col, rotation.at(row, col));
            }
        }
        m
    }

    /// The upper-left 3x3 block
    pub fn upper_left(&self) -> Mat3<P> {
        let mut m = Mat3::zero();
        for col in 0..3 {
            for row in 0..3 {
                m.set(row, col, self.at(row, col));
            }
        }
        m
    }

    /// The translation column
    pub fn translation(&self) -> Vec3<P> {
        Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3))
    }

    /// Apply to a point (`w = 1`), dividing by the resulting `w` when it is
    /// neither zero nor one
    pub fn transform_point(&self, p: Vec3<P>) -> Vec3<P> {
        let row = |r: usize| {
            self.at(r, 0) * p.x() + self.at(r, 1) * p.y() + self.at(r, 2) * p.z() + self.at(r, 3)
        };
        let out = Vec3::new(row(0), row(1), row(2));
        let w = row(3);
        if w == P::zero() || w == P::one() {
            out
        } else {
            out / w
        }
    }

    /// Apply to a direction (`w = 0`); translation has no effect
    pub fn transform_vector(&self, v: Vec3<P>) -> Vec3<P> {
        self.upper_left().transform_vector(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Mat4<f64> {
        Mat4::from_row_major([
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ])
    }

    #[test]
    fn test_column_major_layout() {
        let m = sample();
        assert_eq!(m.at(0, 1), 2.0);
        assert_eq!(m.at(1, 0), 5.0);
        // flat k -> (row = k % 4, col = k / 4)
        for k in 0..16 {
            assert_eq!(m.flat(k), m.at(k % 4, k / 4));
        }
        assert_eq!(m.as_slice()[..4], [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(m.column(3), [4.0, 8.0, 12.0, 16.0]);
        assert_eq!(m.row(3), [13.0, 14.0, 15.0, 16.0]);
    }

    #[test]
    fn test_indices_are_clamped() {
        let mut m = sample();
        assert_eq!(m.at(9, 9), 16.0);
        assert_eq!(m[(0, 42)], 4.0);
        assert_eq!(m[100], 16.0);
        assert_eq!(m.flat(100), 16.0);
        m[(7, 0)] = -1.0;
        assert_eq!(m.at(3, 0), -1.0);
    }

    #[test]
    fn test_identity_and_zero() {
        let m = sample();
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(m * Mat4::zero(), Mat4::zero());
        assert_eq!(Mat4::<f32>::default(), Mat4::identity());
    }

    #[test]
    fn test_multiply() {
        let a = Mat3::from_row_major([1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let b = Mat3::from_row_major([1.0, 0.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let ab = a * b;
        assert_eq!(ab, Mat3::from_row_major([7.0, 2.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0]));
        assert_ne!(ab, b * a);
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        // Scale x by 2, then translate by +1 along x
        let scale = Mat4::from_row_major([
            2.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let translate = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let p = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!((translate * scale).transform_point(p), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!((scale * translate).transform_point(p), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(m.transform_vector(v), v);
        assert_eq!(m.transform_point(v), Vec3::new(6.0, 8.0, 10.0));
        assert_eq!(m.translation(), Vec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_mat3_mat4_blocks() {
        let r = Mat3::<f64>::from_column_vectors(Vec3::up(), -Vec3::right(), Vec3::forward());
        let m = r.to_mat4();
        assert_eq!(m.upper_left(), r);
        assert_eq!(m.at(3, 3), 1.0);
        assert_eq!(m.at(0, 3), 0.0);
        assert_eq!(r * Vec3::right(), Vec3::up());
    }

    #[test]
    fn test_tolerant_equality() {
        let a = Mat3::<f32>::identity();
        let mut b = a;
        b.set(1, 2, 1e-6);
        assert_eq!(a, b);
        b.set(1, 2, 1e-3);
        assert_ne!(a, b);
        assert_relative_eq!(a, Mat3::identity());
    }

    #[test]
    fn test_precision_roundtrip() {
        let m = sample().as_precision::<f32>();
        assert_eq!(m.at(2, 3), 12.0f32);
        assert_eq!(m.as_precision::<f64>(), sample());
    }
}
