//! gyre-core: precision-generic rotation and rigid-transform math
//!
//! A small set of `Copy` value types for representing, composing and
//! interpolating rigid transforms, generic over the floating-point precision.
//!
//! # Modules
//!
//! - [`real`] - The [`Real`] precision trait and shared scalar helpers
//! - [`config`] - Comparison and interpolation tolerances
//! - [`angle`] - Wrapped angles stored in radians
//! - [`vector`] - 2D and 3D vectors
//! - [`matrix`] - Column-major 3x3 and 4x4 matrices
//! - [`quaternion`] - Rotation quaternions
//! - [`dual_quaternion`] - Rigid motions (rotation + translation)
//! - [`interop`] - Conversions to and from nalgebra
//!
//! # Conventions
//!
//! ```text
//!   Angle / Vec3 ──► Quaternion ──► DualQuaternion
//!                        │                │
//!                        └──────► Mat3 / Mat4 ◄┘
//! ```
//!
//! - Bare scalar angles are degrees unless the name says radians.
//! - Matrices are column-major: flat index `k` is `(row = k % N, col = k / N)`.
//! - `a * b` on rotations and rigid motions means "apply `b`, then `a`".
//! - `==` is tolerant: it compares against [`Real::TOLERANCE`].
//! - Degenerate inputs (zero-length normalize, division by zero) leave the
//!   value unchanged. The `try_*` variants report them as [`Error`] instead.
//!
//! # Example
//!
//! ```
//! use gyre_core::{DualQuaternion, Quaternion, Vec3};
//!
//! let rotation = Quaternion::<f64>::from_axis_angle(Vec3::up(), 90.0);
//! let motion = DualQuaternion::from_rotation_translation(rotation, Vec3::new(0.0, 0.0, 5.0));
//!
//! let p = motion.transform_point(Vec3::new(0.0, 0.0, 1.0));
//! assert_eq!(p, Vec3::new(1.0, 0.0, 5.0));
//! ```

#![warn(unused_must_use)]

pub mod angle;
pub mod config;
pub mod dual_quaternion;
pub mod interop;
pub mod matrix;
pub mod quaternion;
pub mod real;
pub mod vector;

// Re-exports for convenience
pub use angle::Angle;
pub use config::Tolerance;
pub use dual_quaternion::DualQuaternion;
pub use matrix::{Mat3, Mat4};
pub use quaternion::Quaternion;
pub use real::Real;
pub use vector::{Vec2, Vec3};

/// Single-precision aliases
pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Quatf = Quaternion<f32>;
pub type DualQuatf = DualQuaternion<f32>;
pub type Mat3f = Mat3<f32>;
pub type Mat4f = Mat4<f32>;

/// Double-precision aliases
pub type Vec2d = Vec2<f64>;
pub type Vec3d = Vec3<f64>;
pub type Quatd = Quaternion<f64>;
pub type DualQuatd = DualQuaternion<f64>;
pub type Mat3d = Mat3<f64>;
pub type Mat4d = Mat4<f64>;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for gyre-core
///
/// Every operation has a silent default that leaves degenerate values
/// unchanged. These errors are only produced by the `try_*` variants, for
/// callers that would rather reject bad input than carry it forward.
///
/// # Example
/// ```
/// use gyre_core::{Error, Quaternion};
///
/// match Quaternion::<f32>::new(0.0, 0.0, 0.0, 0.0).try_unit() {
///     Ok(q) => println!("unit: {q:?}"),
///     Err(Error::DegenerateLength(what)) => println!("cannot normalize {what}"),
///     Err(e) => panic!("unexpected: {e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[must_use = "errors must be handled or explicitly ignored with let _ = ..."]
#[non_exhaustive]
pub enum Error {
    /// A vector, quaternion or axis had (near) zero length.
    /// Handle by: checking the input source, or falling back to identity.
    #[error("Degenerate length: {0} cannot be normalized")]
    DegenerateLength(&'static str),

    /// An input was NaN or infinite.
    /// Handle by: validating upstream arithmetic before constructing values.
    #[error("Non-finite value: {0}")]
    NonFinite(&'static str),

    /// A rotation was required to be unit length but was not.
    /// Handle by: normalizing first, or using the non-strict operation.
    #[error("{what} is not unit length (length = {length})")]
    NotUnit {
        /// What was checked
        what: &'static str,
        /// The measured length, widened to f64
        length: f64,
    },

    /// Invalid tolerance configuration.
    /// Handle by: validating config before use, checking parameter ranges.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for gyre-core operations
pub type Result<T> = std::result::Result<T, Error>;
