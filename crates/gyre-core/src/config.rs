//! Tolerance configuration
//!
//! The defaults are what the `==` operators and the plain (non `_with`)
//! operations use. A [`Tolerance`] can be tightened, loosened, or loaded
//! from any serde format for callers that need different thresholds.

use crate::{Error, Real, Result};
use serde::{Deserialize, Serialize};

/// Comparison and interpolation thresholds for one precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance<P: Real> {
    /// Absolute difference below which two components compare equal
    pub epsilon: P,
    /// Maximum deviation of a length from 1 for a value to count as unit
    pub unit_epsilon: P,
    /// Quaternion dot product above which slerp falls back to normalized lerp
    pub slerp_threshold: P,
}

impl<P: Real> Default for Tolerance<P> {
    fn default() -> Self {
        Self {
            epsilon: P::TOLERANCE,
            unit_epsilon: P::TOLERANCE * P::lit(10.0),
            slerp_threshold: P::lit(0.9995),
        }
    }
}

impl<P: Real> Tolerance<P> {
    /// Tight tolerances: ten times stricter than the defaults
    pub fn strict() -> Self {
        let base = Self::default();
        Self {
            epsilon: base.epsilon / P::lit(10.0),
            unit_epsilon: base.unit_epsilon / P::lit(10.0),
            slerp_threshold: P::lit(0.99995),
        }
    }

    /// Loose tolerances suited to accumulated single-precision error
    pub fn loose() -> Self {
        Self {
            epsilon: P::lit(1e-3),
            unit_epsilon: P::lit(1e-2),
            ..Default::default()
        }
    }

    /// Set the equality epsilon
    pub fn with_epsilon(mut self, epsilon: P) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the unit-length epsilon
    pub fn with_unit_epsilon(mut self, unit_epsilon: P) -> Self {
        self.unit_epsilon = unit_epsilon;
        self
    }

    /// Set the slerp near-parallel threshold
    pub fn with_slerp_threshold(mut self, slerp_threshold: P) -> Self {
        self.slerp_threshold = slerp_threshold;
        self
    }

    /// Compare two scalars with this tolerance
    #[inline]
    pub fn approx_eq(&self, a: P, b: P) -> bool {
        (a - b).abs() < self.epsilon
    }

    /// Whether a length counts as unit under this tolerance
    #[inline]
    pub fn is_unit_length(&self, length: P) -> bool {
        (length - P::one()).abs() <= self.unit_epsilon
    }

    /// Check that every threshold is finite and in range
    pub fn validate(&self) -> Result<()> {
        let err = |msg: String| {
            tracing::debug!("Rejected tolerance config: {}", msg);
            Err(Error::Config(msg))
        };

        if !self.epsilon.is_finite() || self.epsilon <= P::zero() {
            return err(format!("epsilon must be positive, got {}", self.epsilon));
        }
        if !self.unit_epsilon.is_finite() || self.unit_epsilon <= P::zero() {
            return err(format!(
                "unit_epsilon must be positive, got {}",
                self.unit_epsilon
            ));
        }
        if !(self.slerp_threshold > P::zero() && self.slerp_threshold < P::one()) {
            return err(format!(
                "slerp_threshold must be in (0, 1), got {}",
                self.slerp_threshold
            ));
        }
        Ok(())
    }

    /// Convert the thresholds to another precision
    pub fn as_precision<Q: Real>(&self) -> Tolerance<Q> {
        Tolerance {
            epsilon: self.epsilon.cast(),
            unit_epsilon: self.unit_epsilon.cast(),
            slerp_threshold: self.slerp_threshold.cast(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_precision() {
        assert_eq!(Tolerance::<f32>::default().epsilon, f32::TOLERANCE);
        assert_eq!(Tolerance::<f64>::default().epsilon, f64::TOLERANCE);
        assert!(Tolerance::<f32>::default().validate().is_ok());
        assert!(Tolerance::<f64>::strict().validate().is_ok());
        assert!(Tolerance::<f64>::loose().validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let tol = Tolerance::<f64>::default()
            .with_epsilon(1e-6)
            .with_unit_epsilon(1e-4)
            .with_slerp_threshold(0.99);
        assert_eq!(tol.epsilon, 1e-6);
        assert_eq!(tol.unit_epsilon, 1e-4);
        assert_eq!(tol.slerp_threshold, 0.99);
        assert!(tol.approx_eq(1.0, 1.0 + 1e-7));
        assert!(!tol.approx_eq(1.0, 1.0 + 1e-5));
        assert!(tol.is_unit_length(1.00005));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = Tolerance::<f32>::default().with_epsilon(0.0);
        assert!(matches!(bad.validate(), Err(Error::Config(_))));

        let bad = Tolerance::<f64>::default().with_unit_epsilon(f64::NAN);
        assert!(bad.validate().is_err());

        let bad = Tolerance::<f64>::default().with_slerp_threshold(1.5);
        assert!(bad.validate().is_err());

        // A threshold of 1 would send parallel inputs through sin(0)
        let bad = Tolerance::<f64>::default().with_slerp_threshold(1.0);
        assert!(matches!(bad.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_json() {
        let tol: Tolerance<f64> =
            serde_json::from_str(r#"{ "epsilon": 1e-6, "slerp_threshold": 0.999 }"#).unwrap();
        assert_eq!(tol.epsilon, 1e-6);
        assert_eq!(tol.slerp_threshold, 0.999);
        // Missing fields fall back to the precision defaults
        assert_eq!(tol.unit_epsilon, Tolerance::<f64>::default().unit_epsilon);
        assert!(tol.validate().is_ok());
    }

    #[test]
    fn test_as_precision() {
        let tol = Tolerance::<f64>::default().with_epsilon(0.25);
        let narrow: Tolerance<f32> = tol.as_precision();
        assert_eq!(narrow.epsilon, 0.25);
    }
}
