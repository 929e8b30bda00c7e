//! Error types for the assembly core.

use thiserror::Error;

/// Errors that abort a locomotive build.
///
/// Every failure is fatal: the builder never hands back a partial assembly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// A size, radius, depth, scale or material value was out of range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// What the value was required to satisfy.
        reason: &'static str,
    },

    /// An explicit mesh had a short face or an out-of-range vertex index.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

impl AssemblyError {
    pub(crate) fn non_positive(name: &'static str, value: f32) -> Self {
        AssemblyError::InvalidParameter {
            name,
            value,
            reason: "must be finite and greater than zero",
        }
    }

    pub(crate) fn out_of_unit_range(name: &'static str, value: f32) -> Self {
        AssemblyError::InvalidParameter {
            name,
            value,
            reason: "must lie in [0, 1]",
        }
    }
}

/// Convenience alias for results produced by the assembly core.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Checks that a dimension is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AssemblyError::non_positive(name, value))
    }
}

/// Checks that a value lies in the closed unit interval.
pub(crate) fn require_unit(name: &'static str, value: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AssemblyError::out_of_unit_range(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(require_positive("radius", 0.25), Ok(0.25));
    }

    #[test]
    fn zero_negative_and_nan_are_rejected() {
        for value in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = require_positive("depth", value).unwrap_err();
            assert!(matches!(
                err,
                AssemblyError::InvalidParameter { name: "depth", .. }
            ));
        }
    }

    #[test]
    fn unit_range_bounds_are_inclusive() {
        assert!(require_unit("metallic", 0.0).is_ok());
        assert!(require_unit("metallic", 1.0).is_ok());
        assert!(require_unit("metallic", 1.01).is_err());
        assert!(require_unit("roughness", f32::NAN).is_err());
    }

    #[test]
    fn display_names_the_parameter() {
        let err = AssemblyError::non_positive("radius", -2.0);
        assert_eq!(
            err.to_string(),
            "invalid parameter `radius` = -2: must be finite and greater than zero"
        );
    }
}
