//! Error type shared by the cost engine, comparator, and catalog lookups.

use std::fmt;

/// Errors raised by the cost engine.
///
/// All computation is deterministic, so neither variant is transient:
/// callers either fix the input or report the failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CostError {
    /// An input was outside its valid range.
    InvalidArgument {
        /// Name of the offending argument (e.g. `"electric_fraction"`).
        argument: String,
        /// Human-readable constraint description.
        message: String,
    },
    /// A vehicle name was not present in the catalog.
    NotFound {
        /// The name that was looked up.
        name: String,
    },
}

impl CostError {
    /// Shorthand for building an [`CostError::InvalidArgument`].
    pub fn invalid(argument: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for building a [`CostError::NotFound`].
    pub fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { argument, message } => {
                write!(f, "invalid argument `{argument}`: {message}")
            }
            Self::NotFound { name } => write!(f, "vehicle \"{name}\" not found"),
        }
    }
}

impl std::error::Error for CostError {}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, CostError>;

/// Fails with `InvalidArgument` unless `value` is finite and `>= 0`.
pub(crate) fn ensure_non_negative(argument: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CostError::invalid(argument, format!("must be >= 0, got {value}")))
    }
}

/// Fails with `InvalidArgument` unless `value` is finite and `> 0`.
pub(crate) fn ensure_positive(argument: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CostError::invalid(argument, format!("must be > 0, got {value}")))
    }
}

/// Fails with `InvalidArgument` unless `value` lies in `[0.0, 1.0]`.
pub(crate) fn ensure_fraction(argument: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CostError::invalid(
            argument,
            format!("must be in [0.0, 1.0], got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_argument() {
        let e = CostError::invalid("mpg", "must be > 0");
        assert_eq!(e.to_string(), "invalid argument `mpg`: must be > 0");
    }

    #[test]
    fn display_not_found() {
        let e = CostError::not_found("Model Z");
        assert_eq!(e.to_string(), "vehicle \"Model Z\" not found");
    }

    #[test]
    fn guards_reject_nan() {
        assert!(ensure_non_negative("x", f64::NAN).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
        assert!(ensure_fraction("x", f64::NAN).is_err());
    }

    #[test]
    fn fraction_bounds_are_inclusive() {
        assert!(ensure_fraction("f", 0.0).is_ok());
        assert!(ensure_fraction("f", 1.0).is_ok());
        assert!(ensure_fraction("f", 1.0001).is_err());
        assert!(ensure_fraction("f", -0.1).is_err());
    }
}
