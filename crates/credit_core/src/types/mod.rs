//! Core error types shared by every layer.
//!
//! # Re-exports
//!
//! - [`ParameterError`], [`SolverError`] from `error`

pub mod error;

pub use error::{ParameterError, SolverError};

use num_traits::Float;

/// Reject NaN and infinite inputs, naming the parameter in the error.
pub fn ensure_finite<T: Float>(name: &'static str, value: T) -> Result<T, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite {
            name,
            value: value.to_f64().unwrap_or(f64::NAN),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5_f64), Ok(1.5));
        assert!(matches!(
            ensure_finite("x", f64::NAN),
            Err(ParameterError::NonFinite { name: "x", .. })
        ));
        assert!(ensure_finite("x", f32::NEG_INFINITY).is_err());
    }
}
