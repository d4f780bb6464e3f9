//! Small checks shared by the solvers
use crate::error::{GbError, GbResult};

/// Check that a physical quantity is finite and strictly positive.
///
/// # Errors
///
/// This function returns a [`GbError::Domain`] naming `quantity` if `value` is zero, negative, NaN or infinite.
pub fn ensure_positive(value: f64, quantity: &str) -> GbResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GbError::Domain(format!(
            "{quantity} must be positive and finite (got {value})"
        )))
    }
}
