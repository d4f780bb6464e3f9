//! Module for creating and evaluating one dimensional sample grids

#![warn(missing_docs)]
use crate::error::{GbError, GbResult};
use log::warn;
use nalgebra::{DVector, Scalar};
use num::{Float, NumCast};
use rayon::prelude::*;

/// Creates a linearly spaced Vector (Matrix with1 column and `num` rows) from `start` to `end`
///
/// The values are computed as `start + i * step` and the last value is set to `end` exactly.
/// # Attributes
/// - `start`:  Start value of the array
/// - `end`:    end value of the array
/// - `num`:    number of elements
///
/// # Errors
/// This function will return an error if
/// - `start` or `end` are not finite
/// - `num` cannot be casted to the float type
pub fn linspace<T: Float + Scalar>(start: T, end: T, num: usize) -> GbResult<DVector<T>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(GbError::Other("start and end values must be finite!".into()));
    };

    let mut linspace = DVector::<T>::from_element(num, start);
    if num < 2 {
        warn!("Using linspace with less than two elements results in an empty Vector for num=0 or a Vector with one entry being num=start");
        return Ok(linspace);
    }

    let bin_size = (end - start)
        / <T as NumCast>::from(num - 1)
            .ok_or_else(|| GbError::Other("Cannot Cast usize to float type!".into()))?;

    for (step, val) in linspace.iter_mut().enumerate() {
        let step = <T as NumCast>::from(step)
            .ok_or_else(|| GbError::Other("Cannot Cast usize to float type!".into()))?;
        *val = *val + step * bin_size;
    }
    linspace[num - 1] = end;
    Ok(linspace)
}

/// Evaluate `func` on every sample of `grid`.
///
/// The evaluation is done in parallel. Each element only depends on its own sample, so the result
/// is identical to a serial `map`.
pub fn map_grid<F>(grid: &DVector<f64>, func: F) -> DVector<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    DVector::from_vec(grid.as_slice().par_iter().map(|x| func(*x)).collect())
}
