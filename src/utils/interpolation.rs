//! Piecewise-linear interpolation on monotonic sample tables.
//!
//! This is the inversion step of the sample-and-interpolate root finding used by the solvers:
//! a monotonic function is sampled densely and `interp` looks up the abscissa belonging to a
//! given target value.
#![warn(missing_docs)]
use crate::error::{GbError, GbResult};
use log::warn;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Behaviour of [`interp`] if the target lies outside the sampled abscissa range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Return an [`GbError::Interpolation`] error. The sampled window does not bracket the root.
    #[default]
    Fail,
    /// Log a warning and return the function value at the nearest table edge.
    Clamp,
}

#[derive(Debug, PartialEq, Eq)]
enum Ordering {
    Ascending,
    Descending,
}

fn strict_ordering(xp: &[f64]) -> Option<Ordering> {
    if xp.windows(2).all(|w| w[1] > w[0]) {
        Some(Ordering::Ascending)
    } else if xp.windows(2).all(|w| w[1] < w[0]) {
        Some(Ordering::Descending)
    } else {
        None
    }
}

/// One-dimensional linear interpolation of `fp(xp)` at `x`.
///
/// `xp` must be strictly monotonic. A strictly descending table is reversed (together with `fp`)
/// before the lookup. The bracketing interval is found by binary search.
/// # Attributes
/// - `x`: position at which the table is evaluated
/// - `xp`: abscissa samples
/// - `fp`: function values belonging to `xp`
/// - `policy`: handling of an `x` outside of the sampled range. See [`OutOfRangePolicy`]
/// # Errors
/// This function returns a [`GbError::Interpolation`] if
/// - `xp` and `fp` have different lengths or less than two entries
/// - `x` is not finite
/// - `xp` is not strictly monotonic (this includes NaN entries)
/// - `x` is outside the range of `xp` and `policy` is [`OutOfRangePolicy::Fail`]
pub fn interp(
    x: f64,
    xp: &DVector<f64>,
    fp: &DVector<f64>,
    policy: OutOfRangePolicy,
) -> GbResult<f64> {
    if xp.len() != fp.len() {
        return Err(GbError::Interpolation(format!(
            "sample tables differ in length ({} != {})",
            xp.len(),
            fp.len()
        )));
    }
    if xp.len() < 2 {
        return Err(GbError::Interpolation(
            "at least two samples are necessary".into(),
        ));
    }
    if !x.is_finite() {
        return Err(GbError::Interpolation(format!(
            "target value must be finite (got {x})"
        )));
    }
    match strict_ordering(xp.as_slice()) {
        Some(Ordering::Ascending) => interp_ascending(x, xp.as_slice(), fp.as_slice(), policy),
        Some(Ordering::Descending) => {
            let xs: Vec<f64> = xp.iter().rev().copied().collect();
            let fs: Vec<f64> = fp.iter().rev().copied().collect();
            interp_ascending(x, &xs, &fs, policy)
        }
        None => Err(GbError::Interpolation(
            "abscissa samples are not strictly monotonic".into(),
        )),
    }
}

fn interp_ascending(x: f64, xs: &[f64], fs: &[f64], policy: OutOfRangePolicy) -> GbResult<f64> {
    let last = xs.len() - 1;
    if x < xs[0] || x > xs[last] {
        return match policy {
            OutOfRangePolicy::Fail => Err(GbError::Interpolation(format!(
                "target {x} is not bracketed by the sampled range [{}, {}]",
                xs[0], xs[last]
            ))),
            OutOfRangePolicy::Clamp => {
                warn!(
                    "target {x} outside of sampled range [{}, {}], using edge value",
                    xs[0], xs[last]
                );
                Ok(if x < xs[0] { fs[0] } else { fs[last] })
            }
        };
    }
    let idx = xs.partition_point(|v| *v <= x);
    if idx > last {
        return Ok(fs[last]);
    }
    let lo = idx - 1;
    let slope = (fs[idx] - fs[lo]) / (xs[idx] - xs[lo]);
    Ok(slope * (x - xs[lo]) + fs[lo])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::{griddata::linspace, test_helper::test_helper::check_warning_prefixes};
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn ascending_table() {
        let xp = DVector::from_vec(vec![0.0, 1.0, 2.0, 4.0]);
        let fp = DVector::from_vec(vec![0.0, 10.0, 20.0, 0.0]);
        let p = OutOfRangePolicy::Fail;
        assert_relative_eq!(interp(0.5, &xp, &fp, p).unwrap(), 5.0);
        assert_relative_eq!(interp(3.0, &xp, &fp, p).unwrap(), 10.0);
        assert_relative_eq!(interp(1.0, &xp, &fp, p).unwrap(), 10.0);
        assert_relative_eq!(interp(0.0, &xp, &fp, p).unwrap(), 0.0);
        assert_relative_eq!(interp(4.0, &xp, &fp, p).unwrap(), 0.0);
    }
    #[test]
    fn descending_table() {
        let xp = DVector::from_vec(vec![4.0, 2.0, 1.0, 0.0]);
        let fp = DVector::from_vec(vec![40.0, 20.0, 10.0, 0.0]);
        assert_relative_eq!(
            interp(3.0, &xp, &fp, OutOfRangePolicy::Fail).unwrap(),
            30.0
        );
        assert_relative_eq!(
            interp(0.25, &xp, &fp, OutOfRangePolicy::Fail).unwrap(),
            2.5
        );
    }
    #[test]
    fn inverse_of_monotonic_function() {
        let x = linspace(1.0, 3.0, 1001).unwrap();
        let y = x.map(|v| v * v * v);
        let root = interp(8.0, &y, &x, OutOfRangePolicy::Fail).unwrap();
        assert_relative_eq!(root, 2.0, max_relative = 1e-5);
    }
    #[test]
    fn not_bracketed() {
        let xp = DVector::from_vec(vec![0.0, 1.0]);
        let fp = DVector::from_vec(vec![5.0, 6.0]);
        assert_matches!(
            interp(1.5, &xp, &fp, OutOfRangePolicy::Fail),
            Err(GbError::Interpolation(_))
        );
        assert_matches!(
            interp(-0.1, &xp, &fp, OutOfRangePolicy::Fail),
            Err(GbError::Interpolation(_))
        );
    }
    #[test]
    fn clamp_out_of_range() {
        testing_logger::setup();
        let xp = DVector::from_vec(vec![0.0, 1.0]);
        let fp = DVector::from_vec(vec![5.0, 6.0]);
        assert_relative_eq!(
            interp(1.5, &xp, &fp, OutOfRangePolicy::Clamp).unwrap(),
            6.0
        );
        assert_relative_eq!(
            interp(-3.0, &xp, &fp, OutOfRangePolicy::Clamp).unwrap(),
            5.0
        );
        check_warning_prefixes(vec!["target 1.5 outside", "target -3 outside"]);
    }
    #[test]
    fn invalid_tables() {
        let p = OutOfRangePolicy::Clamp;
        let xp = DVector::from_vec(vec![0.0, 1.0, 0.5]);
        let fp = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        assert_matches!(interp(0.2, &xp, &fp, p), Err(GbError::Interpolation(_)));
        let xp = DVector::from_vec(vec![0.0, 1.0, 1.0]);
        assert_matches!(interp(0.2, &xp, &fp, p), Err(GbError::Interpolation(_)));
        let xp = DVector::from_vec(vec![0.0, f64::NAN, 2.0]);
        assert_matches!(interp(0.2, &xp, &fp, p), Err(GbError::Interpolation(_)));
        let xp = DVector::from_vec(vec![0.0, 1.0]);
        assert_matches!(interp(0.2, &xp, &fp, p), Err(GbError::Interpolation(_)));
        let single = DVector::from_vec(vec![0.0]);
        assert_matches!(
            interp(0.0, &single, &single, p),
            Err(GbError::Interpolation(_))
        );
        let xp = DVector::from_vec(vec![0.0, 1.0]);
        let fp = DVector::from_vec(vec![0.0, 1.0]);
        assert_matches!(
            interp(f64::NAN, &xp, &fp, p),
            Err(GbError::Interpolation(_))
        );
    }
    #[test]
    fn policy_serialization() {
        assert_eq!(OutOfRangePolicy::default(), OutOfRangePolicy::Fail);
        assert_eq!(OutOfRangePolicy::Clamp.to_string(), "clamp");
        let policy: OutOfRangePolicy = serde_yaml::from_str("clamp").unwrap();
        assert_eq!(policy, OutOfRangePolicy::Clamp);
    }
}
