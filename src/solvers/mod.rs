//! Sample-and-interpolate solvers for single lens Gaussian beam imaging.
//!
//! Both solvers sweep one unknown over a dense uniform grid, evaluate a monotonic quantity for every
//! candidate and invert it with [`interp`](crate::utils::interpolation::interp) at the target value.
//! There is no iteration: every call performs a fixed number of formula evaluations.
pub mod magnification;
pub mod waist_focal;

pub use magnification::{MagnificationSolution, MagnificationSolver};
pub use waist_focal::{WaistFocalSolution, WaistFocalSolver};
