//! This is the documentation for the **gaussbeam** package, a thin lens imaging calculator for
//! Gaussian (TEM00) laser beams.
//!
//! Two inverse problems of a single thin lens imaging an object beam waist onto an image beam
//! waist are solved by dense sampling and piecewise-linear interpolation:
//! - [`WaistFocalSolver`](solvers::WaistFocalSolver): from a desired image beam and the total
//!   distance, find the object waist and the focal length of the lens.
//! - [`MagnificationSolver`](solvers::MagnificationSolver): from the image waist, the total distance
//!   and the focal length, find the magnification, the object distance and the minimum numerical
//!   aperture of the lens.
//!
//! The geometric optics counterpart is found in [`ray_optics`]. Sampled beam radius profiles of a
//! solution ([`profile`]) can be plotted ([`plottable`]) or exported as CSV.
//!
//! # Units
//! The formula layer works on plain `f64` values with waists in µm, distances in mm and
//! wavelengths in nm. The typed API uses [`uom`] lengths.
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod error;
pub mod gaussian_beam;
pub mod plottable;
pub mod profile;
pub mod ray_optics;
pub mod solver_config;
pub mod solvers;
pub mod utils;

pub use gaussian_beam::GaussianBeam;
pub use solver_config::SolverConfig;

/// Return the version information of the currently built `gaussbeam` executable.
#[must_use]
pub fn get_version() -> String {
    format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_NAME"))
}
