#![warn(missing_docs)]
//! Propagation formulas of a circular Gaussian beam.
//!
//! The free functions work on plain `f64` values in the units used throughout the solvers:
//! beam waists and radii in micrometers, axial distances in millimeters and the wavelength in
//! nanometers. With this choice the Rayleigh range `π·w0²/λ` directly comes out in millimeters.
//!
//! [`GaussianBeam`] wraps the same formulas behind `uom` lengths.
use crate::{
    error::{GbError, GbResult},
    utils::{griddata::map_grid, math_utils::ensure_positive},
};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uom::si::{
    f64::Length,
    length::{micrometer, millimeter, nanometer},
};

/// Rayleigh range `zr = π·w0²/λ` in mm for a waist `w0` in µm and a wavelength `lambda` in nm.
#[must_use]
pub fn rayleigh_range(w0: f64, lambda: f64) -> f64 {
    PI * w0.powi(2) / lambda
}

/// Radius of curvature (mm) of the phase front at distance `z` (mm) from the beam waist.
///
/// `R = z·(1 + zr²/z²)`. The phase front is flat at the waist, so `z = 0` has no finite radius.
/// # Errors
/// This function returns a [`GbError::Domain`] if `z` is zero or not finite.
pub fn curvature_radius(z: f64, w0: f64, lambda: f64) -> GbResult<f64> {
    if z == 0.0 || !z.is_finite() {
        return Err(GbError::Domain(format!(
            "radius of curvature is undefined at z = {z}"
        )));
    }
    let zr = rayleigh_range(w0, lambda);
    Ok(z * (1.0 + zr.powi(2) / z.powi(2)))
}

/// Beam radius (µm) at distance `z` (mm) from a waist `w0` (µm).
///
/// `w = w0·sqrt(1 + (z/zr)²)`, symmetric in `z` and strictly increasing in `|z|`.
#[must_use]
pub fn waist_at(z: f64, w0: f64, lambda: f64) -> f64 {
    let zr = rayleigh_range(w0, lambda);
    w0 * (1.0 + (z / zr).powi(2)).sqrt()
}

/// Elementwise [`curvature_radius`] over a grid of axial positions.
/// # Errors
/// This function returns a [`GbError::Domain`] if any position is zero or not finite.
pub fn curvature_radius_grid(z: &DVector<f64>, w0: f64, lambda: f64) -> GbResult<DVector<f64>> {
    if let Some(bad) = z.iter().find(|z| **z == 0.0 || !z.is_finite()) {
        return Err(GbError::Domain(format!(
            "radius of curvature is undefined at z = {bad}"
        )));
    }
    let zr = rayleigh_range(w0, lambda);
    Ok(map_grid(z, |z| z * (1.0 + zr.powi(2) / z.powi(2))))
}

/// Elementwise [`waist_at`] over a grid of axial positions.
#[must_use]
pub fn waist_at_grid(z: &DVector<f64>, w0: f64, lambda: f64) -> DVector<f64> {
    map_grid(z, |z| waist_at(z, w0, lambda))
}

/// A circular Gaussian beam given by its waist and wavelength.
///
/// Axial positions passed to the methods are measured from the waist location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianBeam {
    waist: Length,
    wavelength: Length,
}
impl GaussianBeam {
    /// Creates a new [`GaussianBeam`].
    ///
    /// # Errors
    ///
    /// This function returns a [`GbError::Domain`] if the waist or the wavelength is not positive and finite.
    pub fn new(waist: Length, wavelength: Length) -> GbResult<Self> {
        ensure_positive(waist.get::<micrometer>(), "beam waist")?;
        ensure_positive(wavelength.get::<nanometer>(), "wavelength")?;
        Ok(Self { waist, wavelength })
    }
    /// Returns the waist (minimum beam radius) of this [`GaussianBeam`].
    #[must_use]
    pub const fn waist(&self) -> Length {
        self.waist
    }
    /// Returns the wavelength of this [`GaussianBeam`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Returns the Rayleigh range of this [`GaussianBeam`].
    #[must_use]
    pub fn rayleigh_range(&self) -> Length {
        Length::new::<millimeter>(rayleigh_range(
            self.waist.get::<micrometer>(),
            self.wavelength.get::<nanometer>(),
        ))
    }
    /// Returns the beam radius at the axial position `z`.
    #[must_use]
    pub fn radius_at(&self, z: Length) -> Length {
        Length::new::<micrometer>(waist_at(
            z.get::<millimeter>(),
            self.waist.get::<micrometer>(),
            self.wavelength.get::<nanometer>(),
        ))
    }
    /// Returns the phase front radius of curvature at the axial position `z`.
    ///
    /// # Errors
    ///
    /// This function returns a [`GbError::Domain`] if `z` is zero (the waist position).
    pub fn curvature_radius_at(&self, z: Length) -> GbResult<Length> {
        curvature_radius(
            z.get::<millimeter>(),
            self.waist.get::<micrometer>(),
            self.wavelength.get::<nanometer>(),
        )
        .map(Length::new::<millimeter>)
    }
}
