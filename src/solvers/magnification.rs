#![warn(missing_docs)]
//! Gaussian magnification of a given lens.
//!
//! Given the image waist `wi`, the total distance `d`, the focal length `f` and the wavelength, find
//! the object distance `zo`, the object waist `wo` (hence the magnification `M = wi/wo`) and the
//! minimum numerical aperture of the lens.
//!
//! The image distance `zi` is swept over `[d/2, d - f]` (magnification above one, so `zo < zi`).
//! For every candidate the object distance follows in two ways: from the lens equation applied to
//! the phase front curvatures and from `zo = d - zi`. The solution is the zero crossing of their
//! difference, found by interpolation.
use crate::{
    error::{GbError, GbResult},
    gaussian_beam::{curvature_radius_grid, rayleigh_range, GaussianBeam},
    profile::{BeamProfiles, ProfileSampler},
    ray_optics::LensSystem,
    solver_config::SolverConfig,
    utils::{
        griddata::{linspace, map_grid},
        interpolation::{interp, OutOfRangePolicy},
        math_utils::ensure_positive,
    },
};
use log::debug;
use nalgebra::DVector;
use serde::Serialize;
use std::f64::consts::PI;
use uom::si::{
    f64::Length,
    length::{micrometer, millimeter, nanometer},
};

/// Raw result of [`MagnificationSolver::solve_raw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMagnification {
    /// magnification `wi/wo`
    pub magnification: f64,
    /// object waist to lens (mm)
    pub object_distance: f64,
    /// object waist (µm)
    pub object_waist: f64,
    /// minimum numerical aperture of the lens
    pub min_numerical_aperture: f64,
}

/// Solver for magnification, object distance and minimum numerical aperture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnificationSolver {
    num_samples: usize,
    out_of_range: OutOfRangePolicy,
}
impl Default for MagnificationSolver {
    fn default() -> Self {
        Self::from(&SolverConfig::default())
    }
}
impl From<&SolverConfig> for MagnificationSolver {
    fn from(config: &SolverConfig) -> Self {
        Self {
            num_samples: config.num_samples,
            out_of_range: config.out_of_range,
        }
    }
}
impl MagnificationSolver {
    /// Solve in raw units: `wi` in µm, `d` and `f` in mm, `lambda` in nm.
    ///
    /// # Errors
    /// This function returns
    /// - a [`GbError::Domain`] if an input is not positive or `f >= d/2`.
    /// - a [`GbError::Interpolation`] if the two object distance estimates do not cross within the
    ///   sweep (only with [`OutOfRangePolicy::Fail`]).
    /// - a [`GbError::Config`] if less than two samples are configured.
    pub fn solve_raw(&self, wi: f64, d: f64, f: f64, lambda: f64) -> GbResult<RawMagnification> {
        ensure_positive(wi, "image waist")?;
        ensure_positive(d, "total distance")?;
        ensure_positive(f, "focal length")?;
        ensure_positive(lambda, "wavelength")?;
        if self.num_samples < 2 {
            return Err(GbError::Config(format!(
                "at least two samples are necessary (got {})",
                self.num_samples
            )));
        }
        if f >= d / 2.0 {
            return Err(GbError::Domain(format!(
                "focal length {f} mm must be below half the total distance {d} mm"
            )));
        }
        let zi = linspace(d / 2.0, d - f, self.num_samples)?;
        let ri = rayleigh_range(wi, lambda);
        // phase front radius of the image beam at the lens
        let fi = curvature_radius_grid(&zi, wi, lambda)?;
        // phase front radius the object beam must have at the lens
        let fo = fi.map(|fi| 1.0 / (1.0 / f - 1.0 / fi));
        // Rayleigh range of a beam whose waist equals the radius at the lens
        let r = map_grid(&zi, |z| ri * (1.0 + z.powi(2) / ri.powi(2)));
        let zof = r.zip_map(&fo, |r, fo| r.powi(2) / fo / (1.0 + r.powi(2) / fo.powi(2)));
        let zod = zi.map(|z| d - z);
        let mismatch = &zof - &zod;
        debug!(
            "object distance mismatch from {} to {} mm",
            mismatch[0],
            mismatch[mismatch.len() - 1]
        );
        let zo = interp(0.0, &mismatch, &zod, self.out_of_range)?;
        let object_rayleigh: DVector<f64> = fo.zip_map(&r, |fo, r| zo * fo / r);
        let ro = interp(0.0, &mismatch, &object_rayleigh, self.out_of_range)?;
        let wo = (ro * lambda / PI).sqrt();
        let aperture = r.map(|r| 1e-3 * (r * lambda / PI).sqrt() / zo);
        let na = interp(0.0, &mismatch, &aperture, self.out_of_range)?;
        debug!("zo = {zo} mm, ro = {ro} mm, wo = {wo} µm, na = {na}");
        Ok(RawMagnification {
            magnification: wi / wo,
            object_distance: zo,
            object_waist: wo,
            min_numerical_aperture: na,
        })
    }
    /// Solve for magnification, object distance and minimum numerical aperture.
    ///
    /// # Attributes
    /// - `image_waist`: waist of the image beam
    /// - `distance`: distance from object waist to image waist
    /// - `focal_length`: focal length of the imaging lens
    /// - `wavelength`: wavelength of both beams
    /// # Errors
    /// See [`MagnificationSolver::solve_raw`].
    pub fn solve(
        &self,
        image_waist: Length,
        distance: Length,
        focal_length: Length,
        wavelength: Length,
    ) -> GbResult<MagnificationSolution> {
        let raw = self.solve_raw(
            image_waist.get::<micrometer>(),
            distance.get::<millimeter>(),
            focal_length.get::<millimeter>(),
            wavelength.get::<nanometer>(),
        )?;
        let object_distance = Length::new::<millimeter>(raw.object_distance);
        Ok(MagnificationSolution {
            magnification: raw.magnification,
            object_distance,
            image_distance: distance - object_distance,
            min_numerical_aperture: raw.min_numerical_aperture,
            object_waist: Length::new::<micrometer>(raw.object_waist),
            image_waist,
            focal_length,
            wavelength,
        })
    }
}

/// Result of [`MagnificationSolver::solve`] together with the input geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnificationSolution {
    /// Gaussian magnification `wi/wo`
    pub magnification: f64,
    /// distance object waist to lens
    pub object_distance: Length,
    /// distance lens to image waist (`d - zo`)
    pub image_distance: Length,
    /// minimum numerical aperture of the lens
    pub min_numerical_aperture: f64,
    /// waist of the object beam
    pub object_waist: Length,
    /// waist of the image beam
    pub image_waist: Length,
    /// focal length of the lens
    pub focal_length: Length,
    /// wavelength of both beams
    pub wavelength: Length,
}
impl MagnificationSolution {
    /// The lens of this setup.
    ///
    /// # Errors
    ///
    /// This function returns a [`GbError::Domain`] if the focal length is not positive.
    pub fn lens_system(&self) -> GbResult<LensSystem> {
        LensSystem::new(
            self.focal_length,
            self.object_distance + self.image_distance,
        )
    }
    /// Sample the resolved object and image beams.
    ///
    /// # Errors
    ///
    /// This function returns an error if the beams are invalid or the sampling fails.
    pub fn beam_profiles(&self, sampler: &ProfileSampler) -> GbResult<BeamProfiles> {
        let object = GaussianBeam::new(self.object_waist, self.wavelength)?;
        let image = GaussianBeam::new(self.image_waist, self.wavelength)?;
        sampler.sample(&object, self.object_distance, &image, self.image_distance)
    }
}
