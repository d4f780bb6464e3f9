#![warn(missing_docs)]
//! Construction of an imaging setup from the image side.
//!
//! Given the image waist `wi`, its distance `zi` to the lens, the total waist-to-waist distance `d`
//! and the wavelength, find the object waist `wo` and the focal length `f` of the lens.
//!
//! Both beams must have the same radius at the lens. For a fixed object distance `zo = d - zi` the
//! radius at the lens is monotonic in `wo` on either side of `wo = sqrt(zo·λ/π)`, so it is sampled
//! around the ray optics estimate `wi·zo/zi` and inverted by interpolation. The focal length then
//! follows from the phase front curvatures of both beams at the lens.
use crate::{
    error::{GbError, GbResult},
    gaussian_beam::{curvature_radius, waist_at, GaussianBeam},
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
use serde::Serialize;
use uom::si::{
    f64::Length,
    length::{micrometer, millimeter, nanometer},
};

/// Solver for object waist and focal length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaistFocalSolver {
    num_samples: usize,
    waist_window: f64,
    out_of_range: OutOfRangePolicy,
}
impl Default for WaistFocalSolver {
    /// 1001 candidates within ±5 µm around the estimate, failing if the root is not bracketed.
    fn default() -> Self {
        Self::from(&SolverConfig::default())
    }
}
impl From<&SolverConfig> for WaistFocalSolver {
    fn from(config: &SolverConfig) -> Self {
        Self {
            num_samples: config.num_samples,
            waist_window: config.waist_window,
            out_of_range: config.out_of_range,
        }
    }
}
impl WaistFocalSolver {
    /// Solve in raw units: `zi`, `d` in mm, `wi` in µm, `lambda` in nm.
    ///
    /// Returns `(wo, f)` with the object waist in µm and the focal length in mm.
    /// # Errors
    /// This function returns
    /// - a [`GbError::Domain`] if an input is not positive, `d <= zi` or the search window reaches
    ///   non-positive waists.
    /// - a [`GbError::Interpolation`] if the sampled radii are not monotonic (window straddles the
    ///   radius minimum) or do not bracket the target (only with [`OutOfRangePolicy::Fail`]).
    /// - a [`GbError::Config`] if less than two samples are configured.
    pub fn solve_raw(&self, zi: f64, wi: f64, d: f64, lambda: f64) -> GbResult<(f64, f64)> {
        ensure_positive(zi, "image distance")?;
        ensure_positive(wi, "image waist")?;
        ensure_positive(d, "total distance")?;
        ensure_positive(lambda, "wavelength")?;
        if self.num_samples < 2 {
            return Err(GbError::Config(format!(
                "at least two samples are necessary (got {})",
                self.num_samples
            )));
        }
        if d <= zi {
            return Err(GbError::Domain(format!(
                "total distance {d} mm must exceed the image distance {zi} mm"
            )));
        }
        let w = waist_at(zi, wi, lambda);
        let zo = d - zi;
        let wo_estimate = wi * zo / zi;
        let lower = wo_estimate - self.waist_window;
        if lower <= 0.0 {
            return Err(GbError::Domain(format!(
                "object waist search window [{lower}, {}] µm reaches non-positive waists",
                wo_estimate + self.waist_window
            )));
        }
        debug!("radius at lens w = {w} µm, zo = {zo} mm, wo estimate = {wo_estimate} µm");
        let wos = linspace(lower, wo_estimate + self.waist_window, self.num_samples)?;
        let ws = map_grid(&wos, |wo| waist_at(zo, wo, lambda));
        let wo = interp(w, &ws, &wos, self.out_of_range)?;
        let object_curvature = curvature_radius(zo, wo, lambda)?;
        let image_curvature = curvature_radius(zi, wi, lambda)?;
        debug!("fo = {object_curvature} mm, fi = {image_curvature} mm");
        let f = 1.0 / (1.0 / object_curvature + 1.0 / image_curvature);
        Ok((wo, f))
    }
    /// Solve for object waist and focal length.
    ///
    /// # Attributes
    /// - `image_distance`: distance from the image waist to the lens
    /// - `image_waist`: waist of the image beam
    /// - `distance`: distance from object waist to image waist
    /// - `wavelength`: wavelength of both beams
    /// # Errors
    /// See [`WaistFocalSolver::solve_raw`].
    pub fn solve(
        &self,
        image_distance: Length,
        image_waist: Length,
        distance: Length,
        wavelength: Length,
    ) -> GbResult<WaistFocalSolution> {
        let zi = image_distance.get::<millimeter>();
        let d = distance.get::<millimeter>();
        let (wo, f) = self.solve_raw(
            zi,
            image_waist.get::<micrometer>(),
            d,
            wavelength.get::<nanometer>(),
        )?;
        Ok(WaistFocalSolution {
            object_waist: Length::new::<micrometer>(wo),
            focal_length: Length::new::<millimeter>(f),
            object_distance: Length::new::<millimeter>(d - zi),
            image_distance,
            image_waist,
            wavelength,
        })
    }
}

/// Result of [`WaistFocalSolver::solve`] together with the input geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaistFocalSolution {
    /// waist of the object beam
    pub object_waist: Length,
    /// focal length of the lens
    pub focal_length: Length,
    /// distance object waist to lens
    pub object_distance: Length,
    /// distance lens to image waist
    pub image_distance: Length,
    /// waist of the image beam
    pub image_waist: Length,
    /// wavelength of both beams
    pub wavelength: Length,
}
impl WaistFocalSolution {
    /// Gaussian magnification `wi/wo`.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        self.image_waist.get::<micrometer>() / self.object_waist.get::<micrometer>()
    }
    /// The lens found by the solver.
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
    /// Sample the object and image beam of this setup.
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
