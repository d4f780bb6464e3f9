#![warn(missing_docs)]
//! Geometric (ray) optics imaging through a single thin lens.
//!
//! Used to cross-check the Gaussian beam solvers. Object and image distances follow from
//! `1/zo + 1/zi = 1/f` together with `zo + zi = d`. With `α = f/zo` and `γ = f/d` this becomes
//! `α² - α + γ = 0`, which has real solutions only for `f/d ≤ 1/4`.
use crate::{
    error::{GbError, GbResult},
    utils::math_utils::ensure_positive,
};
use approx::relative_eq;
use log::debug;
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::millimeter};

/// Allowed deviation of `zo + zi` from `d` (absolute in mm for small values, relative otherwise).
const DISTANCE_SUM_TOLERANCE: f64 = 1e-9;

/// Object and image distances (mm) of a thin lens imaging over a total distance `d` (mm).
///
/// The object side is the shorter one, so the magnification `zi/zo` is at least one.
/// # Errors
/// This function returns
/// - a [`GbError::Domain`] if `d` or `f` is not positive or `f/d > 0.25` (no real image exists).
/// - a [`GbError::Consistency`] if `zo + zi` deviates from `d`.
pub fn ray_imaging(d: f64, f: f64) -> GbResult<(f64, f64)> {
    ensure_positive(d, "total distance")?;
    ensure_positive(f, "focal length")?;
    let discriminant = 0.25 - f / d;
    if discriminant < 0.0 {
        return Err(GbError::Domain(format!(
            "no real image for f/d = {} > 0.25",
            f / d
        )));
    }
    let zo = f / (0.5 + discriminant.sqrt());
    let zi = f / (0.5 - discriminant.sqrt());
    debug!("ray imaging: zo = {zo} mm, zi = {zi} mm");
    if !relative_eq!(
        zo + zi,
        d,
        epsilon = DISTANCE_SUM_TOLERANCE,
        max_relative = DISTANCE_SUM_TOLERANCE
    ) {
        return Err(GbError::Consistency(format!(
            "zo + zi = {} does not match d = {d}",
            zo + zi
        )));
    }
    Ok((zo, zi))
}

/// Ray optics magnification `zi/zo` for the total distance `d` (mm) and focal length `f` (mm).
/// # Errors
/// Same as [`ray_imaging`].
pub fn ray_magnification(d: f64, f: f64) -> GbResult<f64> {
    let (zo, zi) = ray_imaging(d, f)?;
    Ok(zi / zo)
}

/// Single thin lens imaging geometry: focal length and waist-to-waist (object to image) distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensSystem {
    focal_length: Length,
    distance: Length,
}
impl LensSystem {
    /// Creates a new [`LensSystem`].
    ///
    /// # Errors
    ///
    /// This function returns a [`GbError::Domain`] if the focal length or the distance is not positive and finite.
    pub fn new(focal_length: Length, distance: Length) -> GbResult<Self> {
        ensure_positive(focal_length.get::<millimeter>(), "focal length")?;
        ensure_positive(distance.get::<millimeter>(), "total distance")?;
        Ok(Self {
            focal_length,
            distance,
        })
    }
    /// Returns the focal length of this [`LensSystem`].
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Returns the total (object waist to image waist) distance of this [`LensSystem`].
    #[must_use]
    pub const fn distance(&self) -> Length {
        self.distance
    }
    /// Calculate the ray optics object and image distances.
    ///
    /// # Errors
    ///
    /// This function returns an error if no real image exists for this geometry. See [`ray_imaging`].
    pub fn imaging_distances(&self) -> GbResult<ImagingDistances> {
        let (zo, zi) = ray_imaging(
            self.distance.get::<millimeter>(),
            self.focal_length.get::<millimeter>(),
        )?;
        Ok(ImagingDistances {
            object_distance: Length::new::<millimeter>(zo),
            image_distance: Length::new::<millimeter>(zi),
        })
    }
}

/// Ray optics solution of a [`LensSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImagingDistances {
    /// distance object to lens
    pub object_distance: Length,
    /// distance lens to image
    pub image_distance: Length,
}
impl ImagingDistances {
    /// Ray optics magnification `zi/zo`.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        self.image_distance.get::<millimeter>() / self.object_distance.get::<millimeter>()
    }
}
