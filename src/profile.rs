#![warn(missing_docs)]
//! Sampling of the beam radius along the optical axis of a single lens imaging setup.
//!
//! The object waist sits at `z = 0`, the lens at `z = zo` and the image waist at `z = zo + zi`.
//! Each beam is sampled twice: over its physical segment (waist to lens) and over the same
//! segment extended by a margin on both sides. Together with the positive and negative
//! envelope this gives eight `(z, radius)` sequences, see [`BeamProfiles::lines`].
use crate::{
    error::{GbError, GbResult},
    gaussian_beam::{waist_at_grid, GaussianBeam},
    solver_config::SolverConfig,
    utils::{griddata::linspace, math_utils::ensure_positive},
};
use log::debug;
use nalgebra::DVector;
use serde::Serialize;
use std::path::Path;
use strum::{Display, EnumIter, IntoEnumIterator};
use uom::si::{
    f64::Length,
    length::{micrometer, millimeter, nanometer},
};

/// Which of the two beams a sample sequence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BeamSide {
    /// beam between object waist and lens
    Object,
    /// beam between lens and image waist
    Image,
}

/// Axial range of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SampleRange {
    /// physical segment extended by the margin (drawn dotted)
    Extended,
    /// waist to lens only (drawn solid)
    Physical,
}

/// Sign of the beam envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// `+w(z)`
    Upper,
    /// `-w(z)`
    Lower,
}

/// Axial positions (mm) and beam radii (µm) of one sampled range.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeSamples {
    positions: DVector<f64>,
    radii: DVector<f64>,
}
impl EnvelopeSamples {
    /// Axial positions in mm.
    #[must_use]
    pub const fn positions(&self) -> &DVector<f64> {
        &self.positions
    }
    /// Beam radii (positive envelope) in µm.
    #[must_use]
    pub const fn radii(&self) -> &DVector<f64> {
        &self.radii
    }
    /// Envelope values in µm for the given sign.
    #[must_use]
    pub fn envelope(&self, envelope: Envelope) -> DVector<f64> {
        match envelope {
            Envelope::Upper => self.radii.clone(),
            Envelope::Lower => -self.radii.clone(),
        }
    }
}

/// Extended and physical samples of one beam.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSamples {
    /// samples over the margin-extended range
    pub extended: EnvelopeSamples,
    /// samples between waist and lens
    pub physical: EnvelopeSamples,
}
impl SegmentSamples {
    /// Samples of the given range.
    #[must_use]
    pub const fn range(&self, range: SampleRange) -> &EnvelopeSamples {
        match range {
            SampleRange::Extended => &self.extended,
            SampleRange::Physical => &self.physical,
        }
    }
}

/// One `(z, y)` sequence handed to a plot backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLine {
    /// beam the sequence belongs to
    pub beam: BeamSide,
    /// extended or physical range
    pub range: SampleRange,
    /// positive or negative envelope
    pub envelope: Envelope,
    /// axial positions in mm
    pub x: DVector<f64>,
    /// envelope values in µm
    pub y: DVector<f64>,
}

#[derive(Serialize)]
struct CsvRecord {
    beam: BeamSide,
    range: SampleRange,
    envelope: Envelope,
    z_mm: f64,
    radius_um: f64,
}

/// Sampled beam radius profiles of the object and the image beam.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamProfiles {
    /// object beam (waist at `z = 0`)
    pub object: SegmentSamples,
    /// image beam (waist at `z = zo + zi`)
    pub image: SegmentSamples,
}
impl BeamProfiles {
    /// Samples of the given beam.
    #[must_use]
    pub const fn beam(&self, side: BeamSide) -> &SegmentSamples {
        match side {
            BeamSide::Object => &self.object,
            BeamSide::Image => &self.image,
        }
    }
    /// All eight sequences ordered by beam, range and envelope.
    #[must_use]
    pub fn lines(&self) -> Vec<ProfileLine> {
        let mut lines = Vec::with_capacity(8);
        for beam in BeamSide::iter() {
            for range in SampleRange::iter() {
                let samples = self.beam(beam).range(range);
                for envelope in Envelope::iter() {
                    lines.push(ProfileLine {
                        beam,
                        range,
                        envelope,
                        x: samples.positions().clone(),
                        y: samples.envelope(envelope),
                    });
                }
            }
        }
        lines
    }
    /// Write all sequences as CSV table (`beam,range,envelope,z_mm,radius_um`).
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Plot`] if the file cannot be created or written.
    pub fn to_csv(&self, path: &Path) -> GbResult<()> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| GbError::Plot(format!("cannot create {}: {e}", path.display())))?;
        for line in self.lines() {
            for (z, y) in line.x.iter().zip(line.y.iter()) {
                writer
                    .serialize(CsvRecord {
                        beam: line.beam,
                        range: line.range,
                        envelope: line.envelope,
                        z_mm: *z,
                        radius_um: *y,
                    })
                    .map_err(|e| GbError::Plot(format!("writing csv record failed: {e}")))?;
            }
        }
        writer
            .flush()
            .map_err(|e| GbError::Plot(format!("writing csv file failed: {e}")))
    }
}

/// Generator of [`BeamProfiles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSampler {
    num_points: usize,
    margin: f64,
}
impl Default for ProfileSampler {
    /// 1001 points per range and a margin of 5 mm.
    fn default() -> Self {
        Self {
            num_points: 1001,
            margin: 5.0,
        }
    }
}
impl From<&SolverConfig> for ProfileSampler {
    fn from(config: &SolverConfig) -> Self {
        Self {
            num_points: config.num_samples,
            margin: config.margin,
        }
    }
}
impl ProfileSampler {
    /// Creates a new [`ProfileSampler`].
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Domain`] if less than two points are requested or the margin
    /// is negative or not finite.
    pub fn new(num_points: usize, margin: Length) -> GbResult<Self> {
        if num_points < 2 {
            return Err(GbError::Domain(
                "at least two points per range are necessary".into(),
            ));
        }
        let margin = margin.get::<millimeter>();
        if !margin.is_finite() || margin < 0.0 {
            return Err(GbError::Domain(
                "margin must not be negative and finite".into(),
            ));
        }
        Ok(Self { num_points, margin })
    }
    /// Returns the number of samples per range.
    #[must_use]
    pub const fn num_points(&self) -> usize {
        self.num_points
    }
    /// Returns the margin of the extended ranges.
    #[must_use]
    pub fn margin(&self) -> Length {
        Length::new::<millimeter>(self.margin)
    }
    /// Sample the object beam over `[0, zo]` and the image beam over `[zo, zo + zi]`.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Domain`] if one of the distances is not positive and finite.
    pub fn sample(
        &self,
        object: &GaussianBeam,
        object_distance: Length,
        image: &GaussianBeam,
        image_distance: Length,
    ) -> GbResult<BeamProfiles> {
        let zo = ensure_positive(object_distance.get::<millimeter>(), "object distance")?;
        let zi = ensure_positive(image_distance.get::<millimeter>(), "image distance")?;
        let wo = object.waist().get::<micrometer>();
        let wi = image.waist().get::<micrometer>();
        debug!(
            "sampling profiles: wo = {wo} µm, zo = {zo} mm, wi = {wi} µm, zi = {zi} mm, {} points",
            self.num_points
        );
        let object_lambda = object.wavelength().get::<nanometer>();
        let image_lambda = image.wavelength().get::<nanometer>();
        let object_samples = |start: f64, end: f64| -> GbResult<EnvelopeSamples> {
            let positions = linspace(start, end, self.num_points)?;
            let radii = waist_at_grid(&positions, wo, object_lambda);
            Ok(EnvelopeSamples { positions, radii })
        };
        // the image waist sits at zo + zi, distances are measured back from there
        let image_samples = |start: f64, end: f64| -> GbResult<EnvelopeSamples> {
            let positions = linspace(start, end, self.num_points)?;
            let from_waist = positions.map(|x| zo + zi - x);
            let radii = waist_at_grid(&from_waist, wi, image_lambda);
            Ok(EnvelopeSamples { positions, radii })
        };
        Ok(BeamProfiles {
            object: SegmentSamples {
                extended: object_samples(-self.margin, zo + self.margin)?,
                physical: object_samples(0.0, zo)?,
            },
            image: SegmentSamples {
                extended: image_samples(zo - self.margin, zo + zi + self.margin)?,
                physical: image_samples(zo, zo + zi)?,
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gaussian_beam::waist_at, micrometer, millimeter, nanometer};
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use std::io::Read;

    fn reference_profiles(sampler: &ProfileSampler) -> BeamProfiles {
        let object = GaussianBeam::new(micrometer!(19.79130616621962), nanometer!(1000.0)).unwrap();
        let image = GaussianBeam::new(micrometer!(40.0), nanometer!(1000.0)).unwrap();
        sampler
            .sample(&object, millimeter!(15.0), &image, millimeter!(30.0))
            .unwrap()
    }
    #[test]
    fn new() {
        assert!(ProfileSampler::new(1, millimeter!(5.0)).is_err());
        assert!(ProfileSampler::new(100, millimeter!(-5.0)).is_err());
        assert!(ProfileSampler::new(100, millimeter!(f64::NAN)).is_err());
        let sampler = ProfileSampler::new(11, millimeter!(2.0)).unwrap();
        assert_eq!(sampler.num_points(), 11);
        assert_relative_eq!(sampler.margin().get::<millimeter>(), 2.0);
    }
    #[test]
    fn from_config() {
        let config = SolverConfig {
            num_samples: 21,
            margin: 1.0,
            ..SolverConfig::default()
        };
        let sampler = ProfileSampler::from(&config);
        assert_eq!(sampler.num_points(), 21);
        assert_eq!(ProfileSampler::default().num_points(), 1001);
    }
    #[test]
    fn ranges() {
        let profiles = reference_profiles(&ProfileSampler::default());
        let ext = profiles.object.extended.positions();
        assert_eq!(ext.len(), 1001);
        assert_relative_eq!(ext[0], -5.0);
        assert_relative_eq!(ext[1000], 20.0);
        let phys = profiles.object.physical.positions();
        assert_relative_eq!(phys[0], 0.0);
        assert_relative_eq!(phys[1000], 15.0);
        let ext = profiles.image.extended.positions();
        assert_relative_eq!(ext[0], 10.0);
        assert_relative_eq!(ext[1000], 50.0);
        let phys = profiles.image.physical.positions();
        assert_relative_eq!(phys[0], 15.0);
        assert_relative_eq!(phys[1000], 45.0);
    }
    #[test]
    fn radii() {
        let profiles = reference_profiles(&ProfileSampler::default());
        // waists at both ends of the physical ranges
        assert_relative_eq!(profiles.object.physical.radii()[0], 19.79130616621962);
        assert_relative_eq!(profiles.image.physical.radii()[1000], 40.0);
        // both beams have the same radius at the lens
        let at_lens_object = profiles.object.physical.radii()[1000];
        let at_lens_image = profiles.image.physical.radii()[0];
        assert_relative_eq!(at_lens_object, at_lens_image, max_relative = 1e-6);
        assert_relative_eq!(
            at_lens_image,
            waist_at(30.0, 40.0, 1000.0),
            max_relative = 1e-12
        );
        // object beam is symmetric around its waist
        let ext = &profiles.object.extended;
        let idx = ext.positions().iter().position(|z| *z > 4.99).unwrap();
        assert_relative_eq!(
            ext.radii()[0],
            waist_at(ext.positions()[idx], 19.79130616621962, 1000.0),
            max_relative = 1e-6
        );
    }
    #[test]
    fn eight_lines() {
        let profiles = reference_profiles(&ProfileSampler::new(11, millimeter!(5.0)).unwrap());
        let lines = profiles.lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].beam, BeamSide::Object);
        assert_eq!(lines[0].range, SampleRange::Extended);
        assert_eq!(lines[0].envelope, Envelope::Upper);
        assert_eq!(lines[7].beam, BeamSide::Image);
        assert_eq!(lines[7].range, SampleRange::Physical);
        assert_eq!(lines[7].envelope, Envelope::Lower);
        for pair in lines.chunks(2) {
            assert_eq!(pair[0].x, pair[1].x);
            assert_eq!(pair[0].y, -pair[1].y.clone());
            assert!(pair[0].y.iter().all(|y| *y > 0.0));
        }
    }
    #[test]
    fn invalid_distances() {
        let beam = GaussianBeam::new(micrometer!(40.0), nanometer!(1000.0)).unwrap();
        let sampler = ProfileSampler::default();
        assert_matches!(
            sampler.sample(&beam, millimeter!(0.0), &beam, millimeter!(30.0)),
            Err(GbError::Domain(_))
        );
        assert_matches!(
            sampler.sample(&beam, millimeter!(15.0), &beam, millimeter!(f64::INFINITY)),
            Err(GbError::Domain(_))
        );
    }
    #[test]
    fn csv_export() {
        let profiles = reference_profiles(&ProfileSampler::new(3, millimeter!(5.0)).unwrap());
        let file = tempfile::NamedTempFile::new().unwrap();
        profiles.to_csv(file.path()).unwrap();
        let mut content = String::new();
        std::fs::File::open(file.path())
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows.len(), 1 + 8 * 3);
        assert_eq!(rows[0], "beam,range,envelope,z_mm,radius_um");
        assert!(rows[1].starts_with("object,extended,upper,-5.0,"));
        assert!(rows[24].starts_with("image,physical,lower,45.0,-40"));
    }
}
