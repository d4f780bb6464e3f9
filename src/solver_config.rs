#![warn(missing_docs)]
//! Numerical settings of the sample-and-interpolate solvers.
//!
//! A configuration can be read from a YAML file. All fields are optional:
//! ```yaml
//! num_samples: 1001
//! waist_window: 5.0
//! margin: 5.0
//! out_of_range: fail
//! ```
use crate::{
    error::{GbError, GbResult},
    utils::interpolation::OutOfRangePolicy,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Settings shared by the solvers and the profile sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// number of candidate samples of each solver sweep and of each plotted range
    pub num_samples: usize,
    /// half width (µm) of the object waist search window around the ray optics estimate
    pub waist_window: f64,
    /// axial margin (mm) added on both sides of the plotted beam segments
    pub margin: f64,
    /// behaviour if a sweep does not bracket the root
    pub out_of_range: OutOfRangePolicy,
}
impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_samples: 1001,
            waist_window: 5.0,
            margin: 5.0,
            out_of_range: OutOfRangePolicy::default(),
        }
    }
}
impl SolverConfig {
    /// Read a [`SolverConfig`] from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Config`] if
    ///   - the file cannot be read.
    ///   - the parsing of the file failed.
    ///   - the resulting values are invalid (see [`SolverConfig::validate`]).
    pub fn from_file(path: &Path) -> GbResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            GbError::Config(format!("cannot read file {} : {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&contents)?;
        info!("solver configuration read from {}", path.display());
        Ok(config)
    }
    /// Parse a [`SolverConfig`] from a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Config`] if the string cannot be parsed or contains invalid values.
    pub fn from_yaml(yaml: &str) -> GbResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| GbError::Config(format!("parsing of solver configuration failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }
    /// Check the values of this [`SolverConfig`].
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Config`] if
    ///   - less than two samples are requested.
    ///   - the waist window or the margin is negative, zero (window only) or not finite.
    pub fn validate(&self) -> GbResult<()> {
        if self.num_samples < 2 {
            return Err(GbError::Config(
                "at least two samples are necessary for interpolation".into(),
            ));
        }
        if !self.waist_window.is_finite() || self.waist_window <= 0.0 {
            return Err(GbError::Config(
                "waist search window must be positive and finite".into(),
            ));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(GbError::Config(
                "plot margin must not be negative and finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    #[test]
    fn default() {
        let config = SolverConfig::default();
        assert_eq!(config.num_samples, 1001);
        assert_eq!(config.waist_window, 5.0);
        assert_eq!(config.margin, 5.0);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Fail);
        assert!(config.validate().is_ok());
    }
    #[test]
    fn from_yaml_partial() {
        let config = SolverConfig::from_yaml("num_samples: 2001\nout_of_range: clamp\n").unwrap();
        assert_eq!(config.num_samples, 2001);
        assert_eq!(config.waist_window, 5.0);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Clamp);
        let config = SolverConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
    }
    #[test]
    fn from_yaml_invalid() {
        assert_matches!(
            SolverConfig::from_yaml("num_samples: 1"),
            Err(GbError::Config(_))
        );
        assert_matches!(
            SolverConfig::from_yaml("waist_window: 0.0"),
            Err(GbError::Config(_))
        );
        assert_matches!(
            SolverConfig::from_yaml("margin: -1.0"),
            Err(GbError::Config(_))
        );
        assert_matches!(
            SolverConfig::from_yaml("out_of_range: extrapolate"),
            Err(GbError::Config(_))
        );
        assert_matches!(
            SolverConfig::from_yaml("samples: 10"),
            Err(GbError::Config(_))
        );
    }
    #[test]
    fn round_trip_through_file() {
        let config = SolverConfig {
            num_samples: 501,
            waist_window: 2.5,
            margin: 0.0,
            out_of_range: OutOfRangePolicy::Clamp,
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_yaml::to_string(&config).unwrap()).unwrap();
        assert_eq!(SolverConfig::from_file(file.path()).unwrap(), config);
    }
    #[test]
    fn from_missing_file() {
        assert_matches!(
            SolverConfig::from_file(Path::new("./does_not_exist.yaml")),
            Err(GbError::Config(_))
        );
    }
}
