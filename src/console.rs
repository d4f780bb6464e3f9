//! Handling the `gaussbeam` CLI
//!
//! This module handles the command line parsing as well as basic information (e.g. help dialog, version information, etc.).
use crate::{
    error::{GbError, GbResult},
    get_version,
    plottable::PltBackEnd,
    solver_config::SolverConfig,
};
use clap::{builder::Str, Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments for the `gaussbeam` application.
#[derive(Parser, Debug)]
#[command(author, version = Str::from(get_version()), about, long_about = None)]
pub struct Args {
    /// calculation to perform
    #[command(subcommand)]
    pub command: Command,

    /// YAML file with solver settings. Defaults are used if not given
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// render the beam profiles of the solution into this file (.svg, .png, .bmp or .jpg)
    #[arg(short, long, global = true)]
    pub plot: Option<PathBuf>,

    /// export the sampled beam profiles as CSV table
    #[arg(long, global = true)]
    pub csv: Option<PathBuf>,

    /// write the solution as YAML report
    #[arg(short, long, global = true)]
    pub report: Option<PathBuf>,
}

/// Calculations offered on the command line.
///
/// Waists are given in µm, distances and focal lengths in mm and wavelengths in nm.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// find object waist and focal length producing the given image beam
    TestBeams {
        /// distance image waist to lens (mm)
        #[arg(long, value_parser = parse_positive)]
        image_distance: f64,
        /// image waist (µm)
        #[arg(long, value_parser = parse_positive)]
        image_waist: f64,
        /// distance object waist to image waist (mm)
        #[arg(long, value_parser = parse_positive)]
        distance: f64,
        /// wavelength (nm)
        #[arg(long, value_parser = parse_positive)]
        wavelength: f64,
    },
    /// find magnification, object distance and minimum numerical aperture of a lens
    Magnification {
        /// image waist (µm)
        #[arg(long, value_parser = parse_positive)]
        image_waist: f64,
        /// distance object waist to image waist (mm)
        #[arg(long, value_parser = parse_positive)]
        distance: f64,
        /// focal length (mm)
        #[arg(long, value_parser = parse_positive)]
        focal_length: f64,
        /// wavelength (nm)
        #[arg(long, value_parser = parse_positive)]
        wavelength: f64,
    },
    /// magnification of a thin lens in geometric optics
    Ray {
        /// distance object to image (mm)
        #[arg(long, value_parser = parse_positive)]
        distance: f64,
        /// focal length (mm)
        #[arg(long, value_parser = parse_positive)]
        focal_length: f64,
    },
    /// construct a test setup, solve it back and compare with ray optics
    Demo {
        /// distance image waist to lens (mm)
        #[arg(long, default_value_t = 30.0, value_parser = parse_positive)]
        image_distance: f64,
        /// image waist (µm)
        #[arg(long, default_value_t = 40.0, value_parser = parse_positive)]
        image_waist: f64,
        /// distance object waist to image waist (mm)
        #[arg(long, default_value_t = 45.0, value_parser = parse_positive)]
        distance: f64,
        /// wavelength (nm)
        #[arg(long, default_value_t = 1000.0, value_parser = parse_positive)]
        wavelength: f64,
    },
}

fn parse_positive(value: &str) -> Result<f64, String> {
    let number: f64 = value
        .parse()
        .map_err(|_| format!("\"{value}\" is not a number"))?;
    if number.is_finite() && number > 0.0 {
        Ok(number)
    } else {
        Err(format!("{value} must be positive and finite"))
    }
}

impl Args {
    /// Check the output file options.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Console`] if
    ///   - the plot file has an unsupported extension.
    ///   - plot or CSV output is requested for the `ray` command (no beams involved).
    pub fn validate(&self) -> GbResult<()> {
        if let Some(path) = &self.plot {
            PltBackEnd::from_path(path).map_err(|e| GbError::Console(e.to_string()))?;
        }
        if matches!(self.command, Command::Ray { .. }) && (self.plot.is_some() || self.csv.is_some()) {
            return Err(GbError::Console(
                "ray optics has no beam profiles to plot or export".into(),
            ));
        }
        Ok(())
    }
    /// Solver settings from the given configuration file or the defaults.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Config`] if the file cannot be read or is invalid.
    pub fn solver_config(&self) -> GbResult<SolverConfig> {
        self.config
            .as_ref()
            .map_or_else(|| Ok(SolverConfig::default()), |path| SolverConfig::from_file(path))
    }
}
