#![warn(missing_docs)]
//! Gaussbeam specific error structures
use std::{error::Error, fmt::Display};

/// Gaussbeam specific Result type
pub type GbResult<T> = std::result::Result<T, GbError>;

/// Errors that can be returned by the beam formulas and solvers.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GbError {
    /// a physically invalid geometry or parameter was requested (e.g. `f/d > 0.25` for ray imaging)
    Domain(String),
    /// an internal algebraic self-check failed beyond floating point tolerance
    Consistency(String),
    /// the sample-and-interpolate inversion could not be performed (unsorted samples, target not bracketed, ...)
    Interpolation(String),
    /// errors while reading or validating a solver configuration
    Config(String),
    /// errors while rendering or exporting beam profiles
    Plot(String),
    /// errors of the command line interface
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for GbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(m) => {
                write!(f, "Domain:{m}")
            }
            Self::Consistency(m) => {
                write!(f, "Consistency:{m}")
            }
            Self::Interpolation(m) => {
                write!(f, "Interpolation:{m}")
            }
            Self::Config(m) => {
                write!(f, "Config:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Gaussbeam Error:Other:{m}"),
        }
    }
}
impl Error for GbError {}

impl std::convert::From<String> for GbError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
