//! Module for additional computational capabilities
pub mod griddata;
pub mod interpolation;
pub mod math_utils;
pub mod test_helper;
pub mod uom_macros;
