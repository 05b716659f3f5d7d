//! The `satin` crate computes the steady-state output power of a saturated-gain
//! laser amplifier driven by a Gaussian beam, for every combination of input power
//! and saturation intensity, and writes one report per laser configuration.

pub mod error;

pub mod beam;
pub mod constants;
pub mod execution;
pub mod io;
pub mod laser;

#[cfg(feature = "cli")]
pub mod cli;
