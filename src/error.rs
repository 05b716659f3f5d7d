//! Error types and error handling macros.

use crate::beam::fbm;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure of a single output power integration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NumericalFault {
    #[error("{name} must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: fbm },

    #[error("gain denominator became non-positive ({denominator}) at radius {radius} cm, step {step}")]
    Singularity {
        radius: fbm,
        step: usize,
        denominator: fbm,
    },

    #[error("output power {0} is not finite")]
    NonFinite(fbm),

    #[error("output power {0} is negative")]
    Negative(fbm),
}

#[derive(Debug, Error)]
pub enum SatinError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid laser {laser}: {reason}")]
    InvalidLaser { laser: String, reason: String },

    #[error(
        "Numerical error for laser {laser} at input power {input_power} W and \
         saturation intensity {saturation_intensity} W/cm2: {fault}"
    )]
    Numerical {
        laser: String,
        input_power: u32,
        saturation_intensity: u32,
        #[source]
        fault: NumericalFault,
    },

    #[error("Processing of laser {laser} failed: {reason}")]
    TaskFailure { laser: String, reason: String },

    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SatinError {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Output identifier of the laser the error belongs to, if any.
    pub fn laser(&self) -> Option<&str> {
        match self {
            Self::InvalidLaser { laser, .. }
            | Self::Numerical { laser, .. }
            | Self::TaskFailure { laser, .. } => Some(laser.as_str()),
            _ => None,
        }
    }

    /// Whether the error invalidates the whole batch rather than a single laser.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, SatinError>;

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

