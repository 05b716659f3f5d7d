//! Laser configurations, operating points and computed beam results.

use crate::{
    beam::fbm,
    error::{Result, SatinError},
};
use std::{fmt, str::FromStr};

/// How CO2 is supplied to the gain medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GasMix {
    /// CO2 via the main discharge (`MD`).
    MainDischarge,
    /// CO2 via post-ionization (`PI`).
    PostIonization,
}

impl GasMix {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainDischarge => "MD",
            Self::PostIonization => "PI",
        }
    }
}

impl fmt::Display for GasMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GasMix {
    type Err = SatinError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MD" => Ok(Self::MainDischarge),
            "PI" => Ok(Self::PostIonization),
            invalid => Err(SatinError::Configuration(format!(
                "Invalid gas mix label {} (expected MD or PI)",
                invalid
            ))),
        }
    }
}

/// Properties of one physical laser discharge.
#[derive(Clone, Debug, PartialEq)]
pub struct LaserConfig {
    /// Name of the report file produced for this laser.
    pub output_id: String,
    /// Small-signal gain of the discharge.
    pub small_signal_gain: fbm,
    /// Pressure in the main discharge [kPa].
    pub discharge_pressure: u32,
    pub gas_mix: GasMix,
}

impl LaserConfig {
    pub fn new<S: Into<String>>(
        output_id: S,
        small_signal_gain: fbm,
        discharge_pressure: u32,
        gas_mix: GasMix,
    ) -> Self {
        Self {
            output_id: output_id.into(),
            small_signal_gain,
            discharge_pressure,
            gas_mix,
        }
    }

    /// Checks that the configuration describes a physically valid laser.
    pub fn validate(&self) -> Result<()> {
        if self.output_id.trim().is_empty() {
            return Err(self.invalid("output identifier is empty".to_string()));
        }
        if !(self.small_signal_gain.is_finite() && self.small_signal_gain > 0.0) {
            return Err(self.invalid(format!(
                "small-signal gain must be positive and finite, got {}",
                self.small_signal_gain
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> SatinError {
        SatinError::InvalidLaser {
            laser: self.output_id.clone(),
            reason,
        }
    }
}

/// Input power of the amplifier [W].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatingPoint {
    pub input_power: u32,
}

impl OperatingPoint {
    pub fn new(input_power: u32) -> Self {
        Self { input_power }
    }
}

/// Output power computed for one input power and saturation intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianResult {
    input_power: u32,
    output_power: fbm,
    saturation_intensity: u32,
}

impl GaussianResult {
    pub fn new(input_power: u32, output_power: fbm, saturation_intensity: u32) -> Self {
        Self {
            input_power,
            output_power,
            saturation_intensity,
        }
    }

    /// Input power [W].
    pub fn input_power(&self) -> u32 {
        self.input_power
    }

    /// Output power [W].
    pub fn output_power(&self) -> fbm {
        self.output_power
    }

    /// Saturation intensity [W/cm^2].
    pub fn saturation_intensity(&self) -> u32 {
        self.saturation_intensity
    }

    /// Natural logarithm of the amplification, `ln(Pout/Pin)`.
    pub fn log_power_ratio(&self) -> fbm {
        fbm::ln(self.output_power / fbm::from(self.input_power))
    }

    /// Power added by the amplifier, `Pout - Pin` [W].
    pub fn power_delta(&self) -> fbm {
        self.output_power - fbm::from(self.input_power)
    }
}
