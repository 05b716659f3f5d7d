//! Propagation of a Gaussian beam through a saturable gain medium.

pub mod correction;
pub mod integration;
pub mod sweep;

use self::correction::CorrectionTable;
use crate::{
    constants::{self, fcn},
    error::{Result, SatinError},
};

/// Floating-point precision to use for beam computations.
#[allow(non_camel_case_types)]
pub type fbm = f64;

/// Derived scalars of the amplifier model.
///
/// All values are computed once by [`PhysicalConstants::new`] and never change
/// afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalConstants {
    beam_radius_squared: fbm,
    beam_area: fbm,
    rayleigh_range_squared: fbm,
    radial_step: fbm,
    radial_element: fbm,
    radial_step_count: usize,
    longitudinal_step: fbm,
    longitudinal_steps: usize,
}

impl PhysicalConstants {
    /// Derives the model scalars from the given source constants.
    ///
    /// Lengths are in centimeters. Every length must be positive and finite,
    /// the radial extent must span at least one radial step and there must be
    /// at least one longitudinal step.
    pub fn new(
        beam_radius: fcn,
        beam_waist: fcn,
        wavelength: fcn,
        radial_step: fcn,
        radial_extent: fcn,
        longitudinal_step: fcn,
        longitudinal_steps: usize,
    ) -> Result<Self> {
        for (name, value) in [
            ("beam radius", beam_radius),
            ("beam waist", beam_waist),
            ("wavelength", wavelength),
            ("radial step", radial_step),
            ("radial extent", radial_extent),
            ("longitudinal step", longitudinal_step),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SatinError::Configuration(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if longitudinal_steps == 0 {
            return Err(SatinError::Configuration(
                "Number of longitudinal steps must be larger than zero".to_string(),
            ));
        }

        let radial_step_count = (radial_extent / radial_step) as usize;
        if radial_step_count == 0 {
            return Err(SatinError::Configuration(format!(
                "Radial extent {} is smaller than the radial step {}",
                radial_extent, radial_step
            )));
        }

        let beam_radius_squared = beam_radius.powi(2);
        let rayleigh_range = constants::PI * beam_waist.powi(2) / wavelength;

        Ok(Self {
            beam_radius_squared,
            beam_area: constants::PI * beam_radius_squared,
            rayleigh_range_squared: rayleigh_range.powi(2),
            radial_step,
            radial_element: 2.0 * constants::PI * radial_step,
            radial_step_count,
            longitudinal_step,
            longitudinal_steps,
        })
    }

    /// Returns the constants of the reference CO2 amplifier.
    pub fn reference() -> Self {
        Self::new(
            constants::BEAM_RADIUS,
            constants::BEAM_WAIST,
            constants::WAVELENGTH,
            constants::RADIAL_STEP,
            constants::RADIAL_EXTENT,
            constants::LONGITUDINAL_STEP,
            constants::LONGITUDINAL_STEPS,
        )
        .expect("Reference constants are valid")
    }

    pub fn beam_radius_squared(&self) -> fbm {
        self.beam_radius_squared
    }

    /// Cross-sectional area of the input beam [cm^2].
    pub fn beam_area(&self) -> fbm {
        self.beam_area
    }

    /// Square of the Rayleigh range of the beam waist [cm^2].
    pub fn rayleigh_range_squared(&self) -> fbm {
        self.rayleigh_range_squared
    }

    pub fn radial_step(&self) -> fbm {
        self.radial_step
    }

    /// Circumference factor `2*pi*dr` of a radial shell.
    pub fn radial_element(&self) -> fbm {
        self.radial_element
    }

    pub fn radial_step_count(&self) -> usize {
        self.radial_step_count
    }

    pub fn longitudinal_step(&self) -> fbm {
        self.longitudinal_step
    }

    pub fn longitudinal_steps(&self) -> usize {
        self.longitudinal_steps
    }
}

/// Immutable state shared by every output power computation of a batch run.
#[derive(Clone, Debug)]
pub struct BeamModel {
    constants: PhysicalConstants,
    correction_table: CorrectionTable,
}

impl BeamModel {
    /// Creates a model from the given constants, precomputing the correction table.
    pub fn new(constants: PhysicalConstants) -> Self {
        let correction_table = CorrectionTable::compute(&constants);
        Self {
            constants,
            correction_table,
        }
    }

    /// Creates the model of the reference CO2 amplifier.
    pub fn reference() -> Self {
        Self::new(PhysicalConstants::reference())
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn correction_table(&self) -> &CorrectionTable {
        &self.correction_table
    }
}

/// Inclusive arithmetic sequence of saturation intensities [W/cm^2].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturationIntensityGrid {
    start: u32,
    end: u32,
    step: u32,
}

impl SaturationIntensityGrid {
    pub fn new(start: u32, end: u32, step: u32) -> Result<Self> {
        if start == 0 || step == 0 || end < start {
            return Err(SatinError::Configuration(format!(
                "Invalid saturation intensity grid {}..={} with step {}",
                start, end, step
            )));
        }
        Ok(Self { start, end, step })
    }

    /// Returns the grid from 10000 to 25000 W/cm^2 in steps of 1000 W/cm^2.
    pub fn reference() -> Self {
        Self {
            start: constants::MIN_SATURATION_INTENSITY,
            end: constants::MAX_SATURATION_INTENSITY,
            step: constants::SATURATION_INTENSITY_STEP,
        }
    }

    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the grid values in ascending order.
    pub fn values(&self) -> Vec<u32> {
        (self.start..=self.end).step_by(self.step as usize).collect()
    }
}

impl Default for SaturationIntensityGrid {
    fn default() -> Self {
        Self::reference()
    }
}
