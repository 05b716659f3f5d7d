//! Source constants of the amplifier model.
//!
//! Lengths are in centimeters, intensities in watts per square centimeter and
//! powers in watts.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Mathematical constants

pub const PI: fcn = std::f64::consts::PI;

// Beam and gain medium geometry

/// Radius of the input Gaussian beam [cm].
pub const BEAM_RADIUS: fcn = 0.18;
/// Waist of the propagating beam [cm].
pub const BEAM_WAIST: fcn = 0.3;
/// Wavelength of the CO2 laser line [cm].
pub const WAVELENGTH: fcn = 0.0106;
/// Outer radius of the radial integration domain [cm].
pub const RADIAL_EXTENT: fcn = 0.5;

// Discretization

/// Size of a radial integration step [cm].
pub const RADIAL_STEP: fcn = 0.002;
/// Size of a longitudinal propagation step [cm].
pub const LONGITUDINAL_STEP: fcn = 0.04;
/// Number of longitudinal propagation steps.
pub const LONGITUDINAL_STEPS: usize = 8001;
/// Number of longitudinal steps per unit of the centered correction coordinate.
pub const STEPS_PER_CORRECTION_UNIT: fcn = 25.0;

// Gain model

/// Normalization of the product of saturation intensity and small-signal gain.
pub const GAIN_NORMALIZATION: fcn = 32000.0;

// Saturation intensity grid [W/cm^2]

pub const MIN_SATURATION_INTENSITY: u32 = 10000;
pub const MAX_SATURATION_INTENSITY: u32 = 25000;
pub const SATURATION_INTENSITY_STEP: u32 = 1000;
