//! Integration of the amplified beam power over the beam cross section.

use super::{fbm, BeamModel};
use crate::{constants::GAIN_NORMALIZATION, error::NumericalFault};

/// Computes the output power [W] of a Gaussian beam with the given input power [W]
/// after propagating through the gain medium.
///
/// The beam cross section is divided into concentric shells of width `dr`. The
/// intensity of each shell starts from the Gaussian input profile
/// `2*P/A * exp(-2r^2/R^2)` and is amplified step by step along the propagation
/// axis according to
///
/// `I <- I * (1 + g/(I_sat + I) - c_j)`,
///
/// where `g = I_sat * g0 / 32000 * dz` is the saturable gain per step and `c_j` is
/// the entry of the correction table for step `j`. The output power is the sum of
/// `I * 2*pi*dr * r` over all shells.
pub fn compute_output_power(
    model: &BeamModel,
    input_power: fbm,
    small_signal_gain: fbm,
    saturation_intensity: fbm,
) -> Result<fbm, NumericalFault> {
    verify_positive("input power", input_power)?;
    verify_positive("small-signal gain", small_signal_gain)?;
    verify_positive("saturation intensity", saturation_intensity)?;

    let constants = model.constants();
    let corrections = model.correction_table().as_slice();

    let peak_input_intensity = 2.0 * input_power / constants.beam_area();
    let gain_per_step =
        saturation_intensity * small_signal_gain / GAIN_NORMALIZATION * constants.longitudinal_step();
    let radial_step = constants.radial_step();
    let radial_element = constants.radial_element();
    let beam_radius_squared = constants.beam_radius_squared();

    let mut output_power = 0.0;
    for radial_idx in 0..constants.radial_step_count() {
        let radius = radial_idx as fbm * radial_step;
        let mut intensity =
            peak_input_intensity * fbm::exp(-2.0 * radius.powi(2) / beam_radius_squared);

        // Each step depends on the previous one, so this loop must stay sequential
        for (step, &correction) in corrections.iter().enumerate() {
            let denominator = saturation_intensity + intensity;
            if denominator <= 0.0 {
                return Err(NumericalFault::Singularity {
                    radius,
                    step,
                    denominator,
                });
            }
            intensity *= 1.0 + gain_per_step / denominator - correction;
        }
        output_power += intensity * radial_element * radius;
    }

    if !output_power.is_finite() {
        Err(NumericalFault::NonFinite(output_power))
    } else if output_power < 0.0 {
        Err(NumericalFault::Negative(output_power))
    } else {
        Ok(output_power)
    }
}

fn verify_positive(name: &'static str, value: fbm) -> Result<(), NumericalFault> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NumericalFault::InvalidParameter { name, value })
    }
}
