//! Parallel sweep of the output power over saturation intensities.

use super::{fbm, integration, BeamModel, SaturationIntensityGrid};
use crate::{error::NumericalFault, laser::GaussianResult};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;

/// Outcome of the integration at one point of the saturation intensity grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPoint {
    pub saturation_intensity: u32,
    pub result: Result<GaussianResult, NumericalFault>,
}

/// Computes the output power for every saturation intensity in the grid.
///
/// Grid points are integrated in parallel on the current rayon thread pool.
/// The returned points are in ascending order of saturation intensity,
/// independent of the order in which the integrations finish. A failed
/// integration only affects its own point.
pub fn sweep_saturation_intensities(
    model: &BeamModel,
    grid: &SaturationIntensityGrid,
    input_power: u32,
    small_signal_gain: fbm,
    progress_bar: &ProgressBar,
) -> Vec<SweepPoint> {
    grid.values()
        .into_par_iter()
        .progress_with(progress_bar.clone())
        .map(|saturation_intensity| {
            let result = integration::compute_output_power(
                model,
                fbm::from(input_power),
                small_signal_gain,
                fbm::from(saturation_intensity),
            )
            .map(|output_power| {
                GaussianResult::new(input_power, output_power, saturation_intensity)
            });
            SweepPoint {
                saturation_intensity,
                result,
            }
        })
        .collect()
}
