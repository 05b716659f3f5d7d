//! Longitudinal propagation correction of the beam.

use super::{fbm, PhysicalConstants};
use crate::constants::STEPS_PER_CORRECTION_UNIT;
use ndarray::prelude::*;
use std::ops::Index;

/// Per-step correction for the change of beam area along the propagation axis.
///
/// Entry `i` holds `2*t*dz/(z1^2 + t^2)`, where `t = (i - n/2)/25` is the
/// longitudinal coordinate centered on the beam waist and `z1` is the Rayleigh
/// range. The table is antisymmetric around its midpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionTable {
    values: Array1<fbm>,
}

impl CorrectionTable {
    /// Computes the table with one entry per longitudinal step.
    pub fn compute(constants: &PhysicalConstants) -> Self {
        let n_steps = constants.longitudinal_steps();
        let center = (n_steps / 2) as fbm;
        let step = constants.longitudinal_step();
        let rayleigh_range_squared = constants.rayleigh_range_squared();

        let values = Array1::from_shape_fn(n_steps, |idx| {
            let coordinate = (idx as fbm - center) / STEPS_PER_CORRECTION_UNIT;
            2.0 * coordinate * step / (rayleigh_range_squared + coordinate.powi(2))
        });
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[fbm] {
        self.values
            .as_slice()
            .expect("Correction table is contiguous")
    }
}

impl Index<usize> for CorrectionTable {
    type Output = fbm;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.values[idx]
    }
}
