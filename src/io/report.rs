//! Formatting and writing of amplifier reports.

use super::utils;
use crate::{
    error::Result,
    laser::{GaussianResult, LaserConfig},
};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Decimal precision of the report columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportFormat {
    /// Number of decimals for the output power column.
    pub output_decimals: usize,
    /// Number of decimals for the logarithmic ratio and power difference columns.
    pub derived_decimals: usize,
}

impl ReportFormat {
    pub const DEFAULT_OUTPUT_DECIMALS: usize = 14;
    pub const DEFAULT_DERIVED_DECIMALS: usize = 3;
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            output_decimals: Self::DEFAULT_OUTPUT_DECIMALS,
            derived_decimals: Self::DEFAULT_DERIVED_DECIMALS,
        }
    }
}

/// All results computed for one laser, ordered by input power and then by
/// ascending saturation intensity.
#[derive(Clone, Debug)]
pub struct Report {
    pub laser: LaserConfig,
    pub rows: Vec<GaussianResult>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl Report {
    /// Renders the report as text using the given column precision.
    pub fn format(&self, format: &ReportFormat) -> String {
        let mut text = format!(
            "Start date: {}\n\
             \n\
             Gaussian Beam\n\
             \n\
             Pressure in Main Discharge = {}kPa\n\
             Small-signal Gain = {:?}\n\
             CO2 via {}\n\
             \n\
             Pin       Pout                 Sat. Int      ln(Pout/Pin)   Pout-Pin\n\
             (watts)   (watts)              (watts/cm2)                  (watts)\n",
            self.start.to_rfc3339(),
            self.laser.discharge_pressure,
            self.laser.small_signal_gain,
            self.laser.gas_mix
        );
        for row in &self.rows {
            text.push_str(&format_row(row, format));
        }
        text.push_str(&format!("\nEnd date: {}", self.end.to_rfc3339()));
        text
    }

    /// Path of the report file for this laser in the given directory.
    pub fn output_path<P: AsRef<Path>>(&self, output_dir: P) -> PathBuf {
        output_dir.as_ref().join(&self.laser.output_id)
    }

    /// Writes the formatted report into the given directory and returns the
    /// path of the written file.
    pub fn write<P: AsRef<Path>>(&self, output_dir: P, format: &ReportFormat) -> Result<PathBuf> {
        let output_path = self.output_path(output_dir);
        utils::write_text_file_atomically(&output_path, &self.format(format))?;
        Ok(output_path)
    }
}

fn format_row(row: &GaussianResult, format: &ReportFormat) -> String {
    format!(
        "{:<10}{:<21.output_decimals$}{:<14}{:>5.derived_decimals$}{:>16.derived_decimals$}\n",
        row.input_power(),
        row.output_power(),
        row.saturation_intensity(),
        row.log_power_ratio(),
        row.power_delta(),
        output_decimals = format.output_decimals,
        derived_decimals = format.derived_decimals
    )
}
