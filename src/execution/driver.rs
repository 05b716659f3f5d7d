//! Computation of the complete report for a single laser.

use super::NumericalErrorPolicy;
use crate::{
    beam::{sweep, BeamModel, SaturationIntensityGrid},
    error::{Result, SatinError},
    io::report::{Report, ReportFormat},
    laser::{LaserConfig, OperatingPoint},
};
use chrono::Local;
use indicatif::ProgressBar;
use rayon::ThreadPool;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Computes and writes the report of one laser.
///
/// The driver only borrows the shared model and thread pool, so any number of
/// drivers can run concurrently.
pub struct LaserBatchDriver<'a> {
    model: &'a BeamModel,
    grid: &'a SaturationIntensityGrid,
    pool: &'a ThreadPool,
    error_policy: NumericalErrorPolicy,
    progress_bar: &'a ProgressBar,
}

impl<'a> LaserBatchDriver<'a> {
    pub fn new(
        model: &'a BeamModel,
        grid: &'a SaturationIntensityGrid,
        pool: &'a ThreadPool,
        error_policy: NumericalErrorPolicy,
        progress_bar: &'a ProgressBar,
    ) -> Self {
        Self {
            model,
            grid,
            pool,
            error_policy,
            progress_bar,
        }
    }

    /// Sweeps the saturation intensity grid for every operating point and
    /// collects the results into a report.
    ///
    /// Rows are grouped by operating point in the given order, and ordered by
    /// ascending saturation intensity within each group.
    pub fn assemble_report(
        &self,
        laser: &LaserConfig,
        operating_points: &[OperatingPoint],
    ) -> Result<Report> {
        laser.validate()?;

        let start = Local::now();
        let mut rows = Vec::with_capacity(operating_points.len() * self.grid.len());

        for operating_point in operating_points {
            let points = self.pool.install(|| {
                sweep::sweep_saturation_intensities(
                    self.model,
                    self.grid,
                    operating_point.input_power,
                    laser.small_signal_gain,
                    self.progress_bar,
                )
            });

            for point in points {
                match point.result {
                    Ok(row) => rows.push(row),
                    Err(fault) => {
                        let err = SatinError::Numerical {
                            laser: laser.output_id.clone(),
                            input_power: operating_point.input_power,
                            saturation_intensity: point.saturation_intensity,
                            fault,
                        };
                        match self.error_policy {
                            NumericalErrorPolicy::FailLaser => return Err(err),
                            NumericalErrorPolicy::OmitRow => warn!("Omitting row: {}", err),
                        }
                    }
                }
            }
        }

        Ok(Report {
            laser: laser.clone(),
            rows,
            start,
            end: Local::now(),
        })
    }

    /// Assembles the report of the given laser and writes it into the output
    /// directory, returning the path of the report file.
    pub fn run<P: AsRef<Path>>(
        &self,
        laser: &LaserConfig,
        operating_points: &[OperatingPoint],
        output_dir: P,
        format: &ReportFormat,
    ) -> Result<PathBuf> {
        self.assemble_report(laser, operating_points)?
            .write(output_dir, format)
    }
}
