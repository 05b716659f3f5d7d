//! Execution of batch runs over several lasers.

pub mod driver;

use self::driver::LaserBatchDriver;
use crate::{
    beam::{BeamModel, SaturationIntensityGrid},
    error::{Result, SatinError},
    io::{report::ReportFormat, Verbosity},
    laser::{LaserConfig, OperatingPoint},
};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::{
    any::Any,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, error, info};

/// How numerical errors at individual grid points are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericalErrorPolicy {
    /// The whole report of the affected laser fails.
    FailLaser,
    /// The affected row is left out of the report and a warning is logged.
    OmitRow,
}

impl Default for NumericalErrorPolicy {
    fn default() -> Self {
        Self::FailLaser
    }
}

/// Configuration parameters for a batch run.
#[derive(Clone)]
pub struct BatchConfig {
    /// Directory where the reports are written.
    pub output_dir: PathBuf,
    /// Number of threads for integrating grid points (all available processing
    /// units if not specified).
    pub n_threads: Option<usize>,
    pub error_policy: NumericalErrorPolicy,
    pub report_format: ReportFormat,
    pub verbosity: Verbosity,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            n_threads: None,
            error_policy: NumericalErrorPolicy::default(),
            report_format: ReportFormat::default(),
            verbosity: Verbosity::default(),
        }
    }
}

/// Result of processing a single laser.
#[derive(Debug)]
pub struct LaserOutcome {
    pub output_id: String,
    /// Path of the written report, or the reason the laser failed.
    pub result: Result<PathBuf>,
}

/// Per-laser outcomes of a batch run together with the total elapsed time.
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<LaserOutcome>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn successes(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &SatinError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|err| (outcome.output_id.as_str(), err))
        })
    }

    pub fn n_succeeded(&self) -> usize {
        self.successes().count()
    }

    pub fn n_failed(&self) -> usize {
        self.failures().count()
    }
}

/// Runs the report computation for a set of lasers.
///
/// Each laser is handled by its own driver thread, while the integrations of all
/// drivers share a single pool of worker threads. The orchestrator owns the beam
/// model and lends it to every driver.
pub struct BatchOrchestrator {
    model: BeamModel,
    grid: SaturationIntensityGrid,
    config: BatchConfig,
    pool: ThreadPool,
}

impl BatchOrchestrator {
    pub fn new(
        model: BeamModel,
        grid: SaturationIntensityGrid,
        config: BatchConfig,
    ) -> Result<Self> {
        let mut builder =
            ThreadPoolBuilder::new().thread_name(|idx| format!("satin-worker-{}", idx));
        if let Some(n_threads) = config.n_threads {
            if n_threads == 0 {
                return Err(SatinError::Configuration(
                    "Number of threads must be larger than zero".to_string(),
                ));
            }
            builder = builder.num_threads(n_threads);
        }
        let pool = builder.build().map_err(|err| {
            SatinError::Configuration(format!("Could not create thread pool: {}", err))
        })?;
        Ok(Self {
            model,
            grid,
            config,
            pool,
        })
    }

    pub fn n_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Computes and writes the report of every laser.
    ///
    /// Fails only if there is nothing to compute. The failure of an individual
    /// laser, including a panic in its driver, is recorded in its outcome and does
    /// not affect the other lasers.
    pub fn run(
        &self,
        lasers: &[LaserConfig],
        operating_points: &[OperatingPoint],
    ) -> Result<BatchSummary> {
        self.run_records(lasers.iter().cloned().map(Ok).collect(), operating_points)
    }

    /// Like [`run`](Self::run), but takes parsed laser records. A record that
    /// could not be parsed is reported as the outcome of its laser.
    pub fn run_records(
        &self,
        records: Vec<Result<LaserConfig>>,
        operating_points: &[OperatingPoint],
    ) -> Result<BatchSummary> {
        if records.is_empty() {
            return Err(SatinError::Configuration(
                "No laser configurations to process".to_string(),
            ));
        }
        if operating_points.is_empty() {
            return Err(SatinError::Configuration(
                "No input powers to process".to_string(),
            ));
        }

        let start_instant = Instant::now();

        let n_valid_records = records.iter().filter(|record| record.is_ok()).count();
        let progress_bar = self
            .config
            .verbosity
            .create_progress_bar(n_valid_records * operating_points.len() * self.grid.len());

        let driver = LaserBatchDriver::new(
            &self.model,
            &self.grid,
            &self.pool,
            self.config.error_policy,
            &progress_bar,
        );

        let output_dir = self.config.output_dir.as_path();
        let report_format = &self.config.report_format;

        let outcomes = process_in_isolation(records, |laser| {
            driver.run(laser, operating_points, output_dir, report_format)
        });

        progress_bar.finish_and_clear();

        let summary = BatchSummary {
            outcomes,
            elapsed: start_instant.elapsed(),
        };
        info!(
            "Processed {} lasers ({} failed)",
            summary.outcomes.len(),
            summary.n_failed()
        );
        info!("The time was {:.3} seconds", summary.elapsed.as_secs_f64());
        Ok(summary)
    }
}

/// Runs the given task for every valid laser record on a dedicated thread and
/// collects the outcomes in record order.
///
/// A panicking task becomes a [`SatinError::TaskFailure`] of its own laser.
fn process_in_isolation<F>(records: Vec<Result<LaserConfig>>, task: F) -> Vec<LaserOutcome>
where
    F: Fn(&LaserConfig) -> Result<PathBuf> + Sync,
{
    let task = &task;
    thread::scope(|scope| {
        let handles: Vec<_> = records
            .into_iter()
            .map(|record| {
                let output_id = match &record {
                    Ok(laser) => laser.output_id.clone(),
                    Err(err) => err.laser().unwrap_or_default().to_string(),
                };
                let handle = record.map(|laser| {
                    thread::Builder::new()
                        .name(format!("satin-{}", laser.output_id))
                        .spawn_scoped(scope, move || task(&laser))
                });
                (output_id, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(output_id, handle)| {
                let result = match handle {
                    Ok(Ok(handle)) => handle.join().unwrap_or_else(|payload| {
                        Err(SatinError::TaskFailure {
                            laser: output_id.clone(),
                            reason: panic_message(payload.as_ref()),
                        })
                    }),
                    Ok(Err(err)) => Err(SatinError::TaskFailure {
                        laser: output_id.clone(),
                        reason: format!("Could not spawn thread: {}", err),
                    }),
                    Err(rejection) => Err(rejection),
                };
                match &result {
                    Ok(output_path) => {
                        debug!("Successfully created {}", output_path.display())
                    }
                    Err(err) => error!("Error processing {}: {}", output_id, err),
                }
                LaserOutcome { output_id, result }
            })
            .collect()
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Driver panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laser::GasMix;

    fn create_orchestrator(
        output_dir: PathBuf,
        grid: SaturationIntensityGrid,
    ) -> BatchOrchestrator {
        BatchOrchestrator::new(
            BeamModel::reference(),
            grid,
            BatchConfig {
                output_dir,
                n_threads: Some(2),
                ..BatchConfig::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn one_invalid_laser_does_not_affect_the_others() {
        let directory = tempfile::tempdir().unwrap();
        let orchestrator = create_orchestrator(
            directory.path().to_path_buf(),
            SaturationIntensityGrid::new(10000, 11000, 1000).unwrap(),
        );
        let lasers = vec![
            LaserConfig::new("mdaa.out", 28.4, 133, GasMix::MainDischarge),
            LaserConfig::new("mdab.out", -28.4, 133, GasMix::MainDischarge),
            LaserConfig::new("piaa.out", 12.0, 67, GasMix::PostIonization),
        ];

        let summary = orchestrator
            .run(&lasers, &[OperatingPoint::new(10)])
            .unwrap();

        assert_eq!(summary.outcomes.len(), 3);
        assert_eq!(summary.n_succeeded(), 2);
        assert_eq!(summary.n_failed(), 1);
        let (failed_id, err) = summary.failures().next().unwrap();
        assert_eq!(failed_id, "mdab.out");
        assert!(matches!(err, SatinError::InvalidLaser { .. }));
        assert!(directory.path().join("mdaa.out").is_file());
        assert!(directory.path().join("piaa.out").is_file());
        assert!(!directory.path().join("mdab.out").exists());
    }

    #[test]
    fn empty_inputs_are_fatal() {
        let directory = tempfile::tempdir().unwrap();
        let orchestrator = create_orchestrator(
            directory.path().to_path_buf(),
            SaturationIntensityGrid::reference(),
        );
        let laser = LaserConfig::new("mdaa.out", 28.4, 133, GasMix::MainDischarge);
        let err = orchestrator.run(&[], &[OperatingPoint::new(10)]).unwrap_err();
        assert!(err.is_fatal());
        let err = orchestrator.run(&[laser], &[]).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn zero_threads_are_rejected() {
        let result = BatchOrchestrator::new(
            BeamModel::reference(),
            SaturationIntensityGrid::reference(),
            BatchConfig {
                n_threads: Some(0),
                ..BatchConfig::default()
            },
        );
        assert!(matches!(result, Err(SatinError::Configuration(_))));
    }

    #[test]
    fn unwritable_output_dir_fails_each_laser() {
        let directory = tempfile::tempdir().unwrap();
        let orchestrator = create_orchestrator(
            directory.path().join("missing"),
            SaturationIntensityGrid::new(10000, 10000, 1000).unwrap(),
        );
        let lasers = vec![
            LaserConfig::new("mdaa.out", 28.4, 133, GasMix::MainDischarge),
            LaserConfig::new("piaa.out", 12.0, 67, GasMix::PostIonization),
        ];
        let summary = orchestrator
            .run(&lasers, &[OperatingPoint::new(10)])
            .unwrap();
        assert_eq!(summary.n_failed(), 2);
        assert!(summary
            .failures()
            .all(|(_, err)| matches!(err, SatinError::Io { .. })));
    }

    #[test]
    fn panicking_task_does_not_affect_siblings() {
        let records = vec![
            Ok(LaserConfig::new("mdaa.out", 28.4, 133, GasMix::MainDischarge)),
            Ok(LaserConfig::new("mdab.out", 28.4, 133, GasMix::MainDischarge)),
            Err(SatinError::InvalidLaser {
                laser: "mdac.out".to_string(),
                reason: "unparseable".to_string(),
            }),
            Ok(LaserConfig::new("piaa.out", 12.0, 67, GasMix::PostIonization)),
        ];

        let outcomes = process_in_isolation(records, |laser| {
            if laser.output_id == "mdab.out" {
                panic!("driver exploded");
            }
            Ok(PathBuf::from(&laser.output_id))
        });

        let ids: Vec<_> = outcomes
            .iter()
            .map(|outcome| outcome.output_id.as_str())
            .collect();
        assert_eq!(ids, vec!["mdaa.out", "mdab.out", "mdac.out", "piaa.out"]);
        assert_eq!(
            outcomes[0].result.as_ref().unwrap(),
            &PathBuf::from("mdaa.out")
        );
        match &outcomes[1].result {
            Err(SatinError::TaskFailure { laser, reason }) => {
                assert_eq!(laser, "mdab.out");
                assert_eq!(reason, "driver exploded");
            }
            other => panic!("Unexpected outcome {:?}", other),
        }
        assert!(matches!(
            outcomes[2].result,
            Err(SatinError::InvalidLaser { .. })
        ));
        assert_eq!(
            outcomes[3].result.as_ref().unwrap(),
            &PathBuf::from("piaa.out")
        );
    }

    #[test]
    fn rejected_records_are_reported_as_failed_lasers() {
        let directory = tempfile::tempdir().unwrap();
        let orchestrator = create_orchestrator(
            directory.path().to_path_buf(),
            SaturationIntensityGrid::new(10000, 10000, 1000).unwrap(),
        );
        let records = vec![
            Err(SatinError::InvalidLaser {
                laser: "mdaa.out".to_string(),
                reason: "unparseable".to_string(),
            }),
            Ok(LaserConfig::new("piaa.out", 12.0, 67, GasMix::PostIonization)),
        ];
        let summary = orchestrator
            .run_records(records, &[OperatingPoint::new(10)])
            .unwrap();
        assert_eq!(summary.n_succeeded(), 1);
        let (failed_id, _) = summary.failures().next().unwrap();
        assert_eq!(failed_id, "mdaa.out");
        assert!(directory.path().join("piaa.out").is_file());
    }

    #[test]
    fn panic_payloads_are_described() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&1_u8), "Driver panicked");
    }
}
