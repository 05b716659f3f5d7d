//! Function for running the command line program.

use super::{build, utils};
use crate::{
    beam::{BeamModel, SaturationIntensityGrid},
    exit_on_error,
    execution::{BatchConfig, BatchOrchestrator, NumericalErrorPolicy},
    io::{input, report::ReportFormat, Verbosity},
};
use clap::ArgMatches;
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// Runs the `satin` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the `satin` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let verbosity = utils::parse_verbosity(&arguments);
    init_logging(&verbosity);

    let laser_file_path = PathBuf::from(
        arguments
            .value_of("laser-file")
            .expect("No value for argument with default"),
    );
    let pin_file_path = PathBuf::from(
        arguments
            .value_of("pin-file")
            .expect("No value for argument with default"),
    );
    let output_dir = PathBuf::from(
        arguments
            .value_of("output-dir")
            .expect("No value for argument with default"),
    );

    let operating_points = exit_on_error!(input::read_input_powers(&pin_file_path), "Error: {}");
    let lasers = exit_on_error!(input::read_laser_configs(&laser_file_path), "Error: {}");

    exit_on_error!(
        fs::create_dir_all(&output_dir),
        "Error: Could not create output directory: {}"
    );

    let config = BatchConfig {
        output_dir,
        n_threads: utils::get_positive_value_from_parseable_argument(&arguments, "threads"),
        error_policy: if arguments.is_present("omit-invalid-rows") {
            NumericalErrorPolicy::OmitRow
        } else {
            NumericalErrorPolicy::FailLaser
        },
        report_format: ReportFormat {
            output_decimals: utils::get_value_from_parseable_argument_with_default(
                &arguments,
                "output-decimals",
            ),
            derived_decimals: utils::get_value_from_parseable_argument_with_default(
                &arguments,
                "derived-decimals",
            ),
        },
        verbosity: verbosity.clone(),
    };

    let orchestrator = exit_on_error!(
        BatchOrchestrator::new(
            BeamModel::reference(),
            SaturationIntensityGrid::reference(),
            config
        ),
        "Error: {}"
    );

    if verbosity.print_messages() {
        println!(
            "Computing {} lasers with {} input powers on {} threads",
            lasers.len(),
            operating_points.len(),
            orchestrator.n_threads()
        );
    }

    let summary = exit_on_error!(
        orchestrator.run_records(lasers, &operating_points),
        "Error: {}"
    );

    if verbosity.print_messages() {
        for path in summary.successes() {
            println!("Wrote {}", path.display());
        }
    }
    if verbosity.print_messages() && summary.n_failed() > 0 {
        println!(
            "{} of {} reports could not be created",
            summary.n_failed(),
            summary.outcomes.len()
        );
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", summary.elapsed.as_secs_f64());
    }
}

fn init_logging(verbosity: &Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbosity)));
    // A subscriber may already be installed when running more than once in a process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Only explicit verbose output lowers the log level to debug.
fn default_log_directive(verbosity: &Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Messages => "satin=debug",
        Verbosity::Quiet | Verbosity::Progress(_) => "satin=info",
    }
}
