//! Function for building the command line interface.

use clap::{self, Arg, Command};

/// Builds the `satin` command line interface.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .long_about(
            "Computes the output power of a saturated-gain CO2 laser amplifier for every\n\
             combination of input power and saturation intensity, and writes one report\n\
             per laser configuration.",
        )
        .after_help(
            "The laser file contains one record per laser on the form\n\
             \n    <output file> <small-signal gain> <discharge pressure [kPa]> <MD|PI>\n\
             \n\
             e.g. `mdaa.out 28.4 133 MD`. The input power file contains the input powers\n\
             [W] as whitespace separated integers.",
        )
        .arg(
            Arg::new("laser-file")
                .long("laser-file")
                .value_name("PATH")
                .help("Path to the file with laser configurations")
                .takes_value(true)
                .default_value("laser.dat"),
        )
        .arg(
            Arg::new("pin-file")
                .long("pin-file")
                .value_name("PATH")
                .help("Path to the file with input powers")
                .takes_value(true)
                .default_value("pin.dat"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory where the reports should be written")
                .takes_value(true)
                .default_value("."),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("NUMBER")
                .help("Number of worker threads [default: number of processing units]")
                .takes_value(true),
        )
        .arg(
            Arg::new("omit-invalid-rows")
                .long("omit-invalid-rows")
                .help(
                    "Leave rows with invalid output power out of the report instead of failing\n\
                     the whole laser",
                ),
        )
        .arg(
            Arg::new("output-decimals")
                .long("output-decimals")
                .value_name("NUMBER")
                .help("Number of decimals for output powers in the reports")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT_DECIMALS),
        )
        .arg(
            Arg::new("derived-decimals")
                .long("derived-decimals")
                .value_name("NUMBER")
                .help("Number of decimals for ln(Pout/Pin) and Pout-Pin in the reports")
                .takes_value(true)
                .default_value(DEFAULT_DERIVED_DECIMALS),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show progress bar for the integrations"),
        )
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        )
}

const DEFAULT_OUTPUT_DECIMALS: &str = "14";
const DEFAULT_DERIVED_DECIMALS: &str = "3";
