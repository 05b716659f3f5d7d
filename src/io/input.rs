//! Parsing of laser configuration and input power files.

use super::utils;
use crate::{
    beam::fbm,
    error::{Result, SatinError},
    laser::{GasMix, LaserConfig, OperatingPoint},
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::path::Path;

lazy_static! {
    static ref LASER_RECORD_REGEX: Regex = Regex::new(
        r"((?:md|pi)[a-z]{2}\.out)\s+([0-9]{2}\.[0-9])\s+([0-9]+)\s+(MD|PI)"
    )
    .unwrap();
    static ref INPUT_POWER_REGEX: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Extracts every laser record of the form
/// `<output file> <small-signal gain> <discharge pressure> <MD|PI>` from the given text.
///
/// Text that does not form a complete record is ignored. A record whose values
/// cannot be represented yields an [`SatinError::InvalidLaser`] in its place, so
/// that only this laser fails.
pub fn parse_laser_configs(text: &str) -> Vec<Result<LaserConfig>> {
    LASER_RECORD_REGEX
        .captures_iter(text)
        .map(|captures| parse_laser_record(&captures))
        .collect()
}

fn parse_laser_record(captures: &Captures) -> Result<LaserConfig> {
    let output_id = &captures[1];
    let invalid = |reason: String| SatinError::InvalidLaser {
        laser: output_id.to_string(),
        reason,
    };
    let small_signal_gain = captures[2].parse::<fbm>().map_err(|err| {
        invalid(format!(
            "failed parsing small-signal gain {}: {}",
            &captures[2], err
        ))
    })?;
    let discharge_pressure = captures[3].parse::<u32>().map_err(|err| {
        invalid(format!(
            "failed parsing discharge pressure {}: {}",
            &captures[3], err
        ))
    })?;
    let gas_mix = captures[4]
        .parse::<GasMix>()
        .map_err(|err| invalid(err.to_string()))?;
    Ok(LaserConfig::new(
        output_id,
        small_signal_gain,
        discharge_pressure,
        gas_mix,
    ))
}

/// Extracts every integer in the given text as an input power [W].
pub fn parse_input_powers(text: &str) -> Result<Vec<OperatingPoint>> {
    INPUT_POWER_REGEX
        .find_iter(text)
        .map(|found| {
            found
                .as_str()
                .parse::<u32>()
                .map(OperatingPoint::new)
                .map_err(|err| {
                    SatinError::Configuration(format!(
                        "Failed parsing input power {}: {}",
                        found.as_str(),
                        err
                    ))
                })
        })
        .collect()
}

/// Reads the laser records from the given file.
///
/// A file without any laser record is a configuration error.
pub fn read_laser_configs<P: AsRef<Path>>(file_path: P) -> Result<Vec<Result<LaserConfig>>> {
    let file_path = file_path.as_ref();
    let lasers = parse_laser_configs(&read_configuration_file(file_path)?);
    if lasers.is_empty() {
        return Err(SatinError::Configuration(format!(
            "No laser records found in {}",
            file_path.display()
        )));
    }
    Ok(lasers)
}

/// Reads the input powers from the given file.
///
/// A file without any input power is a configuration error.
pub fn read_input_powers<P: AsRef<Path>>(file_path: P) -> Result<Vec<OperatingPoint>> {
    let file_path = file_path.as_ref();
    let operating_points = parse_input_powers(&read_configuration_file(file_path)?)?;
    if operating_points.is_empty() {
        return Err(SatinError::Configuration(format!(
            "No input powers found in {}",
            file_path.display()
        )));
    }
    Ok(operating_points)
}

fn read_configuration_file(file_path: &Path) -> Result<String> {
    utils::read_text_file(file_path).map_err(|err| {
        SatinError::Configuration(format!(
            "Could not read {}: {}",
            file_path.display(),
            err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laser_records_are_parsed() {
        #![allow(clippy::float_cmp)]
        let text = "# lasers\nmdaa.out 28.4 133 MD\npibb.out  12.0   67 PI\nbad.out 1.0 2 MD\n";
        let lasers: Vec<_> = parse_laser_configs(text)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lasers.len(), 2);
        assert_eq!(lasers[0].output_id, "mdaa.out");
        assert_eq!(lasers[0].small_signal_gain, 28.4);
        assert_eq!(lasers[0].discharge_pressure, 133);
        assert_eq!(lasers[0].gas_mix, GasMix::MainDischarge);
        assert_eq!(lasers[1].output_id, "pibb.out");
        assert_eq!(lasers[1].gas_mix, GasMix::PostIonization);
    }

    #[test]
    fn unrepresentable_records_only_invalidate_their_laser() {
        let text = "mdaa.out 28.4 99999999999 MD\npiaa.out 12.0 67 PI\n";
        let records = parse_laser_configs(text);
        assert_eq!(records.len(), 2);
        match &records[0] {
            Err(SatinError::InvalidLaser { laser, .. }) => assert_eq!(laser, "mdaa.out"),
            other => panic!("Unexpected record {:?}", other),
        }
        assert_eq!(records[1].as_ref().unwrap().output_id, "piaa.out");
    }

    #[test]
    fn only_ascii_digits_form_records() {
        let records =
            parse_laser_configs("piaa.out \u{661}\u{662}.\u{663} 67 PI\npibb.out 12.0 67 PI");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().output_id, "pibb.out");

        let operating_points = parse_input_powers("\u{661}\u{662} 10").unwrap();
        assert_eq!(operating_points, vec![OperatingPoint::new(10)]);
    }

    #[test]
    fn input_powers_are_parsed_from_any_separator() {
        let operating_points = parse_input_powers("10 20\n30,\t40\n").unwrap();
        let input_powers: Vec<_> = operating_points
            .iter()
            .map(|point| point.input_power)
            .collect();
        assert_eq!(input_powers, vec![10, 20, 30, 40]);
    }

    #[test]
    fn overflowing_input_power_is_a_configuration_error() {
        assert!(matches!(
            parse_input_powers("10 99999999999"),
            Err(SatinError::Configuration(_))
        ));
    }

    #[test]
    fn missing_or_empty_files_are_configuration_errors() {
        let directory = tempfile::tempdir().unwrap();
        let missing = directory.path().join("laser.dat");
        assert!(matches!(
            read_laser_configs(&missing),
            Err(SatinError::Configuration(_))
        ));

        let empty = directory.path().join("pin.dat");
        utils::write_text_file_atomically(&empty, "no numbers here").unwrap();
        assert!(matches!(
            read_input_powers(&empty),
            Err(SatinError::Configuration(_))
        ));
    }
}
