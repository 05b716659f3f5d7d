//! Utilities for input/output.

use crate::error::{Result, SatinError};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};
use tempfile::NamedTempFile;

/// Reads and returns the content of the specified text file.
pub fn read_text_file<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let file_path = file_path.as_ref();
    let mut text = String::new();
    fs::File::open(file_path)
        .and_then(|file| io::BufReader::new(file).read_to_string(&mut text))
        .map_err(|err| SatinError::io(file_path, err))?;
    Ok(text)
}

/// Writes the given text to the specified file.
///
/// The text is first written to a temporary file in the same directory, which
/// then replaces any existing file at the target path. An interrupted write
/// therefore never leaves a truncated file behind.
pub fn write_text_file_atomically<P: AsRef<Path>>(file_path: P, text: &str) -> Result<()> {
    let file_path = file_path.as_ref();
    let directory = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temporary_file =
        NamedTempFile::new_in(directory).map_err(|err| SatinError::io(directory, err))?;
    let temporary_path = temporary_file.path().to_path_buf();
    temporary_file
        .write_all(text.as_bytes())
        .and_then(|_| temporary_file.flush())
        .map_err(|err| SatinError::io(temporary_path, err))?;
    temporary_file
        .persist(file_path)
        .map_err(|err| SatinError::io(file_path, err.error))?;
    Ok(())
}
