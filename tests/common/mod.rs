#![allow(dead_code)]

use satin::{cli, exit_on_error, io::utils as io_utils};
use lazy_static::lazy_static;
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub const LASER_FILE_CONTENT: &str = "\
mdaa.out  28.4  133  MD
mdab.out  00.0  133  MD
piaa.out  12.0   67  PI
";

pub const PIN_FILE_CONTENT: &str = "10 100\n";

#[macro_export]
macro_rules! def_test {
    (
        IN[$($in_ident:ident = $in_str:expr => $in_content:expr),*]
        OUT[$($out_ident:ident = $out_str:expr),*]
        $(#[$attr:meta])*
        fn $name:ident $test_body:expr
    ) => {
        #[test]
        $(#[$attr])*
        fn $name() {
            let test = common::Test::new(stringify!($name));

            $( let $in_ident = test.input_path($in_str, $in_content); )*
            $( let $out_ident = test.output_path($out_str); )*

            let test_body = |$( $in_ident: &str, )* $( $out_ident: &str, )*| $test_body;

            test_body(
                $( path_str!($in_ident), )* $( path_str!($out_ident), )*
            );
        }
    };
}

#[macro_export]
macro_rules! path_str {
    ($path:expr) => {
        $path.to_string_lossy().as_ref()
    };
}

lazy_static! {
    static ref COMMAND: clap::Command<'static> = cli::build::build().no_binary_name(true);
}

pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cli::run::run_with_args(COMMAND.clone().get_matches_from(args));
}

pub fn assert_file_exists<P: AsRef<Path>>(file_path: P) {
    let file_path = file_path.as_ref();
    assert!(
        file_path.is_file(),
        "File {} does not exist",
        file_path.to_string_lossy()
    );
}

pub fn assert_file_missing<P: AsRef<Path>>(file_path: P) {
    let file_path = file_path.as_ref();
    assert!(
        !file_path.exists(),
        "File {} should not exist",
        file_path.to_string_lossy()
    );
}

/// Returns the result table of the given report, without header and footer.
pub fn read_report_rows<P: AsRef<Path>>(file_path: P) -> Vec<String> {
    let file_path = file_path.as_ref();
    let text = exit_on_error!(
        fs::read_to_string(file_path),
        "Error: Could not read report {}: {}",
        file_path.display()
    );
    text.lines()
        .skip_while(|line| !line.starts_with("(watts)"))
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Temporary working directory of a single test.
#[derive(Debug)]
pub struct Test {
    directory: TempDir,
}

impl Test {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        let name = name.as_ref();
        let directory = exit_on_error!(
            tempfile::Builder::new().prefix(name).tempdir(),
            "Error: Could not prepare directory for test {}: {}",
            name
        );
        Self { directory }
    }

    /// Writes an input file with the given content and returns its path.
    pub fn input_path<S: AsRef<str>>(&self, file_name: S, content: &str) -> PathBuf {
        let file_path = self.directory.path().join(file_name.as_ref());
        exit_on_error!(
            io_utils::write_text_file_atomically(&file_path, content),
            "Error: Could not write test input: {}"
        );
        file_path
    }

    pub fn output_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.directory.path().join(file_name.as_ref())
    }
}
