//! Command line interface.

pub mod build;
pub mod run;
pub mod utils;
