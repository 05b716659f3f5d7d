//! Command line runner for the `satin` library.

#[cfg(not(feature = "for-testing"))]
#[quit::main]
fn main() {
    satin::cli::run::run();
}

#[cfg(feature = "for-testing")]
fn main() {
    eprintln!(
        "Warning: The `for-testing` feature is enabled, which turns errors into panics"
    );
    satin::cli::run::run();
}
