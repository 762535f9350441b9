//! # Oasis Console Entry Point
//!
//! ```text
//! oasis [dashboard|rooms|requests|orders|tables|pool]
//! ```
//!
//! Loads configuration, seeds demo data and prints the chosen view as JSON.
//! Errors are printed as JSON on stderr with a non-zero exit code.

use std::process::ExitCode;

fn main() -> ExitCode {
    let view = std::env::args().nth(1).unwrap_or_default();

    match oasis_console::run(&view) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match serde_json::to_string(&err) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}
