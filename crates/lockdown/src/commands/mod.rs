pub mod check;
pub mod debug;
pub mod init;
pub mod run;

use std::path::Path;

use lockdown_core::config::Paths;

/// Resolves the data paths or exits with an error.
fn paths(dir: Option<&Path>) -> Paths {
    match Paths::resolve(dir) {
        Ok(paths) => paths,
        Err(e) => fail(e),
    }
}

/// Prints `e` and exits with status 1.
fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}
