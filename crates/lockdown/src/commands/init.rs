use std::path::Path;

use lockdown_core::config;

/// Creates the default rule file. An existing file is left alone.
pub fn execute(dir: Option<&Path>) {
    let paths = super::paths(dir);
    if let Err(e) = paths.create_dir() {
        super::fail(e);
    }

    match config::ensure_rule_file(&paths.rules) {
        Ok(true) => println!("Created {}", paths.rules.display()),
        Ok(false) => println!("Already exists: {}", paths.rules.display()),
        Err(e) => super::fail(e),
    }
}
