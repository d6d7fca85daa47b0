use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{Config, RuleSet, parse, template};
use crate::{Error, Result};

/// Rule file name inside the data directory.
pub const RULE_FILE_NAME: &str = "rules.txt";
/// Record log name inside the data directory.
pub const RECORD_FILE_NAME: &str = "record.log";

/// Returns the default data directory: `~/.config/lockdown/`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("lockdown"))
}

/// Locations of the files Lockdown reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub dir: PathBuf,
    pub rules: PathBuf,
    pub record: PathBuf,
}

impl Paths {
    /// Resolves the file locations inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            rules: dir.join(RULE_FILE_NAME),
            record: dir.join(RECORD_FILE_NAME),
            dir,
        }
    }

    /// Resolves the file locations, using [`data_dir`] unless an
    /// override is given.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self::in_dir(dir)),
            None => data_dir().map(Self::in_dir).ok_or(Error::NoHomeDir),
        }
    }

    /// Creates the data directory if it doesn't exist.
    pub fn create_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))
    }
}

/// Writes the default rule file if `path` doesn't exist.
///
/// Returns `true` when the file was created. An existing file is never
/// overwritten.
pub fn ensure_rule_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, template::generate_rules()).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

/// Reads and parses the rule file.
pub fn load(path: &Path) -> Result<(Config, RuleSet)> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse(&text))
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a Config,
    rules: &'a RuleSet,
}

/// Renders the parsed rule file as pretty-printed JSON.
///
/// The password is never included.
pub fn report_json(config: &Config, rules: &RuleSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Report { config, rules })?)
}
