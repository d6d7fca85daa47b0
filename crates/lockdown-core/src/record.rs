//! Append-only record log.
//!
//! Each run writes a date header, then one indented line per event:
//! `\t[HH:MM:SS]: [Category]message;`. The file is opened and closed on
//! every append so nothing is held open between monitor iterations.
//! Write failures are swallowed: recording must never stop the monitor.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveTime};

use crate::{Error, Result};

/// Tag written in front of a record message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Info,
    Kill,
    Protect,
    Ordinary,
    Force,
    Include,
    ExInclude,
    Exit,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Kill => "Kill",
            Self::Protect => "Protect",
            Self::Ordinary => "Ordinary",
            Self::Force => "Force",
            Self::Include => "Include",
            Self::ExInclude => "ExInclude",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record line, before the timestamp is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// `None` for plain title lines written when recording everything.
    pub category: Option<Category>,
    pub message: String,
}

impl Entry {
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Category::Info, message)
    }

    /// An untagged line, used for unmatched titles.
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            category: None,
            message: message.into(),
        }
    }

    /// Formats the entry as a full record line, newline included.
    pub fn format(&self, time: NaiveTime) -> String {
        let time = time.format("%H:%M:%S");
        match self.category {
            Some(category) => format!("\t[{time}]: [{category}]{};\n", self.message),
            None => format!("\t[{time}]: {};\n", self.message),
        }
    }
}

/// Formats the per-run date header line.
pub fn date_header(date: NaiveDate) -> String {
    format!("{}\n", date.format("%Y年%m月%d日"))
}

/// Handle to the record log file. Holds only the path.
#[derive(Debug, Clone)]
pub struct RecordLog {
    path: PathBuf,
}

impl RecordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Starts a run by writing today's date header. When the file did
    /// not exist yet, a "created" entry follows the header.
    ///
    /// Returns `true` if the file was created. Unlike [`append`], errors
    /// are reported, since a log that cannot be created at start-up is
    /// worth aborting for.
    ///
    /// [`append`]: Self::append
    pub fn begin_session(&self) -> Result<bool> {
        let created = !self.path.exists();
        let now = Local::now();
        let mut text = date_header(now.date_naive());
        if created {
            let entry = Entry::info(format!(
                "record file ({}) created",
                self.path.display()
            ));
            text.push_str(&entry.format(now.time()));
        }
        self.write(&text).map_err(|e| Error::io(&self.path, e))?;
        Ok(created)
    }

    /// Appends one entry stamped with the current local time.
    pub fn append(&self, entry: &Entry) {
        let line = entry.format(Local::now().time());
        let _ = self.write(&line);
    }

    fn write(&self, text: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 9).unwrap()
    }

    #[test]
    fn tagged_entry_format() {
        // Arrange
        let entry = Entry::new(Category::Ordinary, "closed [Notepad]");

        // Act
        let line = entry.format(noon());

        // Assert
        assert_eq!(line, "\t[12:05:09]: [Ordinary]closed [Notepad];\n");
    }

    #[test]
    fn plain_entry_has_no_tag() {
        let line = Entry::plain("Inbox - Outlook").format(noon());

        assert_eq!(line, "\t[12:05:09]: Inbox - Outlook;\n");
    }

    #[test]
    fn date_header_uses_year_month_day_markers() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert_eq!(date_header(date), "2024年03月07日\n");
    }

    #[test]
    fn categories_render_their_names() {
        assert_eq!(Category::ExInclude.to_string(), "ExInclude");
        assert_eq!(Category::Kill.to_string(), "Kill");
    }

    #[test]
    fn first_session_creates_file_with_created_entry() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let log = RecordLog::new(dir.path().join("record.log"));

        // Act
        let created = log.begin_session().unwrap();
        let text = std::fs::read_to_string(log.path()).unwrap();

        // Assert
        assert!(created);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with('日'));
        assert!(lines[1].contains("[Info]record file"));
    }

    #[test]
    fn later_sessions_only_append_a_date_header() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let log = RecordLog::new(dir.path().join("record.log"));
        log.begin_session().unwrap();

        // Act
        let created = log.begin_session().unwrap();
        log.append(&Entry::new(Category::Exit, "bye"));
        let text = std::fs::read_to_string(log.path()).unwrap();

        // Assert
        assert!(!created);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with('日'));
        assert!(lines[3].starts_with("\t["));
        assert!(lines[3].ends_with("[Exit]bye;"));
    }

    #[test]
    fn append_to_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let log = RecordLog::new(dir.path().join("missing").join("record.log"));

        log.append(&Entry::info("dropped"));

        assert!(!log.path().exists());
    }
}
