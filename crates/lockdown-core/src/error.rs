use std::path::PathBuf;

/// Errors raised while setting up a lockdown session.
///
/// OS queries never produce these: the [`Desktop`](crate::Desktop)
/// boundary degrades to empty results instead. Only start-up file work
/// (data directory, rule file, record log) and report serialization can
/// fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
