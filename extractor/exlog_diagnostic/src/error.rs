//! Errors raised while writing logs and diagnostic records.

use std::io;
use std::path::PathBuf;

/// A failure to write one of the two outputs. These are fatal to the caller
/// and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to write to the log stream")]
    Stream(#[source] io::Error),

    #[error("failed to write a trap record")]
    Trap(#[source] io::Error),

    #[error("failed to create a log file in `{}`", .dir.display())]
    CreateLogFile {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = LogError> = std::result::Result<T, E>;

/// Tag trap writer I/O results as [`LogError::Trap`].
pub(crate) trait TrapResultExt<T> {
    fn trap_err(self) -> Result<T>;
}

impl<T> TrapResultExt<T> for io::Result<T> {
    fn trap_err(self) -> Result<T> {
        self.map_err(LogError::Trap)
    }
}
