//! Destinations for the JSON log stream.
//!
//! Uses enum dispatch like the other output handlers: stdout by default, a
//! fresh file when a log directory is configured, or a shared in-memory
//! buffer when output needs to be captured.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{LogConfig, LogError, Result};

const LOG_FILE_PREFIX: &str = "extractor.";
const LOG_FILE_SUFFIX: &str = ".log";

/// In-memory byte buffer that can be cloned and read while it is written.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written lines, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where JSON log lines go.
pub enum LogStream {
    Stdout(BufWriter<Stdout>),
    File { writer: BufWriter<File>, path: PathBuf },
    Buffer(SharedBuffer),
    /// A caller-supplied writer.
    Custom(Box<dyn Write + Send>),
}

impl LogStream {
    /// Open the stream described by `config`.
    ///
    /// With a log directory, a new uniquely named file is created in it;
    /// existing files are never reused.
    pub fn open(config: &LogConfig) -> Result<Self> {
        match &config.log_dir {
            None => Ok(LogStream::stdout()),
            Some(dir) => LogStream::create_in(dir),
        }
    }

    pub fn stdout() -> Self {
        LogStream::Stdout(BufWriter::new(io::stdout()))
    }

    /// Create a fresh `extractor.*.log` file in `dir`.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let create_err = |source| LogError::CreateLogFile {
            dir: dir.to_path_buf(),
            source,
        };
        let named = tempfile::Builder::new()
            .prefix(LOG_FILE_PREFIX)
            .suffix(LOG_FILE_SUFFIX)
            .tempfile_in(dir)
            .map_err(create_err)?;
        let (file, path) = named.keep().map_err(|e| create_err(e.error))?;
        tracing::debug!(path = %path.display(), "opened log file");
        Ok(LogStream::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Path of the log file, if the stream writes to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LogStream::File { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<SharedBuffer> for LogStream {
    fn from(buffer: SharedBuffer) -> Self {
        LogStream::Buffer(buffer)
    }
}

impl Write for LogStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogStream::Stdout(w) => w.write(buf),
            LogStream::File { writer, .. } => writer.write(buf),
            LogStream::Buffer(w) => w.write(buf),
            LogStream::Custom(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogStream::Stdout(w) => w.flush(),
            LogStream::File { writer, .. } => writer.flush(),
            LogStream::Buffer(w) => w.flush(),
            LogStream::Custom(w) => w.flush(),
        }
    }
}
