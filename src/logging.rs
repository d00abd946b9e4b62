//! Log destinations selected by `--logfile`.
//!
//! The same sink receives the tool's own `tracing` output and the stdout/stderr of
//! every test-runner invocation:
//! - `-`: standard error (runner stdout is sent there too)
//! - empty: an in-memory buffer, dumped to standard error only if the run fails
//! - anything else: a file, created or truncated

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{GocoverdirError, Result};

/// Value of `--logfile` that selects standard error.
pub const STDERR_LOGFILE: &str = "-";

#[derive(Debug, Clone)]
pub enum LogSink {
    Stderr,
    Buffer(Arc<Mutex<Vec<u8>>>),
    File { path: PathBuf, file: Arc<File> },
}

impl LogSink {
    /// Open the sink described by a `--logfile` value.
    ///
    /// # Errors
    /// Returns an error if the log file cannot be created.
    pub fn open(logfile: &str) -> Result<Self> {
        match logfile {
            STDERR_LOGFILE => Ok(Self::Stderr),
            "" => Ok(Self::buffer()),
            path => Self::file(Path::new(path)),
        }
    }

    #[must_use]
    pub fn buffer() -> Self {
        Self::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    fn file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|source| GocoverdirError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::File {
            path: path.to_path_buf(),
            file: Arc::new(file),
        })
    }

    /// Stdio handles for a runner's (stdout, stderr).
    ///
    /// Buffered sinks get pipes; the captured bytes come back through [`Self::absorb`].
    ///
    /// # Errors
    /// Returns an error if the log file handle cannot be duplicated.
    pub fn runner_stdio(&self) -> io::Result<(Stdio, Stdio)> {
        match self {
            Self::Stderr => Ok((Stdio::from(io::stderr()), Stdio::inherit())),
            Self::Buffer(_) => Ok((Stdio::piped(), Stdio::piped())),
            Self::File { file, .. } => Ok((
                Stdio::from(file.try_clone()?),
                Stdio::from(file.try_clone()?),
            )),
        }
    }

    /// Append output captured from a runner.
    pub fn absorb(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        // Best effort: a lost log line must not fail the run.
        let _ = self.make_writer().write_all(bytes);
    }

    /// Copy of everything buffered so far (empty for unbuffered sinks).
    #[must_use]
    pub fn buffered(&self) -> Vec<u8> {
        match self {
            Self::Buffer(buffer) => buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            Self::Stderr | Self::File { .. } => Vec::new(),
        }
    }

    /// Make a fatal error visible on standard error.
    ///
    /// The error itself must already have been logged into the sink.
    pub fn report_fatal(&self, err: &GocoverdirError) {
        match self {
            Self::Stderr => {}
            Self::Buffer(_) => {
                let mut stderr = io::stderr().lock();
                let _ = stderr.write_all(&self.buffered());
                let _ = stderr.flush();
            }
            Self::File { path, .. } => {
                eprintln!("Error: {err} (see {})", path.display());
            }
        }
    }

    fn writes_to_terminal(&self) -> bool {
        matches!(self, Self::Stderr)
    }
}

/// Writer handed out by [`LogSink`] for each log event.
pub enum SinkWriter {
    Stderr(io::Stderr),
    Buffer(Arc<Mutex<Vec<u8>>>),
    File(Arc<File>),
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(stderr) => stderr.write(buf),
            Self::Buffer(buffer) => {
                buffer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(buf);
                Ok(buf.len())
            }
            Self::File(file) => (&**file).write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(stderr) => stderr.flush(),
            Self::Buffer(_) => Ok(()),
            Self::File(file) => (&**file).flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            Self::Stderr => SinkWriter::Stderr(io::stderr()),
            Self::Buffer(buffer) => SinkWriter::Buffer(Arc::clone(buffer)),
            Self::File { file, .. } => SinkWriter::File(Arc::clone(file)),
        }
    }
}

/// Install the global tracing subscriber writing into `sink`.
///
/// `RUST_LOG` overrides the default `info` level. Timestamps are only written
/// when logging to the terminal.
pub fn init(sink: &LogSink) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(sink.clone());

    let _ = if sink.writes_to_terminal() {
        builder.try_init()
    } else {
        builder.with_ansi(false).without_time().try_init()
    };
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
