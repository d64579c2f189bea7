//! Per-input error log.
//!
//! Each input file gets its own log, `error_<file name>`, next to the input.
//! The file is only touched once something goes wrong: the first record
//! truncates it, every later record is appended as one line.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    written: bool,
}

impl ErrorLog {
    /// Log associated with `input`.
    pub fn for_input(input: &Path) -> Self {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string_lossy().into_owned());
        let path = input.with_file_name(format!("error_{}", name));
        Self {
            path,
            written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating or truncating the file on the first call.
    pub fn record(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        let message = message.as_ref();
        warn!("{}", message);

        let mut file = if self.written {
            OpenOptions::new().append(true).create(true).open(&self.path)?
        } else {
            fs::File::create(&self.path)?
        };
        writeln!(file, "{}", message)?;
        self.written = true;
        Ok(())
    }

    /// Like [`ErrorLog::record`], but a failing write only reaches the console.
    pub fn record_lossy(&mut self, message: impl AsRef<str>) {
        if let Err(err) = self.record(message.as_ref()) {
            warn!("cannot write error log {}: {}", self.path.display(), err);
        }
    }
}
