//! POSIX `df` fallback for hosts where the native free-space query fails.
//!
//! Runs `df -Pk <path>`, skips the header line and reads the fourth column
//! ("Available", in 1024-byte blocks) of the first data line.

#![allow(missing_docs)]

use std::ffi::{OsStr, OsString};
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::cancel::CancelToken;
use crate::core::config::ProbeConfig;
use crate::core::errors::{Result, TflError};

const AVAILABLE_FIELD: usize = 3;
const KIB: u64 = 1024;

/// Outcome of waiting on the `df` child.
enum WaitOutcome {
    Exited,
    Interrupted,
}

/// Spawns `df` and parses its portable output.
#[derive(Debug, Clone)]
pub struct DfProbe {
    program: OsString,
    base_args: Vec<OsString>,
    poll_interval: Duration,
}

impl Default for DfProbe {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default())
    }
}

impl DfProbe {
    #[must_use]
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            program: OsString::from(&config.df_program),
            base_args: Vec::new(),
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
        }
    }

    /// Use `program` with extra leading arguments in place of `df`.
    ///
    /// The probe still appends `-Pk <path>`.
    #[must_use]
    pub fn with_command<I, S>(program: impl AsRef<OsStr>, base_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            program: program.as_ref().to_os_string(),
            base_args: base_args
                .into_iter()
                .map(|arg| arg.as_ref().to_os_string())
                .collect(),
            poll_interval: Duration::from_millis(ProbeConfig::default().poll_interval_ms),
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }

    /// Usable bytes on the filesystem containing `path`.
    ///
    /// Returns `Ok(0)` when `cancel` fires (or the wait is interrupted) before
    /// `df` finishes; the child is killed in that case.
    pub fn available_bytes(&self, path: &Path, cancel: &CancelToken) -> Result<u64> {
        if cancel.is_cancelled() {
            return Ok(0);
        }

        let mut child = Command::new(&self.program)
            .args(&self.base_args)
            .arg("-Pk")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| TflError::io(path, source))?;

        // Drain stdout while polling so a chatty child cannot fill the pipe.
        let reader = child
            .stdout
            .take()
            .map(spawn_stdout_reader)
            .transpose()
            .map_err(|source| {
                let _ = child.kill();
                let _ = child.wait();
                TflError::io(path, source)
            })?;

        match self.wait(&mut child, path, cancel)? {
            WaitOutcome::Interrupted => {
                let _ = child.kill();
                let _ = child.wait();
                // Reader thread finishes on its own once the pipe closes.
                return Ok(0);
            }
            WaitOutcome::Exited => {}
        }

        let output = match reader {
            Some(handle) => handle
                .join()
                .map_err(|_| TflError::invalid_data(path, "df output reader panicked"))?
                .map_err(|source| TflError::io(path, source))?,
            None => String::new(),
        };
        parse_df_output(&output, path)
    }

    fn wait(&self, child: &mut Child, path: &Path, cancel: &CancelToken) -> Result<WaitOutcome> {
        loop {
            if cancel.is_cancelled() {
                return Ok(WaitOutcome::Interrupted);
            }
            match child.try_wait() {
                Ok(Some(_status)) => return Ok(WaitOutcome::Exited),
                Ok(None) => thread::sleep(self.poll_interval),
                Err(error) if error.kind() == ErrorKind::Interrupted => {
                    return Ok(WaitOutcome::Interrupted);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(TflError::io(path, source));
                }
            }
        }
    }
}

fn spawn_stdout_reader(mut stdout: ChildStdout) -> io::Result<JoinHandle<io::Result<String>>> {
    thread::Builder::new()
        .name("tupleflow-df-stdout".into())
        .spawn(move || {
            let mut output = String::new();
            stdout.read_to_string(&mut output)?;
            Ok(output)
        })
}

/// Parse `df -Pk` output into usable bytes.
///
/// The exit status of `df` is not consulted: a failed `df` prints no data
/// line and is reported here as unparsable output.
pub fn parse_df_output(output: &str, path: &Path) -> Result<u64> {
    let mut lines = output.lines();
    let _header = lines.next();
    let line = lines
        .next()
        .ok_or_else(|| TflError::invalid_data(path, "df produced no data line"))?;
    let field = line
        .split_whitespace()
        .nth(AVAILABLE_FIELD)
        .ok_or_else(|| {
            TflError::invalid_data(path, format!("df data line has too few fields: {line:?}"))
        })?;
    let kib = field.parse::<u64>().map_err(|error| {
        TflError::invalid_data(path, format!("df available field {field:?}: {error}"))
    })?;
    Ok(kib.saturating_mul(KIB))
}
