//! Subprocess runner that streams child output into the log.
//!
//! # Responsibilities
//! - Spawn through the exec audit
//! - Log every stdout/stderr line as it arrives, tagged with its stream
//! - Keep the raw bytes for the caller
//! - Log a non-zero exit
//!
//! # Design Decisions
//! - Both pipes are drained concurrently inside the calling task, so the
//!   caller's prefix is on every line and neither pipe can fill up and stall
//! - Output is decoded lossily for the log only; the returned bytes are raw

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use super::audit::AuditedCommand;
use crate::style::Format;

/// Error type for subprocess execution.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command line")]
    EmptyCommand,

    #[error("failed to spawn {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("failed to read child {stream}: {source}")]
    Read {
        stream: &'static str,
        source: io::Error,
    },

    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),
}

/// Launch options.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory for the child.
    pub cwd: Option<PathBuf>,
    /// Variables added to the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl RunOptions {
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// What a finished child left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `args[0]` with the remaining arguments, logging its output line by line.
pub async fn run<I, S>(args: I, options: &RunOptions) -> Result<ProcessOutput, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args
        .into_iter()
        .map(|arg| arg.as_ref().to_os_string())
        .collect();
    let (program, rest) = args.split_first().ok_or(ProcessError::EmptyCommand)?;

    let mut command = Command::new(program);
    command
        .args(rest)
        .envs(&options.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }

    let mut child = command
        .spawn_audited()
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;

    let (stdout, stderr) = tokio::try_join!(
        read_and_log("stdout", child.stdout.take()),
        read_and_log("stderr", child.stderr.take()),
    )?;

    let status = child.wait().await.map_err(ProcessError::Wait)?;
    if !status.success() {
        tracing::info!(
            "  {}",
            Format::default().dimmed().apply(format!(":exited: {}", describe(status)))
        );
    }

    Ok(ProcessOutput {
        code: status.code(),
        stdout,
        stderr,
    })
}

/// Run `cmd` through `bash -c`.
pub async fn run_shell(cmd: &str, options: &RunOptions) -> Result<ProcessOutput, ProcessError> {
    run(["bash", "-c", "--", cmd], options).await
}

async fn read_and_log<R>(label: &'static str, pipe: Option<R>) -> Result<Vec<u8>, ProcessError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    let Some(pipe) = pipe else {
        return Ok(buffer);
    };

    let dim = Format::default().dimmed();
    let tag = format!(":{label}: ");
    let mut reader = BufReader::new(pipe);
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(|source| ProcessError::Read {
                stream: label,
                source,
            })?;
        if read == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&line);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        tracing::info!("  {}{}", dim.apply(&tag), dim.apply(text));
        buffer.extend_from_slice(&line);
    }

    Ok(buffer)
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => status.to_string(),
    }
}
