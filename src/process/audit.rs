//! Subprocess-exec auditing.
//!
//! Every command launched through [`AuditedCommand`] is logged before it is
//! spawned. Logging never fails and never blocks the launch.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::process::CommandLine;
use crate::style::{lg, lg_path, Color, Format};

static EXEC_AUDIT: AtomicBool = AtomicBool::new(true);

/// Switch exec logging on or off for the whole process.
pub fn set_exec_audit(enabled: bool) {
    EXEC_AUDIT.store(enabled, Ordering::Relaxed);
}

pub fn exec_audit_enabled() -> bool {
    EXEC_AUDIT.load(Ordering::Relaxed)
}

/// Log the command `command` is about to run.
pub fn log_command(command: &Command) {
    if !exec_audit_enabled() {
        return;
    }

    let env: BTreeMap<String, Option<String>> = command
        .get_envs()
        .map(|(key, value)| {
            (
                key.to_string_lossy().into_owned(),
                value.map(|value| value.to_string_lossy().into_owned()),
            )
        })
        .collect();

    log_exec(
        &CommandLine::from_command(command),
        command.get_current_dir(),
        &env,
    );
}

/// Log one exec: the command line, then working directory and environment
/// overrides when present. A `None` environment value marks a removed variable.
pub fn log_exec(line: &CommandLine, cwd: Option<&Path>, env: &BTreeMap<String, Option<String>>) {
    let env = if env.is_empty() {
        None
    } else {
        serde_json::to_string(env).ok()
    };
    let env_format = Format::color(Color::Yellow);

    match (cwd, env) {
        (None, None) => tracing::info!("Running {}", lg(line)),
        (Some(cwd), None) => {
            tracing::info!("Running {} (cwd: {})", lg(line), lg_path(cwd))
        }
        (None, Some(env)) => {
            tracing::info!("Running {} (env: {})", lg(line), env_format.apply(env))
        }
        (Some(cwd), Some(env)) => tracing::info!(
            "Running {} (cwd: {}, env: {})",
            lg(line),
            lg_path(cwd),
            env_format.apply(env)
        ),
    }
}

/// Spawn with an exec log entry first.
pub trait AuditedCommand {
    type Child;

    fn spawn_audited(&mut self) -> io::Result<Self::Child>;
}

impl AuditedCommand for Command {
    type Child = std::process::Child;

    fn spawn_audited(&mut self) -> io::Result<Self::Child> {
        log_command(self);
        self.spawn()
    }
}

impl AuditedCommand for tokio::process::Command {
    type Child = tokio::process::Child;

    fn spawn_audited(&mut self) -> io::Result<Self::Child> {
        log_command(self.as_std());
        self.spawn()
    }
}
