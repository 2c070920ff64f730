//! Subprocess subsystem.
//!
//! # Data Flow
//! ```text
//! run(args) / Command::spawn_audited()
//!     → audit.rs (log «shell-quoted argv», cwd, env overrides)
//!     → spawn
//!     → runner.rs (stream :stdout: / :stderr: lines, log :exited: code)
//! ```
//!
//! # Design Decisions
//! - Auditing is an explicit wrapper around the spawn call site
//! - Argument lists are shell-quoted so spaces and empty strings stay visible

pub mod audit;
pub mod command_line;
pub mod runner;

pub use audit::{exec_audit_enabled, log_command, log_exec, set_exec_audit, AuditedCommand};
pub use command_line::CommandLine;
pub use runner::{run, run_shell, ProcessError, ProcessOutput, RunOptions};
