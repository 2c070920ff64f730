//! Unambiguous rendering of command lines.

use std::ffi::OsStr;
use std::fmt;
use std::process::Command;

pub const OPEN_DELIMITER: char = '«';
pub const CLOSE_DELIMITER: char = '»';

/// A program and its arguments, rendered shell-quoted between `«` and `»`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    args: Vec<String>,
}

impl CommandLine {
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            args: args
                .into_iter()
                .map(|arg| arg.as_ref().to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Program followed by its arguments.
    pub fn from_command(command: &Command) -> Self {
        Self::from_args(std::iter::once(command.get_program()).chain(command.get_args()))
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{OPEN_DELIMITER}{}{CLOSE_DELIMITER}",
            shell_words::join(&self.args)
        )
    }
}
