//! Records of external command invocations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Captured result of one blocking subprocess run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    /// Build an output with the given exit code and empty streams.
    #[must_use]
    pub const fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Exit status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// One entry in the command audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandLogEntry {
    /// Executable that was launched
    pub program: PathBuf,
    /// Arguments passed after the program
    pub args: Vec<String>,
    /// Exit code
    pub code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// When the command finished
    pub ran_at: DateTime<Utc>,
}

impl CommandLogEntry {
    /// Record a finished command.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, output: &CommandOutput) -> Self {
        Self {
            program: program.into(),
            args,
            code: output.code,
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            ran_at: Utc::now(),
        }
    }

    /// The `$ program args...` echo line used in diagnostic dumps.
    #[must_use]
    pub fn echo_line(&self) -> String {
        let mut line = format!("$ {}", self.program.display());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
