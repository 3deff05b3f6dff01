//! Command execution module.
//!
//! Runs external command lines through the system shell.

use std::process::{Command as ProcessCommand, ExitStatus, Stdio};
use std::time::Instant;

use tracing::debug;

/// Something that can run an external command line.
pub trait CommandRunner {
    /// Run `line` and return its exit code, if it exited normally.
    fn run(&mut self, line: &str) -> anyhow::Result<Option<i32>>;
}

/// Command executor.
#[derive(Debug, Default, Clone)]
pub struct Executor {
    /// Shell override; the platform shell when unset
    pub shell: Option<String>,
}

impl Executor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands through `shell` instead of the platform default.
    #[must_use]
    pub fn with_shell(mut self, shell: Option<String>) -> Self {
        self.shell = shell;
        self
    }

    /// Execute a raw command line.
    ///
    /// stdin/stdout/stderr are passed through to the terminal so interactive
    /// commands work.
    pub fn execute_raw(&self, cmd_str: &str) -> anyhow::Result<ExitStatus> {
        let start = Instant::now();

        let (shell, shell_arg) = self.shell_command();
        debug!(shell = %shell, command = %cmd_str, "Executing");

        let status = ProcessCommand::new(shell)
            .arg(shell_arg)
            .arg(cmd_str)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        debug!(command = %cmd_str, ?status, elapsed = ?start.elapsed(), "Command finished");
        Ok(status)
    }

    fn shell_command(&self) -> (String, &'static str) {
        let (default_shell, shell_arg) = get_shell();
        (self.shell.clone().unwrap_or_else(|| default_shell.to_string()), shell_arg)
    }
}

impl CommandRunner for Executor {
    fn run(&mut self, line: &str) -> anyhow::Result<Option<i32>> {
        Ok(self.execute_raw(line)?.code())
    }
}

/// Get the shell and argument for the current platform.
fn get_shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}
