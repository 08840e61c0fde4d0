// mysqlbackuptool/src/backup/runner.rs
use anyhow::{Context, Result};
use std::process::Command;
use which::which;

use crate::errors::AppError;

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub code: Option<i32>,
}

/// Executes one shell command and returns its captured stdout.
///
/// Implementations must return an [`AppError::Command`] when the command exits
/// non-zero, so callers never have to scrape captured text to detect failure.
pub trait ProcessRunner {
    fn run(&self, command: &str) -> Result<CommandOutput>;
}

/// Runs commands through `sh -c`, which the dump pipeline needs for its
/// `mysqldump | gzip > file` stage.
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .with_context(|| format!("Failed to execute shell command: {}", command))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            return Err(AppError::Command {
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                code: output.status.code(),
            }
            .into());
        }

        Ok(CommandOutput {
            lines: stdout.lines().map(|l| l.to_string()).collect(),
            code: output.status.code(),
        })
    }
}

/// Verifies the external dump tooling is available before a real run starts.
pub fn ensure_dump_tooling() -> Result<()> {
    which("mysqldump").context(
        "mysqldump executable not found in PATH. Please ensure MySQL client tools are installed and in your PATH.",
    )?;
    which("gzip").context("gzip executable not found in PATH.")?;
    Ok(())
}
