// mysqlbackuptool/src/report/mod.rs
//! Monitoring agent interface.
//!
//! Run progress is reported to an external monitoring service identified by an
//! application id. Reporting is fire-and-forget: a failure to deliver a report
//! must never abort a backup run.

use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Message,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Message => "MESSAGE",
            Severity::Success => "SUCCESS",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

pub trait SystemReporter {
    /// Delivers one report line to the monitoring service. Fire-and-forget.
    fn log(&self, app_id: &str, severity: Severity, message: &str);
}

/// Reporter that appends timestamped lines to a local agent spool file.
pub struct FileReporter {
    path: PathBuf,
}

impl FileReporter {
    pub fn new(path: PathBuf) -> Self {
        FileReporter { path }
    }
}

impl SystemReporter for FileReporter {
    fn log(&self, app_id: &str, severity: Severity, message: &str) {
        let line = format!(
            "{} [{}] {} {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            app_id,
            severity,
            message
        );
        // Delivery failures are swallowed: monitoring must not block backups.
        let _ = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(line.as_bytes()));
    }
}

/// Reporter that discards everything. Used when no report log is configured
/// and in tests.
pub struct NullReporter;

impl SystemReporter for NullReporter {
    fn log(&self, _app_id: &str, _severity: Severity, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_reporter_appends_lines() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("agent.log");
        let reporter = FileReporter::new(path.clone());

        reporter.log("309401bf", Severity::Message, "Starting System");
        reporter.log("309401bf", Severity::Success, "Backup complete for 01/01/2026");

        let contents = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[309401bf] MESSAGE Starting System"));
        assert!(lines[1].contains("SUCCESS Backup complete for 01/01/2026"));
        Ok(())
    }

    #[test]
    fn test_file_reporter_swallows_delivery_failure() {
        let reporter = FileReporter::new(PathBuf::from("/nonexistent/dir/agent.log"));
        // Must not panic or return an error.
        reporter.log("309401bf", Severity::Error, "unreachable spool");
    }
}
