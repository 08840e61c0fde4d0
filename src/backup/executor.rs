// mysqlbackuptool/src/backup/executor.rs
use anyhow::{Context, Result};
use std::fs;

use crate::backup::context::RunContext;
use crate::backup::runner::ProcessRunner;
use crate::config::DumpCredentials;
use crate::output::{display, tagged_line, StyledLine};

const SIMULATED_DUMP_OUTPUT: &str = "Backup complete";

/// Dumps one database into the run's backup directory.
///
/// Builds the `mysqldump | gzip` pipeline for the run's mode, executes it
/// through the supplied runner (or synthesizes output in simulation), and
/// returns the captured stdout lines.
pub fn run_backup(
    ctx: &RunContext,
    credentials: &DumpCredentials,
    database: &str,
    runner: &dyn ProcessRunner,
) -> Result<Vec<String>> {
    let backup_dir = ctx.backup_dir();

    // Idempotent: an existing directory is fine. Simulation touches nothing.
    if !ctx.simulate {
        fs::create_dir_all(&backup_dir).with_context(|| {
            format!(
                "Failed to create backup directory: {}",
                backup_dir.display()
            )
        })?;
    }

    let command = dump_command(ctx, credentials, database);
    if ctx.debug {
        display(
            &StyledLine::new()
                .plain("[")
                .detail("DEBUG")
                .plain("] MySQL Command : ")
                .name(&command),
            ctx.colorize,
        );
    }

    if ctx.simulate {
        return Ok(vec![SIMULATED_DUMP_OUTPUT.to_string()]);
    }

    let output = runner
        .run(&command)
        .with_context(|| format!("Dump command failed for database {}", database))?;
    Ok(output.lines)
}

/// The full dump pipeline for one database.
fn dump_command(ctx: &RunContext, credentials: &DumpCredentials, database: &str) -> String {
    let verbose = if ctx.debug { "--verbose " } else { "" };
    let mode_flags = ctx.mode.dump_flags();
    let separator = if mode_flags.is_empty() { "" } else { " " };
    format!(
        "mysqldump -u {} -p{} -h {} --port={} {}{}{}{} | gzip -9 > {}",
        credentials.user,
        credentials.password,
        credentials.host,
        credentials.port,
        verbose,
        database,
        separator,
        mode_flags,
        ctx.backup_dir().join(format!("{}.sql.gz", database)).display(),
    )
}

/// Renders one database's captured output lines, each tagged with its name.
pub fn display_backup_output(ctx: &RunContext, database: &str, lines: &[String]) {
    for line in lines {
        display(&tagged_line(database, line), ctx.colorize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::context::{at_date, test_config, BackupMode};
    use crate::backup::runner::CommandOutput;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Runner that records commands and writes the dump artifact the real
    /// pipeline would produce.
    struct RecordingRunner {
        commands: RefCell<Vec<String>>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            RecordingRunner {
                commands: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, command: &str) -> Result<CommandOutput> {
            self.commands.borrow_mut().push(command.to_string());
            if let Some(path) = command.rsplit(" > ").next() {
                std::fs::write(path, b"dump bytes")?;
            }
            Ok(CommandOutput {
                lines: vec![],
                code: Some(0),
            })
        }
    }

    #[test]
    fn test_incremental_command_shape() -> Result<()> {
        let dir = tempdir()?;
        let config = test_config(dir.path());
        // Thursday: incremental.
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 20));
        assert_eq!(ctx.mode, BackupMode::Incremental);

        let command = dump_command(&ctx, &config.credentials, "alpha");
        assert!(command.starts_with("mysqldump -u backup -psecret -h localhost --port=3306 alpha"));
        assert!(command.contains("alpha --flush-logs --delete-master-logs"));
        assert!(command.ends_with(&format!(
            "| gzip -9 > {}",
            ctx.backup_dir().join("alpha.sql.gz").display()
        )));
        Ok(())
    }

    #[test]
    fn test_full_command_has_no_mode_flags() -> Result<()> {
        let dir = tempdir()?;
        let config = test_config(dir.path());
        // Friday: full.
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 21));

        let command = dump_command(&ctx, &config.credentials, "alpha");
        assert!(!command.contains("--flush-logs"));
        assert!(!command.contains("--verbose"));
        assert!(command.contains(" alpha | gzip -9 > "));
        Ok(())
    }

    #[test]
    fn test_debug_adds_verbose_flag() -> Result<()> {
        let dir = tempdir()?;
        let mut config = test_config(dir.path());
        config.debug = true;
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 21));

        let command = dump_command(&ctx, &config.credentials, "alpha");
        assert!(command.contains("--verbose alpha"));
        Ok(())
    }

    #[test]
    fn test_simulation_executes_nothing_and_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let config = test_config(dir.path());
        let ctx = RunContext::at(&config, true, false, at_date(2026, 8, 20));
        let runner = RecordingRunner::new();

        let lines = run_backup(&ctx, &config.credentials, "alpha", &runner)?;
        assert_eq!(lines, vec!["Backup complete"]);
        assert!(runner.commands.borrow().is_empty());
        assert!(!ctx.backup_dir().exists());
        Ok(())
    }

    #[test]
    fn test_real_run_creates_directory_and_invokes_runner() -> Result<()> {
        let dir = tempdir()?;
        let config = test_config(dir.path());
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 20));
        let runner = RecordingRunner::new();

        run_backup(&ctx, &config.credentials, "alpha", &runner)?;
        assert!(ctx.backup_dir().is_dir());
        assert_eq!(runner.commands.borrow().len(), 1);
        assert!(ctx.backup_dir().join("alpha.sql.gz").is_file());
        Ok(())
    }

    #[test]
    fn test_directory_creation_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let config = test_config(dir.path());
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 20));
        std::fs::create_dir_all(ctx.backup_dir())?;

        let runner = RecordingRunner::new();
        // Pre-existing directory must not be an error.
        run_backup(&ctx, &config.credentials, "alpha", &runner)?;
        run_backup(&ctx, &config.credentials, "beta", &runner)?;
        Ok(())
    }
}
