// mysqlbackuptool/src/backup/logic.rs
use anyhow::Result;

use crate::backup::context::RunContext;
use crate::backup::executor::{display_backup_output, run_backup};
use crate::backup::finalizer::complete_run;
use crate::backup::runner::ProcessRunner;
use crate::config::AppConfig;
use crate::output::{display, section_delimiter, tagged_line, StyledLine};
use crate::report::{Severity, SystemReporter};

/// Outcome of one database's backup attempt.
#[derive(Debug)]
pub struct DatabaseResult {
    pub database: String,
    pub error: Option<String>,
}

impl DatabaseResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole run, one entry per configured database.
#[derive(Debug)]
pub struct RunReport {
    pub results: Vec<DatabaseResult>,
    pub finalizer_lines: Vec<String>,
}

impl RunReport {
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.succeeded()).count()
    }
}

/// Runs the whole backup pipeline: one executor pass per configured database,
/// then the archival finalizer.
///
/// A failing database is recorded in the report and the run continues with
/// the next one; only a finalizer failure aborts the run.
pub fn run_backups(
    config: &AppConfig,
    ctx: &RunContext,
    runner: &dyn ProcessRunner,
    reporter: &dyn SystemReporter,
) -> Result<RunReport> {
    display(
        &StyledLine::new().name("Starting system..."),
        ctx.colorize,
    );
    reporter.log(&config.report_app_id, Severity::Message, "Starting System");

    let mut results = Vec::with_capacity(config.databases.len());
    for database in &config.databases {
        reporter.log(
            &config.report_app_id,
            Severity::Message,
            &format!("Starting Backup for {}", database),
        );
        display(&tagged_line(database, "Starting backup"), ctx.colorize);
        display(&section_delimiter(), ctx.colorize);

        let error = match run_backup(ctx, &config.credentials, database, runner) {
            Ok(lines) => {
                display_backup_output(ctx, database, &lines);
                None
            }
            Err(e) => {
                display(
                    &tagged_line(database, &format!("Backup failed: {:#}", e)),
                    ctx.colorize,
                );
                reporter.log(
                    &config.report_app_id,
                    Severity::Error,
                    &format!("Backup failed for {}: {:#}", database, e),
                );
                Some(format!("{:#}", e))
            }
        };
        results.push(DatabaseResult {
            database: database.clone(),
            error,
        });

        display(&section_delimiter(), ctx.colorize);
    }

    let finalizer_lines = complete_run(ctx, reporter, &config.report_app_id)?;

    Ok(RunReport {
        results,
        finalizer_lines,
    })
}
