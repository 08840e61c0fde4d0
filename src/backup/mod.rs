pub(crate) mod archive;
pub(crate) mod checksum;
pub(crate) mod context;
pub(crate) mod executor;
pub(crate) mod finalizer;
mod logic;
pub(crate) mod runner;

use anyhow::Result;

use crate::backup::context::RunContext;
use crate::backup::runner::{ensure_dump_tooling, ShellRunner};
use crate::config::AppConfig;
use crate::report::{FileReporter, NullReporter, SystemReporter};

pub use logic::RunReport;

/// Public entry point for the backup pipeline.
///
/// Builds the run context once, wires up the shell runner and the monitoring
/// reporter, and hands over to the coordinator.
pub fn run_backup_flow(config: &AppConfig, simulate: bool, colorize: bool) -> Result<RunReport> {
    let ctx = RunContext::new(config, simulate, colorize);

    if !ctx.simulate {
        ensure_dump_tooling()?;
    }

    // Simulation promises zero filesystem writes, which includes the local
    // report spool.
    let reporter: Box<dyn SystemReporter> = match &config.report_log_path {
        Some(path) if !ctx.simulate => Box::new(FileReporter::new(path.clone())),
        _ => Box::new(NullReporter),
    };

    logic::run_backups(config, &ctx, &ShellRunner, reporter.as_ref())
}
