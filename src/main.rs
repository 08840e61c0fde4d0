//! MySQL Backup Manager
//!
//! Dumps the configured list of MySQL databases via mysqldump, compresses the
//! output, checksums the artifacts and archives the day's set into a single
//! dated tarball, reporting progress to an external monitoring agent.

// mysqlbackuptool/src/main.rs
mod backup;
mod config;
mod errors;
mod output;
mod report;

use anyhow::{Context, Result};
use config::AppConfig;
use output::{display, StyledLine};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Copy, Default)]
struct CliFlags {
    simulation: bool,
    color: bool,
    version: bool,
}

/// What a given command line asks for: the version banner, or a backup run.
#[derive(Debug)]
enum Invocation {
    Banner { colorize: bool },
    Run(CliFlags),
}

/// Decides between banner and run. Bare invocation and --version both print
/// the banner and nothing else; no configuration is loaded and no backup
/// logic executes on that path.
fn resolve_invocation(args: &[String]) -> Invocation {
    let flags = parse_flags(args);
    if flags.version || args.is_empty() {
        Invocation::Banner {
            colorize: flags.color,
        }
    } else {
        Invocation::Run(flags)
    }
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    match resolve_invocation(&args) {
        Invocation::Banner { colorize } => {
            print_version_banner(colorize);
            ExitCode::SUCCESS
        }
        Invocation::Run(flags) => match run_app(flags) {
            Ok(failed) if failed == 0 => ExitCode::SUCCESS,
            Ok(failed) => {
                eprintln!("{} database backup(s) failed, see output above.", failed);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Error: {:?}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Runs the pipeline; returns the number of databases that failed.
fn run_app(flags: CliFlags) -> Result<usize> {
    let config_path = env::var("MYSQL_BACKUP_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let app_config = AppConfig::load_from_json(&config_path).with_context(|| {
        format!(
            "Failed to load application configuration from {}",
            config_path.display()
        )
    })?;

    let report = backup::run_backup_flow(&app_config, flags.simulation, flags.color)?;

    display(
        &StyledLine::new().name("System run complete..."),
        flags.color,
    );
    Ok(report.failed_count())
}

fn parse_flags(args: &[String]) -> CliFlags {
    let mut flags = CliFlags::default();
    for arg in args {
        match arg.as_str() {
            "--simulation" => flags.simulation = true,
            "--color" => flags.color = true,
            "--version" => flags.version = true,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
    }
    flags
}

fn print_version_banner(colorize: bool) {
    let banner = [
        StyledLine::new().plain(format!(
            "MySQL Backup Manager, version {}",
            env!("CARGO_PKG_VERSION")
        )),
        StyledLine::new().plain("Usage:"),
        StyledLine::new()
            .plain("\t")
            .name("mysqlbackuptool ")
            .detail("[--simulation] [--color] [--version]"),
        StyledLine::new(),
        StyledLine::new()
            .strong("--simulation")
            .plain("\t:\tRuns a simulated MySQL backup (useful for debugging)"),
        StyledLine::new()
            .strong("--color")
            .plain("\t:\tDisplays the output as color formatted"),
        StyledLine::new()
            .strong("--version")
            .plain("\t:\tDisplays this information"),
    ];
    for line in &banner {
        display(line, colorize);
    }
}
