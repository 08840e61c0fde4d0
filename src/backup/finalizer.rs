// mysqlbackuptool/src/backup/finalizer.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::backup::archive::create_tar_gz_archive;
use crate::backup::checksum::{write_archive_checksum, write_dump_checksums};
use crate::backup::context::RunContext;
use crate::output::{display, StyledLine};
use crate::report::{Severity, SystemReporter};

const SIMULATED_ARCHIVE_OUTPUT: &str = "Folder compressed";

/// Debug echo of the archive step, the counterpart of the executor's dump
/// command echo.
fn archive_debug_line(backup_dir: &Path, archive_path: &Path) -> StyledLine {
    StyledLine::new()
        .plain("[")
        .detail("DEBUG")
        .plain("] Archiving ")
        .name(backup_dir.display().to_string())
        .plain(" to ")
        .name(archive_path.display().to_string())
}

/// Finishes the run: checksum the dump artifacts, bundle the day's directory
/// into the dated archive, checksum the archive, then remove the directory.
///
/// Cleanup is gated on every prior step succeeding. A failed checksum or
/// archive leaves the backup directory in place for inspection.
pub fn complete_run(
    ctx: &RunContext,
    reporter: &dyn SystemReporter,
    app_id: &str,
) -> Result<Vec<String>> {
    let backup_dir = ctx.backup_dir();
    let archive_path = ctx.archive_path();

    if ctx.debug {
        display(&archive_debug_line(&backup_dir, &archive_path), ctx.colorize);
    }

    let lines = if ctx.simulate {
        vec![SIMULATED_ARCHIVE_OUTPUT.to_string()]
    } else {
        write_dump_checksums(&backup_dir).with_context(|| {
            format!(
                "Failed to generate dump checksums in {}",
                backup_dir.display()
            )
        })?;
        if ctx.debug {
            display(
                &StyledLine::new()
                    .plain("[")
                    .detail("DEBUG")
                    .plain("] Generated MD5 Hashes of DB Backups"),
                ctx.colorize,
            );
        }

        let entries = create_tar_gz_archive(&backup_dir, &archive_path).with_context(|| {
            format!("Failed to create daily archive {}", archive_path.display())
        })?;
        write_archive_checksum(&archive_path).with_context(|| {
            format!(
                "Failed to generate archive checksum for {}",
                archive_path.display()
            )
        })?;

        // All artifacts verified and archived, the intermediate directory is
        // now superseded.
        fs::remove_dir_all(&backup_dir).with_context(|| {
            format!(
                "Failed to remove backup directory {}",
                backup_dir.display()
            )
        })?;
        entries
    };

    if ctx.debug {
        for line in &lines {
            display(
                &StyledLine::new()
                    .plain("[")
                    .detail("DEBUG")
                    .plain("] [")
                    .name(backup_dir.display().to_string())
                    .plain(format!("]\t{}", line)),
                ctx.colorize,
            );
        }
    }

    reporter.log(
        app_id,
        Severity::Success,
        &format!("Backup complete for {}", ctx.completion_date),
    );
    Ok(lines)
}
