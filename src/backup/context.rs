// mysqlbackuptool/src/backup/context.rs
use chrono::{DateTime, Datelike, Local, Weekday};
use std::path::PathBuf;

use crate::config::AppConfig;

const FULL_SUBPATH: &str = "full_backups";
const INCREMENTAL_SUBPATH: &str = "incremental_backups";

/// Whether the run takes complete dumps or log-rotating incremental dumps.
///
/// Full backups run on the configured weekday; every other day is incremental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupMode {
    Full,
    Incremental,
}

impl BackupMode {
    pub fn for_weekday(weekday: Weekday, full_backup_day: Weekday) -> Self {
        if weekday == full_backup_day {
            BackupMode::Full
        } else {
            BackupMode::Incremental
        }
    }

    pub fn subpath(self) -> &'static str {
        match self {
            BackupMode::Full => FULL_SUBPATH,
            BackupMode::Incremental => INCREMENTAL_SUBPATH,
        }
    }

    /// Extra mysqldump flags for this mode. Incremental runs instruct the
    /// source server to rotate and discard already-applied binary logs.
    pub fn dump_flags(self) -> &'static str {
        match self {
            BackupMode::Full => "",
            BackupMode::Incremental => "--flush-logs --delete-master-logs",
        }
    }
}

/// Per-run state, built once from a single clock reading.
///
/// Both the per-database executor and the archival finalizer derive their
/// paths from this context, so a run that straddles midnight or the
/// full-backup weekday boundary still dumps and archives the same directory.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub mode: BackupMode,
    pub date_stamp: String,
    pub completion_date: String,
    pub simulate: bool,
    pub colorize: bool,
    pub debug: bool,
    pub backup_root: PathBuf,
}

impl RunContext {
    pub fn new(config: &AppConfig, simulate: bool, colorize: bool) -> Self {
        Self::at(config, simulate, colorize, Local::now())
    }

    pub fn at(
        config: &AppConfig,
        simulate: bool,
        colorize: bool,
        now: DateTime<Local>,
    ) -> Self {
        RunContext {
            mode: BackupMode::for_weekday(now.weekday(), config.full_backup_day),
            date_stamp: now.format("%d_%m_%Y").to_string(),
            completion_date: now.format("%d/%m/%Y").to_string(),
            simulate,
            colorize,
            debug: config.debug,
            backup_root: config.backup_root.clone(),
        }
    }

    /// Directory holding this mode's dated backup directories and archives.
    pub fn mode_dir(&self) -> PathBuf {
        self.backup_root.join(self.mode.subpath())
    }

    /// The day's backup directory, receiving one dump artifact per database.
    pub fn backup_dir(&self) -> PathBuf {
        self.mode_dir().join(&self.date_stamp)
    }

    /// The day's final archive path.
    pub fn archive_path(&self) -> PathBuf {
        self.mode_dir().join(format!("{}.tar.gz", self.date_stamp))
    }
}

#[cfg(test)]
pub(crate) fn test_config(root: &std::path::Path) -> AppConfig {
    use crate::config::DumpCredentials;

    AppConfig {
        credentials: DumpCredentials {
            user: "backup".to_string(),
            password: "secret".to_string(),
            host: "localhost".to_string(),
            port: 3306,
        },
        databases: vec!["alpha".to_string(), "beta".to_string()],
        backup_root: root.to_path_buf(),
        debug: false,
        full_backup_day: Weekday::Fri,
        report_app_id: "309401bf".to_string(),
        report_log_path: None,
    }
}

#[cfg(test)]
pub(crate) fn at_date(year: i32, month: u32, day: u32) -> DateTime<Local> {
    use chrono::TimeZone;
    Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_full_only_on_configured_weekday() {
        let days = [
            (Weekday::Mon, BackupMode::Incremental),
            (Weekday::Tue, BackupMode::Incremental),
            (Weekday::Wed, BackupMode::Incremental),
            (Weekday::Thu, BackupMode::Incremental),
            (Weekday::Fri, BackupMode::Full),
            (Weekday::Sat, BackupMode::Incremental),
            (Weekday::Sun, BackupMode::Incremental),
        ];
        for (weekday, expected) in days {
            assert_eq!(BackupMode::for_weekday(weekday, Weekday::Fri), expected);
        }
        assert_eq!(
            BackupMode::for_weekday(Weekday::Mon, Weekday::Mon),
            BackupMode::Full
        );
    }

    #[test]
    fn test_paths_for_incremental_run() {
        let config = test_config(std::path::Path::new("/var/backups/mysql"));
        // 2026-08-20 is a Thursday.
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 20));

        assert_eq!(ctx.mode, BackupMode::Incremental);
        assert_eq!(ctx.date_stamp, "20_08_2026");
        assert_eq!(
            ctx.backup_dir(),
            PathBuf::from("/var/backups/mysql/incremental_backups/20_08_2026")
        );
        assert_eq!(
            ctx.archive_path(),
            PathBuf::from("/var/backups/mysql/incremental_backups/20_08_2026.tar.gz")
        );
    }

    #[test]
    fn test_paths_for_full_run() {
        let config = test_config(std::path::Path::new("/var/backups/mysql"));
        // 2026-08-21 is a Friday.
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 21));

        assert_eq!(ctx.mode, BackupMode::Full);
        assert_eq!(
            ctx.backup_dir(),
            PathBuf::from("/var/backups/mysql/full_backups/21_08_2026")
        );
        assert_eq!(ctx.completion_date, "21/08/2026");
    }

    #[test]
    fn test_dump_flags_per_mode() {
        assert_eq!(BackupMode::Full.dump_flags(), "");
        assert_eq!(
            BackupMode::Incremental.dump_flags(),
            "--flush-logs --delete-master-logs"
        );
    }

    #[test]
    fn test_context_is_stable_across_a_run() {
        // The context is read-only after construction: executor and finalizer
        // both derive paths from the same value even if the wall clock has
        // since crossed midnight.
        let config = test_config(std::path::Path::new("/var/backups/mysql"));
        let ctx = RunContext::at(&config, false, false, at_date(2026, 8, 20));

        let dump_time_dir = ctx.backup_dir();
        let archive_time_dir = ctx.backup_dir();
        assert_eq!(dump_time_dir, archive_time_dir);
    }
}
