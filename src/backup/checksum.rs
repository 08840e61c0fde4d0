// mysqlbackuptool/src/backup/checksum.rs
use anyhow::{Context, Result};
use md5::{Digest, Md5};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub const DUMP_CHECKSUM_FILE: &str = "databases.md5";

/// Computes the MD5 digest of a file, streaming its contents.
pub fn md5_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open file for checksum: {}", path.display()))?;
    let mut hasher = Md5::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to read file for checksum: {}", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Writes `md5sum`-format checksum lines for every dump artifact directly
/// under `backup_dir` into `<backup_dir>/databases.md5`.
///
/// Only `.sql.gz` files are covered. Entries are sorted by file name so the
/// checksum file is deterministic regardless of directory iteration order.
pub fn write_dump_checksums(backup_dir: &Path) -> Result<PathBuf> {
    let mut artifacts: Vec<PathBuf> = std::fs::read_dir(backup_dir)
        .with_context(|| {
            format!(
                "Failed to read backup directory for checksums: {}",
                backup_dir.display()
            )
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".sql.gz"))
        })
        .collect();
    artifacts.sort();

    let mut lines = String::new();
    for artifact in &artifacts {
        let digest = md5_file(artifact)?;
        let name = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid artifact file name: {}", artifact.display()))?;
        lines.push_str(&format!("{}  {}\n", digest, name));
    }

    let checksum_path = backup_dir.join(DUMP_CHECKSUM_FILE);
    std::fs::write(&checksum_path, lines).with_context(|| {
        format!(
            "Failed to write dump checksum file: {}",
            checksum_path.display()
        )
    })?;
    Ok(checksum_path)
}

/// Writes the archive's checksum to a sibling `<archive>.md5` file and returns
/// the digest.
pub fn write_archive_checksum(archive_path: &Path) -> Result<String> {
    let digest = md5_file(archive_path)?;
    let name = archive_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid archive file name: {}", archive_path.display()))?;

    let checksum_path = PathBuf::from(format!("{}.md5", archive_path.display()));
    std::fs::write(&checksum_path, format!("{}  {}\n", digest, name)).with_context(|| {
        format!(
            "Failed to write archive checksum file: {}",
            checksum_path.display()
        )
    })?;
    Ok(digest)
}
