// mysqlbackuptool/src/backup/archive.rs
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::Path;
use tar::Builder;
use walkdir::WalkDir;

/// Creates a GZipped TAR archive from a source directory.
///
/// The archive contains all files and directories within `source_dir`, with
/// paths relative to `source_dir`.
///
/// # Returns
/// The relative paths of the archived entries, one line per entry, in the
/// order they were appended.
pub fn create_tar_gz_archive(source_dir: &Path, archive_dest_path: &Path) -> Result<Vec<String>> {
    if !source_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Source for archival is not a directory: {}",
            source_dir.display()
        ));
    }
    if let Some(parent) = archive_dest_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create parent directory for archive: {}",
                    parent.display()
                )
            })?;
        }
    }

    let archive_file = File::create(archive_dest_path).with_context(|| {
        format!(
            "Failed to create archive file: {}",
            archive_dest_path.display()
        )
    })?;
    let enc = GzEncoder::new(archive_file, Compression::default());
    let mut tar_builder = Builder::new(enc);
    let mut entries = Vec::new();

    for entry in WalkDir::new(source_dir) {
        let entry = entry
            .with_context(|| format!("Failed to walk directory: {}", source_dir.display()))?;
        let path = entry.path();
        let name = path.strip_prefix(source_dir).with_context(|| {
            format!(
                "Failed to strip prefix {} from {}",
                source_dir.display(),
                path.display()
            )
        })?;

        if name.as_os_str().is_empty() {
            // Skip the root directory itself.
            continue;
        }

        if path.is_dir() {
            tar_builder.append_dir(name, path).with_context(|| {
                format!("Failed to append directory {} to archive", path.display())
            })?;
        } else if path.is_file() {
            tar_builder.append_path_with_name(path, name).with_context(|| {
                format!(
                    "Failed to append file {} as {} to archive",
                    path.display(),
                    name.display()
                )
            })?;
        }
        entries.push(name.display().to_string());
    }

    let encoder = tar_builder.into_inner().with_context(|| {
        format!(
            "Failed to get inner encoder from tar builder for archive: {}",
            archive_dest_path.display()
        )
    })?;

    encoder.finish().with_context(|| {
        format!(
            "Failed to finish Gzip encoding for archive: {}",
            archive_dest_path.display()
        )
    })?;

    Ok(entries)
}
