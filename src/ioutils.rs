use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::template::{GeneratedFile, TemplateOperation};

/// Ensures the destination directory may be replaced.
///
/// # Returns
/// * `Err(Error::DestinationNotEmpty)` - If it holds anything and `destroy` is not set
pub fn get_output_dir<P: AsRef<Path>>(destination: P, destroy: bool) -> Result<PathBuf> {
    let destination = destination.as_ref();
    if destination.exists() {
        if !destination.is_dir() {
            return Err(Error::InvalidInput(format!(
                "destination '{}' exists and is not a directory",
                destination.display()
            )));
        }
        if !destroy && !is_empty_dir(destination)? {
            return Err(Error::DestinationNotEmpty { destination: destination.display().to_string() });
        }
    }
    Ok(destination.to_path_buf())
}

pub fn is_empty_dir<P: AsRef<Path>>(path: P) -> Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Reads a whole text file, naming the file in the error.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(content)
}

pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest_path, content).map_err(Error::IoError)
}

/// Describes what replacing `destination` with `files` changes.
pub fn plan_operations<P: AsRef<Path>>(destination: P, files: &[GeneratedFile]) -> Result<Vec<TemplateOperation>> {
    let destination = destination.as_ref();
    let mut operations: Vec<TemplateOperation> = files
        .iter()
        .map(|file| {
            let target = destination.join(&file.file_name);
            TemplateOperation::Write { target_exists: target.exists(), target, content: file.content.clone() }
        })
        .collect();

    if destination.is_dir() {
        let mut stale = Vec::new();
        for entry in fs::read_dir(destination)? {
            let entry = entry?;
            let name = entry.file_name();
            if !files.iter().any(|file| name.to_str() == Some(file.file_name.as_str())) {
                stale.push(TemplateOperation::Remove { target: entry.path() });
            }
        }
        stale.sort_by(|a, b| a.target_path().cmp(b.target_path()));
        operations.extend(stale);
    }
    Ok(operations)
}

/// Writes the files of `operations` into a fresh directory next to `destination`.
pub fn stage(destination: &Path, operations: &[TemplateOperation]) -> Result<TempDir> {
    let parent = destination.parent().filter(|parent| !parent.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".quantigen-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o755));
    }
    let staged = builder.tempdir_in(parent)?;
    log::debug!("Staging output in '{}'", staged.path().display());

    for operation in operations {
        if let TemplateOperation::Write { target, content, .. } = operation {
            let name = target
                .file_name()
                .ok_or_else(|| Error::InvalidInput(format!("'{}' has no file name", target.display())))?;
            write_file(content, staged.path().join(name))
                .with_context(|| format!("Failed to {}", operation.error_context()))?;
        }
    }
    Ok(staged)
}

/// Replaces `destination` by the staged directory.
///
/// The previous contents are moved aside first and only removed once the staged
/// tree is in place; a failed swap puts them back.
pub fn swap_into(staged: TempDir, destination: &Path) -> Result<()> {
    let backup = if destination.exists() {
        let backup = backup_path(destination)?;
        log::debug!("Moving previous contents of '{}' to '{}'", destination.display(), backup.display());
        fs::rename(destination, &backup)?;
        Some(backup)
    } else {
        None
    };

    if let Err(err) = fs::rename(staged.path(), destination) {
        if let Some(backup) = &backup {
            if let Err(restore) = fs::rename(backup, destination) {
                log::error!(
                    "Failed to restore previous contents of '{}' from '{}': {restore}",
                    destination.display(),
                    backup.display()
                );
            }
        }
        let staged_path = staged.path().to_path_buf();
        if let Err(cleanup) = staged.close() {
            log::warn!("Failed to remove staged output '{}': {cleanup}", staged_path.display());
        }
        return Err(Error::IoError(err));
    }

    let _ = staged.keep();
    if let Some(backup) = backup {
        if let Err(err) = fs::remove_dir_all(&backup) {
            log::warn!("Failed to remove previous contents moved to '{}': {err}", backup.display());
        }
    }
    Ok(())
}

fn backup_path(destination: &Path) -> Result<PathBuf> {
    let name = destination
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("'{}' has no file name", destination.display())))?
        .to_string_lossy();
    let mut candidate = destination.with_file_name(format!(".{name}.quantigen-old"));
    let mut attempt = 1;
    while candidate.exists() {
        candidate = destination.with_file_name(format!(".{name}.quantigen-old-{attempt}"));
        attempt += 1;
    }
    Ok(candidate)
}
