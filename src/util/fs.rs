//! File system helpers for the output stage.
//!
//! Provides safe file copying with automatic directory creation and the
//! backup-on-conflict convention used for everything this tool writes.

use crate::bail;
use crate::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        std::fs::create_dir_all(dest_dir).fs_context("creating destination directory", dest_dir)?;
    }
    std::fs::copy(from, to).fs_context("copying file", to)?;
    Ok(())
}

/// Copies an existing file aside before the caller overwrites it.
///
/// `name.png` is backed up as `name.bak.png`, and when that exists too, as
/// `name.bak1.png`, `name.bak2.png` and so on. The original extension is
/// preserved and an existing backup is never overwritten. Returns the backup
/// path, or `None` when nothing existed at `path`.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for n in 0u32..10_000 {
        let suffix = if n == 0 { String::new() } else { n.to_string() };
        let backup = path.with_file_name(format!("{stem}.bak{suffix}{ext}"));
        if !backup.exists() {
            std::fs::copy(path, &backup).fs_context("backing up existing file", &backup)?;
            log::debug!("backed up {} to {}", path.display(), backup.display());
            return Ok(Some(backup));
        }
    }

    bail!("too many backups of {} already exist", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_backup_when_nothing_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        assert!(backup_existing(&path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn backup_preserves_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"first").unwrap();

        let backup = backup_existing(&path).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("icon.bak.png"));
        assert_eq!(std::fs::read(&backup).unwrap(), b"first");
    }

    #[test]
    fn backup_suffix_increments_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");

        std::fs::write(&path, b"first").unwrap();
        backup_existing(&path).unwrap();
        std::fs::write(&path, b"second").unwrap();
        let second = backup_existing(&path).unwrap().unwrap();
        std::fs::write(&path, b"third").unwrap();
        let third = backup_existing(&path).unwrap().unwrap();

        assert_eq!(second, dir.path().join("icon.bak1.png"));
        assert_eq!(third, dir.path().join("icon.bak2.png"));
        assert_eq!(
            std::fs::read(dir.path().join("icon.bak.png")).unwrap(),
            b"first"
        );
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
        assert_eq!(std::fs::read(&third).unwrap(), b"third");
    }

    #[test]
    fn backup_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher");
        std::fs::write(&path, b"x").unwrap();

        let backup = backup_existing(&path).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("launcher.bak"));
    }

    #[test]
    fn copy_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        std::fs::write(&src, b"payload").unwrap();

        let dest = dir.path().join("nested/deep/dest.txt");
        copy_file(&src, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn copy_file_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let res = copy_file(&dir.path().join("absent"), &dir.path().join("out"));
        assert!(res.is_err());
    }
}
