//! Desktop entry discovery and parsing.
//!
//! The extracted payload usually carries exactly one `.desktop` entry, but
//! nothing guarantees it, so the locator prefers the standard
//! application-menu directories before settling for whatever turns up first.

pub mod rewrite;

use crate::appimage::SQUASHFS_ROOT;
use crate::error::Result;
use crate::util;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Standard application-menu directories, preferred in order.
const PREFERRED_LOCATIONS: [&str; 2] = ["usr/share/applications", "usr/local/share/applications"];

/// Finds the `.desktop` entry in the extracted payload.
///
/// Walks `squashfs-root` in sorted order. When several entries exist, one
/// under a standard application-menu directory wins; otherwise the first in
/// traversal order. Returns `None` when the tree has none.
pub fn find_desktop_file(scratch: &Path) -> Option<PathBuf> {
    let root = scratch.join(SQUASHFS_ROOT);

    let mut found = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "desktop")
        {
            found.push(entry.into_path());
        }
    }

    for location in PREFERRED_LOCATIONS {
        if let Some(preferred) = found
            .iter()
            .find(|path| path.to_string_lossy().contains(location))
        {
            return Some(preferred.clone());
        }
    }

    found.into_iter().next()
}

/// Reads the icon name from a desktop entry's `Icon=` key.
///
/// The first occurrence wins and the value is everything after the first
/// `=`, since icon names may themselves contain one. Returns `Ok(None)` when
/// the entry has no `Icon=` key at all.
pub fn parse_icon_name(desktop_file: &Path) -> Result<Option<String>> {
    let contents = util::text::read_to_string_lenient(desktop_file)?;
    for line in contents.lines() {
        if let Some(value) = line.trim().strip_prefix("Icon=") {
            return Ok(Some(value.trim().to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"[Desktop Entry]\n").unwrap();
    }

    #[test]
    fn prefers_standard_application_directories() {
        let scratch = tempfile::tempdir().unwrap();
        let root = scratch.path().join(SQUASHFS_ROOT);
        touch(&root.join("stray.desktop"));
        touch(&root.join("usr/share/applications/app.desktop"));

        let found = find_desktop_file(scratch.path()).unwrap();
        assert!(found.ends_with("usr/share/applications/app.desktop"));
    }

    #[test]
    fn prefers_share_over_local_share() {
        let scratch = tempfile::tempdir().unwrap();
        let root = scratch.path().join(SQUASHFS_ROOT);
        touch(&root.join("usr/local/share/applications/local.desktop"));
        touch(&root.join("usr/share/applications/app.desktop"));

        let found = find_desktop_file(scratch.path()).unwrap();
        assert!(found.ends_with("usr/share/applications/app.desktop"));
    }

    #[test]
    fn falls_back_to_first_in_traversal_order() {
        let scratch = tempfile::tempdir().unwrap();
        let root = scratch.path().join(SQUASHFS_ROOT);
        touch(&root.join("opt/app/b.desktop"));
        touch(&root.join("opt/app/a.desktop"));

        let found = find_desktop_file(scratch.path()).unwrap();
        assert!(found.ends_with("opt/app/a.desktop"));
    }

    #[test]
    fn none_when_tree_has_no_entries() {
        let scratch = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(scratch.path().join(SQUASHFS_ROOT).join("usr/bin")).unwrap();
        assert!(find_desktop_file(scratch.path()).is_none());
    }

    #[test]
    fn parses_first_icon_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.desktop");
        std::fs::write(
            &path,
            "[Desktop Entry]\nName=App\nIcon=first\nIcon=second\n",
        )
        .unwrap();
        assert_eq!(parse_icon_name(&path).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn icon_value_may_contain_equals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.desktop");
        std::fs::write(&path, "Icon=odd=name\n").unwrap();
        assert_eq!(parse_icon_name(&path).unwrap().as_deref(), Some("odd=name"));
    }

    #[test]
    fn none_when_icon_key_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.desktop");
        std::fs::write(&path, "[Desktop Entry]\nName=App\n").unwrap();
        assert_eq!(parse_icon_name(&path).unwrap(), None);
    }

    #[test]
    fn tolerates_latin1_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.desktop");
        std::fs::write(&path, b"Name=Caf\xe9\nIcon=cafe\n").unwrap();
        assert_eq!(parse_icon_name(&path).unwrap().as_deref(), Some("cafe"));
    }
}
