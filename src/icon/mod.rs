//! Best-icon selection from an extracted bundle tree.
//!
//! The search is a fixed priority walk: themed icon directories from
//! `scalable` down to `16x16`, then the flat fallback locations, with vector
//! formats beating raster inside every directory. Only when exact stem
//! matches and loose substring matches both come up empty does the search
//! fall back to sniffing the byte signature of the bundle's `.DirIcon`.

use crate::appimage::SQUASHFS_ROOT;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Icon themes searched, preferred in order.
const THEMES: [&str; 4] = ["hicolor", "Humanity", "breeze", "Adwaita"];

/// Icon sizes searched, from best to acceptable.
const SIZES: [&str; 8] = [
    "scalable", "512x512", "256x256", "128x128", "64x64", "48x48", "32x32", "16x16",
];

/// Image format of a selected icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    /// Scalable vector graphics
    Svg,
    /// Portable network graphics
    Png,
    /// JPEG with a `.jpg` suffix
    Jpg,
    /// JPEG with a `.jpeg` suffix
    Jpeg,
    /// Windows icon resource
    Ico,
}

impl IconFormat {
    /// File extension for this format, with the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            IconFormat::Svg => ".svg",
            IconFormat::Png => ".png",
            IconFormat::Jpg => ".jpg",
            IconFormat::Jpeg => ".jpeg",
            IconFormat::Ico => ".ico",
        }
    }
}

/// An icon file selected by the priority search.
#[derive(Debug, Clone)]
pub struct IconCandidate {
    /// Path of the icon inside the extracted tree
    pub path: PathBuf,
    /// Inferred image format
    pub format: IconFormat,
}

/// Finds the best icon file for `icon_name` in the extracted payload.
///
/// Runs three stages over the prioritized directory list: exact stem
/// matches, case-insensitive substring matches, and finally `.DirIcon`
/// signature sniffing. Returns `None` if no candidate survives all stages.
pub fn find_best_icon(scratch: &Path, icon_name: &str) -> Option<IconCandidate> {
    let root = scratch.join(SQUASHFS_ROOT);
    let dirs = priority_dirs(&root);

    for dir in &dirs {
        if !dir.is_dir() {
            continue;
        }
        if let Some(candidate) = exact_match(dir, icon_name) {
            log::debug!("exact icon match: {}", candidate.path.display());
            return Some(candidate);
        }
    }

    for dir in &dirs {
        if !dir.is_dir() {
            continue;
        }
        if let Some(candidate) = substring_match(dir, icon_name) {
            log::debug!("loose icon match: {}", candidate.path.display());
            return Some(candidate);
        }
    }

    sniff_dir_icon(&root)
}

/// Builds the prioritized list of directories to search.
fn priority_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for theme in THEMES {
        for size in SIZES {
            dirs.push(root.join(format!("usr/share/icons/{theme}/{size}/apps")));
            dirs.push(root.join(format!("usr/share/icons/{theme}/{size}/mimetypes")));
        }
    }
    dirs.push(root.join("usr/share/pixmaps"));
    dirs.push(root.join("usr/share/icons"));
    dirs.push(root.to_path_buf());
    dirs
}

/// Looks for an exact stem match in one directory, vector format first.
fn exact_match(dir: &Path, icon_name: &str) -> Option<IconCandidate> {
    let escaped = glob::Pattern::escape(icon_name);

    if let Some(svg) = glob_in_dir(dir, &format!("{escaped}.svg")).into_iter().next() {
        return Some(IconCandidate {
            path: svg,
            format: IconFormat::Svg,
        });
    }

    let pngs = glob_in_dir(dir, &format!("{escaped}.png"));
    if let Some(best) = largest_file(pngs) {
        return Some(IconCandidate {
            path: best,
            format: IconFormat::Png,
        });
    }

    for (ext, format) in [
        ("jpg", IconFormat::Jpg),
        ("jpeg", IconFormat::Jpeg),
        ("ico", IconFormat::Ico),
    ] {
        if let Some(path) = glob_in_dir(dir, &format!("{escaped}.{ext}")).into_iter().next() {
            return Some(IconCandidate { path, format });
        }
    }

    None
}

/// Looks for a case-insensitive substring match in one directory.
///
/// SVG wins over PNG; among matching PNGs the largest by byte size wins.
fn substring_match(dir: &Path, icon_name: &str) -> Option<IconCandidate> {
    let needle = icon_name.to_lowercase();
    let stem_matches = |path: &Path| {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().to_lowercase().contains(&needle))
    };

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    if let Some(svg) = entries
        .iter()
        .find(|path| has_extension(path, "svg") && stem_matches(path))
    {
        return Some(IconCandidate {
            path: svg.clone(),
            format: IconFormat::Svg,
        });
    }

    let pngs: Vec<PathBuf> = entries
        .into_iter()
        .filter(|path| has_extension(path, "png") && stem_matches(path))
        .collect();
    largest_file(pngs).map(|path| IconCandidate {
        path,
        format: IconFormat::Png,
    })
}

/// Classifies the bundle's `.DirIcon` by byte signature.
fn sniff_dir_icon(root: &Path) -> Option<IconCandidate> {
    let diricon = root.join(".DirIcon");
    if !diricon.is_file() {
        return None;
    }

    let mut magic = [0u8; 8];
    let mut file = std::fs::File::open(&diricon).ok()?;
    let read = file.read(&mut magic).ok()?;
    let magic = &magic[..read];

    let format = if magic.starts_with(b"\x89PNG") {
        IconFormat::Png
    } else if window_contains(magic, b"<?xml") || window_contains(magic, b"<svg") {
        IconFormat::Svg
    } else if magic.starts_with(&[0xff, 0xd8]) {
        IconFormat::Jpg
    } else {
        return None;
    };

    log::debug!(".DirIcon classified as {}", format.extension());
    Some(IconCandidate {
        path: diricon,
        format,
    })
}

/// Non-recursive glob inside one directory, results sorted.
fn glob_in_dir(dir: &Path, file_pattern: &str) -> Vec<PathBuf> {
    let Some(dir_str) = dir.to_str() else {
        return Vec::new();
    };
    let pattern = format!("{}/{file_pattern}", glob::Pattern::escape(dir_str));
    match glob::glob(&pattern) {
        Ok(paths) => {
            let mut found: Vec<PathBuf> = paths
                .filter_map(|path| path.ok())
                .filter(|path| path.is_file())
                .collect();
            found.sort();
            found
        }
        Err(err) => {
            log::debug!("invalid icon pattern {pattern}: {err}");
            Vec::new()
        }
    }
}

fn largest_file(paths: Vec<PathBuf>) -> Option<PathBuf> {
    paths.into_iter().max_by_key(|path| {
        std::fs::metadata(path)
            .map(|metadata| metadata.len())
            .unwrap_or(0)
    })
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

fn window_contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
