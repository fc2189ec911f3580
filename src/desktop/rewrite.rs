//! Desktop entry rewriting.
//!
//! The generated entry is a line-by-line copy of the original with the
//! `Icon=` and `Exec=` keys pointed at the install directory, a few
//! bundle-internal keys dropped, and `[Desktop Action ...]` sections removed
//! wholesale. No structural INI parsing happens here; unrecognized lines
//! pass through verbatim, which keeps comments, ordering, and localized keys
//! exactly as the upstream packager wrote them.

use crate::error::{ErrorExt, Result};
use crate::icon::IconFormat;
use crate::util;
use std::path::Path;

/// Launcher script the generated `Exec=` line points at.
pub const LAUNCHER_SCRIPT: &str = "_launch_appimage";

/// Prefix for generated desktop entry file names.
pub const DESKTOP_FILE_PREFIX: &str = "AppImage-";

// Keys that only make sense inside the bundle.
const STRIPPED_KEYS: [&str; 3] = ["X-AppImage-Version=", "Actions=", "TryExec="];

/// Rewrites desktop entry text for a launcher living in the install
/// directory.
///
/// `[Desktop Action ...]` sections are dropped from the header through the
/// next section header (or EOF). Everything else is preserved verbatim apart
/// from the replaced `Icon=`/`Exec=` keys and the dropped
/// `X-AppImage-Version=`, `Actions=`, and `TryExec=` keys.
pub fn rewrite_desktop_entry(input: &str, new_icon_entry: &str, new_exec_entry: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_action_section = false;

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            if section.to_lowercase().contains("desktop action") {
                in_action_section = true;
            } else {
                in_action_section = false;
                out.push_str(line);
                out.push('\n');
            }
            continue;
        }

        if in_action_section {
            continue;
        }

        if trimmed.starts_with("Icon=") {
            out.push_str(new_icon_entry);
            out.push('\n');
        } else if trimmed.starts_with("Exec=") {
            out.push_str(new_exec_entry);
            out.push('\n');
        } else if STRIPPED_KEYS.iter().any(|key| trimmed.starts_with(key)) {
            // dropped
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Reads the original entry leniently, rewrites it, and writes the result.
///
/// The destination file is created by the caller's naming convention; any
/// existing file there must already have been backed up.
pub fn write_desktop_file(
    original: &Path,
    dest: &Path,
    clean_name: &str,
    format: IconFormat,
    install_dir: &Path,
) -> Result<()> {
    let contents = util::text::read_to_string_lenient(original)?;

    let install = install_dir.display();
    let new_icon_entry = format!("Icon={install}/{clean_name}{}", format.extension());
    let new_exec_entry = format!("Exec={install}/{LAUNCHER_SCRIPT} {clean_name} %U");

    let rewritten = rewrite_desktop_entry(&contents, &new_icon_entry, &new_exec_entry);
    std::fs::write(dest, rewritten).fs_context("writing desktop entry", dest)?;
    log::info!("wrote desktop entry {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: &str = "Icon=/home/u/AppImage/MyApp.svg";
    const EXEC: &str = "Exec=/home/u/AppImage/_launch_appimage MyApp %U";

    fn rewrite(input: &str) -> String {
        rewrite_desktop_entry(input, ICON, EXEC)
    }

    #[test]
    fn replaces_icon_and_exec() {
        let out = rewrite("[Desktop Entry]\nExec=myapp %F\nIcon=myapp\nName=My App\n");
        assert_eq!(
            out,
            format!("[Desktop Entry]\n{EXEC}\n{ICON}\nName=My App\n")
        );
    }

    #[test]
    fn drops_bundle_internal_keys() {
        let out = rewrite(
            "[Desktop Entry]\nTryExec=myapp\nX-AppImage-Version=1.2.3\nActions=Gallery;New;\nTerminal=false\n",
        );
        assert_eq!(out, "[Desktop Entry]\nTerminal=false\n");
    }

    #[test]
    fn drops_action_sections_through_next_header() {
        let input = "\
[Desktop Entry]
Name=My App

[Desktop Action Gallery]
Name=Open Gallery
Exec=myapp --gallery

[X-Extra Section]
Key=kept verbatim
";
        let out = rewrite(input);
        assert!(!out.contains("Gallery"));
        assert!(out.contains("[X-Extra Section]\nKey=kept verbatim\n"));
        // The blank line before the dropped section is part of [Desktop Entry].
        assert!(out.contains("Name=My App\n\n"));
    }

    #[test]
    fn drops_action_section_running_to_eof() {
        let out = rewrite("[Desktop Entry]\nName=App\n[Desktop Action New]\nExec=myapp --new\n");
        assert_eq!(out, "[Desktop Entry]\nName=App\n");
    }

    #[test]
    fn action_header_match_is_case_insensitive() {
        let out = rewrite("[Desktop Entry]\nName=App\n[DESKTOP ACTION NEW]\nExec=x\n");
        assert_eq!(out, "[Desktop Entry]\nName=App\n");
    }

    #[test]
    fn unrelated_lines_pass_through_verbatim() {
        let input = "# packager comment\n[Desktop Entry]\nName[fr]=Mon App\nCategories=Utility;\n";
        assert_eq!(rewrite(input), input);
    }

    #[test]
    fn writes_rewritten_file() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("orig.desktop");
        std::fs::write(&original, "[Desktop Entry]\nIcon=myapp\nExec=myapp\n").unwrap();

        let dest = dir.path().join("AppImage-MyApp.desktop");
        write_desktop_file(
            &original,
            &dest,
            "MyApp",
            IconFormat::Png,
            Path::new("/opt/appimages"),
        )
        .unwrap();

        let out = std::fs::read_to_string(&dest).unwrap();
        assert!(out.contains("Icon=/opt/appimages/MyApp.png"));
        assert!(out.contains("Exec=/opt/appimages/_launch_appimage MyApp %U"));
    }
}
