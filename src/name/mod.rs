//! Application name cleaning.
//!
//! AppImage filenames bury the application name under version numbers,
//! build dates, and architecture tags (`MyApp-1.2.3-x86_64.AppImage`).
//! [`clean_app_name`] strips that noise down to a string usable as a file
//! stem for the generated icon and desktop entry.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Name used when cleaning leaves nothing behind.
pub const FALLBACK_NAME: &str = "appimage-icon";

// Architecture, OS, distribution, packaging, and build tags.
static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[-_.](x86[_-]?64|amd64|x64|i\d86|i386|i686|armv\dl|armhf|arm64|aarch64|linux|macos|windows|win32|win64|AppImage|portable|deb|rpm|snap|flatpak|setup|installer|bundle|build|release|stable|beta|alpha|rc\d*)\b",
    )
    .expect("noise pattern is valid")
});

// Dotted version strings, with an optional leading `v` and trailing tags.
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[-_.]?v?\d+(\.\d+)+([-_.]?\w+)*").expect("version pattern is valid")
});

// Dates as YYYYMMDD, YYYY-MM-DD, or YYYY.MM.DD.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_.]?\d{4}[-_.]?\d{2}[-_.]?\d{2}").expect("date pattern is valid")
});

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("separator pattern is valid"));

/// Derives a clean application name from a bundle's filename.
///
/// Substitutions run in a fixed order, since later patterns depend on what
/// the earlier ones removed: noise tags first, then version strings, then
/// dates. Whatever remains is collapsed to alphanumerics separated by single
/// hyphens. An empty result falls back to the minimally-cleaned original
/// stem, and failing that to [`FALLBACK_NAME`], so the caller always gets a
/// usable file stem.
pub fn clean_app_name(bundle: &Path) -> String {
    let stem = bundle
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = NOISE.replace_all(&stem, "");
    let name = VERSION.replace_all(&name, "");
    let name = DATE.replace_all(&name, "");
    let name = SEPARATOR_RUNS.replace_all(&name, "-");
    let name = name.trim_matches('-');

    if !name.is_empty() {
        return name.to_string();
    }

    let fallback = SEPARATOR_RUNS.replace_all(&stem, "-");
    let fallback = fallback.trim_matches('-');
    if fallback.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(name: &str) -> String {
        clean_app_name(Path::new(name))
    }

    #[test]
    fn strips_version_and_architecture() {
        assert_eq!(clean("MyApp-1.2.3-x86_64.AppImage"), "MyApp");
    }

    #[test]
    fn strips_date_and_os_tags() {
        assert_eq!(clean("tool_2023-06-01_linux"), "tool");
    }

    #[test]
    fn noise_removal_is_case_insensitive() {
        assert_eq!(clean("Editor-X86_64-LINUX.AppImage"), "Editor");
        assert_eq!(clean("viewer-PORTABLE-v2.0.1.AppImage"), "viewer");
    }

    #[test]
    fn preserves_case_of_the_app_name() {
        assert_eq!(clean("OBS-Studio-30.0.2.AppImage"), "OBS-Studio");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(clean("my   app!!.AppImage"), "my-app");
    }

    #[test]
    fn idempotent_on_its_own_output() {
        for name in [
            "MyApp-1.2.3-x86_64.AppImage",
            "tool_2023-06-01_linux",
            "OBS-Studio-30.0.2.AppImage",
            "v1.2.3.AppImage",
        ] {
            let once = clean(name);
            assert_eq!(clean(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn version_only_name_falls_back_to_minimal_cleaning() {
        // Everything is a version token, so the fallback keeps the stem with
        // separators normalized.
        assert_eq!(clean("v1.2.3.AppImage"), "v1-2-3");
        assert_eq!(clean("2.0.1.AppImage"), "2-0-1");
    }

    #[test]
    fn unusable_name_falls_back_to_placeholder() {
        assert_eq!(clean("++--++.AppImage"), FALLBACK_NAME);
    }

    #[test]
    fn fallback_is_alphanumeric_and_hyphens() {
        for name in ["v1.2.3.AppImage", "++--++.AppImage", "a.AppImage"] {
            let cleaned = clean(name);
            assert!(!cleaned.is_empty());
            assert!(
                cleaned
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
            );
            assert!(!cleaned.starts_with('-') && !cleaned.ends_with('-'));
        }
    }
}
