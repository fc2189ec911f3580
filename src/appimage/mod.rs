//! Bundle payload extraction.
//!
//! An AppImage can unpack its own payload when invoked with
//! `--appimage-extract`, so nothing here understands the container format;
//! the bundle is simply run as a child process with the scratch directory as
//! its working directory and is expected to populate a `squashfs-root`
//! subtree there.

use crate::error::{Error, Result};
use path_absolutize::Absolutize;
use std::path::Path;
use std::process::{Command, Stdio};

/// Directory the self-extractor populates inside the scratch directory.
pub const SQUASHFS_ROOT: &str = "squashfs-root";

const EXTRACT_FLAG: &str = "--appimage-extract";

/// Extracts the bundle's payload into the scratch directory.
///
/// The bundle path is absolutized first, since the child runs with the
/// scratch directory as its working directory. stdout is discarded; stderr
/// is captured and carried in the error on a non-zero exit.
pub fn extract_payload(bundle: &Path, scratch: &Path) -> Result<()> {
    let bundle = bundle.absolutize()?;

    log::info!("extracting {}", bundle.display());
    let output = Command::new(bundle.as_ref())
        .arg(EXTRACT_FLAG)
        .current_dir(scratch)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|error| Error::CommandFailed {
            command: bundle.display().to_string(),
            error,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::ExtractionFailed {
            status: output.status.code(),
            stderr: if stderr.is_empty() {
                "unknown error".to_string()
            } else {
                stderr
            },
        });
    }

    log::debug!("payload extracted to {}", scratch.join(SQUASHFS_ROOT).display());
    Ok(())
}
