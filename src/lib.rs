//! # AppImage Integrate
//!
//! Desktop-menu integration for AppImage bundles.
//!
//! An AppImage carries its own desktop entry and icon, but a desktop
//! environment never sees them while they sit inside the bundle. This crate
//! asks the bundle to unpack itself into a scratch directory, picks the best
//! desktop entry and icon out of the payload, and produces two files: a
//! cleaned icon and a rewritten `.desktop` launcher pointing at a fixed
//! install directory.
//!
//! ## Pipeline
//!
//! 1. Run `<bundle> --appimage-extract` inside a scratch directory
//! 2. Locate the `.desktop` entry in the extracted `squashfs-root` tree
//! 3. Parse its `Icon=` key
//! 4. Find the best matching icon file (vector preferred, then raster)
//! 5. Derive a clean application name from the bundle filename
//! 6. Copy the icon and write the rewritten desktop entry, backing up
//!    anything already at the destination
//!
//! ## Usage
//!
//! ```bash
//! appimage_integrate MyApp-1.2.3-x86_64.AppImage
//! appimage_integrate --install-dir /opt/appimages MyApp.AppImage
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod appimage;
pub mod cli;
pub mod desktop;
pub mod error;
pub mod icon;
pub mod name;
pub mod util;

// Re-export main types for public API
pub use cli::Args;
pub use error::{Error, Result};
pub use icon::{IconCandidate, IconFormat};

use std::path::PathBuf;

/// Configuration for an integration run.
///
/// Spells out the directory lookups the pipeline would otherwise read from
/// the process environment, so the stages stay testable in isolation.
#[derive(Debug, Clone)]
pub struct IntegrateConfig {
    /// Directory the icon and desktop entry are written to
    pub output_dir: PathBuf,
    /// Directory the generated entry assumes the bundle, icon, and launcher
    /// script live in once installed
    pub install_dir: PathBuf,
}

impl IntegrateConfig {
    /// Resolve a configuration from optional overrides.
    ///
    /// The output directory defaults to the process working directory, the
    /// install directory to `~/AppImage`.
    pub fn resolve(output_dir: Option<PathBuf>, install_dir: Option<PathBuf>) -> Result<Self> {
        let output_dir = match output_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let install_dir = match install_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(Error::HomeDirNotFound)?
                .join("AppImage"),
        };
        Ok(Self {
            output_dir,
            install_dir,
        })
    }
}
