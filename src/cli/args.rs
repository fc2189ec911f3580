//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Desktop-menu integration for AppImage bundles
#[derive(Parser, Debug)]
#[command(
    name = "appimage_integrate",
    version,
    about = "Extract the desktop entry and icon from an AppImage",
    long_about = "Extract a launchable desktop entry and an icon from an AppImage bundle.

Usage:
  appimage_integrate MyApp-1.2.3-x86_64.AppImage
  appimage_integrate --install-dir /opt/appimages MyApp.AppImage

The cleaned icon and the rewritten desktop entry land in the output
directory; the printed follow-up steps install them."
)]
pub struct Args {
    /// Path to the AppImage bundle
    #[arg(index = 1, value_name = "APPIMAGE")]
    pub bundle: PathBuf,

    /// Directory the icon and desktop entry are written to [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Install directory the generated entry points at [default: ~/AppImage]
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show candidate selection details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.bundle.as_os_str().is_empty() {
            return Err("AppImage path is required".to_string());
        }
        if self.quiet && self.verbose {
            return Err("--quiet and --verbose are mutually exclusive".to_string());
        }
        Ok(())
    }
}
