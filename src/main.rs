//! appimage_integrate - desktop-menu integration for AppImage bundles.
//!
//! This binary extracts the desktop entry and icon out of an AppImage and
//! rewrites them to point at a fixed install directory.

use appimage_integrate::cli;
use appimage_integrate::cli::OutputManager;
use std::process;

fn main() {
    env_logger::init();

    match cli::run() {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\nSuggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
