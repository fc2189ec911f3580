//! Integration pipeline: extract, locate, clean, rewrite.
//!
//! The stages run strictly in order and each missing-input failure aborts
//! the run with its own diagnostic. The scratch directory holding the
//! extracted payload is removed when the run ends, normally or not.

use crate::IntegrateConfig;
use crate::appimage;
use crate::cli::{Args, OutputManager};
use crate::desktop::{self, rewrite};
use crate::error::{Context, Error, ErrorExt, Result};
use crate::icon;
use crate::name;
use crate::util;

pub(super) fn execute_integrate(args: &Args, output: &OutputManager) -> Result<()> {
    if !args.bundle.exists() {
        return Err(Error::BundleNotFound {
            path: args.bundle.clone(),
        });
    }

    let config = IntegrateConfig::resolve(args.output_dir.clone(), args.install_dir.clone())?;

    // Dropped at the end of the run, taking the extracted payload with it.
    let scratch =
        tempfile::tempdir().fs_context("creating scratch directory", std::env::temp_dir())?;

    let _ = output.info("Extracting AppImage...");
    appimage::extract_payload(&args.bundle, scratch.path())?;

    let desktop_file =
        desktop::find_desktop_file(scratch.path()).ok_or(Error::DesktopFileNotFound)?;
    let _ = output.verbose(&format!("desktop entry: {}", desktop_file.display()));

    let icon_name = desktop::parse_icon_name(&desktop_file)
        .context("reading desktop entry")?
        .ok_or_else(|| Error::IconNameNotFound {
            path: desktop_file.clone(),
        })?;
    let _ = output.verbose(&format!("icon name: {icon_name}"));

    let candidate = icon::find_best_icon(scratch.path(), &icon_name).ok_or_else(|| {
        Error::IconNotFound {
            name: icon_name.clone(),
        }
    })?;
    let _ = output.verbose(&format!("icon file: {}", candidate.path.display()));

    let clean_name = name::clean_app_name(&args.bundle);
    let extension = candidate.format.extension();

    let icon_dest = config.output_dir.join(format!("{clean_name}{extension}"));
    if let Some(backup) = util::fs::backup_existing(&icon_dest)? {
        let _ = output.warn(&format!("existing icon backed up to {}", backup.display()));
    }
    util::fs::copy_file(&candidate.path, &icon_dest)?;
    let _ = output.success(&format!("Icon extracted to {}", icon_dest.display()));

    let desktop_dest = config.output_dir.join(format!(
        "{}{clean_name}.desktop",
        rewrite::DESKTOP_FILE_PREFIX
    ));
    if let Some(backup) = util::fs::backup_existing(&desktop_dest)? {
        let _ = output.warn(&format!(
            "existing desktop entry backed up to {}",
            backup.display()
        ));
    }
    rewrite::write_desktop_file(
        &desktop_file,
        &desktop_dest,
        &clean_name,
        candidate.format,
        &config.install_dir,
    )?;
    let _ = output.success(&format!(
        "Desktop entry created at {}",
        desktop_dest.display()
    ));

    print_setup_instructions(args, output, &config, &clean_name, extension);
    Ok(())
}

/// Prints the manual follow-up steps; the launcher script itself is not
/// produced by this tool.
fn print_setup_instructions(
    args: &Args,
    output: &OutputManager,
    config: &IntegrateConfig,
    clean_name: &str,
    extension: &str,
) {
    let install = config.install_dir.display();
    let bundle_name = args
        .bundle
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let _ = output.section("Setup Instructions");
    let _ = output.println("For your AppImage to work with the launcher, complete these steps:");
    let _ = output.println("1. Create the required directories:");
    let _ = output.indent(&format!("mkdir -p ~/.local/share/applications/ {install}"));
    let _ = output.println("2. Place the extracted icon and AppImage in the install directory:");
    let _ = output.indent(&format!("cp {clean_name}{extension} {install}/"));
    let _ = output.indent(&format!("cp {bundle_name} {install}/"));
    let _ = output.println(&format!(
        "3. Copy the {} script and make it executable:",
        rewrite::LAUNCHER_SCRIPT
    ));
    let _ = output.indent(&format!(
        "cp {script} {install}/ && chmod +x {install}/{script}",
        script = rewrite::LAUNCHER_SCRIPT
    ));
    let _ = output.println("4. Install the desktop file to make the app appear in your menu:");
    let _ = output.indent(&format!(
        "cp {}{clean_name}.desktop ~/.local/share/applications/",
        rewrite::DESKTOP_FILE_PREFIX
    ));
    let _ = output.println(
        "Once completed, the application should appear in your desktop environment's menu.",
    );
}
