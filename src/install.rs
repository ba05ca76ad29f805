//! The install workflow: plan everything, confirm, then execute.
//!
//! [`plan`] and [`summary`] are read-only; the first mutation happens in
//! [`execute`], which is the point of no return. A failure part way
//! through leaves earlier steps in place (no rollback).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config;
use crate::context::InstallContext;
use crate::desktop::{self, DesktopEntry};
use crate::fsops;
use crate::manifest::{self, InstallManifest};

/// Scan result: what the install would create, before it creates anything.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Directories under the source root, parents before children.
    pub directories: Vec<PathBuf>,
    /// Files under the source root.
    pub files: Vec<PathBuf>,
}

/// Scan the source tree and verify the target is reachable.
///
/// The setup binary and the artifacts it generates are not payload, so
/// they are left out of the scan.
pub fn plan(source: &Path, setup_exe: &Path, ctx: &InstallContext) -> Result<InstallPlan> {
    let setup_name = setup_exe
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    let exclude = [setup_name, config::UNINSTALLER_NAME, config::MANIFEST_NAME];
    let (directories, files) = fsops::scan_tree(source, &exclude)?;
    fsops::check_writable(&ctx.install_dir)?;
    Ok(InstallPlan { directories, files })
}

/// Human-readable list of every planned mutation.
pub fn summary(ctx: &InstallContext, plan: &InstallPlan) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Copy {} directories and {} files to {}",
            plan.directories.len(),
            plan.files.len(),
            ctx.install_dir.display()
        ),
        format!("Write menu entry {}", ctx.desktop_file().display()),
        format!("Copy icon to {}", ctx.icon_file().display()),
    ];
    if let Some(link) = &ctx.symlink {
        lines.push(format!(
            "Create symlink {} -> {}",
            link.display(),
            ctx.installed_binary().display()
        ));
    }
    lines.push(format!(
        "Write uninstaller {} and manifest {}",
        ctx.install_dir.join(config::UNINSTALLER_NAME).display(),
        manifest::manifest_path(&ctx.install_dir).display()
    ));
    if let Some(dir) = &ctx.settings_dir {
        lines.push(format!(
            "Settings will live in {} (not created now)",
            dir.display()
        ));
    }
    if let Some(dir) = &ctx.data_dir {
        lines.push(format!(
            "Data will live in {} (not created now)",
            dir.display()
        ));
    }
    lines
}

/// Perform the install and return the manifest recording it.
pub fn execute(
    source: &Path,
    setup_exe: &Path,
    ctx: &InstallContext,
    plan: &InstallPlan,
) -> Result<InstallManifest> {
    println!(
        "Copying {} to {}",
        source.display(),
        ctx.install_dir.display()
    );
    fs::create_dir_all(&ctx.install_dir)
        .with_context(|| format!("creating {}", ctx.install_dir.display()))?;
    fsops::copy_tree(source, &ctx.install_dir, &plan.directories, &plan.files)?;

    if let Some(link) = &ctx.symlink {
        println!("Linking {}", link.display());
        fsops::replace_symlink(link, &ctx.installed_binary())?;
    }

    println!("Registering menu entry");
    let entry = DesktopEntry::new(&ctx.launcher(), &ctx.icon_file());
    let desktop_file = desktop::write_entry(&ctx.desktop_dir, &entry)?;
    let icon_file = desktop::install_icon(&source.join(config::ICON_REL), &ctx.icon_dir)?;

    println!("Writing uninstaller");
    write_uninstaller(&ctx.install_dir, setup_exe)?;
    let manifest = InstallManifest {
        app: config::APP_NAME.to_string(),
        install_dir: ctx.install_dir.clone(),
        desktop_file,
        icon_file,
        symlink: ctx.symlink.clone(),
        directories: plan.directories.clone(),
        files: plan.files.clone(),
    };
    manifest::write_manifest(&manifest::manifest_path(&ctx.install_dir), &manifest)?;
    Ok(manifest)
}

/// Install the companion uninstaller: a copy of the running setup binary.
fn write_uninstaller(install_dir: &Path, setup_exe: &Path) -> Result<PathBuf> {
    let dest = install_dir.join(config::UNINSTALLER_NAME);
    if setup_exe != dest {
        fs::copy(setup_exe, &dest).with_context(|| {
            format!("copying {} to {}", setup_exe.display(), dest.display())
        })?;
    }
    fsops::make_executable(&dest)?;
    Ok(dest)
}
