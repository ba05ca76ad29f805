//! Manifest-driven removal: take the recorded artifact lists and remove
//! exactly those, reporting per-item failures without stopping.

use std::fs;
use std::path::Path;

use crate::manifest::InstallManifest;

/// Outcome of a removal run. Failures carry the path and the reason; the
/// sequence never halts on them.
#[derive(Debug, Default)]
pub struct RemovalReport {
    pub removed: usize,
    pub failures: Vec<String>,
}

impl RemovalReport {
    fn ok(&mut self) {
        self.removed += 1;
    }

    fn fail(&mut self, what: &Path, err: impl std::fmt::Display) {
        self.failures.push(format!("{}: {}", what.display(), err));
    }
}

/// Human-readable list of every planned removal.
pub fn summary(manifest: &InstallManifest) -> Vec<String> {
    let mut lines = vec![
        format!("Remove icon {}", manifest.icon_file.display()),
        format!("Remove menu entry {}", manifest.desktop_file.display()),
    ];
    if let Some(link) = &manifest.symlink {
        lines.push(format!("Remove symlink {}", link.display()));
    }
    lines.push(format!(
        "Remove {} files and {} directories under {}",
        manifest.files.len(),
        manifest.directories.len(),
        manifest.install_dir.display()
    ));
    lines.push(format!("Remove {} itself", manifest.install_dir.display()));
    lines
}

/// Remove every artifact the manifest records, then the uninstaller's own
/// files and the install root.
///
/// Directories are removed in reverse creation order with non-recursive
/// removal, so a directory that picked up content since the install is
/// reported and left in place rather than wiped.
pub fn execute(
    manifest: &InstallManifest,
    uninstaller: &Path,
    manifest_file: &Path,
) -> RemovalReport {
    let mut report = RemovalReport::default();

    remove_file(&manifest.icon_file, &mut report);
    remove_file(&manifest.desktop_file, &mut report);
    if let Some(link) = &manifest.symlink {
        // an already-absent link is not an error
        if link.is_symlink() || link.exists() {
            remove_file(link, &mut report);
        }
    }
    for file in &manifest.files {
        remove_file(&manifest.install_dir.join(file), &mut report);
    }
    for dir in manifest.directories.iter().rev() {
        remove_dir(&manifest.install_dir.join(dir), &mut report);
    }
    remove_file(manifest_file, &mut report);
    remove_file(uninstaller, &mut report);
    remove_dir(&manifest.install_dir, &mut report);

    report
}

fn remove_file(path: &Path, report: &mut RemovalReport) {
    match fs::remove_file(path) {
        Ok(()) => report.ok(),
        Err(err) => report.fail(path, err),
    }
}

fn remove_dir(path: &Path, report: &mut RemovalReport) {
    match fs::remove_dir(path) {
        Ok(()) => report.ok(),
        Err(err) => report.fail(path, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{InstallContext, PrivilegeMode};
    use crate::{config, install, manifest};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn installed_fixture(temp: &TempDir) -> (InstallManifest, PathBuf, PathBuf) {
        let source = temp.path().join("source");
        fs::create_dir_all(source.join("bin/sub")).unwrap();
        fs::create_dir_all(source.join("docs")).unwrap();
        fs::write(source.join("pcbasic"), "#!/bin/sh\n").unwrap();
        fs::write(source.join("pcbasic.png"), [137u8, 80]).unwrap();
        fs::write(source.join("bin/pcbasic"), "prog").unwrap();
        fs::write(source.join("bin/sub/data.bin"), "data").unwrap();
        fs::write(source.join("docs/readme.txt"), "read me").unwrap();
        let setup_exe = source.join("pcbasic-setup");
        fs::write(&setup_exe, "fake setup binary").unwrap();

        let ctx = InstallContext {
            mode: PrivilegeMode::Elevated,
            install_dir: temp.path().join("opt/pcbasic"),
            desktop_dir: temp.path().join("applications"),
            icon_dir: temp.path().join("icons"),
            symlink: Some(temp.path().join("bin/pcbasic")),
            settings_dir: None,
            data_dir: None,
        };
        let plan = install::plan(&source, &setup_exe, &ctx).unwrap();
        let installed = install::execute(&source, &setup_exe, &ctx, &plan).unwrap();
        let uninstaller = ctx.install_dir.join(config::UNINSTALLER_NAME);
        let manifest_file = manifest::manifest_path(&ctx.install_dir);
        (installed, uninstaller, manifest_file)
    }

    #[test]
    fn round_trip_removes_every_artifact() {
        let temp = TempDir::new().unwrap();
        let (installed, uninstaller, manifest_file) = installed_fixture(&temp);

        let report = execute(&installed, &uninstaller, &manifest_file);

        assert!(report.failures.is_empty(), "failures: {:?}", report.failures);
        assert!(!installed.install_dir.exists());
        assert!(!installed.desktop_file.exists());
        assert!(!installed.icon_file.exists());
        let link = installed.symlink.clone().unwrap();
        assert!(!link.is_symlink() && !link.exists());
    }

    #[test]
    fn an_absent_symlink_is_tolerated() {
        let temp = TempDir::new().unwrap();
        let (installed, uninstaller, manifest_file) = installed_fixture(&temp);
        fs::remove_file(installed.symlink.clone().unwrap()).unwrap();

        let report = execute(&installed, &uninstaller, &manifest_file);

        assert!(report.failures.is_empty(), "failures: {:?}", report.failures);
        assert!(!installed.install_dir.exists());
    }

    #[test]
    fn a_missing_file_is_reported_but_does_not_halt() {
        let temp = TempDir::new().unwrap();
        let (installed, uninstaller, manifest_file) = installed_fixture(&temp);
        fs::remove_file(installed.install_dir.join("docs/readme.txt")).unwrap();

        let report = execute(&installed, &uninstaller, &manifest_file);

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("readme.txt"));
        assert!(!installed.install_dir.exists());
    }

    #[test]
    fn a_drifted_directory_is_reported_and_left_in_place() {
        let temp = TempDir::new().unwrap();
        let (installed, uninstaller, manifest_file) = installed_fixture(&temp);
        let stray = installed.install_dir.join("docs/notes.txt");
        fs::write(&stray, "added after install").unwrap();

        let report = execute(&installed, &uninstaller, &manifest_file);

        // docs and the install root both fail; everything else goes
        assert_eq!(report.failures.len(), 2);
        assert!(stray.exists());
        assert!(!installed.install_dir.join("bin").exists());
        assert!(!installed.desktop_file.exists());
    }

    #[test]
    fn directories_are_removed_children_before_parents() {
        let temp = TempDir::new().unwrap();
        let (installed, uninstaller, manifest_file) = installed_fixture(&temp);
        assert_eq!(
            installed.directories,
            vec![
                PathBuf::from("bin"),
                PathBuf::from("bin/sub"),
                PathBuf::from("docs"),
            ]
        );

        let report = execute(&installed, &uninstaller, &manifest_file);

        // nested bin/sub can only vanish without failures if it went first
        assert!(report.failures.is_empty(), "failures: {:?}", report.failures);
        assert!(!installed.install_dir.exists());
    }
}
