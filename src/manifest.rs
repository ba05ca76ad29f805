//! The install manifest: the exact record of what an install created,
//! persisted as a JSON sidecar and consumed by the uninstaller.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config;

/// Everything the uninstaller needs, as explicit data.
///
/// `directories` is stored in creation order (parents first); the removal
/// routine walks it in reverse so children go before parents. Every entry
/// in `files` has its parent directory in `directories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallManifest {
    pub app: String,
    pub install_dir: PathBuf,
    pub desktop_file: PathBuf,
    pub icon_file: PathBuf,
    #[serde(default)]
    pub symlink: Option<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Sidecar path inside an install root.
pub fn manifest_path(install_dir: &Path) -> PathBuf {
    install_dir.join(config::MANIFEST_NAME)
}

/// Persist the manifest into the install root. The record is validated
/// first, then staged in a scratch file beside the sidecar and renamed
/// into place, so the uninstaller can never pick up a half-written one.
pub fn write_manifest(path: &Path, manifest: &InstallManifest) -> Result<()> {
    ensure_parents_recorded(manifest)?;
    let json = serde_json::to_string_pretty(manifest)
        .context("encoding the install record as JSON")?;
    let scratch = path.with_file_name(format!(".{}.partial", config::MANIFEST_NAME));
    fs::write(&scratch, json)
        .with_context(|| format!("staging the install record at {}", scratch.display()))?;
    fs::rename(&scratch, path)
        .with_context(|| format!("moving the install record into {}", path.display()))?;
    Ok(())
}

/// A file whose parent directory was never recorded could not be removed
/// in reverse creation order; refuse to persist such a record.
fn ensure_parents_recorded(manifest: &InstallManifest) -> Result<()> {
    for file in &manifest.files {
        let Some(parent) = file.parent() else {
            continue;
        };
        if parent.as_os_str().is_empty() {
            continue;
        }
        if !manifest.directories.iter().any(|dir| dir == parent) {
            bail!(
                "manifest records file {} without its parent directory {}",
                file.display(),
                parent.display()
            );
        }
    }
    Ok(())
}

/// Read a manifest back.
pub fn read_manifest(path: &Path) -> Result<InstallManifest> {
    let payload =
        fs::read(path).with_context(|| format!("reading manifest '{}'", path.display()))?;
    serde_json::from_slice(&payload)
        .with_context(|| format!("parsing manifest '{}'", path.display()))
}
