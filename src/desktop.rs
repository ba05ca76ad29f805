//! Desktop menu integration: the `.desktop` descriptor and the icon.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config;

/// The fixed-schema menu entry the installer registers.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopEntry {
    pub name: String,
    pub generic_name: String,
    pub exec: PathBuf,
    pub icon: PathBuf,
    pub categories: String,
}

impl DesktopEntry {
    /// Entry for the packaged application, launching `launcher` and
    /// showing the icon installed at `icon`.
    pub fn new(launcher: &Path, icon: &Path) -> Self {
        Self {
            name: config::APP_TITLE.to_string(),
            generic_name: config::GENERIC_NAME.to_string(),
            exec: launcher.to_path_buf(),
            icon: icon.to_path_buf(),
            categories: config::CATEGORIES.to_string(),
        }
    }

    /// Render the descriptor in desktop-entry syntax.
    pub fn render(&self) -> String {
        format!(
            "[Desktop Entry]\n\
             Name={}\n\
             GenericName={}\n\
             Exec={}\n\
             Terminal=false\n\
             Type=Application\n\
             Icon={}\n\
             Categories={}\n",
            self.name,
            self.generic_name,
            self.exec.display(),
            self.icon.display(),
            self.categories,
        )
    }
}

/// Write (create or replace) the entry file under `desktop_dir`.
pub fn write_entry(desktop_dir: &Path, entry: &DesktopEntry) -> Result<PathBuf> {
    fs::create_dir_all(desktop_dir)
        .with_context(|| format!("creating {}", desktop_dir.display()))?;
    let path = desktop_dir.join(format!("{}.desktop", config::APP_NAME));
    fs::write(&path, entry.render()).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Copy (create or replace) the packaged icon into `icon_dir`.
pub fn install_icon(source_icon: &Path, icon_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(icon_dir).with_context(|| format!("creating {}", icon_dir.display()))?;
    let path = icon_dir.join(format!("{}.png", config::APP_NAME));
    fs::copy(source_icon, &path).with_context(|| {
        format!("copying {} to {}", source_icon.display(), path.display())
    })?;
    Ok(path)
}
