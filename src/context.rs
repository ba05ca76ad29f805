//! Privilege detection and installation path policy.
//!
//! Environment-derived defaults are resolved once into an
//! [`InstallContext`] at startup and passed explicitly from there on; no
//! operation reads the environment behind the caller's back.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config;

/// Whether the process runs with superuser privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeMode {
    /// Effective uid 0: system-wide paths and a /usr/bin symlink.
    Elevated,
    /// Regular user: per-user XDG paths, no symlink.
    Standard,
}

impl PrivilegeMode {
    /// Detect the mode from the effective uid.
    pub fn detect() -> Self {
        // SAFETY: geteuid has no preconditions and cannot fail.
        if unsafe { libc::geteuid() } == 0 {
            Self::Elevated
        } else {
            Self::Standard
        }
    }
}

impl fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeMode::Elevated => write!(f, "superuser (system-wide paths)"),
            PrivilegeMode::Standard => write!(f, "standard user (per-user paths)"),
        }
    }
}

/// Every path the install and uninstall workflows touch, resolved once.
#[derive(Debug, Clone)]
pub struct InstallContext {
    pub mode: PrivilegeMode,
    /// Target directory the packaged tree is copied into.
    pub install_dir: PathBuf,
    /// Directory receiving the menu entry.
    pub desktop_dir: PathBuf,
    /// Directory receiving the icon copy.
    pub icon_dir: PathBuf,
    /// System symlink to the packaged executable, elevated mode only.
    pub symlink: Option<PathBuf>,
    /// Per-user settings directory, reported but not populated.
    pub settings_dir: Option<PathBuf>,
    /// Per-user data directory, reported but not populated.
    pub data_dir: Option<PathBuf>,
}

impl InstallContext {
    /// Resolve the full context for `mode`, installing into `install_dir`.
    pub fn resolve(mode: PrivilegeMode, install_dir: PathBuf) -> Result<Self> {
        match mode {
            PrivilegeMode::Elevated => Ok(Self::elevated(install_dir)),
            PrivilegeMode::Standard => {
                let data_home =
                    dirs::data_dir().context("cannot determine the user data directory")?;
                let config_home =
                    dirs::config_dir().context("cannot determine the user config directory")?;
                Ok(Self::standard(install_dir, &data_home, &config_home))
            }
        }
    }

    /// System-wide policy: /usr/share locations plus a /usr/bin symlink.
    pub fn elevated(install_dir: PathBuf) -> Self {
        Self {
            mode: PrivilegeMode::Elevated,
            install_dir,
            desktop_dir: PathBuf::from("/usr/share/applications"),
            icon_dir: PathBuf::from("/usr/share/icons"),
            symlink: Some(PathBuf::from("/usr/bin").join(config::APP_NAME)),
            settings_dir: None,
            data_dir: None,
        }
    }

    /// Per-user policy: XDG data locations, no symlink.
    pub fn standard(install_dir: PathBuf, data_home: &Path, config_home: &Path) -> Self {
        Self {
            mode: PrivilegeMode::Standard,
            install_dir,
            desktop_dir: data_home.join("applications"),
            icon_dir: data_home.join("icons"),
            symlink: None,
            settings_dir: Some(config_home.join(config::APP_NAME)),
            data_dir: Some(data_home.join(config::APP_NAME)),
        }
    }

    /// Installed launcher path, used for the menu entry's Exec line.
    pub fn launcher(&self) -> PathBuf {
        self.install_dir.join(config::LAUNCHER_REL)
    }

    /// Packaged executable inside the install tree, the symlink's target.
    pub fn installed_binary(&self) -> PathBuf {
        self.install_dir.join(config::BIN_REL)
    }

    /// Menu entry file path.
    pub fn desktop_file(&self) -> PathBuf {
        self.desktop_dir.join(format!("{}.desktop", config::APP_NAME))
    }

    /// Installed icon path.
    pub fn icon_file(&self) -> PathBuf {
        self.icon_dir.join(format!("{}.png", config::APP_NAME))
    }
}

/// Default install directory for `mode`.
pub fn default_install_dir(mode: PrivilegeMode) -> Result<PathBuf> {
    match mode {
        PrivilegeMode::Elevated => Ok(PathBuf::from("/opt").join(config::APP_NAME)),
        PrivilegeMode::Standard => {
            let home = dirs::home_dir().context("cannot determine the home directory")?;
            Ok(home.join(config::APP_NAME))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_policy_paths() {
        let ctx = InstallContext::elevated(PathBuf::from("/opt/pcbasic"));
        assert_eq!(ctx.desktop_dir, Path::new("/usr/share/applications"));
        assert_eq!(ctx.icon_dir, Path::new("/usr/share/icons"));
        assert_eq!(ctx.symlink.as_deref(), Some(Path::new("/usr/bin/pcbasic")));
        assert!(ctx.settings_dir.is_none());
        assert!(ctx.data_dir.is_none());
    }

    #[test]
    fn standard_policy_paths() {
        let ctx = InstallContext::standard(
            PathBuf::from("/home/u/pcbasic"),
            Path::new("/home/u/.local/share"),
            Path::new("/home/u/.config"),
        );
        assert_eq!(ctx.desktop_dir, Path::new("/home/u/.local/share/applications"));
        assert_eq!(ctx.icon_dir, Path::new("/home/u/.local/share/icons"));
        assert!(ctx.symlink.is_none());
        assert_eq!(
            ctx.settings_dir.as_deref(),
            Some(Path::new("/home/u/.config/pcbasic"))
        );
        assert_eq!(
            ctx.data_dir.as_deref(),
            Some(Path::new("/home/u/.local/share/pcbasic"))
        );
    }

    #[test]
    fn derived_files_carry_app_name() {
        let ctx = InstallContext::elevated(PathBuf::from("/opt/pcbasic"));
        assert_eq!(ctx.launcher(), Path::new("/opt/pcbasic/pcbasic"));
        assert_eq!(
            ctx.installed_binary(),
            Path::new("/opt/pcbasic/bin/pcbasic")
        );
        assert_eq!(
            ctx.desktop_file(),
            Path::new("/usr/share/applications/pcbasic.desktop")
        );
        assert_eq!(ctx.icon_file(), Path::new("/usr/share/icons/pcbasic.png"));
    }

    #[test]
    fn elevated_default_install_dir_is_under_opt() {
        let dir = default_install_dir(PrivilegeMode::Elevated).unwrap();
        assert_eq!(dir, Path::new("/opt/pcbasic"));
    }
}
