//! Identity of the packaged application and the names of the artifacts
//! the installer produces.

/// Application identifier, used for file names, menu entries and symlinks.
pub const APP_NAME: &str = "pcbasic";

/// Menu title shown in desktop environments.
pub const APP_TITLE: &str = "PC-BASIC";

/// GenericName field of the menu entry.
pub const GENERIC_NAME: &str = "BASIC interpreter";

/// Launcher entry point, relative to the install root. Feeds the menu
/// entry's Exec line.
pub const LAUNCHER_REL: &str = "pcbasic";

/// Packaged executable, relative to the install root. Feeds the system
/// symlink target.
pub const BIN_REL: &str = "bin/pcbasic";

/// Packaged icon, relative to the source root.
pub const ICON_REL: &str = "pcbasic.png";

/// Categories field of the menu entry.
pub const CATEGORIES: &str = "Development;Education;";

/// Name of the generated uninstaller executable inside the install root.
pub const UNINSTALLER_NAME: &str = "uninstall";

/// Name of the manifest sidecar written next to the uninstaller.
pub const MANIFEST_NAME: &str = "uninstall.json";

/// Marker appended when the installer re-launches itself inside a
/// terminal emulator. Its presence stops a second relaunch.
pub const SPAWNED_FLAG: &str = "--spawned";

/// Environment override for the source tree root, for development runs.
pub const SOURCE_ENV: &str = "PCBASIC_SETUP_SOURCE";
