//! Interactive installer and uninstaller for the PC-BASIC desktop
//! application.
//!
//! One binary, two modes, selected by the name it is invoked under: any
//! name installs, a name containing `uninstall` uninstalls. Both modes run
//! the same pipeline:
//!
//! ```text
//! interactivity guard -> path resolution -> permission check
//!     -> confirmation -> execute
//! ```
//!
//! Everything up to the confirmation is read-only; the first mutation is
//! the creation of the install root. The install records every directory
//! and file it creates in an [`manifest::InstallManifest`], persisted as a
//! JSON sidecar next to a copied `uninstall` binary. The uninstaller reads
//! that record back and removes exactly the recorded set, directories in
//! reverse creation order.
//!
//! # Module map
//!
//! - [`config`] - identity of the packaged application, artifact names
//! - [`context`] - privilege detection and the install path policy
//! - [`interact`] - tty guard, terminal relaunch, console prompts
//! - [`fsops`] - writability probe, tree scan/copy, symlinks
//! - [`manifest`] - the persisted install record
//! - [`desktop`] - menu entry and icon registration
//! - [`install`] / [`uninstall`] - the two workflows

pub mod config;
pub mod context;
pub mod desktop;
pub mod fsops;
pub mod install;
pub mod interact;
pub mod manifest;
pub mod uninstall;

pub use context::{InstallContext, PrivilegeMode};
pub use manifest::InstallManifest;
