//! Filesystem primitives shared by the install and uninstall workflows.

use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

/// Check that the nearest existing ancestor of `target` is writable.
///
/// Runs before any mutation; a failure here guarantees nothing has been
/// created yet. The error names the ancestor that blocked the write.
pub fn check_writable(target: &Path) -> Result<()> {
    let probe = nearest_existing_ancestor(target);
    if !is_writable(&probe) {
        bail!("no write permission on {}", probe.display());
    }
    Ok(())
}

fn nearest_existing_ancestor(target: &Path) -> PathBuf {
    let mut current = target;
    loop {
        if current.exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => current = parent,
            _ => return PathBuf::from("."),
        }
    }
}

/// access(2) with W_OK, so ACLs and read-only mounts are honored.
fn is_writable(path: &Path) -> bool {
    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: cpath is a valid NUL-terminated string.
    unsafe { libc::access(cpath.as_ptr(), libc::W_OK) == 0 }
}

/// Scan the tree under `source`, returning relative directory and file
/// paths. Directories come back parents-before-children, so creating them
/// in order and removing them in reverse order are both safe. Top-level
/// entries named in `exclude` are skipped, subtrees included.
pub fn scan_tree(source: &Path, exclude: &[&str]) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let mut walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("scanning {}", source.display()))?;
        let excluded = entry.depth() == 1
            && entry
                .file_name()
                .to_str()
                .map_or(false, |name| exclude.contains(&name));
        if excluded {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(source)
            .context("entry outside the source root")?
            .to_path_buf();
        if entry.file_type().is_dir() {
            dirs.push(rel);
        } else {
            files.push(rel);
        }
    }

    Ok((dirs, files))
}

/// Create every directory and copy every file of the scanned lists from
/// `source` into `dest`, directories first. Files are copied byte for
/// byte. A failure stops the copy where it happened; earlier copies stay
/// in place.
pub fn copy_tree(
    source: &Path,
    dest: &Path,
    dirs: &[PathBuf],
    files: &[PathBuf],
) -> Result<()> {
    for dir in dirs {
        let path = dest.join(dir);
        fs::create_dir_all(&path).with_context(|| format!("creating {}", path.display()))?;
    }
    for file in files {
        let src = source.join(file);
        let dst = dest.join(file);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::copy(&src, &dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    }
    Ok(())
}

/// Create `link` pointing at `target`, replacing whatever is there.
pub fn replace_symlink(link: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    if link.is_symlink() || link.exists() {
        fs::remove_file(link).with_context(|| format!("removing {}", link.display()))?;
    }
    std::os::unix::fs::symlink(target, link)
        .with_context(|| format!("linking {} to {}", link.display(), target.display()))?;
    Ok(())
}

/// chmod +x for owner, group and other.
pub fn make_executable(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)
        .with_context(|| format!("reading permissions of {}", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms)
        .with_context(|| format!("setting permissions of {}", path.display()))?;
    Ok(())
}
