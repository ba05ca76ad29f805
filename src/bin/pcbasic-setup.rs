use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use pcbasic_setup::config;
use pcbasic_setup::context::{self, InstallContext, PrivilegeMode};
use pcbasic_setup::interact::{self, Interactivity};
use pcbasic_setup::{install, manifest, uninstall};

fn main() -> ExitCode {
    let spawned = env::args().skip(1).any(|arg| arg == config::SPAWNED_FLAG);
    let code = dispatch(spawned);
    if spawned {
        interact::wait_for_ack();
    }
    code
}

fn dispatch(spawned: bool) -> ExitCode {
    match interact::interactivity(
        interact::stdout_is_tty(),
        spawned,
        interact::display_available(),
    ) {
        Interactivity::Unavailable => {
            eprintln!("error: this program must be run interactively");
            return ExitCode::from(1);
        }
        Interactivity::Relaunch => {
            return match relaunch() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err:#}");
                    ExitCode::from(1)
                }
            };
        }
        Interactivity::Proceed => {}
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn relaunch() -> Result<()> {
    let exe = env::current_exe().context("resolving the current executable")?;
    interact::relaunch_in_terminal(&exe)
}

fn run() -> Result<()> {
    let exe = env::current_exe().context("resolving the current executable")?;
    let invoked = env::args()
        .next()
        .map(|arg0| invoked_name(Path::new(&arg0)))
        .unwrap_or_default();
    if is_uninstall_invocation(&invoked) {
        run_uninstall(&exe)
    } else {
        run_install(&exe)
    }
}

/// Bare name the program was invoked under.
fn invoked_name(arg0: &Path) -> String {
    arg0.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Uninstall mode is selected by the name the binary is invoked under.
fn is_uninstall_invocation(name: &str) -> bool {
    name.contains("uninstall")
}

fn run_install(exe: &Path) -> Result<()> {
    println!("{} installer", config::APP_TITLE);
    println!();

    let source = source_root(exe)?;
    let mode = PrivilegeMode::detect();
    println!("Installing as {mode}.");

    let default_dir = context::default_install_dir(mode)?;
    let answer = interact::prompt_with_default(
        "Installation directory",
        &default_dir.display().to_string(),
    )?;
    let ctx = InstallContext::resolve(mode, PathBuf::from(answer))?;
    let plan = install::plan(&source, exe, &ctx)?;

    println!();
    println!("The following changes will be made:");
    for line in install::summary(&ctx, &plan) {
        println!("  {line}");
    }
    println!();

    if !interact::confirm("Start installation?")? {
        println!("Nothing was changed.");
        return Ok(());
    }

    let installed = install::execute(&source, exe, &ctx, &plan)?;
    println!();
    println!(
        "{} installed to {}.",
        config::APP_TITLE,
        installed.install_dir.display()
    );
    println!(
        "To uninstall, run {}.",
        installed
            .install_dir
            .join(config::UNINSTALLER_NAME)
            .display()
    );
    Ok(())
}

fn run_uninstall(exe: &Path) -> Result<()> {
    println!("{} uninstaller", config::APP_TITLE);
    println!();

    let install_dir = exe
        .parent()
        .context("the uninstaller has no parent directory")?;
    let manifest_file = manifest::manifest_path(install_dir);
    let installed = manifest::read_manifest(&manifest_file)?;

    println!("The following will be removed:");
    for line in uninstall::summary(&installed) {
        println!("  {line}");
    }
    println!();

    if !interact::confirm(&format!("Remove {}?", config::APP_TITLE))? {
        println!("Nothing was changed.");
        return Ok(());
    }

    let report = uninstall::execute(&installed, exe, &manifest_file);
    for failure in &report.failures {
        eprintln!("warning: could not remove {failure}");
    }
    println!(
        "{} removed ({} items).",
        config::APP_TITLE,
        report.removed
    );
    Ok(())
}

/// The packaged tree is the directory holding the setup binary, unless
/// overridden for development.
fn source_root(exe: &Path) -> Result<PathBuf> {
    if let Some(root) = env::var_os(config::SOURCE_ENV) {
        return Ok(PathBuf::from(root));
    }
    Ok(exe
        .parent()
        .context("the setup binary has no parent directory")?
        .to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninstall_mode_follows_the_invoked_name() {
        assert!(is_uninstall_invocation("uninstall"));
        assert!(is_uninstall_invocation("pcbasic-uninstall"));
        assert!(!is_uninstall_invocation("pcbasic-setup"));
        assert!(!is_uninstall_invocation("install"));
    }

    #[test]
    fn invoked_name_strips_directory_and_extension() {
        assert_eq!(invoked_name(Path::new("/opt/pcbasic/uninstall")), "uninstall");
        assert_eq!(invoked_name(Path::new("./pcbasic-setup")), "pcbasic-setup");
    }
}
