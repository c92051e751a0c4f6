use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::{Command, Output};

/// Commands the installer shells out to on this host
#[cfg(unix)]
pub const REQUIRED_COMMANDS: &[&str] = &["uname"];
#[cfg(not(unix))]
pub const REQUIRED_COMMANDS: &[&str] = &[];

/// Check whether a command resolves on PATH
pub fn check_cmd(name: &str) -> bool {
    resolve_cmd(name).is_some()
}

/// Resolve a command to its full path, if present on PATH
pub fn resolve_cmd(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Fail if a command is missing from PATH
pub fn need_cmd(name: &str) -> Result<()> {
    match resolve_cmd(name) {
        Some(path) => {
            log::debug!("found {name} at {}", path.display());
            Ok(())
        }
        None => bail!("need '{name}' (command not found)"),
    }
}

/// Fail on the first missing command
pub fn need_cmds(names: &[&str]) -> Result<()> {
    for name in names {
        need_cmd(name)?;
    }
    Ok(())
}

/// Render a command line for messages
pub fn render(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run a command that must succeed.
///
/// A spawn failure or a non-zero exit status is fatal and the error carries
/// the command line that failed.
pub fn ensure(cmd: &mut Command) -> Result<Output> {
    let line = render(cmd);
    log::debug!("running: {line}");

    let output = cmd
        .output()
        .with_context(|| format!("command failed: {line}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            bail!("command failed: {line}");
        }
        bail!("command failed: {line}\n{stderr}");
    }

    Ok(output)
}

/// Run a command whose failure is tolerated.
///
/// Returns the output when the command could be spawned, regardless of its
/// exit status, so callers can still inspect what it printed.
pub fn ignore(cmd: &mut Command) -> Option<Output> {
    let line = render(cmd);
    log::debug!("running (best effort): {line}");

    match cmd.output() {
        Ok(output) => {
            if !output.status.success() {
                log::debug!("ignoring failure of: {line} ({})", output.status);
            }
            Some(output)
        }
        Err(e) => {
            log::debug!("ignoring failure to spawn: {line}: {e}");
            None
        }
    }
}

/// Run a command and return its trimmed stdout, failing like [`ensure`]
pub fn ensure_stdout(cmd: &mut Command) -> Result<String> {
    let output = ensure(cmd)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
