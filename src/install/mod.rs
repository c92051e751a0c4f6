pub mod utils;

use crate::platform::Platform;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// `$HOME/.cargo/bin`.
///
/// `HOME` is read directly; the platform home directory is only a fallback
/// for hosts where it isn't set.
pub fn default_install_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?;

    Ok(install_dir_for_home(&home))
}

pub fn install_dir_for_home(home: &Path) -> PathBuf {
    home.join(".cargo").join("bin")
}

/// File name of the binary on the given platform
pub fn binary_file_name(name: &str, platform: &Platform) -> String {
    if platform.is_windows() {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// Copy `name` out of the extracted archive into `dest_dir`, creating the
/// directory when needed. Returns where the binary ended up.
pub fn install_binary(
    src_dir: &Path,
    name: &str,
    platform: &Platform,
    dest_dir: &Path,
) -> Result<PathBuf> {
    let file_name = binary_file_name(name, platform);
    let source = src_dir.join(&file_name);

    if !source.is_file() {
        bail!("{file_name} not found in the downloaded archive");
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;

    let install_path = dest_dir.join(&file_name);

    // Replacing a running executable in place fails with "Text file busy"
    #[cfg(unix)]
    {
        if install_path.exists() {
            fs::remove_file(&install_path).with_context(|| {
                format!("failed to remove existing {}", install_path.display())
            })?;
        }
    }

    fs::copy(&source, &install_path).with_context(|| {
        format!(
            "failed to copy {} to {}",
            source.display(),
            install_path.display()
        )
    })?;

    Ok(install_path)
}
