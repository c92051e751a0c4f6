use crate::models::{Args, ConfigFile, InstallerConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "distinstall.toml";

/// Read and parse a config file
pub fn load_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// The config file to use: the explicit one, or `./distinstall.toml` if it exists
fn config_path(args: &Args, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }
    let default = cwd.join(DEFAULT_CONFIG_FILE);
    default.is_file().then_some(default)
}

/// Merge command line / environment values over the config file
pub fn merge(args: &Args, file: ConfigFile) -> Result<InstallerConfig> {
    let app_name = args
        .app_name
        .clone()
        .or(file.app_name)
        .context("no app name configured (set --app-name or app-name)")?;
    let app_version = args
        .app_version
        .clone()
        .or(file.app_version)
        .context("no app version configured (set --app-version or app-version)")?;
    let download_url = args
        .download_url
        .clone()
        .or(file.download_url)
        .context("no download URL configured (set --download-url or download-url)")?;
    let binary = args
        .binary
        .clone()
        .or(file.binary)
        .unwrap_or_else(|| app_name.clone());

    Ok(InstallerConfig {
        app_name,
        app_version,
        download_url,
        binary,
        unix_archive: args.unix_archive.or(file.unix_archive).unwrap_or_default(),
        downloader: args.downloader.or(file.downloader).unwrap_or_default(),
    })
}

/// Resolve the settings for this run relative to `cwd`
pub fn resolve_in(args: &Args, cwd: &Path) -> Result<InstallerConfig> {
    let file = match config_path(args, cwd) {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            load_file(&path)?
        }
        None => ConfigFile::default(),
    };
    merge(args, file)
}

pub fn resolve(args: &Args) -> Result<InstallerConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    resolve_in(args, &cwd)
}
