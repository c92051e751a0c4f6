use crate::archive::ArchiveFormat;
use crate::download::Backend;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Installer config file (defaults to ./distinstall.toml when present)
    #[arg(short, long, env = "DISTINSTALL_CONFIG")]
    pub config: Option<PathBuf>,
    /// Name of the application, also the archive base name
    #[arg(long, env = "DISTINSTALL_APP_NAME")]
    pub app_name: Option<String>,
    /// Version being installed, shown in the success message
    #[arg(long, env = "DISTINSTALL_APP_VERSION")]
    pub app_version: Option<String>,
    /// Base URL the release archives live under
    #[arg(long, env = "DISTINSTALL_DOWNLOAD_URL")]
    pub download_url: Option<String>,
    /// Binary to install from the archive (defaults to the app name)
    #[arg(long, env = "DISTINSTALL_BINARY")]
    pub binary: Option<String>,
    /// Archive format of non-Windows builds (tar.xz, tar.gz, tar.zst)
    #[arg(long, env = "DISTINSTALL_UNIX_ARCHIVE")]
    pub unix_archive: Option<ArchiveFormat>,
    /// How to download the archive
    #[arg(long, value_enum, env = "DISTINSTALL_DOWNLOADER")]
    pub downloader: Option<Backend>,
    /// Print extra progress and debug information
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
    /// Extra arguments handed to the install step
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Contents of `distinstall.toml`
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub download_url: Option<String>,
    pub binary: Option<String>,
    pub unix_archive: Option<ArchiveFormat>,
    pub downloader: Option<Backend>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    pub app_name: String,
    pub app_version: String,
    pub download_url: String,
    pub binary: String,
    pub unix_archive: ArchiveFormat,
    pub downloader: Backend,
}
