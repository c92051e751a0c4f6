use crate::archive;
use crate::artifact::Artifact;
use crate::download::Downloader;
use crate::install::{self, utils::is_directory_in_path};
use crate::models::InstallerConfig;
use crate::output;
use crate::platform::Platform;
use crate::workdir::WorkDir;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Everything one install run needs besides the platform and downloader
#[derive(Debug, Clone)]
pub struct InstallRequest<'a> {
    pub config: &'a InstallerConfig,
    /// Where the binary is copied to
    pub install_dir: PathBuf,
    /// Parent of the scratch directory (system temp dir when unset)
    pub temp_root: Option<PathBuf>,
    /// Pass-through arguments from the command line, currently unused
    pub args: &'a [String],
}

fn download_failed(app_name: &str, url: &str) -> String {
    format!(
        "failed to download {url}\n\
         this may be a standard network error, but it may also mean that \
         {app_name}'s release process is not working. \
         If in doubt, please open an issue"
    )
}

/// Download, extract and install the binary for `platform`.
///
/// Each stage only runs if the previous one succeeded. The scratch
/// directory is removed on every return path.
pub fn install(
    request: &InstallRequest<'_>,
    downloader: &dyn Downloader,
    platform: &Platform,
) -> Result<PathBuf> {
    let config = request.config;
    let workdir = match &request.temp_root {
        Some(root) => WorkDir::create_in(root)?,
        None => WorkDir::create()?,
    };

    let artifact = Artifact::for_platform(
        &config.download_url,
        &config.app_name,
        platform,
        config.unix_archive,
    );
    let archive_path = workdir.join(&artifact.file_name);

    output::say(&format!(
        "downloading {} {} {platform}",
        config.app_name, config.app_version
    ));
    output::say_verbose(&format!("  from {}", artifact.url));
    output::say_verbose(&format!("  to {}", archive_path.display()));

    downloader
        .fetch(&artifact.url, &archive_path)
        .with_context(|| download_failed(&config.app_name, &artifact.url))?;
    log::debug!("archive integrity is not verified (no checksum or signature available)");

    let unpacked = workdir.join("unpacked");
    archive::extract(&archive_path, artifact.format, &unpacked)?;

    let installed = install_step(request, &unpacked, platform)?;

    workdir.close();
    Ok(installed)
}

fn install_step(
    request: &InstallRequest<'_>,
    unpacked: &Path,
    platform: &Platform,
) -> Result<PathBuf> {
    let config = request.config;
    if !request.args.is_empty() {
        log::debug!("ignoring extra install arguments: {:?}", request.args);
    }

    output::say(&format!("installing to {}", request.install_dir.display()));

    let installed =
        install::install_binary(unpacked, &config.binary, platform, &request.install_dir)?;

    output::say(&format!(
        "  installed {} {} to {}",
        config.binary,
        config.app_version,
        installed.display()
    ));
    output::say("everything's installed!");

    if !output::is_quiet() && !is_directory_in_path(&request.install_dir) {
        output::warn(&format!(
            "{} is not on your PATH",
            request.install_dir.display()
        ));
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_failed_message() {
        let msg = download_failed("myapp", "https://example.com/myapp.tar.xz");
        assert!(msg.starts_with("failed to download https://example.com/myapp.tar.xz\n"));
        assert!(msg.contains("myapp's release process"));
        assert!(msg.contains("open an issue"));
    }
}
