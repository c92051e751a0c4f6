use super::Downloader;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// In-process HTTP client, no external tools required
#[derive(Debug, Default, Clone, Copy)]
pub struct Native;

impl Downloader for Native {
    fn name(&self) -> &'static str {
        "native"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        download_http_file(url, dest)
    }
}

/// Path the body is streamed into before being renamed over `path`
pub fn partial_path(path: &Path) -> std::path::PathBuf {
    path.with_extension(format!(
        "{}.part",
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("download")
    ))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Download file via HTTP/HTTPS
fn download_http_file(url: &str, path: &Path) -> Result<()> {
    let response = ureq::get(url)
        .set("User-Agent", concat!("distinstall/", env!("CARGO_PKG_VERSION")))
        .call()
        .with_context(|| format!("Failed to download: {url}"))?;

    if !is_success(response.status()) {
        return Err(anyhow::anyhow!(
            "Download failed with status: {}",
            response.status()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = partial_path(path);

    let mut temp_file = fs::File::create(&temp_path)
        .with_context(|| format!("Failed to create temporary file: {}", temp_path.display()))?;

    std::io::copy(&mut response.into_reader(), &mut temp_file).with_context(|| {
        let _ = fs::remove_file(&temp_path);
        format!("Failed to write to temporary file: {}", temp_path.display())
    })?;

    temp_file.sync_all().with_context(|| {
        let _ = fs::remove_file(&temp_path);
        format!("Failed to sync temporary file: {}", temp_path.display())
    })?;

    let file_size = temp_file.metadata()?.len();
    drop(temp_file);

    fs::rename(&temp_path, path).with_context(|| {
        let _ = fs::remove_file(&temp_path);
        format!(
            "Failed to move temporary file to final location: {} -> {}",
            temp_path.display(),
            path.display()
        )
    })?;

    log::debug!("downloaded {} ({file_size} bytes)", path.display());
    Ok(())
}
