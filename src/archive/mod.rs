pub mod tar;
pub mod zip;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Archive formats release artifacts are published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ArchiveFormat {
    #[default]
    #[serde(rename = ".tar.xz", alias = "tar.xz")]
    TarXz,
    #[serde(rename = ".tar.gz", alias = "tar.gz", alias = ".tgz", alias = "tgz")]
    TarGz,
    #[serde(rename = ".tar.zst", alias = "tar.zst")]
    TarZstd,
    #[serde(rename = ".zip", alias = "zip")]
    Zip,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::TarXz => ".tar.xz",
            ArchiveFormat::TarGz => ".tar.gz",
            ArchiveFormat::TarZstd => ".tar.zst",
            ArchiveFormat::Zip => ".zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArchiveFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches('.') {
            "tar.xz" => Ok(ArchiveFormat::TarXz),
            "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
            "tar.zst" => Ok(ArchiveFormat::TarZstd),
            "zip" => Ok(ArchiveFormat::Zip),
            other => bail!("unsupported archive format: {other}"),
        }
    }
}

/// Extract an archive into `dest`, dropping the single top-level directory
/// every release archive wraps its contents in.
pub fn extract(archive: &Path, format: ArchiveFormat, dest: &Path) -> Result<Vec<PathBuf>> {
    log::debug!("extracting {} into {}", archive.display(), dest.display());

    let extracted = match format {
        ArchiveFormat::TarXz => tar::extract_tar_xz(archive, dest),
        ArchiveFormat::TarGz => tar::extract_tar_gz(archive, dest),
        ArchiveFormat::TarZstd => tar::extract_tar_zst(archive, dest),
        ArchiveFormat::Zip => zip::extract_zip(archive, dest),
    }
    .with_context(|| format!("failed to extract {}", archive.display()))?;

    log::debug!("extracted {} entries", extracted.len());
    Ok(extracted)
}

/// Drop the first path component of an archive entry.
///
/// Returns `None` for the top-level directory itself. Entries that would
/// land outside the extraction directory are an error.
pub fn strip_first_component(path: &Path) -> Result<Option<PathBuf>> {
    let mut parts = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            _ => bail!("archive entry escapes extraction directory: {}", path.display()),
        }
    }

    if parts.len() < 2 {
        return Ok(None);
    }
    Ok(Some(parts[1..].iter().copied().collect()))
}
