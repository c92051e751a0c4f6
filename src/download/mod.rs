//! Download backends.
//!
//! `curl` is preferred, `wget` is the fallback, and the in-process HTTP
//! client is only used when asked for explicitly.

pub mod curl;
pub mod http;
pub mod wget;

use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Fetches a URL into a local file
pub trait Downloader {
    fn name(&self) -> &'static str;

    /// Capability probe: can this backend be used on this host?
    fn is_available(&self) -> bool;

    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Which backend the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Auto,
    Curl,
    Wget,
    Native,
}

fn backend(kind: Backend) -> Option<Box<dyn Downloader>> {
    match kind {
        Backend::Auto => None,
        Backend::Curl => Some(Box::new(curl::Curl)),
        Backend::Wget => Some(Box::new(wget::Wget)),
        Backend::Native => Some(Box::new(http::Native)),
    }
}

/// Pick the first available backend from `candidates`
pub fn select_from(candidates: Vec<Box<dyn Downloader>>) -> Result<Box<dyn Downloader>> {
    let names: Vec<&str> = candidates.iter().map(|d| d.name()).collect();
    let quoted = names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(" or ");

    match candidates.into_iter().find(|d| d.is_available()) {
        Some(downloader) => {
            log::debug!("using {} to download", downloader.name());
            Ok(downloader)
        }
        None => bail!("need {quoted} (command not found)"),
    }
}

/// Resolve the backend to use for this run
pub fn select(kind: Backend) -> Result<Box<dyn Downloader>> {
    match backend(kind) {
        Some(explicit) => select_from(vec![explicit]),
        None => select_from(vec![Box::new(curl::Curl), Box::new(wget::Wget)]),
    }
}

/// Validate that a usable backend exists without downloading anything
pub fn check(kind: Backend) -> Result<()> {
    select(kind).map(|_| ())
}
