use super::Downloader;
use crate::process::{check_cmd, ensure};
use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// `curl -sSfL`: silent, fail on HTTP errors, follow redirects
#[derive(Debug, Default, Clone, Copy)]
pub struct Curl;

impl Curl {
    pub fn command(url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new("curl");
        cmd.arg("-sSfL").arg(url).arg("-o").arg(dest);
        cmd
    }
}

impl Downloader for Curl {
    fn name(&self) -> &'static str {
        "curl"
    }

    fn is_available(&self) -> bool {
        check_cmd("curl")
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        ensure(&mut Self::command(url, dest))?;
        Ok(())
    }
}
