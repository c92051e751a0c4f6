use super::Downloader;
use crate::process::{check_cmd, ensure};
use anyhow::Result;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Default, Clone, Copy)]
pub struct Wget;

impl Wget {
    pub fn command(url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new("wget");
        cmd.arg(url).arg("-O").arg(dest);
        cmd
    }
}

impl Downloader for Wget {
    fn name(&self) -> &'static str {
        "wget"
    }

    fn is_available(&self) -> bool {
        check_cmd("wget")
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        ensure(&mut Self::command(url, dest))?;
        Ok(())
    }
}
