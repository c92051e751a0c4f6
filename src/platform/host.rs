use crate::process::ignore;
use anyhow::Result;
use std::process::Command;

/// Raw facts about the host the detector needs
pub trait HostProbe {
    /// Kernel name as `uname -s` reports it
    fn kernel_name(&self) -> Result<String>;
    /// Machine hardware name as `uname -m` reports it
    fn machine_name(&self) -> Result<String>;
    /// Whether a Darwin host reporting i386 can run x86_64 code
    fn darwin_supports_x86_64(&self) -> bool;
    /// Version banner of the dynamic loader, if one could be read
    fn loader_banner(&self) -> Option<String>;
}

/// Probe the machine we're running on
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    #[cfg(unix)]
    fn kernel_name(&self) -> Result<String> {
        crate::process::ensure_stdout(Command::new("uname").arg("-s"))
    }

    #[cfg(not(unix))]
    fn kernel_name(&self) -> Result<String> {
        Ok("Windows_NT".to_string())
    }

    #[cfg(unix)]
    fn machine_name(&self) -> Result<String> {
        crate::process::ensure_stdout(Command::new("uname").arg("-m"))
    }

    #[cfg(not(unix))]
    fn machine_name(&self) -> Result<String> {
        Ok(std::env::consts::ARCH.to_string())
    }

    fn darwin_supports_x86_64(&self) -> bool {
        let Some(output) = ignore(Command::new("sysctl").arg("hw.optional.x86_64")) else {
            return false;
        };
        output.status.success() && sysctl_flag_is_set(&String::from_utf8_lossy(&output.stdout))
    }

    fn loader_banner(&self) -> Option<String> {
        // musl's ldd prints its banner to stderr and exits non-zero
        let output = ignore(Command::new("ldd").arg("--version"))?;
        let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
        banner.push_str(&String::from_utf8_lossy(&output.stderr));

        if banner.trim().is_empty() {
            None
        } else {
            Some(banner)
        }
    }
}

/// Parse `sysctl` output like `hw.optional.x86_64: 1`
pub fn sysctl_flag_is_set(output: &str) -> bool {
    output
        .lines()
        .next()
        .and_then(|line| line.rsplit(':').next())
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
