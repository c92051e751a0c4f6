//! Host platform detection.
//!
//! Maps the raw kernel and machine names a host reports onto one of the
//! target identifiers release archives are published for.

pub mod glibc;
pub mod host;

pub use glibc::Libc;
pub use host::{HostProbe, SystemProbe};

use std::fmt;
use thiserror::Error;

/// Why a host could not be mapped to a supported platform
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("unsupported OS type: {0}")]
    UnsupportedOs(String),
    #[error("unsupported CPU type: {0}")]
    UnsupportedCpu(String),
    #[error("failed to query host: {0}")]
    Probe(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cpu {
    X86_64,
    Aarch64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux(Libc),
    Darwin,
    Windows,
}

/// A supported (cpu, os) pair, e.g. `x86_64-unknown-linux-gnu`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub cpu: Cpu,
    pub os: Os,
}

impl Cpu {
    pub fn as_str(self) -> &'static str {
        match self {
            Cpu::X86_64 => "x86_64",
            Cpu::Aarch64 => "aarch64",
        }
    }

    /// Accept only the two architecture names we publish builds for
    pub fn parse(raw: &str) -> Result<Self, DetectError> {
        match raw {
            "x86_64" => Ok(Cpu::X86_64),
            "aarch64" => Ok(Cpu::Aarch64),
            other => Err(DetectError::UnsupportedCpu(other.to_string())),
        }
    }
}

/// Kernel families before libc selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Linux,
    Darwin,
    Windows,
}

impl Kernel {
    pub fn parse(raw: &str) -> Result<Self, DetectError> {
        match raw {
            "Linux" => Ok(Kernel::Linux),
            "Darwin" => Ok(Kernel::Darwin),
            "Windows_NT" => Ok(Kernel::Windows),
            s if s.starts_with("MINGW") || s.starts_with("MSYS") || s.starts_with("CYGWIN") => {
                Ok(Kernel::Windows)
            }
            other => Err(DetectError::UnsupportedOs(other.to_string())),
        }
    }
}

impl Os {
    /// Vendor/os/abi suffix of the target identifier
    pub fn suffix(self) -> &'static str {
        match self {
            Os::Linux(Libc::Gnu) => "unknown-linux-gnu",
            Os::Linux(Libc::Musl) => "unknown-linux-musl",
            Os::Darwin => "apple-darwin",
            Os::Windows => "pc-windows-msvc",
        }
    }
}

impl Platform {
    pub fn new(cpu: Cpu, os: Os) -> Self {
        Self { cpu, os }
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// The full identifier string
    pub fn triple(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.cpu.as_str(), self.os.suffix())
    }
}

/// Apply the Darwin naming fixes to a raw machine name.
///
/// Darwin may report `i386` on 64-bit capable hardware, and calls aarch64
/// `arm64`.
pub fn normalize_machine(kernel: Kernel, machine: &str, probe: &dyn HostProbe) -> String {
    match (kernel, machine) {
        (Kernel::Darwin, "i386") if probe.darwin_supports_x86_64() => "x86_64".to_string(),
        (Kernel::Darwin, "arm64") => "aarch64".to_string(),
        (_, other) => other.to_string(),
    }
}

/// Work out which platform the probed host is
pub fn detect(probe: &dyn HostProbe) -> Result<Platform, DetectError> {
    let raw_kernel = probe
        .kernel_name()
        .map_err(|e| DetectError::Probe(format!("{e:#}")))?;
    let raw_machine = probe
        .machine_name()
        .map_err(|e| DetectError::Probe(format!("{e:#}")))?;
    log::debug!("host reports kernel={raw_kernel} machine={raw_machine}");

    let kernel = Kernel::parse(&raw_kernel)?;
    let machine = normalize_machine(kernel, &raw_machine, probe);

    let os = match kernel {
        Kernel::Linux => Os::Linux(glibc::linux_libc(probe.loader_banner().as_deref())),
        Kernel::Darwin => Os::Darwin,
        Kernel::Windows => Os::Windows,
    };
    let cpu = Cpu::parse(&machine)?;

    Ok(Platform::new(cpu, os))
}
