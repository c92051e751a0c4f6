/// Oldest glibc the `-gnu` builds are linked against
pub const MIN_GLIBC: (u32, u32) = (2, 17);

/// C library flavour of a Linux host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Libc {
    Gnu,
    Musl,
}

/// What the dynamic loader's version banner says about the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderKind {
    Musl,
    /// glibc with the version token found at the end of the first line
    Glibc(String),
}

/// Classify the first line of `ldd --version` output.
///
/// Any mention of musl wins over version numbers on the same line.
pub fn classify_banner(banner: &str) -> LoaderKind {
    let first_line = banner.lines().next().unwrap_or("");

    if first_line.to_lowercase().contains("musl") {
        return LoaderKind::Musl;
    }

    let version = first_line.split_whitespace().last().unwrap_or("");
    LoaderKind::Glibc(version.to_string())
}

/// Leading decimal digits of a version component ("35-0ubuntu" -> 35)
fn leading_number(part: &str) -> Option<u32> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// True when a glibc version string like "2.31" is at least [`MIN_GLIBC`]
pub fn version_is_supported(version: &str) -> bool {
    let mut parts = version.split('.');
    let major = parts.next().and_then(leading_number);
    let minor = parts.next().and_then(leading_number);

    match (major, minor) {
        (Some(major), _) if major > MIN_GLIBC.0 => true,
        (Some(major), Some(minor)) if major == MIN_GLIBC.0 => minor >= MIN_GLIBC.1,
        _ => false,
    }
}

/// Pick the libc flavour for a Linux host from its loader banner.
///
/// No banner (no `ldd` on the host) means we can't prove glibc is there.
pub fn linux_libc(banner: Option<&str>) -> Libc {
    match banner.map(classify_banner) {
        Some(LoaderKind::Glibc(version)) if version_is_supported(&version) => {
            log::debug!("glibc {version} detected");
            Libc::Gnu
        }
        Some(LoaderKind::Glibc(version)) => {
            log::debug!("glibc {version} is older than 2.17, using musl build");
            Libc::Musl
        }
        Some(LoaderKind::Musl) => Libc::Musl,
        None => {
            log::debug!("no loader banner available, using musl build");
            Libc::Musl
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_threshold() {
        assert!(version_is_supported("2.31"));
        assert!(version_is_supported("2.17"));
        assert!(!version_is_supported("2.16"));
        assert!(!version_is_supported("2.9"));
    }

    #[test]
    fn test_version_newer_major() {
        assert!(version_is_supported("3.0"));
        assert!(version_is_supported("3"));
    }

    #[test]
    fn test_version_garbage() {
        assert!(!version_is_supported(""));
        assert!(!version_is_supported("2"));
        assert!(!version_is_supported("abc"));
        assert!(!version_is_supported("1.99"));
    }

    #[test]
    fn test_version_with_suffix() {
        assert!(version_is_supported("2.35-0ubuntu3"));
    }

    #[test]
    fn test_classify_glibc_banner() {
        let banner = "ldd (Ubuntu GLIBC 2.35-0ubuntu3.1) 2.35\n\
                      Copyright (C) 2022 Free Software Foundation, Inc.";
        assert_eq!(classify_banner(banner), LoaderKind::Glibc("2.35".to_string()));
    }

    #[test]
    fn test_classify_musl_any_case() {
        assert_eq!(classify_banner("musl libc (x86_64)\nVersion 1.2.4"), LoaderKind::Musl);
        assert_eq!(classify_banner("MUSL libc 2.99"), LoaderKind::Musl);
        assert_eq!(classify_banner("ldd (Musl) 2.31"), LoaderKind::Musl);
    }

    #[test]
    fn test_classify_only_reads_first_line() {
        let banner = "ldd (GNU libc) 2.28\nnot musl at all";
        assert_eq!(classify_banner(banner), LoaderKind::Glibc("2.28".to_string()));
    }

    #[test]
    fn test_linux_libc() {
        assert_eq!(linux_libc(Some("ldd (GNU libc) 2.31")), Libc::Gnu);
        assert_eq!(linux_libc(Some("ldd (GNU libc) 2.12")), Libc::Musl);
        assert_eq!(linux_libc(Some("musl libc (aarch64) 2.31")), Libc::Musl);
        assert_eq!(linux_libc(None), Libc::Musl);
    }
}
