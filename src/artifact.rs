use crate::archive::ArchiveFormat;
use crate::platform::Platform;

/// A release archive for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `<name>-<platform><ext>`
    pub file_name: String,
    pub url: String,
    pub format: ArchiveFormat,
}

/// Archive format for a platform identifier: Windows builds ship as zip
pub fn format_for(triple: &str, unix_archive: ArchiveFormat) -> ArchiveFormat {
    if triple.contains("windows") {
        ArchiveFormat::Zip
    } else {
        unix_archive
    }
}

/// Compose `<base_url>/<name>-<triple><ext>`. The base is used as given.
pub fn build(base_url: &str, name: &str, triple: &str, unix_archive: ArchiveFormat) -> Artifact {
    let format = format_for(triple, unix_archive);
    let file_name = format!("{name}-{triple}{}", format.extension());
    let url = format!("{base_url}/{file_name}");

    Artifact {
        file_name,
        url,
        format,
    }
}

impl Artifact {
    pub fn for_platform(
        base_url: &str,
        name: &str,
        platform: &Platform,
        unix_archive: ArchiveFormat,
    ) -> Self {
        build(base_url, name, &platform.triple(), unix_archive)
    }
}
