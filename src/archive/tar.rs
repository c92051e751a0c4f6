use super::strip_first_component;
use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, Entry};
use xz2::read::XzDecoder;

/// Extract TAR.XZ archive, returns list of extracted file paths
pub fn extract_tar_xz(tar_path: &Path, extract_to: &Path) -> Result<Vec<PathBuf>> {
    let file = fs::File::open(tar_path)
        .with_context(|| format!("Failed to open tar.xz file: {}", tar_path.display()))?;

    extract_tar_from_reader(XzDecoder::new(file), extract_to, "tar.xz")
}

/// Extract TAR.GZ archive, returns list of extracted file paths
pub fn extract_tar_gz(tar_path: &Path, extract_to: &Path) -> Result<Vec<PathBuf>> {
    let file = fs::File::open(tar_path)
        .with_context(|| format!("Failed to open tar.gz file: {}", tar_path.display()))?;

    extract_tar_from_reader(GzDecoder::new(file), extract_to, "tar.gz")
}

/// Extract TAR.ZST archive (Zstandard compression), returns list of extracted file paths
pub fn extract_tar_zst(tar_path: &Path, extract_to: &Path) -> Result<Vec<PathBuf>> {
    let file = fs::File::open(tar_path)
        .with_context(|| format!("Failed to open tar.zst file: {}", tar_path.display()))?;

    let decoder = zstd::Decoder::new(file)
        .with_context(|| format!("Failed to create zstd decoder for: {}", tar_path.display()))?;
    extract_tar_from_reader(decoder, extract_to, "tar.zst")
}

/// Extract TAR archive from a generic reader with the top-level directory stripped.
///
/// Every entry must land under `extract_to` after symlinks on its way are
/// resolved, and links may only point inside it.
fn extract_tar_from_reader<R: Read>(
    reader: R,
    extract_to: &Path,
    archive_type: &str,
) -> Result<Vec<PathBuf>> {
    let mut archive = Archive::new(reader);

    fs::create_dir_all(extract_to).with_context(|| {
        format!(
            "Failed to create extraction directory: {}",
            extract_to.display()
        )
    })?;
    let root = extract_to.canonicalize().with_context(|| {
        format!(
            "Failed to resolve extraction directory: {}",
            extract_to.display()
        )
    })?;

    let mut extracted_files = Vec::new();

    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read {archive_type} entries"))?
    {
        let mut entry = entry.with_context(|| format!("Failed to access {archive_type} entry"))?;

        let path = entry
            .path()
            .with_context(|| "Failed to get entry path")?
            .into_owned();

        let Some(relative) = strip_first_component(&path)? else {
            continue;
        };
        let outpath = root.join(&relative);

        let parent = outpath.parent().unwrap_or(&root);
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create parent directory: {}", parent.display())
        })?;
        let real_parent = parent
            .canonicalize()
            .with_context(|| format!("Failed to resolve directory: {}", parent.display()))?;
        if !real_parent.starts_with(&root) {
            bail!("archive entry escapes extraction directory: {}", path.display());
        }

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir()
            && fs::symlink_metadata(&outpath).is_ok_and(|meta| meta.file_type().is_symlink())
        {
            bail!("archive entry escapes extraction directory: {}", path.display());
        }
        if entry_type.is_hard_link() {
            let target = link_target(&entry, &path)?;
            let Some(target) = strip_first_component(&target)? else {
                bail!("hard link points outside the archive: {}", path.display());
            };
            let source = root.join(target);
            fs::hard_link(&source, &outpath).with_context(|| {
                format!(
                    "Failed to link {} to {}",
                    outpath.display(),
                    source.display()
                )
            })?;
            continue;
        }
        if entry_type.is_symlink() {
            let target = link_target(&entry, &path)?;
            if !stays_inside(&root, &real_parent, &target) {
                bail!(
                    "symlink escapes extraction directory: {} -> {}",
                    path.display(),
                    target.display()
                );
            }
        }

        entry
            .unpack(&outpath)
            .with_context(|| format!("Failed to extract file: {}", outpath.display()))?;

        if entry_type.is_file() {
            extracted_files.push(extract_to.join(relative));
        }
    }

    Ok(extracted_files)
}

fn link_target<R: Read>(entry: &Entry<'_, R>, path: &Path) -> Result<PathBuf> {
    entry
        .link_name()
        .with_context(|| format!("Failed to read link target of {}", path.display()))?
        .map(|target| target.into_owned())
        .with_context(|| format!("link without a target: {}", path.display()))
}

/// Whether `target`, taken relative to `base`, resolves to somewhere under `root`
fn stays_inside(root: &Path, base: &Path, target: &Path) -> bool {
    let mut resolved = base.to_path_buf();
    for component in target.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return false;
                }
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    resolved.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = ::tar::Builder::new(Vec::new());
        for (path, data) in entries {
            let mut header = ::tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap()
    }

    fn write_tar_xz(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut encoder = xz2::write::XzEncoder::new(file, 6);
        encoder.write_all(&tar_bytes(entries)).unwrap();
        encoder.finish().unwrap();
    }

    #[test]
    fn test_extract_tar_xz_strips_top_level() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("myapp-x86_64-unknown-linux-gnu.tar.xz");
        write_tar_xz(
            &archive,
            &[
                ("myapp-x86_64-unknown-linux-gnu/myapp", b"#!/bin/sh\necho hi\n"),
                ("myapp-x86_64-unknown-linux-gnu/README.md", b"readme"),
            ],
        );

        let dest = temp.path().join("out");
        let files = extract_tar_xz(&archive, &dest).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(fs::read(dest.join("myapp")).unwrap(), b"#!/bin/sh\necho hi\n");
        assert!(dest.join("README.md").exists());
        assert!(!dest.join("myapp-x86_64-unknown-linux-gnu").exists());
    }

    #[test]
    fn test_extract_tar_gz_nested() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("app.tar.gz");
        let file = fs::File::create(&archive).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder
            .write_all(&tar_bytes(&[("top/share/doc.txt", b"doc")]))
            .unwrap();
        encoder.finish().unwrap();

        let dest = temp.path().join("out");
        extract_tar_gz(&archive, &dest).unwrap();
        assert_eq!(fs::read(dest.join("share/doc.txt")).unwrap(), b"doc");
    }

    #[test]
    fn test_extract_tar_zst() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("app.tar.zst");
        let compressed = zstd::encode_all(&tar_bytes(&[("top/app", b"bin")])[..], 3).unwrap();
        fs::write(&archive, compressed).unwrap();

        let dest = temp.path().join("out");
        extract_tar_zst(&archive, &dest).unwrap();
        assert_eq!(fs::read(dest.join("app")).unwrap(), b"bin");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("app.tar.xz");
        write_tar_xz(&archive, &[("top/app", b"bin")]);

        let dest = temp.path().join("out");
        extract_tar_xz(&archive, &dest).unwrap();
        let mode = fs::metadata(dest.join("app")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    enum Fixture<'a> {
        File(&'a str, &'a [u8]),
        Link(&'a str, &'a Path, ::tar::EntryType),
    }

    fn write_tar_xz_with_links(path: &Path, entries: &[Fixture<'_>]) {
        let mut builder = ::tar::Builder::new(Vec::new());
        for fixture in entries {
            let mut header = ::tar::Header::new_gnu();
            header.set_mode(0o755);
            match fixture {
                Fixture::File(name, data) => {
                    header.set_size(data.len() as u64);
                    header.set_cksum();
                    builder.append_data(&mut header, name, *data).unwrap();
                }
                Fixture::Link(name, target, kind) => {
                    header.set_entry_type(*kind);
                    header.set_size(0);
                    builder.append_link(&mut header, name, target).unwrap();
                }
            }
        }
        let file = fs::File::create(path).unwrap();
        let mut encoder = xz2::write::XzEncoder::new(file, 6);
        encoder.write_all(&builder.into_inner().unwrap()).unwrap();
        encoder.finish().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_rejects_write_through_symlink() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir_all(&outside).unwrap();

        let archive = temp.path().join("evil.tar.xz");
        write_tar_xz_with_links(
            &archive,
            &[
                Fixture::Link("top/link", &outside, ::tar::EntryType::Symlink),
                Fixture::File("top/link/evil", b"pwned"),
            ],
        );

        let dest = temp.path().join("out");
        assert!(crate::archive::extract(&archive, crate::archive::ArchiveFormat::TarXz, &dest).is_err());
        assert!(!outside.join("evil").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_rejects_symlink_chain_out_of_dest() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("chain.tar.xz");
        write_tar_xz_with_links(
            &archive,
            &[
                Fixture::Link("top/x/y", Path::new(".."), ::tar::EntryType::Symlink),
                Fixture::Link("top/x/y/z", Path::new(".."), ::tar::EntryType::Symlink),
                Fixture::File("top/x/y/z/evil", b"pwned"),
            ],
        );

        let dest = temp.path().join("out");
        assert!(extract_tar_xz(&archive, &dest).is_err());
        assert!(!temp.path().join("evil").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_keeps_links_inside_dest() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("links.tar.xz");
        write_tar_xz_with_links(
            &archive,
            &[
                Fixture::File("top/lib/app", b"bin"),
                Fixture::Link("top/bin/app", Path::new("../lib/app"), ::tar::EntryType::Symlink),
                Fixture::Link("top/app-copy", Path::new("top/lib/app"), ::tar::EntryType::Link),
            ],
        );

        let dest = temp.path().join("out");
        let files = extract_tar_xz(&archive, &dest).unwrap();

        assert_eq!(files, vec![dest.join("lib/app")]);
        assert_eq!(fs::read(dest.join("bin/app")).unwrap(), b"bin");
        assert_eq!(fs::read(dest.join("app-copy")).unwrap(), b"bin");
    }

    #[test]
    fn test_extract_corrupt_archive_fails() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.tar.xz");
        fs::write(&archive, b"this is not xz data").unwrap();

        assert!(extract_tar_xz(&archive, &temp.path().join("out")).is_err());
    }

    #[test]
    fn test_extract_missing_archive_fails() {
        let temp = TempDir::new().unwrap();
        let err = extract_tar_xz(&temp.path().join("nope.tar.xz"), temp.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open tar.xz file"));
    }
}
