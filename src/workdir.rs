use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory owned by a single install run.
///
/// Removed by [`WorkDir::close`] or on drop, whichever comes first. Removal
/// errors are never reported as failures.
#[derive(Debug)]
pub struct WorkDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl WorkDir {
    /// Create under the system temp directory
    pub fn create() -> Result<Self> {
        Self::create_in(std::env::temp_dir())
    }

    pub fn create_in(parent: impl AsRef<Path>) -> Result<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix("distinstall-")
            .tempdir_in(parent)
            .with_context(|| {
                format!("failed to create temporary directory in {}", parent.display())
            })?;
        let path = dir.path().to_path_buf();
        log::debug!("created work directory {}", path.display());

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the directory now, best effort
    pub fn close(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(dir) = self.dir.take()
            && let Err(e) = dir.close()
        {
            log::debug!(
                "ignoring failure to remove {}: {e}",
                self.path.display()
            );
        }
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        self.remove();
    }
}
