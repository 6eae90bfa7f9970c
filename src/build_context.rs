// ABOUTME: Build-context assembly: fetch the files an image build needs.
// ABOUTME: An optional files.lst manifest lists context members; default is Dockerfile only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};

/// Fetches declared resources into local files. Implemented by the
/// orchestration host; the test suite substitutes a directory-backed double.
pub trait ResourceLoader: Send + Sync {
    /// Fetch the resource at `path` into `destination` (or a temporary
    /// location when `None`) and return the local path of the fetched file.
    /// `io::ErrorKind::NotFound` means the resource does not exist.
    fn fetch(&self, path: &str, destination: Option<&Path>) -> io::Result<PathBuf>;
}

/// An assembled build context. The backing directory is removed on drop, so
/// the context must outlive the build call using it.
#[derive(Debug)]
pub struct BuildContext {
    dir: TempDir,
}

impl BuildContext {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Assemble a build context rooted at `base`.
///
/// A `files.lst` under `base` lists one relative filename per line; when it
/// is absent the context is a single `Dockerfile`. Every listed file is
/// fetched into a fresh temporary directory.
pub fn assemble(loader: &dyn ResourceLoader, base: &str) -> Result<BuildContext> {
    let dir = tempfile::tempdir()?;

    let manifest = join(base, "files.lst");
    let files = match loader.fetch(&manifest, None) {
        Ok(local) => read_manifest(&local)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => vec!["Dockerfile".to_string()],
        Err(source) => {
            return Err(Error::Resource {
                path: manifest,
                source,
            });
        }
    };

    for filename in &files {
        let remote = join(base, filename);
        let destination = dir.path().join(filename);
        loader
            .fetch(&remote, Some(&destination))
            .map_err(|source| Error::Resource {
                path: remote.clone(),
                source,
            })?;
    }
    debug!(base, count = files.len(), "assembled build context");

    Ok(BuildContext { dir })
}

fn read_manifest(local: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(local).map_err(|source| Error::Resource {
        path: local.display().to_string(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn join(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}
