use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::CardResult;

/// On-disk cache shared by every card of a build.
///
/// Layout: `images/` (downloads), `svg/` (rasterized SVGs), `fonts/` (font
/// metadata and files). The whole tree is disposable.
#[derive(Clone, Debug)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    /// Cache rooted at `root`. Directories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Downloaded images.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// SVG rasterizations keyed by content hash and size.
    pub fn svg_dir(&self) -> PathBuf {
        self.root.join("svg")
    }

    /// Font metadata (`<family>.json`) and font files.
    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join("fonts")
    }

    /// Write `bytes` to `path` via a temp file in the same directory and a rename,
    /// so concurrent readers never observe a partial entry.
    pub fn write_atomic(&self, path: &Path, bytes: &[u8]) -> CardResult<()> {
        write_atomic(path, bytes)?;
        Ok(())
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create cache directory '{}'", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in '{}'", dir.display()))?;
    tmp.write_all(bytes).context("write cache entry")?;
    tmp.persist(path)
        .with_context(|| format!("persist cache entry '{}'", path.display()))?;
    Ok(())
}
