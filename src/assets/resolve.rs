use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::assets::cache::AssetCache;
use crate::assets::fetch::AssetFetcher;

/// Locates image and icon files referenced by layouts.
///
/// Lookup order for a reference:
/// 1. absolute URL: downloaded once into `<cache>/images/`;
/// 2. a reference without suffix is taken to be `.svg`;
/// 3. relative to the document directory;
/// 4. as given (absolute or process-relative);
/// 5. each search path (document-relative when not absolute);
/// 6. the bundled icon directory.
#[derive(Clone)]
pub struct ImageResolver {
    cache: AssetCache,
    fetcher: Arc<dyn AssetFetcher>,
    search_paths: Vec<PathBuf>,
    icons_dir: Option<PathBuf>,
}

impl ImageResolver {
    pub fn new(cache: AssetCache, fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            search_paths: Vec::new(),
            icons_dir: None,
        }
    }

    /// Extra directories searched after the document directory.
    pub fn with_search_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.search_paths = paths.into_iter().collect();
        self
    }

    /// Directory of bundled icons, searched last.
    pub fn with_icons_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icons_dir = Some(dir.into());
        self
    }

    /// Resolve `reference` to an existing file, or `None` if the layer should be omitted.
    pub fn resolve_image(&self, reference: &str, doc_dir: &Path) -> Option<PathBuf> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if reference.contains("://") {
            return self.fetch_url(reference);
        }

        let mut name = PathBuf::from(reference);
        if name.extension().is_none() {
            name.set_extension("svg");
        }

        if !name.is_absolute() {
            let rel = doc_dir.join(&name);
            if rel.is_file() {
                return Some(rel);
            }
        }
        if name.is_file() {
            return Some(name);
        }
        for loc in self.search_paths.iter().chain(self.icons_dir.as_ref()) {
            let candidate = loc.join(&name);
            let candidate = if candidate.is_absolute() {
                candidate
            } else {
                doc_dir.join(candidate)
            };
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        warn!(reference, "image not found in any search location; layer omitted");
        None
    }

    fn fetch_url(&self, reference: &str) -> Option<PathBuf> {
        let file_name = match url_cache_name(reference) {
            Some(n) => n,
            None => {
                warn!(reference, "malformed image URL; layer omitted");
                return None;
            }
        };
        let path = self.cache.images_dir().join(file_name);
        if path.is_file() {
            debug!(reference, path = %path.display(), "image cache hit");
            return Some(path);
        }

        let resp = match self.fetcher.fetch(reference) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(reference, error = %e, "image download failed; layer omitted");
                return None;
            }
        };
        if !resp.is_ok() {
            warn!(reference, status = resp.status, "image unavailable; layer omitted");
            return None;
        }
        if let Err(e) = self.cache.write_atomic(&path, &resp.bytes) {
            warn!(reference, error = %e, "failed to cache downloaded image");
            return None;
        }
        debug!(reference, path = %path.display(), "image downloaded");
        Some(path)
    }
}

/// Cache file name for a URL: its percent-encoded path, `.png` appended when it has no suffix.
pub(crate) fn url_cache_name(reference: &str) -> Option<String> {
    let url = url::Url::parse(reference).ok()?;
    let mut name = urlencoding::encode(url.path()).into_owned();
    if Path::new(&name).extension().is_none() {
        name.push_str(".png");
    }
    Some(name)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
