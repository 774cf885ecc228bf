use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::assets::cache::AssetCache;
use crate::assets::fetch::AssetFetcher;
use crate::assets::fonts::{FontManager, FontSource};
use crate::assets::resolve::ImageResolver;
use crate::foundation::core::Rgba8;
use crate::foundation::error::CardResult;
use crate::render::{Canvas, RenderEnv, render_layout};
use crate::scene::layout::{FontSpec, Layout};
use crate::session::config::CardsConfig;

/// The documentation page a card is generated for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageContext {
    /// Page identity, e.g. `guide/install`.
    pub docname: String,
    pub title: Option<String>,
    /// Per-page metadata fields.
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Base directory for relative image references.
    pub doc_dir: PathBuf,
}

impl PageContext {
    pub fn new(docname: impl Into<String>, doc_dir: impl Into<PathBuf>) -> Self {
        Self {
            docname: docname.into(),
            doc_dir: doc_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// `summary_<docname>.png`, with path separators flattened to `_`.
    pub fn card_file_name(&self) -> String {
        format!("summary_{}.png", self.docname.replace(['/', '\\'], "_"))
    }
}

/// One card of a batch.
#[derive(Clone, Debug)]
pub struct CardJob {
    pub layout: Layout,
    pub page: PageContext,
}

/// Everything a build needs to render cards: config, cache, resolver and fonts.
///
/// Built once per build run and shared (it is `Sync`) by all card renders.
pub struct CardsContext {
    config: CardsConfig,
    cache: AssetCache,
    resolver: ImageResolver,
    fonts: Arc<dyn FontSource>,
    default_font: FontSpec,
    debug_outline: Option<Rgba8>,
}

impl CardsContext {
    /// Context with the default fetcher: HTTP with the `http` feature, offline otherwise.
    pub fn new(config: CardsConfig) -> CardResult<Self> {
        #[cfg(feature = "http")]
        let fetcher: Arc<dyn AssetFetcher> = Arc::new(crate::assets::fetch::HttpFetcher::new()?);
        #[cfg(not(feature = "http"))]
        let fetcher: Arc<dyn AssetFetcher> = Arc::new(crate::assets::fetch::OfflineFetcher);
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: CardsConfig, fetcher: Arc<dyn AssetFetcher>) -> CardResult<Self> {
        let debug_outline = config.debug_outline()?;
        let cache = AssetCache::new(&config.cache_dir);
        let mut resolver = ImageResolver::new(cache.clone(), fetcher.clone())
            .with_search_paths(config.image_paths.iter().cloned());
        if let Some(icons) = &config.icons_dir {
            resolver = resolver.with_icons_dir(icons);
        }
        let fonts = Arc::new(FontManager::new(cache.clone(), fetcher));
        Ok(Self {
            default_font: config.default_font_spec(),
            config,
            cache,
            resolver,
            fonts,
            debug_outline,
        })
    }

    /// Replace the font source (e.g. with local font files).
    pub fn with_font_source(mut self, fonts: Arc<dyn FontSource>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn config(&self) -> &CardsConfig {
        &self.config
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    /// Where the card for `page` is written.
    pub fn card_path(&self, page: &PageContext) -> PathBuf {
        self.config.output_dir.join(page.card_file_name())
    }

    fn env<'a>(&'a self, doc_dir: &'a Path) -> RenderEnv<'a> {
        RenderEnv {
            cache: &self.cache,
            resolver: &self.resolver,
            fonts: self.fonts.as_ref(),
            doc_dir,
            default_font: &self.default_font,
            debug_outline: self.debug_outline,
        }
    }

    /// Render one card in memory.
    #[tracing::instrument(skip_all, fields(docname = %page.docname))]
    pub fn render_card(&self, layout: &Layout, page: &PageContext) -> CardResult<Canvas> {
        render_layout(layout, &self.env(&page.doc_dir))
    }

    /// Render one card and write it to `path`.
    pub fn render_card_to(&self, layout: &Layout, page: &PageContext, path: &Path) -> CardResult<()> {
        let canvas = self.render_card(layout, page)?;
        canvas.save_png(path)?;
        info!(docname = %page.docname, path = %path.display(), "social card written");
        Ok(())
    }

    /// Render one card to its output path ([`CardsContext::card_path`]).
    pub fn write_card(&self, layout: &Layout, page: &PageContext) -> CardResult<PathBuf> {
        let path = self.card_path(page);
        self.render_card_to(layout, page, &path)?;
        Ok(path)
    }

    /// Render many cards in parallel. A failing card never affects the others.
    ///
    /// Results are in job order.
    pub fn render_batch(&self, jobs: &[CardJob]) -> Vec<CardResult<PathBuf>> {
        jobs.par_iter()
            .map(|job| {
                let res = self.write_card(&job.layout, &job.page);
                if let Err(e) = &res {
                    warn!(docname = %job.page.docname, error = %e, "social card failed");
                }
                res
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/context.rs"]
mod tests;
