use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assets::cache::AssetCache;
use crate::assets::fetch::AssetFetcher;
use crate::foundation::error::{CardError, CardResult};
use crate::scene::layout::FontSpec;

/// Default fontsource-compatible metadata API.
pub const FONTSOURCE_API: &str = "https://api.fontsource.org/v1/fonts";

/// Supplies outline font files for typography layers.
pub trait FontSource: Send + Sync {
    /// Return `font` with `path` set to a usable font file. `weight` and `subset`
    /// may be adjusted to what the family actually provides.
    fn resolve(&self, font: &FontSpec) -> CardResult<FontSpec>;
}

/// Closest supported weight to `requested`; ties go to the earlier candidate.
///
/// `supported` is expected in declared (ascending) order. Returns `None` when empty.
pub fn snap_weight(requested: u16, supported: &[u16]) -> Option<u16> {
    let mut best: Option<(u16, u16)> = None;
    for &w in supported {
        let diff = w.abs_diff(requested);
        match best {
            Some((_, d)) if d <= diff => {}
            _ => best = Some((w, diff)),
        }
    }
    best.map(|(w, _)| w)
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct FontVariantUrls {
    #[serde(default)]
    url: BTreeMap<String, String>,
}

type Variants = BTreeMap<String, BTreeMap<String, BTreeMap<String, FontVariantUrls>>>;

/// Subset of the fontsource family metadata this crate reads.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct FontInfo {
    id: String,
    family: String,
    #[serde(default)]
    subsets: Vec<String>,
    #[serde(default)]
    weights: Vec<u16>,
    #[serde(default)]
    styles: Vec<String>,
    #[serde(default, rename = "defSubset")]
    def_subset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variants: Option<Variants>,
}

/// Font provider backed by a fontsource-style API. System fonts are used only when
/// the family metadata cannot be fetched.
///
/// Metadata is cached as `<fonts>/<family>.json` and font files as
/// `<fonts>/<family> <style> (<subset> <weight>).ttf`.
pub struct FontManager {
    cache: AssetCache,
    fetcher: Arc<dyn AssetFetcher>,
    api_base: String,
    system: OnceLock<usvg::fontdb::Database>,
}

impl FontManager {
    pub fn new(cache: AssetCache, fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            api_base: FONTSOURCE_API.to_owned(),
            system: OnceLock::new(),
        }
    }

    /// Use another metadata endpoint (no trailing slash).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn info_path(&self, family: &str) -> PathBuf {
        self.cache.fonts_dir().join(format!("{family}.json"))
    }

    fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> CardResult<T> {
        let resp = self.fetcher.fetch(url)?;
        if !resp.is_ok() {
            return Err(CardError::resource(format!(
                "font metadata request {url} returned status {}",
                resp.status
            )));
        }
        serde_json::from_slice(&resp.bytes)
            .map_err(|e| CardError::resource(format!("malformed font metadata from {url}: {e}")))
    }

    fn store_info(&self, family: &str, info: &FontInfo) -> CardResult<()> {
        let json = serde_json::to_vec_pretty(info).map_err(|e| CardError::serde(e.to_string()))?;
        self.cache.write_atomic(&self.info_path(family), &json)
    }

    fn font_info(&self, family: &str) -> CardResult<FontInfo> {
        let path = self.info_path(family);
        if path.is_file() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read font metadata '{}'", path.display()))?;
            return serde_json::from_str(&text).map_err(|e| CardError::serde(e.to_string()));
        }

        let url = format!("{}?family={}", self.api_base, urlencoding::encode(family));
        info!(family, %url, "polling font info");
        let mut found: Vec<FontInfo> = self.fetch_json(&url)?;
        if found.is_empty() {
            return Err(CardError::resource(format!("no font family named \"{family}\"")));
        }
        if found.len() > 1 {
            debug!(family, count = found.len(), "several families matched; using the first");
        }
        let info = found.swap_remove(0);
        self.store_info(family, &info)?;
        Ok(info)
    }

    fn resolve_remote(&self, font: &FontSpec, mut info: FontInfo) -> CardResult<FontSpec> {
        let family = font.family.as_str();
        if !info.styles.iter().any(|s| s == &font.style) {
            return Err(CardError::resource(format!(
                "{family} font family has no {} style; only: {:?}",
                font.style, info.styles
            )));
        }
        let subset = match &font.subset {
            Some(s) => {
                if !info.subsets.iter().any(|x| x == s) {
                    return Err(CardError::resource(format!(
                        "{family} font family has no {s} subset; only: {:?}",
                        info.subsets
                    )));
                }
                s.clone()
            }
            None => info
                .def_subset
                .clone()
                .unwrap_or_else(|| "latin".to_owned()),
        };
        let weight = snap_weight(font.weight, &info.weights).ok_or_else(|| {
            CardError::resource(format!("{family} font family declares no weights"))
        })?;
        if weight != font.weight {
            debug!(family, requested = font.weight, weight, "snapped font weight");
        }

        let file = self.cache.fonts_dir().join(format!(
            "{family} {} ({subset} {weight}).ttf",
            font.style
        ));
        if !file.is_file() {
            if info.variants.is_none() {
                let url = format!("{}/{}", self.api_base, urlencoding::encode(&info.id));
                info = self.fetch_json(&url)?;
                self.store_info(family, &info)?;
            }
            let ttf_url = info
                .variants
                .as_ref()
                .and_then(|v| v.get(&weight.to_string()))
                .and_then(|v| v.get(&font.style))
                .and_then(|v| v.get(&subset))
                .and_then(|v| v.url.get("ttf"))
                .ok_or_else(|| {
                    CardError::resource(format!(
                        "{family} has no ttf download for {} {weight} ({subset})",
                        font.style
                    ))
                })?;
            info!(family, style = %font.style, weight, %subset, "fetching font");
            let resp = self.fetcher.fetch(ttf_url)?;
            if !resp.is_ok() {
                return Err(CardError::resource(format!(
                    "font download {ttf_url} returned status {}",
                    resp.status
                )));
            }
            self.cache.write_atomic(&file, &resp.bytes)?;
        }

        Ok(FontSpec {
            family: font.family.clone(),
            style: font.style.clone(),
            weight,
            subset: Some(subset),
            path: Some(file),
        })
    }

    fn resolve_system(&self, font: &FontSpec) -> CardResult<FontSpec> {
        use usvg::fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};

        let db = self.system.get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            db
        });
        let style = match font.style.as_str() {
            "italic" => Style::Italic,
            "oblique" => Style::Oblique,
            _ => Style::Normal,
        };
        let families = [Family::Name(&font.family), Family::SansSerif];
        let id = db
            .query(&Query {
                families: &families,
                weight: Weight(font.weight),
                stretch: Stretch::Normal,
                style,
            })
            .ok_or_else(|| {
                CardError::resource(format!("no system font matches family \"{}\"", font.family))
            })?;
        let face = db
            .face(id)
            .ok_or_else(|| CardError::resource("system font face disappeared"))?;
        let path: &Path = match &face.source {
            Source::File(p) => p,
            Source::SharedFile(p, _) => p,
            _ => {
                return Err(CardError::resource(format!(
                    "system font for \"{}\" is not backed by a file",
                    font.family
                )));
            }
        };
        Ok(FontSpec {
            path: Some(path.to_path_buf()),
            ..font.clone()
        })
    }
}

impl FontSource for FontManager {
    fn resolve(&self, font: &FontSpec) -> CardResult<FontSpec> {
        if let Some(p) = font.path.as_ref().filter(|p| p.is_file()) {
            debug!(path = %p.display(), "font path already resolved");
            return Ok(font.clone());
        }
        match self.font_info(&font.family) {
            // The family exists upstream: a missing style, subset or file is final.
            Ok(info) => self.resolve_remote(font, info),
            Err(e) => {
                warn!(family = %font.family, error = %e, "font family unavailable upstream; trying system fonts");
                self.resolve_system(font)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
