use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::color::parse_solid;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};
use crate::scene::layout::FontSpec;
use crate::schema::validate::DEFAULT_FONT_FAMILY;
use crate::schema::{DocFormat, yaml_to_json};

/// Overrides `cache_dir`.
pub const ENV_CACHE_DIR: &str = "SOCIAL_CARDS_CACHE_DIR";
/// Overrides `icons_dir`.
pub const ENV_ICONS_DIR: &str = "SOCIAL_CARDS_ICONS_DIR";

/// Layer-box outlining for layout debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    #[serde(default)]
    pub enable: bool,
    /// CSS color of the outlines.
    #[serde(default = "default_debug_color")]
    pub color: String,
}

fn default_debug_color() -> String {
    "#FF00FF".to_owned()
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enable: false,
            color: default_debug_color(),
        }
    }
}

/// Build-wide settings shared by every card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardsConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extra directories searched for images.
    #[serde(default)]
    pub image_paths: Vec<PathBuf>,
    /// Directory of bundled icons, searched last.
    #[serde(default)]
    pub icons_dir: Option<PathBuf>,
    /// Family used by typography layers without a `font`.
    #[serde(default = "default_font_family")]
    pub default_font: String,
    #[serde(default)]
    pub debug: DebugConfig,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".social_cards_cache")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("_images/social_cards")
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_owned()
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            output_dir: default_output_dir(),
            image_paths: Vec::new(),
            icons_dir: None,
            default_font: default_font_family(),
            debug: DebugConfig::default(),
        }
    }
}

impl CardsConfig {
    /// Load a JSON or YAML config file (by extension).
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_str_as(&text, DocFormat::from_path(path))
    }

    pub fn from_str_as(text: &str, format: DocFormat) -> CardResult<Self> {
        let parsed = match format {
            DocFormat::Json => serde_json::from_str(text),
            DocFormat::Yaml => {
                let yaml = serde_yaml::from_str::<serde_yaml::Value>(text)
                    .map_err(|e| CardError::serde(format!("invalid YAML config: {e}")))?;
                let value = yaml_to_json(yaml, &mut Vec::new())
                    .map_err(|e| CardError::serde(format!("invalid YAML config: {e}")))?;
                serde_json::from_value(value)
            }
        };
        parsed.map_err(|e| CardError::serde(format!("invalid config: {e}")))
    }

    /// Apply `SOCIAL_CARDS_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    pub(crate) fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<std::ffi::OsString>,
    ) -> Self {
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            self.cache_dir = dir.into();
        }
        if let Some(dir) = lookup(ENV_ICONS_DIR).filter(|v| !v.is_empty()) {
            self.icons_dir = Some(dir.into());
        }
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_image_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.image_paths = paths.into_iter().collect();
        self
    }

    pub fn with_icons_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icons_dir = Some(dir.into());
        self
    }

    pub fn with_default_font(mut self, family: impl Into<String>) -> Self {
        self.default_font = family.into();
        self
    }

    /// Turn layer outlines on in `color`.
    pub fn with_debug(mut self, color: impl Into<String>) -> Self {
        self.debug = DebugConfig {
            enable: true,
            color: color.into(),
        };
        self
    }

    pub fn default_font_spec(&self) -> FontSpec {
        FontSpec::family(&self.default_font)
    }

    /// Outline color when debugging is on.
    pub fn debug_outline(&self) -> CardResult<Option<Rgba8>> {
        if !self.debug.enable {
            return Ok(None);
        }
        parse_solid(&self.debug.color)
            .map(Some)
            .map_err(|e| CardError::validation(format!("debug.color: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
