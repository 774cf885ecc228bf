//! Compositor: draws the layers of a [`Layout`] in order onto a canvas.

pub mod composite;
pub(crate) mod layer;
pub mod raster;

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use crate::assets::cache::AssetCache;
use crate::assets::fonts::FontSource;
use crate::assets::resolve::ImageResolver;
use crate::foundation::core::{MAX_RASTER_EDGE, Rect, Rgba8, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::paint::Color;
use crate::render::composite::{apply_coverage, over_at, over_in_place, unpremultiply_in_place};
use crate::render::raster::stroke_coverage;
use crate::scene::layout::{FontSpec, LayerKind, Layout};

/// Collaborators and settings for rendering one card.
#[derive(Clone, Copy)]
pub struct RenderEnv<'a> {
    pub cache: &'a AssetCache,
    pub resolver: &'a ImageResolver,
    pub fonts: &'a dyn FontSource,
    /// Base directory for relative image references.
    pub doc_dir: &'a Path,
    /// Used by typography layers without a `font`.
    pub default_font: &'a FontSpec,
    /// Outline every layer box in this color.
    pub debug_outline: Option<Rgba8>,
}

/// Premultiplied RGBA8 raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    data: Vec<u8>,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            data: vec![0; size.width as usize * size.height as usize * 4],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Row-major premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Straight-alpha copy, as stored in PNG files.
    pub fn to_straight_rgba(&self) -> CardResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_in_place(&mut data);
        image::RgbaImage::from_raw(self.size.width, self.size.height, data)
            .ok_or_else(|| CardError::geometry("canvas buffer has unexpected length"))
    }

    pub fn encode_png(&self) -> CardResult<Vec<u8>> {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(self.to_straight_rgba()?)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode card as png")?;
        Ok(png)
    }

    /// Write the card as PNG, replacing `path` atomically.
    pub fn save_png(&self, path: &Path) -> CardResult<()> {
        let png = self.encode_png()?;
        crate::assets::cache::write_atomic(path, &png)?;
        Ok(())
    }
}

/// Render `layout` into a new canvas.
///
/// Soft failures skip the affected layer with a warning. Geometry failures of a
/// background layer and every other error fail the card.
#[tracing::instrument(skip_all, fields(width = layout.size.width, height = layout.size.height, layers = layout.layers.len()))]
pub fn render_layout(layout: &Layout, env: &RenderEnv<'_>) -> CardResult<Canvas> {
    check_raster(layout.size, "card")?;
    let mut canvas = Canvas::new(layout.size);
    for (index, layer) in layout.layers.iter().enumerate() {
        let kind = layer.kind.name();
        match layer::render_layer(layer, env) {
            Ok(Some(px)) => {
                over_at(&mut canvas.data, canvas.size, &px, layer.size, layer.offset);
                debug!(index, kind, "layer composited");
            }
            Ok(None) => debug!(index, kind, "layer has no content"),
            Err(e) if e.is_soft() && !matches!(layer.kind, LayerKind::Background(_)) => {
                warn!(index, kind, error = %e, "layer skipped");
            }
            Err(e) => return Err(e),
        }
    }
    if let Some(color) = env.debug_outline {
        outline_layers(&mut canvas, layout, color)?;
    }
    Ok(canvas)
}

/// Refuse sizes the renderer must not allocate.
pub(crate) fn check_raster(size: Size, what: &str) -> CardResult<()> {
    if size.fits_raster() {
        return Ok(());
    }
    Err(CardError::geometry(format!(
        "{what} size {}x{} exceeds the {MAX_RASTER_EDGE}px raster limit",
        size.width, size.height
    )))
}

fn outline_layers(canvas: &mut Canvas, layout: &Layout, color: Rgba8) -> CardResult<()> {
    use kurbo::Shape as _;

    let paint = Color::Solid(color).render_field(canvas.size);
    for layer in &layout.layers {
        let (x, y) = (f64::from(layer.offset.x), f64::from(layer.offset.y));
        let rect = Rect::new(
            x + 0.5,
            y + 0.5,
            x + f64::from(layer.size.width) - 0.5,
            y + f64::from(layer.size.height) - 0.5,
        );
        let coverage = stroke_coverage(&rect.to_path(0.1), canvas.size, 1.0)?;
        let mut px = paint.clone();
        apply_coverage(&mut px, &coverage);
        over_in_place(&mut canvas.data, &px);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
