use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::assets::cache::AssetCache;
use crate::foundation::core::{MAX_RASTER_EDGE, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::sha256_hex;
use crate::render::composite::unpremultiply_in_place;

/// A cache entry and whether it already existed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedRaster {
    pub path: PathBuf,
    /// `true` when no conversion was needed.
    pub hit: bool,
}

/// Rasterize an SVG file to PNG for a `target` box, memoized on disk.
///
/// The cache key is the file name, the target size and the first 16 hex digits of
/// the content's SHA-256, so an edited SVG is converted again.
pub fn svg_to_png(svg_path: &Path, cache: &AssetCache, target: Size) -> CardResult<CachedRaster> {
    let bytes = std::fs::read(svg_path)
        .with_context(|| format!("read svg '{}'", svg_path.display()))?;
    let stem = svg_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.svg".to_owned());
    let out = cache.svg_dir().join(format!(
        "{stem}_{}x{}_{}.png",
        target.width,
        target.height,
        sha256_hex(&bytes, 16)
    ));
    if out.is_file() {
        debug!(svg = %svg_path.display(), "svg raster cache hit");
        return Ok(CachedRaster {
            path: out,
            hit: true,
        });
    }

    let mut opts = usvg::Options::default();
    opts.resources_dir = svg_path.parent().map(Path::to_path_buf);
    let tree = usvg::Tree::from_data(&bytes, &opts)
        .map_err(|e| CardError::resource(format!("parse svg '{}': {e}", svg_path.display())))?;

    let (w, h) = raster_size(&tree, target)?;
    let rgba = rasterize_straight_rgba8(&tree, w, h)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| CardError::geometry("svg raster buffer has unexpected length"))?;
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode svg raster as png")?;
    cache.write_atomic(&out, &png)?;

    debug!(svg = %svg_path.display(), w, h, "svg rasterized");
    Ok(CachedRaster {
        path: out,
        hit: false,
    })
}

/// Raster size that keeps the SVG aspect ratio and covers `target` in both dimensions.
fn raster_size(tree: &usvg::Tree, target: Size) -> CardResult<(u32, u32)> {
    let size = tree.size();
    let (sw, sh) = (f64::from(size.width()), f64::from(size.height()));
    if !(sw.is_finite() && sh.is_finite()) || sw <= 0.0 || sh <= 0.0 {
        return Err(CardError::geometry("svg has invalid width/height"));
    }
    let scale = (f64::from(target.width) / sw).max(f64::from(target.height) / sh);
    let w = (sw * scale).ceil().max(1.0) as u32;
    let h = (sh * scale).ceil().max(1.0) as u32;
    if w > MAX_RASTER_EDGE || h > MAX_RASTER_EDGE {
        return Err(CardError::geometry(format!(
            "svg raster size too large: {w}x{h} (max {MAX_RASTER_EDGE}x{MAX_RASTER_EDGE})"
        )));
    }
    Ok((w, h))
}

fn rasterize_straight_rgba8(tree: &usvg::Tree, width: u32, height: u32) -> CardResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CardError::geometry("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    unpremultiply_in_place(&mut data);
    Ok(data)
}
