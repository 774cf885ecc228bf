use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assets::cache::AssetCache;
use crate::assets::svg_raster::svg_to_png;
use crate::foundation::core::Size;
use crate::foundation::error::CardResult;
use crate::scene::layout::AspectPolicy;

/// Raster image in premultiplied RGBA8 form, sized to a layer box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

/// Load an image file (SVGs are rasterized through the cache) and fit it to `size`.
pub fn prepare_image(
    path: &Path,
    cache: &AssetCache,
    size: Size,
    aspect: AspectPolicy,
) -> CardResult<PreparedImage> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let raster_path = if is_svg {
        svg_to_png(path, cache, size)?.path
    } else {
        path.to_path_buf()
    };

    let img = load_rgba(&raster_path)?;
    let fitted = fit_to_box(&img, size, aspect);
    let (width, height) = fitted.dimensions();
    let mut rgba8_premul = fitted.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul,
    })
}

/// Decode the first frame of an image file as straight RGBA8.
pub fn load_rgba(path: &Path) -> CardResult<RgbaImage> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Scale `img` into a `size` box.
///
/// Aspect-preserving policies center the scaled image on a transparent box,
/// padding or cropping as needed.
pub fn fit_to_box(img: &RgbaImage, size: Size, aspect: AspectPolicy) -> RgbaImage {
    let (w, h) = img.dimensions();
    if (w, h) == (size.width, size.height) {
        return img.clone();
    }

    let ratio = match aspect {
        AspectPolicy::Stretch => {
            return imageops::resize(img, size.width, size.height, FilterType::Lanczos3);
        }
        AspectPolicy::Width => f64::from(w) / f64::from(size.width),
        AspectPolicy::Height => f64::from(h) / f64::from(size.height),
        AspectPolicy::Fit if w > h => f64::from(w) / f64::from(size.width),
        AspectPolicy::Fit => f64::from(h) / f64::from(size.height),
    };
    let nw = ((f64::from(w) / ratio) as u32).max(1);
    let nh = ((f64::from(h) / ratio) as u32).max(1);
    let scaled = imageops::resize(img, nw, nh, FilterType::Lanczos3);

    let mut out = RgbaImage::new(size.width, size.height);
    let x = (i64::from(size.width) - i64::from(nw)) / 2;
    let y = (i64::from(size.height) - i64::from(nh)) / 2;
    imageops::replace(&mut out, &scaled, x, y);
    out
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
