use tracing::{debug, warn};

use crate::assets::decode::{PreparedImage, prepare_image};
use crate::foundation::core::{Point, Rgba8, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::geometry::{Corners, Shape};
use crate::paint::Color;
use crate::render::{RenderEnv, check_raster};
use crate::render::composite::{apply_coverage, over_in_place, place_coverage};
use crate::render::raster::{
    Coverage, GlyphLine, fill_coverage, glyph_coverage, stroke_coverage,
};
use crate::scene::layout::{
    AspectPolicy, Background, Border, Icon, Layer, LayerKind, Mask, Overflow, ShapeLayer,
    Typography,
};
use crate::text::measure::ParleyMeasure;
use crate::text::wrap::{TextParams, layout_text};

/// Render one layer into a premultiplied buffer the size of its box.
///
/// `Ok(None)` means the layer has nothing to contribute (an unresolvable icon).
pub(crate) fn render_layer(layer: &Layer, env: &RenderEnv<'_>) -> CardResult<Option<Vec<u8>>> {
    let size = layer.size;
    check_raster(size, "layer")?;
    if let Some(mask) = &layer.mask {
        check_raster(mask.size, "mask")?;
    }
    let mut rgba = match &layer.kind {
        LayerKind::Background(bg) => background(bg, size, env)?,
        LayerKind::Rectangle(s) | LayerKind::Ellipse(s) | LayerKind::Polygon(s) => {
            shape_layer(s, size)?
        }
        LayerKind::Icon(icon) => match icon_layer(icon, size, env)? {
            Some(px) => px,
            None => return Ok(None),
        },
        LayerKind::Typography(t) => typography(t, size, env)?,
    };
    if let Some(mask) = &layer.mask {
        apply_mask(&mut rgba, mask, size)?;
    }
    Ok(Some(rgba))
}

fn transparent(size: Size) -> Vec<u8> {
    vec![0; size.width as usize * size.height as usize * 4]
}

fn paint(color: &Color, coverage: &Coverage) -> Vec<u8> {
    let mut px = color.render_field(coverage.size);
    apply_coverage(&mut px, coverage);
    px
}

fn shape_layer(s: &ShapeLayer, size: Size) -> CardResult<Vec<u8>> {
    let encloses = s.shape.encloses_area(size);
    let fill = if encloses {
        Some(fill_coverage(&s.shape.fill_path(size), size)?)
    } else {
        None
    };

    let mut out = match (&s.color, &fill) {
        (Some(color), Some(cov)) => paint(color, cov),
        _ => transparent(size),
    };
    let stroked = stroke_border(&mut out, &s.shape, s.border.as_ref(), s.color.as_ref(), fill.as_ref(), size)?;

    if !encloses && !stroked {
        return Err(CardError::geometry("polygon vertices enclose no area"));
    }
    Ok(out)
}

/// Stroke `shape`'s outline over `out`. Returns whether anything was drawn.
///
/// With a fill coverage the stroke is twice as wide and clipped to it, so the
/// visible border lies inside the outline.
fn stroke_border(
    out: &mut [u8],
    shape: &Shape,
    border: Option<&Border>,
    fill_color: Option<&Color>,
    fill: Option<&Coverage>,
    size: Size,
) -> CardResult<bool> {
    let Some(border) = border.filter(|b| b.width > 0) else {
        return Ok(false);
    };
    let Some(color) = border.color.as_ref().or(fill_color) else {
        return Ok(false);
    };
    let outline = shape.outline_path(size);
    let width = f64::from(border.width);
    let coverage = match fill {
        Some(fill) => {
            let mut c = stroke_coverage(&outline, size, 2.0 * width)?;
            c.intersect(fill);
            c
        }
        None => stroke_coverage(&outline, size, width)?,
    };
    over_in_place(out, &paint(color, &coverage));
    Ok(true)
}

/// Resolve and decode an image reference. `Ok(None)` when it cannot be located.
fn load_image(
    reference: &str,
    size: Size,
    aspect: AspectPolicy,
    env: &RenderEnv<'_>,
) -> CardResult<Option<PreparedImage>> {
    let Some(path) = env.resolver.resolve_image(reference, env.doc_dir) else {
        return Ok(None);
    };
    match prepare_image(&path, env.cache, size, aspect) {
        Ok(img) => Ok(Some(img)),
        Err(e @ CardError::Geometry(_)) => Err(e),
        Err(e) => Err(CardError::resource(format!("image '{reference}': {e}"))),
    }
}

fn background(bg: &Background, size: Size, env: &RenderEnv<'_>) -> CardResult<Vec<u8>> {
    let mut out = transparent(size);
    if let Some(reference) = &bg.image {
        match load_image(reference, size, bg.aspect, env) {
            Ok(Some(img)) => out = img.rgba8_premul,
            Ok(None) => {}
            Err(e) if matches!(e, CardError::Resource(_)) => {
                warn!(error = %e, "background image unusable; drawing color only");
            }
            Err(e) => return Err(e),
        }
    }
    if let Some(color) = &bg.color {
        over_in_place(&mut out, &color.render_field(size));
    }
    Ok(out)
}

fn icon_layer(icon: &Icon, size: Size, env: &RenderEnv<'_>) -> CardResult<Option<Vec<u8>>> {
    let Some(img) = load_image(&icon.image, size, icon.aspect, env)? else {
        return Ok(None);
    };
    let px = match &icon.color {
        Some(color) => {
            let alpha = Coverage {
                size,
                alpha: img.rgba8_premul.chunks_exact(4).map(|p| p[3]).collect(),
            };
            paint(color, &alpha)
        }
        None => img.rgba8_premul,
    };
    Ok(Some(px))
}

fn typography(t: &Typography, size: Size, env: &RenderEnv<'_>) -> CardResult<Vec<u8>> {
    let requested = t.font.as_ref().unwrap_or(env.default_font);
    let font = env.fonts.resolve(requested)?;
    let path = font
        .path
        .as_deref()
        .ok_or_else(|| CardError::resource(format!("no file for font \"{}\"", font.family)))?;
    let mut measure = ParleyMeasure::from_font_file(path)?;

    let block = layout_text(&t.content, TextParams::for_typography(t, size), &mut measure);
    if block.truncated && t.overflow == Overflow::On {
        debug!(font_size = block.font_size, "text clipped at the minimum font size");
    }

    let shaped: Vec<_> = block
        .lines
        .iter()
        .map(|line| {
            let s = measure.shape_line(&line.text, block.font_size);
            let baseline = line.top + (block.line_pitch - (s.ascent + s.descent)) / 2.0 + s.ascent;
            (Point::new(f64::from(line.x), f64::from(baseline)), s)
        })
        .collect();
    let lines: Vec<GlyphLine<'_>> = shaped
        .iter()
        .map(|(origin, s)| GlyphLine {
            origin: *origin,
            glyphs: &s.glyphs,
        })
        .collect();

    let font_data = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(measure.font_bytes().to_vec()),
        0,
    );
    let coverage = glyph_coverage(&font_data, block.font_size, &lines, size)?;
    let color = t.color.clone().unwrap_or(Color::Solid(Rgba8::BLACK));
    let mut out = paint(&color, &coverage);

    let frame = Shape::Rectangle {
        radius: 0.0,
        corners: Corners::NONE,
    };
    let full = Coverage::full(size);
    stroke_border(&mut out, &frame, t.border.as_ref(), Some(&color), Some(&full), size)?;
    Ok(out)
}

fn apply_mask(rgba: &mut [u8], mask: &Mask, size: Size) -> CardResult<()> {
    let shape = fill_coverage(&mask.shape.fill_path(mask.size), mask.size)?;
    let mut coverage = place_coverage(&shape, size, mask.offset);
    if mask.invert {
        coverage.invert();
    }
    apply_coverage(rgba, &coverage);
    Ok(())
}
