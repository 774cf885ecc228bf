//! Anti-aliased coverage masks rasterized with `vello_cpu`.
//!
//! Everything is drawn in opaque white; the alpha channel of the result is the
//! coverage, which the compositor multiplies into a color field.

use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::text::measure::ShapedGlyph;

/// Single-channel coverage buffer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coverage {
    pub size: Size,
    pub alpha: Vec<u8>,
}

impl Coverage {
    pub fn empty(size: Size) -> Self {
        Self {
            size,
            alpha: vec![0; size.width as usize * size.height as usize],
        }
    }

    pub fn full(size: Size) -> Self {
        Self {
            size,
            alpha: vec![255; size.width as usize * size.height as usize],
        }
    }

    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.size.width + x) as usize]
    }

    /// Multiply by another coverage of the same size (intersection).
    pub fn intersect(&mut self, other: &Coverage) {
        for (a, b) in self.alpha.iter_mut().zip(&other.alpha) {
            *a = crate::foundation::math::mul_div255_u8(u16::from(*a), u16::from(*b));
        }
    }

    pub fn invert(&mut self) {
        for a in &mut self.alpha {
            *a = 255 - *a;
        }
    }
}

/// Glyphs of one line with a pen origin in box-local pixels.
#[derive(Clone, Debug)]
pub struct GlyphLine<'a> {
    pub origin: Point,
    pub glyphs: &'a [ShapedGlyph],
}

fn surface_dims(size: Size) -> CardResult<(u16, u16)> {
    let w = u16::try_from(size.width).ok().filter(|w| *w > 0);
    let h = u16::try_from(size.height).ok().filter(|h| *h > 0);
    match (w, h) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(CardError::geometry(format!(
            "surface {}x{} is outside the raster limit of {}x{}",
            size.width,
            size.height,
            u16::MAX,
            u16::MAX
        ))),
    }
}

fn white() -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255)
}

fn render(
    size: Size,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> CardResult<Coverage> {
    let (w, h) = surface_dims(size)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(white());
    draw(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    let alpha = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect();
    Ok(Coverage { size, alpha })
}

/// Coverage of the interior of `path` (non-zero winding).
pub fn fill_coverage(path: &BezPath, size: Size) -> CardResult<Coverage> {
    let path = bezpath_to_cpu(path);
    render(size, |ctx| ctx.fill_path(&path))
}

/// Coverage of a centered stroke of `width` pixels along `path`.
pub fn stroke_coverage(path: &BezPath, size: Size, width: f64) -> CardResult<Coverage> {
    let path = bezpath_to_cpu(path);
    render(size, |ctx| {
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.stroke_path(&path);
    })
}

/// Coverage of glyph outlines of `font` at `font_size`.
pub fn glyph_coverage(
    font: &vello_cpu::peniko::FontData,
    font_size: f32,
    lines: &[GlyphLine<'_>],
    size: Size,
) -> CardResult<Coverage> {
    render(size, |ctx| {
        for line in lines {
            let (ox, oy) = (line.origin.x as f32, line.origin.y as f32);
            let glyphs = line.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: ox + g.x,
                y: oy + g.y,
            });
            ctx.glyph_run(font).font_size(font_size).fill_glyphs(glyphs);
        }
    })
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// `vello_cpu` links its own `kurbo`; paths are copied element by element.
fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
