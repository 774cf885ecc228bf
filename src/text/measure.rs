use std::borrow::Cow;
use std::path::Path;

use parley::layout::PositionedLayoutItem;
use parley::style::{FontStack, StyleProperty};

use crate::foundation::error::{CardError, CardResult};

/// Measures the horizontal advance of a run of text.
pub trait TextMeasure {
    /// Advance of `text` set at `font_size` pixels.
    fn advance(&mut self, text: &str, font_size: f32) -> f32;
}

/// Every character advances by `em_ratio * font_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub em_ratio: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { em_ratio: 0.5 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn advance(&mut self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.em_ratio
    }
}

/// One glyph of a shaped line, relative to the line's origin on the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A single shaped line of text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedLine {
    pub glyphs: Vec<ShapedGlyph>,
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Shapes text with `parley` using a single font face.
pub struct ParleyMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    font_bytes: Vec<u8>,
}

impl ParleyMeasure {
    /// Register `font_bytes` and shape everything with the first family it declares.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::resource("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::resource("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font_bytes,
        })
    }

    pub fn from_font_file(path: &Path) -> CardResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| CardError::resource(format!("read font '{}': {e}", path.display())))?;
        Self::from_font_bytes(bytes)
    }

    /// Family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn font_bytes(&self) -> &[u8] {
        &self.font_bytes
    }

    fn build(&mut self, text: &str, font_size: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Owned(
            self.family.clone(),
        ))));
        builder.push_default(StyleProperty::FontSize(font_size));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Shape `text` as one unbroken line.
    pub fn shape_line(&mut self, text: &str, font_size: f32) -> ShapedLine {
        if text.is_empty() {
            return ShapedLine::default();
        }
        let layout = self.build(text, font_size);
        let mut out = ShapedLine {
            width: layout.width(),
            ..ShapedLine::default()
        };
        for line in layout.lines() {
            let m = line.metrics();
            out.ascent = out.ascent.max(m.ascent);
            out.descent = out.descent.max(m.descent);
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let mut pen_x = run.offset();
                let run_y = run.baseline() - m.baseline;
                for g in run.glyphs() {
                    out.glyphs.push(ShapedGlyph {
                        id: g.id as u32,
                        x: pen_x + g.x,
                        y: run_y - g.y,
                    });
                    pen_x += g.advance;
                }
            }
        }
        out
    }
}

impl TextMeasure for ParleyMeasure {
    fn advance(&mut self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.build(text, font_size).width()
    }
}
