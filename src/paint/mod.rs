//! Fill colors: solid RGBA and per-pixel gradient fields.

pub mod gradient;
pub mod presets;

use crate::foundation::core::{Point, Rgba8, Rgba8Premul, Size};
use gradient::{ConicalGradient, LinearGradient, RadialGradient};

/// A parsed fill. Renderers never look at the source strings again.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// Uniform straight-alpha color.
    Solid(Rgba8),
    /// Linear gradient in layer-local pixels.
    Linear(LinearGradient),
    /// Two-circle radial gradient in layer-local pixels.
    Radial(RadialGradient),
    /// Sweep gradient in layer-local pixels.
    Conical(ConicalGradient),
}

impl Color {
    /// Premultiplied color at a layer-local point.
    pub fn sample_at(&self, p: Point) -> Rgba8Premul {
        match self {
            Self::Solid(c) => c.premultiply(),
            Self::Linear(g) => g.sample_at(p),
            Self::Radial(g) => g.sample_at(p),
            Self::Conical(g) => g.sample_at(p),
        }
    }

    /// Solid color, if this is not a gradient.
    pub fn as_solid(&self) -> Option<Rgba8> {
        match self {
            Self::Solid(c) => Some(*c),
            _ => None,
        }
    }

    /// Sample the fill at every pixel center of a `size` box.
    ///
    /// Returns row-major premultiplied RGBA8.
    pub fn render_field(&self, size: Size) -> Vec<u8> {
        let (w, h) = (size.width as usize, size.height as usize);
        if let Self::Solid(c) = self {
            let px = c.premultiply().to_array();
            return px.repeat(w * h);
        }

        let mut out = vec![0u8; w * h * 4];
        for (y, row) in out.chunks_exact_mut(w * 4).enumerate() {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                px.copy_from_slice(&self.sample_at(p).to_array());
            }
        }
        out
    }
}

impl From<Rgba8> for Color {
    fn from(value: Rgba8) -> Self {
        Self::Solid(value)
    }
}
