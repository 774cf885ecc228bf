use std::cmp::Ordering;

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Largest edge, in pixels, of any raster the renderer allocates.
pub const MAX_RASTER_EDGE: u32 = 16_384;

/// Pixel dimensions of a card or a layer box.
///
/// Equality is component-wise. Ordering compares areas: `a < b` iff
/// `a.area() < b.area()`. Two sizes with equal areas but different dimensions are unordered,
/// so `<=` and `>=` are exactly `< || ==` and `> || ==`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size; callers validate `> 0` before constructing layout sizes.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width * height` without overflow.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// `true` when neither edge exceeds [`MAX_RASTER_EDGE`].
    pub fn fits_raster(self) -> bool {
        self.width <= MAX_RASTER_EDGE && self.height <= MAX_RASTER_EDGE
    }

    /// Size as a kurbo rectangle anchored at the origin.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.area().cmp(&other.area()) {
            Ordering::Equal => None,
            ord => Some(ord),
        }
    }
}

/// Signed offset in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Offset {
    /// Create an offset.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset as a kurbo point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Straight-alpha RGBA8 color, as written by layout authors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Create a color from straight channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to premultiplied form.
    pub fn premultiply(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
