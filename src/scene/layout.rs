use std::path::PathBuf;

use crate::foundation::core::{Offset, Size};
use crate::geometry::Shape;
use crate::paint::Color;

/// Canvas size used when a layout does not declare one.
pub const DEFAULT_CANVAS: Size = Size::new(1200, 630);

/// Validated card layout. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Canvas size.
    pub size: Size,
    /// Layers in render order (later layers draw on top).
    pub layers: Vec<Layer>,
}

/// One drawable unit of a card.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Layer box size (defaults to the canvas size).
    pub size: Size,
    /// Position of the layer box on the canvas.
    pub offset: Offset,
    /// Optional alpha mask applied before compositing.
    pub mask: Option<Mask>,
    /// Kind-specific content.
    pub kind: LayerKind,
}

/// Closed set of layer kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    /// Full-box image and/or color.
    Background(Background),
    /// Rectangle with optional rounded corners.
    Rectangle(ShapeLayer),
    /// Ellipse or pie slice.
    Ellipse(ShapeLayer),
    /// Regular or explicit polygon.
    Polygon(ShapeLayer),
    /// Image (usually SVG) scaled into the box.
    Icon(Icon),
    /// Wrapped text.
    Typography(Typography),
}

impl LayerKind {
    /// Layout key of this kind, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background(_) => "background",
            Self::Rectangle(_) => "rectangle",
            Self::Ellipse(_) => "ellipse",
            Self::Polygon(_) => "polygon",
            Self::Icon(_) => "icon",
            Self::Typography(_) => "typography",
        }
    }
}

/// How an image is fitted into its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AspectPolicy {
    /// Scale both axes independently to the box.
    Stretch,
    /// Preserve aspect, scaling the larger image dimension to the box.
    #[default]
    Fit,
    /// Preserve aspect, matching the box width.
    Width,
    /// Preserve aspect, matching the box height.
    Height,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub color: Option<Color>,
    pub image: Option<String>,
    pub aspect: AspectPolicy,
}

/// Stroke drawn inside a shape outline after the fill.
#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    /// Visible width in pixels.
    pub width: u32,
    /// Border fill; `None` inherits the layer color.
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeLayer {
    pub shape: Shape,
    pub color: Option<Color>,
    pub border: Option<Border>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Icon {
    pub image: String,
    /// Recolors the icon through its alpha channel.
    pub color: Option<Color>,
    pub aspect: AspectPolicy,
}

/// Horizontal placement of each text line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// What happens when wrapped text needs more lines than allotted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Drop the extra lines.
    #[default]
    Off,
    /// Shrink the font until the text fits.
    On,
}

/// Line budget of a typography layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec {
    /// Maximum number of lines (>= 1).
    pub amount: u32,
    /// Line height as a multiple of the font size.
    pub height: f64,
}

/// Requested font face. `path` is filled by a [`crate::FontSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub style: String,
    pub weight: u16,
    pub subset: Option<String>,
    pub path: Option<PathBuf>,
}

impl FontSpec {
    /// Regular weight, normal style, default subset.
    pub fn family(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: "normal".to_owned(),
            weight: 400,
            subset: None,
            path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Typography {
    pub content: String,
    /// Text fill; black when absent.
    pub color: Option<Color>,
    pub align: Align,
    pub line: LineSpec,
    pub overflow: Overflow,
    /// `None` uses the configured default font.
    pub font: Option<FontSpec>,
    /// Outlines the layer box.
    pub border: Option<Border>,
}

/// Alpha mask attached to a layer.
///
/// The mask shape is drawn into a `size` box placed at `offset` inside the
/// layer box; anything outside the layer box is clipped, never scaled.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    pub size: Size,
    pub offset: Offset,
    pub invert: bool,
    pub shape: Shape,
}
