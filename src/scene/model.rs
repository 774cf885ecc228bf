//! Raw layout document as written by authors.
//!
//! These `*Def` types mirror the JSON/YAML shape one-to-one and reject unknown
//! fields. Range checks, color parsing and defaults that depend on the canvas
//! happen in [`crate::schema::validate`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SizeDef {
    pub(crate) width: i64,
    pub(crate) height: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OffsetDef {
    #[serde(default)]
    pub(crate) x: i64,
    #[serde(default)]
    pub(crate) y: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LayoutDef {
    #[serde(default)]
    pub(crate) size: Option<SizeDef>,
    #[serde(default)]
    pub(crate) layers: Vec<serde_json::Value>,
}

/// One entry of `layers`; exactly one shape key must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LayerDef {
    #[serde(default)]
    pub(crate) size: Option<SizeDef>,
    #[serde(default)]
    pub(crate) offset: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) mask: Option<MaskDef>,

    #[serde(default)]
    pub(crate) background: Option<BackgroundDef>,
    #[serde(default)]
    pub(crate) rectangle: Option<RectangleDef>,
    #[serde(default)]
    pub(crate) ellipse: Option<EllipseDef>,
    #[serde(default)]
    pub(crate) polygon: Option<PolygonDef>,
    #[serde(default)]
    pub(crate) icon: Option<IconDef>,
    #[serde(default)]
    pub(crate) typography: Option<TypographyDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MaskDef {
    #[serde(default)]
    pub(crate) size: Option<SizeDef>,
    #[serde(default)]
    pub(crate) offset: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) invert: bool,

    #[serde(default)]
    pub(crate) rectangle: Option<RectangleDef>,
    #[serde(default)]
    pub(crate) ellipse: Option<EllipseDef>,
    #[serde(default)]
    pub(crate) polygon: Option<PolygonDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CornerDef {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

fn all_corners() -> Vec<CornerDef> {
    vec![
        CornerDef::TopLeft,
        CornerDef::TopRight,
        CornerDef::BottomRight,
        CornerDef::BottomLeft,
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BorderDef {
    #[serde(default)]
    pub(crate) width: i64,
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
}

/// `true`/`false` or the name of the dimension to preserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum AspectDef {
    Flag(bool),
    Named(String),
}

impl Default for AspectDef {
    fn default() -> Self {
        Self::Flag(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BackgroundDef {
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) image: Option<String>,
    #[serde(default)]
    pub(crate) preserve_aspect: AspectDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RectangleDef {
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) radius: f64,
    #[serde(default = "all_corners")]
    pub(crate) corners: Vec<CornerDef>,
    #[serde(default)]
    pub(crate) border: Option<BorderDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ArcDef {
    #[serde(default)]
    pub(crate) start: f64,
    #[serde(default = "full_turn")]
    pub(crate) end: f64,
}

fn full_turn() -> f64 {
    360.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EllipseDef {
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) arc: Option<ArcDef>,
    #[serde(default)]
    pub(crate) border: Option<BorderDef>,
    #[serde(default)]
    pub(crate) border_to_origin: bool,
}

/// Either a vertex count for a regular polygon or explicit box-relative points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum SidesDef {
    Count(i64),
    Points(Vec<OffsetDef>),
}

impl Default for SidesDef {
    fn default() -> Self {
        Self::Count(3)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PolygonDef {
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) sides: SidesDef,
    #[serde(default)]
    pub(crate) rotation: f64,
    #[serde(default)]
    pub(crate) border: Option<BorderDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IconDef {
    pub(crate) image: String,
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) preserve_aspect: AspectDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LineDef {
    #[serde(default = "one_line")]
    pub(crate) amount: i64,
    #[serde(default = "unit_height")]
    pub(crate) height: f64,
}

impl Default for LineDef {
    fn default() -> Self {
        Self {
            amount: one_line(),
            height: unit_height(),
        }
    }
}

fn one_line() -> i64 {
    1
}

fn unit_height() -> f64 {
    1.0
}

/// `on`/`off` or a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum OverflowDef {
    Flag(bool),
    Named(String),
}

impl Default for OverflowDef {
    fn default() -> Self {
        Self::Flag(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FontDef {
    #[serde(default)]
    pub(crate) family: Option<String>,
    #[serde(default = "normal_style")]
    pub(crate) style: String,
    #[serde(default = "regular_weight")]
    pub(crate) weight: i64,
    #[serde(default)]
    pub(crate) subset: Option<String>,
}

fn normal_style() -> String {
    "normal".to_owned()
}

fn regular_weight() -> i64 {
    400
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TypographyDef {
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) color: Option<serde_json::Value>,
    #[serde(default = "left_align")]
    pub(crate) align: String,
    #[serde(default)]
    pub(crate) line: LineDef,
    #[serde(default)]
    pub(crate) overflow: OverflowDef,
    #[serde(default)]
    pub(crate) font: Option<FontDef>,
    #[serde(default)]
    pub(crate) border: Option<BorderDef>,
}

fn left_align() -> String {
    "left".to_owned()
}

/// Gradient bodies, parsed from the value of a `color` key that is a mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GradientWrapperDef {
    #[serde(default)]
    pub(crate) linear_gradient: Option<LinearGradientDef>,
    #[serde(default)]
    pub(crate) radial_gradient: Option<RadialGradientDef>,
    #[serde(default)]
    pub(crate) conical_gradient: Option<ConicalGradientDef>,
}

/// Preset reference: 1-based index or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum PresetDef {
    Index(i64),
    Name(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SpreadDef {
    #[default]
    Pad,
    Repeat,
    Reflect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LinearGradientDef {
    #[serde(default)]
    pub(crate) start: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) end: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) spread: SpreadDef,
    #[serde(default)]
    pub(crate) colors: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub(crate) preset: Option<PresetDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RadialGradientDef {
    #[serde(default)]
    pub(crate) center: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    #[serde(default)]
    pub(crate) focal_point: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) focal_radius: f64,
    #[serde(default)]
    pub(crate) spread: SpreadDef,
    #[serde(default)]
    pub(crate) colors: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub(crate) preset: Option<PresetDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConicalGradientDef {
    #[serde(default)]
    pub(crate) center: Option<OffsetDef>,
    #[serde(default)]
    pub(crate) angle: f64,
    #[serde(default)]
    pub(crate) colors: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub(crate) preset: Option<PresetDef>,
}
