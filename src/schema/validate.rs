use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use serde_path_to_error::Segment;

use crate::assets::color::parse_solid;
use crate::foundation::core::{MAX_RASTER_EDGE, Offset, Point, Size};
use crate::geometry::{ArcSpan, Corners, Shape, Sides};
use crate::paint::Color;
use crate::paint::gradient::{
    ColorRamp, ConicalGradient, GradientStop, LinearGradient, RadialGradient, SpreadMode,
};
use crate::paint::presets;
use crate::scene::layout::{
    Align, AspectPolicy, Background, Border, DEFAULT_CANVAS, FontSpec, Icon, Layer, LayerKind,
    Layout, LineSpec, Mask, Overflow, ShapeLayer, Typography,
};
use crate::scene::model::{
    AspectDef, BorderDef, ConicalGradientDef, CornerDef, EllipseDef, FontDef,
    GradientWrapperDef, LayerDef, LayoutDef, LinearGradientDef, MaskDef, OffsetDef, OverflowDef,
    PolygonDef, PresetDef, RadialGradientDef, RectangleDef, SidesDef, SizeDef, SpreadDef,
    TypographyDef,
};

/// Family used when a typography `font` mapping names no family.
pub(crate) const DEFAULT_FONT_FAMILY: &str = "Roboto";

/// One step of a document path such as `$.layers[0].polygon.sides`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Known field name.
    Field(&'static str),
    /// Field name taken from the document itself (unknown or mistyped keys).
    Member(String),
    /// Author-supplied mapping key (gradient stop positions).
    Key(String),
    /// Sequence index.
    Index(usize),
}

/// A single constraint violation.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Location of the offending value; empty for document-level problems.
    pub path: Vec<SchemaPathElem>,
    /// Violated constraint.
    pub message: String,
}

impl SchemaError {
    pub(crate) fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Rendered path, e.g. `$.layers[0].polygon.sides`.
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Member(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Key(key) => {
                s.push_str("[\"");
                s.push_str(key);
                s.push_str("\"]");
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every violation found in one layout document.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    errors: Vec<SchemaError>,
}

impl SchemaErrors {
    /// A document-level error without a path.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![SchemaError {
                path: Vec::new(),
                message: message.into(),
            }],
        }
    }

    /// Individual violations in document order.
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// `true` if some violation is reported at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path_string() == path)
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaError> for SchemaErrors {
    fn from(value: SchemaError) -> Self {
        Self {
            errors: vec![value],
        }
    }
}

fn join(path: &[SchemaPathElem], elem: SchemaPathElem) -> Vec<SchemaPathElem> {
    [path, &[elem]].concat()
}

fn field(path: &[SchemaPathElem], name: &'static str) -> Vec<SchemaPathElem> {
    join(path, SchemaPathElem::Field(name))
}

/// Deserialize `value`, reporting serde failures at the offending field below `path`.
fn decode_at<T: DeserializeOwned>(value: &Value, path: &[SchemaPathElem]) -> Result<T, SchemaError> {
    serde_path_to_error::deserialize(value.clone()).map_err(|e| {
        let mut at = path.to_vec();
        for segment in e.path().iter() {
            match segment {
                Segment::Seq { index } => at.push(SchemaPathElem::Index(*index)),
                Segment::Map { key } => at.push(SchemaPathElem::Member(key.clone())),
                Segment::Enum { variant } => at.push(SchemaPathElem::Member(variant.clone())),
                _ => {}
            }
        }
        SchemaError::at(&at, e.into_inner().to_string())
    })
}

/// Validate an untyped document tree into a [`Layout`].
pub(crate) fn layout_from_value(value: &Value) -> Result<Layout, SchemaErrors> {
    if !value.is_object() {
        return Err(SchemaErrors::single("layout must be a mapping"));
    }
    let def: LayoutDef = decode_at(value, &[])?;

    let mut errors = Vec::new();
    let canvas = size_or(def.size, DEFAULT_CANVAS, &[SchemaPathElem::Field("size")], &mut errors);

    let mut layers = Vec::with_capacity(def.layers.len());
    for (i, raw) in def.layers.iter().enumerate() {
        let path = vec![SchemaPathElem::Field("layers"), SchemaPathElem::Index(i)];
        if !raw.is_object() {
            errors.push(SchemaError::at(&path, "layer must be a mapping"));
            continue;
        }
        match decode_at::<LayerDef>(raw, &path) {
            Ok(layer_def) => {
                if let Some(layer) = layer_from_def(&layer_def, canvas, &path, &mut errors) {
                    layers.push(layer);
                }
            }
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(Layout {
            size: canvas,
            layers,
        })
    } else {
        Err(SchemaErrors { errors })
    }
}

fn size_or(
    def: Option<SizeDef>,
    default: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Size {
    let Some(def) = def else {
        return default;
    };
    let mut dim = |v: i64, name: &'static str| {
        let problem = if v <= 0 {
            format!("{name} must be > 0")
        } else if v > i64::from(MAX_RASTER_EDGE) {
            format!("{name} must be <= {MAX_RASTER_EDGE}")
        } else {
            return v as u32;
        };
        errors.push(SchemaError::at(&field(path, name), problem));
        1
    };
    let width = dim(def.width, "width");
    let height = dim(def.height, "height");
    Size::new(width, height)
}

fn offset_of(def: Option<OffsetDef>, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> Offset {
    let Some(def) = def else {
        return Offset::default();
    };
    let mut coord = |v: i64, name: &'static str| {
        i32::try_from(v).unwrap_or_else(|_| {
            errors.push(SchemaError::at(&field(path, name), format!("{name} is out of range")));
            0
        })
    };
    let x = coord(def.x, "x");
    let y = coord(def.y, "y");
    Offset::new(x, y)
}

fn layer_from_def(
    def: &LayerDef,
    canvas: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Layer> {
    let present: Vec<&'static str> = [
        ("background", def.background.is_some()),
        ("rectangle", def.rectangle.is_some()),
        ("ellipse", def.ellipse.is_some()),
        ("polygon", def.polygon.is_some()),
        ("icon", def.icon.is_some()),
        ("typography", def.typography.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect();

    if present.len() != 1 {
        let found = if present.is_empty() {
            "none".to_owned()
        } else {
            present.join(", ")
        };
        errors.push(SchemaError::at(
            path,
            format!(
                "layer must declare exactly one of background, rectangle, ellipse, polygon, icon, typography (found: {found})"
            ),
        ));
        return None;
    }

    let size = size_or(def.size, canvas, &field(path, "size"), errors);
    let offset = offset_of(def.offset, &field(path, "offset"), errors);
    let mask = def
        .mask
        .as_ref()
        .and_then(|m| mask_from_def(m, size, &field(path, "mask"), errors));

    let before = errors.len();
    let kind = if let Some(bg) = &def.background {
        let p = field(path, "background");
        LayerKind::Background(Background {
            color: bg.color.as_ref().and_then(|c| color_from_value(c, size, &field(&p, "color"), errors)),
            image: non_empty_image(bg.image.as_deref(), &field(&p, "image"), errors),
            aspect: aspect_of(&bg.preserve_aspect, &field(&p, "preserve_aspect"), errors),
        })
    } else if let Some(r) = &def.rectangle {
        LayerKind::Rectangle(rectangle_layer(r, size, &field(path, "rectangle"), errors))
    } else if let Some(e) = &def.ellipse {
        LayerKind::Ellipse(ellipse_layer(e, size, &field(path, "ellipse"), errors))
    } else if let Some(p) = &def.polygon {
        LayerKind::Polygon(polygon_layer(p, size, &field(path, "polygon"), errors))
    } else if let Some(icon) = &def.icon {
        let p = field(path, "icon");
        let image = non_empty_image(Some(icon.image.as_str()), &field(&p, "image"), errors);
        LayerKind::Icon(Icon {
            image: image.unwrap_or_default(),
            color: icon.color.as_ref().and_then(|c| color_from_value(c, size, &field(&p, "color"), errors)),
            aspect: aspect_of(&icon.preserve_aspect, &field(&p, "preserve_aspect"), errors),
        })
    } else if let Some(t) = &def.typography {
        LayerKind::Typography(typography_of(t, size, &field(path, "typography"), errors))
    } else {
        return None;
    };

    (errors.len() == before).then_some(Layer {
        size,
        offset,
        mask,
        kind,
    })
}

fn non_empty_image(
    image: Option<&str>,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<String> {
    let image = image?;
    if image.trim().is_empty() {
        errors.push(SchemaError::at(path, "image reference must be non-empty"));
        return None;
    }
    Some(image.to_owned())
}

fn aspect_of(def: &AspectDef, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> AspectPolicy {
    match def {
        AspectDef::Flag(true) => AspectPolicy::Fit,
        AspectDef::Flag(false) => AspectPolicy::Stretch,
        AspectDef::Named(s) => match s.as_str() {
            "width" => AspectPolicy::Width,
            "height" => AspectPolicy::Height,
            other => {
                errors.push(SchemaError::at(
                    path,
                    format!("preserve_aspect must be a boolean, \"width\" or \"height\" (got \"{other}\")"),
                ));
                AspectPolicy::Fit
            }
        },
    }
}

fn finite(v: f64, name: &str, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> f64 {
    if v.is_finite() {
        v
    } else {
        errors.push(SchemaError::at(path, format!("{name} must be finite")));
        0.0
    }
}

fn corners_of(defs: &[CornerDef]) -> Corners {
    let mut c = Corners::NONE;
    for corner in defs {
        match corner {
            CornerDef::TopLeft => c.top_left = true,
            CornerDef::TopRight => c.top_right = true,
            CornerDef::BottomRight => c.bottom_right = true,
            CornerDef::BottomLeft => c.bottom_left = true,
        }
    }
    c
}

fn rectangle_shape(def: &RectangleDef, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> Shape {
    let rp = field(path, "radius");
    let radius = finite(def.radius, "radius", &rp, errors);
    if radius < 0.0 {
        errors.push(SchemaError::at(&rp, "radius must be >= 0"));
    }
    Shape::Rectangle {
        radius: radius.max(0.0),
        corners: corners_of(&def.corners),
    }
}

fn ellipse_shape(def: &EllipseDef, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> Shape {
    let arc = def.arc.map(|a| {
        let ap = field(path, "arc");
        ArcSpan {
            start_deg: finite(a.start, "arc.start", &field(&ap, "start"), errors),
            end_deg: finite(a.end, "arc.end", &field(&ap, "end"), errors),
        }
    });
    Shape::Ellipse {
        arc,
        border_to_origin: def.border_to_origin,
    }
}

fn polygon_shape(def: &PolygonDef, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> Shape {
    let sp = field(path, "sides");
    let sides = match &def.sides {
        SidesDef::Count(n) => match u32::try_from(*n) {
            Ok(n) if n >= 3 => Sides::Regular(n),
            _ => {
                errors.push(SchemaError::at(
                    &sp,
                    format!("a regular polygon needs at least 3 sides (got {n})"),
                ));
                Sides::Regular(3)
            }
        },
        SidesDef::Points(points) => {
            if points.len() < 2 {
                errors.push(SchemaError::at(&sp, "a polygon needs at least 2 points"));
            }
            Sides::Points(
                points
                    .iter()
                    .map(|p| Point::new(p.x as f64, p.y as f64))
                    .collect(),
            )
        }
    };
    Shape::Polygon {
        sides,
        rotation_deg: finite(def.rotation, "rotation", &field(path, "rotation"), errors),
    }
}

fn border_of(
    def: Option<&BorderDef>,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Border> {
    let def = def?;
    let width = match u32::try_from(def.width) {
        Ok(w) => w,
        Err(_) => {
            errors.push(SchemaError::at(&field(path, "width"), "border width must be >= 0"));
            0
        }
    };
    let color = def
        .color
        .as_ref()
        .and_then(|c| color_from_value(c, size, &field(path, "color"), errors));
    Some(Border { width, color })
}

fn rectangle_layer(
    def: &RectangleDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> ShapeLayer {
    ShapeLayer {
        shape: rectangle_shape(def, path, errors),
        color: def.color.as_ref().and_then(|c| color_from_value(c, size, &field(path, "color"), errors)),
        border: border_of(def.border.as_ref(), size, &field(path, "border"), errors),
    }
}

fn ellipse_layer(
    def: &EllipseDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> ShapeLayer {
    ShapeLayer {
        shape: ellipse_shape(def, path, errors),
        color: def.color.as_ref().and_then(|c| color_from_value(c, size, &field(path, "color"), errors)),
        border: border_of(def.border.as_ref(), size, &field(path, "border"), errors),
    }
}

fn polygon_layer(
    def: &PolygonDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> ShapeLayer {
    ShapeLayer {
        shape: polygon_shape(def, path, errors),
        color: def.color.as_ref().and_then(|c| color_from_value(c, size, &field(path, "color"), errors)),
        border: border_of(def.border.as_ref(), size, &field(path, "border"), errors),
    }
}

fn mask_from_def(
    def: &MaskDef,
    layer_size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Mask> {
    let size = size_or(def.size, layer_size, &field(path, "size"), errors);
    let offset = offset_of(def.offset, &field(path, "offset"), errors);
    let shape = match (&def.rectangle, &def.ellipse, &def.polygon) {
        (Some(r), None, None) => rectangle_shape(r, &field(path, "rectangle"), errors),
        (None, Some(e), None) => ellipse_shape(e, &field(path, "ellipse"), errors),
        (None, None, Some(p)) => polygon_shape(p, &field(path, "polygon"), errors),
        _ => {
            errors.push(SchemaError::at(
                path,
                "mask must declare exactly one of rectangle, ellipse, polygon",
            ));
            return None;
        }
    };
    Some(Mask {
        size,
        offset,
        invert: def.invert,
        shape,
    })
}

fn typography_of(
    def: &TypographyDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Typography {
    let align = match def.align.as_str() {
        "left" => Align::Left,
        "center" => Align::Center,
        "right" => Align::Right,
        other => {
            errors.push(SchemaError::at(
                &field(path, "align"),
                format!("align must be one of left, center, right (got \"{other}\")"),
            ));
            Align::Left
        }
    };

    let lp = field(path, "line");
    let amount = match u32::try_from(def.line.amount) {
        Ok(n) if n >= 1 => n,
        _ => {
            errors.push(SchemaError::at(&field(&lp, "amount"), "line amount must be >= 1"));
            1
        }
    };
    let height = def.line.height;
    if !height.is_finite() || height <= 0.0 {
        errors.push(SchemaError::at(&field(&lp, "height"), "line height must be finite and > 0"));
    }

    let overflow = match &def.overflow {
        OverflowDef::Flag(true) => Overflow::On,
        OverflowDef::Flag(false) => Overflow::Off,
        OverflowDef::Named(s) if s == "on" => Overflow::On,
        OverflowDef::Named(s) if s == "off" => Overflow::Off,
        OverflowDef::Named(s) => {
            errors.push(SchemaError::at(
                &field(path, "overflow"),
                format!("overflow must be on, off or a boolean (got \"{s}\")"),
            ));
            Overflow::Off
        }
    };

    Typography {
        content: def.content.clone(),
        color: def.color.as_ref().and_then(|c| color_from_value(c, size, &field(path, "color"), errors)),
        align,
        line: LineSpec {
            amount,
            height: if height.is_finite() && height > 0.0 { height } else { 1.0 },
        },
        overflow,
        font: def.font.as_ref().map(|f| font_of(f, &field(path, "font"), errors)),
        border: border_of(def.border.as_ref(), size, &field(path, "border"), errors),
    }
}

fn font_of(def: &FontDef, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) -> FontSpec {
    let weight = match u16::try_from(def.weight) {
        Ok(w) if (1..=1000).contains(&w) => w,
        _ => {
            errors.push(SchemaError::at(&field(path, "weight"), "font weight must be in 1..=1000"));
            400
        }
    };
    let family = match def.family.as_deref().map(str::trim) {
        Some("") => {
            errors.push(SchemaError::at(&field(path, "family"), "font family must be non-empty"));
            DEFAULT_FONT_FAMILY.to_owned()
        }
        Some(f) => f.to_owned(),
        None => DEFAULT_FONT_FAMILY.to_owned(),
    };
    FontSpec {
        family,
        style: def.style.clone(),
        weight,
        subset: def.subset.clone(),
        path: None,
    }
}

/// Parse a `color` value: a CSS color string or a single-key gradient mapping.
///
/// Gradient geometry defaults are derived from `size`, the box the color fills.
pub(crate) fn color_from_value(
    value: &Value,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Color> {
    match value {
        Value::String(s) => match parse_solid(s) {
            Ok(c) => Some(Color::Solid(c)),
            Err(e) => {
                errors.push(SchemaError::at(path, e));
                None
            }
        },
        Value::Object(_) => {
            let def = match decode_at::<GradientWrapperDef>(value, path) {
                Ok(d) => d,
                Err(e) => {
                    errors.push(e);
                    return None;
                }
            };
            match (def.linear_gradient, def.radial_gradient, def.conical_gradient) {
                (Some(l), None, None) => linear_of(&l, size, &field(path, "linear_gradient"), errors),
                (None, Some(r), None) => radial_of(&r, size, &field(path, "radial_gradient"), errors),
                (None, None, Some(c)) => conical_of(&c, size, &field(path, "conical_gradient"), errors),
                _ => {
                    errors.push(SchemaError::at(
                        path,
                        "gradient must declare exactly one of linear_gradient, radial_gradient, conical_gradient",
                    ));
                    None
                }
            }
        }
        _ => {
            errors.push(SchemaError::at(path, "color must be a string or a gradient mapping"));
            None
        }
    }
}

fn spread_of(def: SpreadDef) -> SpreadMode {
    match def {
        SpreadDef::Pad => SpreadMode::Pad,
        SpreadDef::Repeat => SpreadMode::Repeat,
        SpreadDef::Reflect => SpreadMode::Reflect,
    }
}

fn point_or(def: Option<OffsetDef>, default: Point) -> Point {
    def.map(|o| Point::new(o.x as f64, o.y as f64)).unwrap_or(default)
}

fn ramp_of(
    colors: Option<&Map<String, Value>>,
    preset: Option<&PresetDef>,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<ColorRamp> {
    let stops = match (colors, preset) {
        (Some(_), Some(_)) => {
            errors.push(SchemaError::at(path, "gradient names either colors or preset, not both"));
            return None;
        }
        (None, None) => {
            errors.push(SchemaError::at(path, "gradient requires colors or preset"));
            return None;
        }
        (None, Some(PresetDef::Index(i))) => match presets::preset_by_index(*i) {
            Some(stops) => stops,
            None => {
                errors.push(SchemaError::at(
                    &field(path, "preset"),
                    format!("preset index {i} is out of range 1..={}", presets::preset_count()),
                ));
                return None;
            }
        },
        (None, Some(PresetDef::Name(name))) => match presets::preset_by_name(name) {
            Some(stops) => stops,
            None => {
                errors.push(SchemaError::at(&field(path, "preset"), format!("unknown preset \"{name}\"")));
                return None;
            }
        },
        (Some(map), None) => {
            let cp = field(path, "colors");
            let before = errors.len();
            let mut stops = Vec::with_capacity(map.len());
            for (key, v) in map {
                let kp = join(&cp, SchemaPathElem::Key(key.clone()));
                let position = match key.trim().parse::<f32>() {
                    Ok(p) if p.is_finite() && (0.0..=1.0).contains(&p) => p,
                    Ok(p) => {
                        errors.push(SchemaError::at(&kp, format!("stop position {p} is outside [0, 1]")));
                        continue;
                    }
                    Err(_) => {
                        errors.push(SchemaError::at(&kp, "stop position must be a number"));
                        continue;
                    }
                };
                let color = match v {
                    Value::String(s) => match parse_solid(s) {
                        Ok(c) => c,
                        Err(e) => {
                            errors.push(SchemaError::at(&kp, e));
                            continue;
                        }
                    },
                    _ => {
                        errors.push(SchemaError::at(&kp, "stop color must be a color string"));
                        continue;
                    }
                };
                stops.push(GradientStop { position, color });
            }
            if errors.len() != before {
                return None;
            }
            if stops.is_empty() {
                errors.push(SchemaError::at(&cp, "gradient must have at least one color stop"));
                return None;
            }
            stops
        }
    };

    match ColorRamp::new(stops) {
        Ok(ramp) => Some(ramp),
        Err(e) => {
            errors.push(SchemaError::at(&field(path, "colors"), e));
            None
        }
    }
}

fn linear_of(
    def: &LinearGradientDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Color> {
    let ramp = ramp_of(def.colors.as_ref(), def.preset.as_ref(), path, errors);
    let start = point_or(def.start, Point::ORIGIN);
    let end = point_or(def.end, Point::new(f64::from(size.width), 0.0));
    if start == end {
        errors.push(SchemaError::at(path, "linear gradient start and end must differ"));
        return None;
    }
    Some(Color::Linear(LinearGradient {
        start,
        end,
        spread: spread_of(def.spread),
        ramp: ramp?,
    }))
}

fn radial_of(
    def: &RadialGradientDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Color> {
    let ramp = ramp_of(def.colors.as_ref(), def.preset.as_ref(), path, errors);
    let center = point_or(def.center, size.to_rect().center());
    let radius = def
        .radius
        .unwrap_or_else(|| f64::from(size.width.min(size.height)) / 2.0);
    if !radius.is_finite() || radius <= 0.0 {
        errors.push(SchemaError::at(&field(path, "radius"), "radius must be finite and > 0"));
        return None;
    }
    if !def.focal_radius.is_finite() || def.focal_radius < 0.0 {
        errors.push(SchemaError::at(
            &field(path, "focal_radius"),
            "focal_radius must be finite and >= 0",
        ));
        return None;
    }
    Some(Color::Radial(RadialGradient {
        center,
        radius,
        focal_point: point_or(def.focal_point, center),
        focal_radius: def.focal_radius,
        spread: spread_of(def.spread),
        ramp: ramp?,
    }))
}

fn conical_of(
    def: &ConicalGradientDef,
    size: Size,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<Color> {
    let ramp = ramp_of(def.colors.as_ref(), def.preset.as_ref(), path, errors);
    let angle_deg = finite(def.angle, "angle", &field(path, "angle"), errors);
    Some(Color::Conical(ConicalGradient {
        center: point_or(def.center, size.to_rect().center()),
        angle_deg,
        ramp: ramp?,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
