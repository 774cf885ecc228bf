use kurbo::{Arc, Ellipse, RoundedRect, RoundedRectRadii, Shape as _};

use crate::foundation::core::{BezPath, Point, Size, Vec2};

/// Flattening tolerance (in pixels) used when converting curves to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Which rectangle corners are rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corners {
    /// Upper-left corner.
    pub top_left: bool,
    /// Upper-right corner.
    pub top_right: bool,
    /// Lower-right corner.
    pub bottom_right: bool,
    /// Lower-left corner.
    pub bottom_left: bool,
}

impl Corners {
    /// Every corner rounded.
    pub const ALL: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };

    /// No corner rounded.
    pub const NONE: Self = Self {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };

    fn radii(self, r: f64) -> RoundedRectRadii {
        let pick = |on: bool| if on { r } else { 0.0 };
        RoundedRectRadii::new(
            pick(self.top_left),
            pick(self.top_right),
            pick(self.bottom_right),
            pick(self.bottom_left),
        )
    }
}

impl Default for Corners {
    fn default() -> Self {
        Self::ALL
    }
}

/// Angular span of an ellipse, degrees clockwise from 3 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpan {
    /// Start angle.
    pub start_deg: f64,
    /// End angle.
    pub end_deg: f64,
}

impl ArcSpan {
    /// Clockwise sweep in `(0, 360]`.
    ///
    /// An end angle at or before the start wraps around once, so `{start: 270, end: 90}`
    /// sweeps 180 degrees.
    pub fn sweep_deg(self) -> f64 {
        let d = self.end_deg - self.start_deg;
        if d >= 360.0 {
            360.0
        } else if d > 0.0 {
            d
        } else {
            let w = d.rem_euclid(360.0);
            if w == 0.0 { 360.0 } else { w }
        }
    }

    /// `true` when the span covers the whole ellipse.
    pub fn is_full(self) -> bool {
        self.sweep_deg() >= 360.0
    }
}

/// Polygon vertex source.
#[derive(Clone, Debug, PartialEq)]
pub enum Sides {
    /// Regular polygon with this many vertices (>= 3).
    Regular(u32),
    /// Explicit box-relative vertices (>= 2), closed implicitly.
    Points(Vec<Point>),
}

/// Outline geometry of a shape layer or mask, independent of its fill.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Box with optionally rounded corners.
    Rectangle {
        /// Corner radius before clamping to half the shorter side.
        radius: f64,
        /// Corners that receive the radius.
        corners: Corners,
    },
    /// Ellipse inscribed in the box, optionally a pie slice.
    Ellipse {
        /// Partial sweep; `None` is the full ellipse.
        arc: Option<ArcSpan>,
        /// Stroke the slice edges back to the center.
        border_to_origin: bool,
    },
    /// Closed polygon.
    Polygon {
        /// Vertex source.
        sides: Sides,
        /// Clockwise rotation in degrees, applied to regular polygons.
        rotation_deg: f64,
    },
}

impl Shape {
    /// Closed path whose interior is the filled area, in box-local pixels.
    pub fn fill_path(&self, size: Size) -> BezPath {
        let bounds = size.to_rect();
        match self {
            Self::Rectangle { radius, corners } => {
                let r = radius.max(0.0).min(bounds.width().min(bounds.height()) / 2.0);
                if r <= 0.0 || *corners == Corners::NONE {
                    return bounds.to_path(PATH_TOLERANCE);
                }
                RoundedRect::from_rect(bounds, corners.radii(r)).to_path(PATH_TOLERANCE)
            }
            Self::Ellipse { arc, .. } => {
                let center = bounds.center();
                let radii = Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0);
                match *arc {
                    Some(span) if !span.is_full() => pie_slice(center, radii, span),
                    _ => Ellipse::new(center, radii, 0.0).to_path(PATH_TOLERANCE),
                }
            }
            Self::Polygon {
                sides,
                rotation_deg,
            } => {
                let pts = match sides {
                    Sides::Regular(n) => regular_polygon_vertices(*n, *rotation_deg, size),
                    Sides::Points(p) => p.clone(),
                };
                closed_polyline(&pts)
            }
        }
    }

    /// Path traced by the border.
    ///
    /// Matches [`Shape::fill_path`] except for partial ellipse arcs without
    /// `border_to_origin`, where only the curved edge is stroked.
    pub fn outline_path(&self, size: Size) -> BezPath {
        if let Self::Ellipse {
            arc: Some(span),
            border_to_origin: false,
        } = self
            && !span.is_full()
        {
            let bounds = size.to_rect();
            let radii = Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0);
            return arc_of(bounds.center(), radii, *span).path_elements(PATH_TOLERANCE).collect();
        }
        self.fill_path(size)
    }

    /// `false` for degenerate polygons whose vertices enclose no area.
    pub fn encloses_area(&self, size: Size) -> bool {
        match self {
            Self::Polygon { .. } => self.fill_path(size).area().abs() > 1e-6,
            _ => true,
        }
    }
}

fn arc_of(center: Point, radii: Vec2, span: ArcSpan) -> Arc {
    Arc::new(
        center,
        radii,
        span.start_deg.to_radians(),
        span.sweep_deg().to_radians(),
        0.0,
    )
}

fn pie_slice(center: Point, radii: Vec2, span: ArcSpan) -> BezPath {
    let arc = arc_of(center, radii, span);
    let start = span.start_deg.to_radians();
    let first = Point::new(
        center.x + radii.x * start.cos(),
        center.y + radii.y * start.sin(),
    );
    let mut path = BezPath::new();
    path.move_to(center);
    path.line_to(first);
    path.extend(arc.append_iter(PATH_TOLERANCE));
    path.close_path();
    path
}

fn closed_polyline(pts: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = pts.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Vertices of a regular polygon inscribed in the box.
///
/// The first vertex sits at 12 o'clock before `rotation_deg` (clockwise) is
/// applied; each following vertex rotates the unit vector by `2π / sides`.
pub fn regular_polygon_vertices(sides: u32, rotation_deg: f64, size: Size) -> Vec<Point> {
    let bounds = size.to_rect();
    let c = bounds.center();
    let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);
    let step = std::f64::consts::TAU / f64::from(sides.max(1));
    let start = (rotation_deg - 90.0).to_radians();
    (0..sides)
        .map(|i| {
            let a = start + step * f64::from(i);
            Point::new(c.x + rx * a.cos(), c.y + ry * a.sin())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shapes.rs"]
mod tests;
