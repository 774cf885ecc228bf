use crate::foundation::core::{Point, Rgba8, Rgba8Premul};
use crate::foundation::math::unit_to_u8;

/// Policy for sampling a gradient outside its `[0, 1]` extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpreadMode {
    /// Clamp to the first/last stop.
    #[default]
    Pad,
    /// Restart the ramp every unit.
    Repeat,
    /// Mirror the ramp every unit.
    Reflect,
}

impl SpreadMode {
    /// Map an unbounded ramp parameter into `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Pad => t.clamp(0.0, 1.0),
            Self::Repeat => t - t.floor(),
            Self::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// A `(position, color)` pair of a color ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub position: f32,
    /// Straight-alpha stop color.
    pub color: Rgba8,
}

/// Sorted, duplicate-free, non-empty list of gradient stops.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    stops: Vec<GradientStop>,
    premul: Vec<[f32; 4]>,
}

impl ColorRamp {
    /// Build a ramp from stops in any order.
    ///
    /// Errors name the offending position so the schema layer can attach a field path.
    pub fn new(mut stops: Vec<GradientStop>) -> Result<Self, String> {
        if stops.is_empty() {
            return Err("gradient must have at least one color stop".to_owned());
        }
        for s in &stops {
            if !s.position.is_finite() || !(0.0..=1.0).contains(&s.position) {
                return Err(format!(
                    "gradient stop position {} is outside [0, 1]",
                    s.position
                ));
            }
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        for pair in stops.windows(2) {
            if pair[0].position == pair[1].position {
                return Err(format!(
                    "duplicate gradient stop position {}",
                    pair[0].position
                ));
            }
        }

        let premul = stops
            .iter()
            .map(|s| {
                let a = f32::from(s.color.a) / 255.0;
                [
                    f32::from(s.color.r) / 255.0 * a,
                    f32::from(s.color.g) / 255.0 * a,
                    f32::from(s.color.b) / 255.0 * a,
                    a,
                ]
            })
            .collect();
        Ok(Self { stops, premul })
    }

    /// Stops in ascending position order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Sample the ramp at `t` (clamped to `[0, 1]`), interpolating in premultiplied space.
    pub fn sample(&self, t: f32) -> Rgba8Premul {
        let t = t.clamp(0.0, 1.0);
        let last = self.stops.len() - 1;

        let c = if t <= self.stops[0].position {
            self.premul[0]
        } else if t >= self.stops[last].position {
            self.premul[last]
        } else {
            let hi = self
                .stops
                .iter()
                .position(|s| s.position >= t)
                .unwrap_or(last);
            let lo = hi.saturating_sub(1);
            let (p0, p1) = (self.stops[lo].position, self.stops[hi].position);
            let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
            let (a, b) = (self.premul[lo], self.premul[hi]);
            [
                a[0] + (b[0] - a[0]) * f,
                a[1] + (b[1] - a[1]) * f,
                a[2] + (b[2] - a[2]) * f,
                a[3] + (b[3] - a[3]) * f,
            ]
        };

        Rgba8Premul {
            r: unit_to_u8(c[0]),
            g: unit_to_u8(c[1]),
            b: unit_to_u8(c[2]),
            a: unit_to_u8(c[3]),
        }
    }
}

/// Gradient along the axis `start -> end`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Axis start in box-local pixels.
    pub start: Point,
    /// Axis end in box-local pixels; differs from `start`.
    pub end: Point,
    /// Sampling beyond the axis ends.
    pub spread: SpreadMode,
    /// Color ramp.
    pub ramp: ColorRamp,
}

/// Two-circle radial gradient from the focal circle to the end circle.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    /// End circle center.
    pub center: Point,
    /// End circle radius (> 0).
    pub radius: f64,
    /// Start circle center.
    pub focal_point: Point,
    /// Start circle radius (>= 0).
    pub focal_radius: f64,
    /// Sampling beyond the end circle.
    pub spread: SpreadMode,
    /// Color ramp.
    pub ramp: ColorRamp,
}

/// Sweep gradient around `center`, clockwise from `angle_deg`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConicalGradient {
    /// Sweep center.
    pub center: Point,
    /// Angle (degrees, clockwise from 3 o'clock) where the ramp starts.
    pub angle_deg: f64,
    /// Color ramp.
    pub ramp: ColorRamp,
}

impl LinearGradient {
    /// Ramp parameter for a point, before spread.
    pub fn param_at(&self, p: Point) -> f64 {
        let d = self.end - self.start;
        let len2 = d.hypot2();
        if len2 <= f64::EPSILON {
            return 0.0;
        }
        (p - self.start).dot(d) / len2
    }

    /// Premultiplied color at a point.
    pub fn sample_at(&self, p: Point) -> Rgba8Premul {
        let t = self.spread.apply(self.param_at(p));
        self.ramp.sample(t as f32)
    }
}

impl RadialGradient {
    /// Largest `t` with non-negative interpolated radius such that `p` lies on circle `t`.
    ///
    /// Returns `None` for points outside the cone spanned by the two circles.
    pub fn param_at(&self, p: Point) -> Option<f64> {
        let cd = self.center - self.focal_point;
        let pd = p - self.focal_point;
        let r0 = self.focal_radius;
        let dr = self.radius - r0;

        let a = cd.hypot2() - dr * dr;
        let b = pd.dot(cd) + r0 * dr;
        let c = pd.hypot2() - r0 * r0;

        let radius_ok = |t: f64| r0 + t * dr >= 0.0;

        if a.abs() < 1e-9 {
            if b.abs() < 1e-12 {
                return None;
            }
            let t = c / (2.0 * b);
            return radius_ok(t).then_some(t);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let s = disc.sqrt();
        let t1 = (b + s) / a;
        let t2 = (b - s) / a;
        let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
        if radius_ok(hi) {
            Some(hi)
        } else if radius_ok(lo) {
            Some(lo)
        } else {
            None
        }
    }

    /// Premultiplied color at a point; transparent outside the gradient cone.
    pub fn sample_at(&self, p: Point) -> Rgba8Premul {
        match self.param_at(p) {
            Some(t) => self.ramp.sample(self.spread.apply(t) as f32),
            None => Rgba8Premul::transparent(),
        }
    }
}

impl ConicalGradient {
    /// Ramp parameter in `[0, 1)` for a point.
    pub fn param_at(&self, p: Point) -> f64 {
        let d = p - self.center;
        // Screen space has y pointing down, so atan2 grows clockwise.
        let deg = d.y.atan2(d.x).to_degrees();
        (deg - self.angle_deg).rem_euclid(360.0) / 360.0
    }

    /// Premultiplied color at a point.
    pub fn sample_at(&self, p: Point) -> Rgba8Premul {
        self.ramp.sample(self.param_at(p) as f32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/gradient.rs"]
mod tests;
