//! Shape outlines in box-local pixel space.

pub mod shapes;

pub use shapes::{ArcSpan, Corners, Shape, Sides, regular_polygon_vertices};
