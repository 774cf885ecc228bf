//! Line breaking and glyph shaping for typography layers.

pub mod measure;
pub mod wrap;

pub use measure::{MonospaceMeasure, ParleyMeasure, ShapedGlyph, ShapedLine, TextMeasure};
pub use wrap::{MIN_FONT_SIZE, TextBlock, TextLine, TextParams, layout_text, wrap_lines};
