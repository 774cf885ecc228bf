#![forbid(unsafe_code)]

//! Layered social-media preview cards.
//!
//! A layout document (JSON or YAML) is validated into a [`Layout`], its images
//! and fonts are resolved through an on-disk cache, and its layers are drawn in
//! order onto a premultiplied RGBA canvas that is written as PNG.

pub mod assets;
pub mod foundation;
pub mod geometry;
pub mod paint;
pub mod render;
pub mod scene;
pub mod schema;
pub mod session;
pub mod text;

pub use assets::{
    AssetCache, AssetFetcher, FetchResponse, FontManager, FontSource, ImageResolver,
    OfflineFetcher, snap_weight,
};
#[cfg(feature = "http")]
pub use assets::HttpFetcher;
pub use foundation::core::{MAX_RASTER_EDGE, Offset, Rgba8, Rgba8Premul, Size};
pub use foundation::error::{CardError, CardResult};
pub use geometry::{ArcSpan, Corners, Shape, Sides};
pub use paint::Color;
pub use render::{Canvas, RenderEnv, render_layout};
pub use scene::layout::{
    Align, AspectPolicy, Background, Border, FontSpec, Icon, Layer, LayerKind, Layout, LineSpec,
    Mask, Overflow, ShapeLayer, Typography,
};
pub use schema::validate::{SchemaError, SchemaErrors, SchemaPathElem};
pub use schema::{DocFormat, parse_layout};
pub use session::{CardJob, CardsConfig, CardsContext, DebugConfig, PageContext};
pub use text::{MonospaceMeasure, ParleyMeasure, TextBlock, TextMeasure, TextParams, layout_text};
