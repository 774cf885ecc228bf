//! Everything a layout references from outside the document: images, icons and fonts.
//!
//! Lookups degrade to "asset absent" rather than failing a card.

pub mod cache;
pub(crate) mod color;
pub mod decode;
pub mod fetch;
pub mod fonts;
pub mod resolve;
pub mod svg_raster;

pub use cache::AssetCache;
pub use decode::{PreparedImage, prepare_image};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{AssetFetcher, FetchResponse, OfflineFetcher};
pub use fonts::{FontManager, FontSource, snap_weight};
pub use resolve::ImageResolver;
