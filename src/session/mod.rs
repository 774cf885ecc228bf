//! Build-run state shared by every card.

pub mod config;
pub mod context;

pub use config::{CardsConfig, DebugConfig};
pub use context::{CardJob, CardsContext, PageContext};
