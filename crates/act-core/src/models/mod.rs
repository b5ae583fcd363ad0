//! Data models for acts and pipeline configuration.

pub mod act;
pub mod config;

pub use act::{round_amount, ActRecord, LineItem, DEFAULT_UNIT};
pub use config::{ActConfig, ParserConfig, RenderConfig, RenderFormat, SanitizerConfig};
