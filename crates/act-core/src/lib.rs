//! Core library for completed-work acts ("акт выполненных работ").
//!
//! This crate provides:
//! - Free-form act text parsing (header, line item dialects, deduplication)
//! - Vocabulary sanitizing run before parsing
//! - Confirmation preview and canonical re-parseable text
//! - Document rendering (text template, CSV, JSON)
//! - A per-user session store for submit / confirm flows

pub mod error;
pub mod format;
pub mod models;
pub mod parser;
pub mod render;
pub mod session;

pub use error::{ActError, ParseError, ParseErrorKind, RenderError, Result, SessionError};
pub use format::{format_amount, render_canonical, render_preview, PreviewFormatter};
pub use models::act::{ActRecord, LineItem};
pub use models::config::ActConfig;
pub use parser::{parse_act, parse_item, ActParser, Dialect, ParsedAct, RuleActParser};
pub use render::{render_document, renderer_for, DocumentRenderer, RenderedDocument};
pub use session::{SessionState, SessionStore, UserId};
