// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. template::TemplateStore)
    clippy::module_name_repetitions
)]

//! # Clausedraft
//!
//! Editing core for legal document templates built from ordered clauses.
//!
//! Clausedraft provides:
//! - An ordered clause list with add, duplicate, remove and move
//! - Toolbar markup applied relative to a text selection
//! - Bounded undo/redo over clause-list snapshots
//! - A markdown-lite preview for terminal or HTML output
//!
//! ## Architecture
//!
//! The editing session uses The Elm Architecture (TEA) pattern:
//! - **Model**: Session state
//! - **Message**: Edits and events
//! - **Update**: Pure state transitions
//! - **View**: Preview and outline output
//!
//! ## Modules
//!
//! - [`app`]: Editing session and script runner
//! - [`draft`]: Clause list store
//! - [`markup`]: Selection-relative markup transforms
//! - [`history`]: Undo/redo snapshots
//! - [`preview`]: Markdown-lite rendering
//! - [`template`]: Template records and persistence
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod draft;
pub mod history;
pub mod markup;
pub mod preview;
pub mod template;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::draft::{ClauseId, Draft};
    pub use crate::markup::{MarkupAction, Selection};
    pub use crate::template::TemplateRecord;
}
