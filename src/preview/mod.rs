//! Read-only preview of marked-up clause text.
//!
//! This module handles:
//! - Running the ordered substitution passes that turn clause text into
//!   preview markup ([`render`])
//! - Reading that markup back into styled blocks ([`Preview`])
//! - Writing a preview to a terminal ([`write_terminal`])

mod render;
mod terminal;
mod types;

pub use render::{escape, render};
pub use terminal::write_terminal;
pub use types::{BlockKind, InlineSpan, InlineStyle, Preview, PreviewBlock};
