//! Selection-relative markup transforms.
//!
//! Every transform is a pure function of `(text, selection, action)` that
//! returns the new text and the selection to restore. Applying the result
//! to a clause, and restoring focus, is the caller's job.

mod selection;
mod transform;

pub use selection::Selection;
pub use transform::{
    Edit, HEADING_PLACEHOLDER, HeadingLevel, LINE_PLACEHOLDER, MarkupAction, UnknownAction, apply,
};
