//! In-progress clause list for one template.
//!
//! A [`Draft`] is the unsaved, ordered sequence of [`Clause`]s being edited.
//! Clause ids come from an injected [`IdGenerator`] so that the store stays
//! deterministic under test.

mod clause;
mod ids;
mod store;

pub use clause::{Clause, ClauseField, ClauseId, ClauseInit, DEFAULT_CLAUSE_TITLE};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use store::{Draft, MoveDirection};
