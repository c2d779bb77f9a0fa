//! Persisted template records and the storage boundary.
//!
//! The editing session never performs I/O itself. It hands a validated
//! [`TemplateRecord`] to a [`TemplateStore`] and is told whether the save
//! settled or failed.

mod record;
mod store;

pub use record::{SaveError, TemplateRecord, Visibility};
pub use store::{JsonFileStore, StoreError, TemplateStore};
