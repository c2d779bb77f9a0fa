//! Editing session and script runner.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete session state
//! - [`Message`]: All possible edits and events
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Script loop that feeds commands to `update` and performs
//!   the save side effect

mod effects;
mod event_loop;
mod input;
mod model;
mod update;
mod view;

pub use input::{Command, InputError, parse_command};
pub use model::{Focus, Model, TemplateMeta, ToastLevel};
pub use update::{Message, update};
pub use view::{OutputMode, write_draft, write_outline};

use crate::draft::IdGenerator;
use crate::history::DEFAULT_MAX_DEPTH;
use crate::template::{StoreError, TemplateRecord, TemplateStore};

/// Organization used for new templates when none is configured.
pub const DEFAULT_ORGANIZATION: &str = "local";

/// Owns the store and output settings for one editing run.
pub struct App {
    store: Box<dyn TemplateStore>,
    history_depth: usize,
    output: OutputMode,
    organization_id: String,
}

impl App {
    /// Create an app backed by `store`.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self {
            store,
            history_depth: DEFAULT_MAX_DEPTH,
            output: OutputMode::Styled,
            organization_id: DEFAULT_ORGANIZATION.to_string(),
        }
    }

    /// Limit the number of undo steps kept.
    pub const fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Choose how previews are written.
    pub const fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Organization assigned to new templates.
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = organization_id.into();
        self
    }

    /// Start a session from the store, or a new template if it has none.
    pub fn open(&self, ids: Box<dyn IdGenerator>) -> Result<Model, StoreError> {
        let record = match self.store.load() {
            Ok(record) => record,
            Err(StoreError::NotFound(_)) => TemplateRecord::new(self.organization_id.clone()),
            Err(err) => return Err(err),
        };
        Ok(Model::new(record, ids, self.history_depth))
    }
}
