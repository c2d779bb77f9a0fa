use std::fmt;

use serde::{Deserialize, Serialize};

/// Title given to clauses created without one.
pub const DEFAULT_CLAUSE_TITLE: &str = "New Section";

/// Opaque, stable handle for a clause.
///
/// Ids are unique within a draft and never handed out twice by the same
/// generator, so they stay valid across reorders and undo/redo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseId(String);

impl ClauseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of editable legal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: ClauseId,
    /// Short label, may be empty while editing.
    pub title: String,
    /// Author-set flag; never derived.
    #[serde(default)]
    pub required: bool,
    /// Body text with inline markup tokens.
    #[serde(default)]
    pub content: String,
}

impl Clause {
    /// Build a clause from a partial initializer, filling in defaults.
    pub fn from_init(id: ClauseId, init: ClauseInit) -> Self {
        Self {
            id,
            title: init
                .title
                .unwrap_or_else(|| DEFAULT_CLAUSE_TITLE.to_string()),
            required: init.required.unwrap_or(false),
            content: init.content.unwrap_or_default(),
        }
    }

    /// Replace exactly one field.
    pub fn apply(&mut self, field: ClauseField) {
        match field {
            ClauseField::Title(title) => self.title = title,
            ClauseField::Content(content) => self.content = content,
            ClauseField::Required(required) => self.required = required,
        }
    }
}

/// Partial clause used when appending a new clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseInit {
    pub title: Option<String>,
    pub required: Option<bool>,
    pub content: Option<String>,
}

impl ClauseInit {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A single-field mutation of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseField {
    Title(String),
    Content(String),
    Required(bool),
}
