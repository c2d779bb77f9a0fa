use chrono::{DateTime, Utc};

use crate::draft::{Clause, ClauseId, Draft, IdGenerator};
use crate::history::History;
use crate::markup::Selection;
use crate::template::{SaveError, TemplateRecord, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
}

/// Template fields edited alongside the clause list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMeta {
    pub id: Option<String>,
    pub organization_id: String,
    pub branch_id: Option<String>,
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TemplateMeta {
    fn from_record(record: &TemplateRecord) -> Self {
        Self {
            id: record.id.clone(),
            organization_id: record.organization_id.clone(),
            branch_id: record.branch_id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            visibility: record.visibility,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// The clause whose text area has focus, and its selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    pub clause: ClauseId,
    pub selection: Selection,
}

/// The complete editing-session state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Metadata of the active template
    pub template: TemplateMeta,
    /// Unsaved clause list
    pub draft: Draft,
    /// Snapshots of `draft` taken before each recorded edit
    pub history: History<Draft>,
    /// Focused clause, if any
    pub focus: Option<Focus>,
    /// Whether the read-only preview is shown
    pub preview_visible: bool,
    /// Whether there are edits since the last load or save
    pub dirty: bool,
    toast: Option<Toast>,
    pub(super) ids: Box<dyn IdGenerator>,
}

impl Model {
    /// Create a session for `record`.
    pub fn new(record: TemplateRecord, ids: Box<dyn IdGenerator>, history_depth: usize) -> Self {
        Self {
            template: TemplateMeta::from_record(&record),
            draft: Draft::from_clauses(record.sections),
            history: History::new(history_depth),
            focus: None,
            preview_visible: false,
            dirty: false,
            toast: None,
            ids,
        }
    }

    /// Replace the active template, discarding the draft and its history.
    pub fn load(&mut self, record: TemplateRecord) {
        self.template = TemplateMeta::from_record(&record);
        self.draft = Draft::from_clauses(record.sections);
        self.history.clear();
        self.focus = None;
        self.dirty = false;
    }

    /// Snapshot of the session as a template record.
    pub fn to_record(&self) -> TemplateRecord {
        TemplateRecord {
            id: self.template.id.clone(),
            organization_id: self.template.organization_id.clone(),
            branch_id: self.template.branch_id.clone(),
            name: self.template.name.trim().to_string(),
            description: self.template.description.clone(),
            visibility: self.template.visibility,
            sections: self.draft.clauses().to_vec(),
            created_at: self.template.created_at,
            updated_at: self.template.updated_at,
        }
    }

    /// Validate and snapshot the session for a store.
    pub fn prepare_save(&self) -> Result<TemplateRecord, SaveError> {
        let record = self.to_record();
        record.validate()?;
        Ok(record)
    }

    /// Clause and selection a markup action applies to.
    ///
    /// Falls back to a caret at the end of the first clause when nothing
    /// has focus.
    pub fn edit_target(&self) -> Option<(&Clause, Selection)> {
        if let Some(focus) = &self.focus
            && let Some(clause) = self.draft.get(&focus.clause)
        {
            return Some((clause, focus.selection.clamped(&clause.content)));
        }
        self.draft
            .first()
            .map(|clause| (clause, Selection::end_of(&clause.content)))
    }

    /// Drop focus on a missing clause and clamp the selection otherwise.
    pub(super) fn sync_focus(&mut self) {
        self.focus = self.focus.take().and_then(|focus| {
            let clause = self.draft.get(&focus.clause)?;
            Some(Focus {
                selection: focus.selection.clamped(&clause.content),
                clause: focus.clause,
            })
        });
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
        });
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }

    pub fn toast(&self) -> Option<(ToastLevel, &str)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.level, toast.message.as_str()))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("template", &self.template)
            .field("clauses", &self.draft.len())
            .field("undo_depth", &self.history.undo_depth())
            .field("redo_depth", &self.history.redo_depth())
            .field("focus", &self.focus)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
