use tracing::{debug, trace};

use crate::app::Model;
use crate::app::model::{Focus, ToastLevel};
use crate::draft::{ClauseField, ClauseId, ClauseInit, Draft, IdGenerator, MoveDirection};
use crate::markup::{self, MarkupAction, Selection};
use crate::template::{TemplateRecord, Visibility};

/// All possible events and actions in an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Template lifecycle
    /// Start an empty template in the same organization
    NewTemplate,
    /// Switch to a persisted template
    LoadTemplate(TemplateRecord),

    // Clause list
    /// Append a clause, defaults filling unset fields
    AddClause(ClauseInit),
    /// Append a copy of a clause
    DuplicateClause(ClauseId),
    /// Remove a clause
    RemoveClause(ClauseId),
    /// Swap a clause with its neighbour
    MoveClause(ClauseId, MoveDirection),
    /// Free-text edit of one clause field
    UpdateField(ClauseId, ClauseField),

    // Text area focus
    /// Focus a clause's text area with a selection
    Focus(ClauseId, Selection),
    /// Clear focus
    Blur,
    /// Toolbar markup on the focused clause
    ApplyMarkup(MarkupAction),

    // History
    Undo,
    Redo,

    // Template fields
    Rename(String),
    SetDescription(String),
    SetVisibility(Visibility),
    SetBranch(Option<String>),

    // Preview and save
    /// Toggle the read-only preview
    TogglePreview,
    /// The store accepted a save
    SaveSucceeded(TemplateRecord),
    /// A save was refused or the store failed
    SaveFailed(String),
    /// Hide the current toast
    DismissToast,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of the session - all state transitions happen here.
/// Saving is a side effect and happens outside, reporting back through
/// [`Message::SaveSucceeded`] or [`Message::SaveFailed`].
pub fn update(mut model: Model, msg: Message) -> Model {
    trace!(?msg, "update");
    match msg {
        Message::NewTemplate => {
            let organization_id = model.template.organization_id.clone();
            model.load(TemplateRecord::new(organization_id));
        }
        Message::LoadTemplate(record) => model.load(record),

        Message::AddClause(init) => {
            let mut added = None;
            record_edit(&mut model, |draft, ids| {
                added = Some(draft.add_clause(ids, init));
                true
            });
            if let Some(clause) = added {
                model.focus = Some(Focus {
                    clause,
                    selection: Selection::caret(0),
                });
            }
        }
        Message::DuplicateClause(id) => {
            record_edit(&mut model, |draft, ids| {
                draft.duplicate_clause(ids, &id).is_some()
            });
        }
        Message::RemoveClause(id) => {
            if record_edit(&mut model, |draft, _| draft.remove_clause(&id)) {
                model.sync_focus();
            }
        }
        Message::MoveClause(id, direction) => {
            record_edit(&mut model, |draft, _| draft.move_clause(&id, direction));
        }
        // Typing is not recorded in history.
        Message::UpdateField(id, field) => {
            if model.draft.update_field(&id, field) {
                model.dirty = true;
                model.sync_focus();
            }
        }

        Message::Focus(id, selection) => {
            if let Some(clause) = model.draft.get(&id) {
                model.focus = Some(Focus {
                    selection: selection.clamped(&clause.content),
                    clause: id,
                });
            } else {
                debug!(clause = %id, "focus ignored: unknown clause");
            }
        }
        Message::Blur => model.focus = None,
        Message::ApplyMarkup(action) => apply_markup(&mut model, action),

        Message::Undo => {
            if let Some(previous) = model.history.undo(model.draft.clone()) {
                model.draft = previous;
                model.dirty = true;
                model.sync_focus();
            }
        }
        Message::Redo => {
            if let Some(next) = model.history.redo(model.draft.clone()) {
                model.draft = next;
                model.dirty = true;
                model.sync_focus();
            }
        }

        Message::Rename(name) => {
            model.template.name = name;
            model.dirty = true;
        }
        Message::SetDescription(description) => {
            model.template.description = description;
            model.dirty = true;
        }
        Message::SetVisibility(visibility) => {
            model.template.visibility = visibility;
            model.dirty = true;
        }
        Message::SetBranch(branch) => {
            model.template.branch_id = branch;
            model.dirty = true;
        }

        Message::TogglePreview => model.preview_visible = !model.preview_visible,
        Message::SaveSucceeded(record) => {
            model.template.id = record.id;
            model.template.created_at = record.created_at;
            model.template.updated_at = record.updated_at;
            model.dirty = false;
            model.show_toast(ToastLevel::Info, "Template saved");
        }
        Message::SaveFailed(reason) => model.show_toast(ToastLevel::Error, reason),
        Message::DismissToast => model.clear_toast(),
    }
    model
}

/// Run a structural edit, recording the prior draft only if it changed.
fn record_edit(
    model: &mut Model,
    edit: impl FnOnce(&mut Draft, &mut dyn IdGenerator) -> bool,
) -> bool {
    let before = model.draft.clone();
    let changed = edit(&mut model.draft, model.ids.as_mut());
    if changed {
        model.history.record_before_edit(&before);
        model.dirty = true;
    }
    changed
}

fn apply_markup(model: &mut Model, action: MarkupAction) {
    let Some((clause, selection)) = model.edit_target() else {
        debug!(%action, "markup ignored: empty draft");
        return;
    };
    let id = clause.id.clone();
    let edit = markup::apply(&clause.content, selection, action);
    record_edit(model, |draft, _| {
        draft.update_field(&id, ClauseField::Content(edit.text))
    });
    model.focus = Some(Focus {
        clause: id,
        selection: edit.selection,
    });
}
