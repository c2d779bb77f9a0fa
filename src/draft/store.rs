use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Clause, ClauseField, ClauseId, ClauseInit, IdGenerator};

/// Suffix appended to the title of a duplicated clause.
const COPY_SUFFIX: &str = " Copy";

/// Direction for moving a clause one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ordered clause list of one in-progress template.
///
/// Order is only changed by explicit insert, remove and move calls.
/// Operations naming an unknown id are silent no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft {
    clauses: Vec<Clause>,
}

impl Draft {
    /// Create an empty draft.
    pub const fn empty() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Create a draft from already-persisted clauses.
    pub const fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Clause ids in draft order.
    pub fn ids(&self) -> Vec<ClauseId> {
        self.clauses.iter().map(|c| c.id.clone()).collect()
    }

    pub fn position(&self, id: &ClauseId) -> Option<usize> {
        self.clauses.iter().position(|c| &c.id == id)
    }

    pub fn get(&self, id: &ClauseId) -> Option<&Clause> {
        self.clauses.iter().find(|c| &c.id == id)
    }

    pub fn first(&self) -> Option<&Clause> {
        self.clauses.first()
    }

    /// Consume the draft, yielding its clauses in order.
    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }

    /// Append a new clause and return its id.
    pub fn add_clause(&mut self, ids: &mut dyn IdGenerator, init: ClauseInit) -> ClauseId {
        let id = ids.next_id();
        self.clauses.push(Clause::from_init(id.clone(), init));
        debug!(clause = %id, count = self.clauses.len(), "clause added");
        id
    }

    /// Append a copy of `id` with a fresh id and a " Copy" title suffix.
    ///
    /// Returns `None` when `id` is not in the draft.
    pub fn duplicate_clause(
        &mut self,
        ids: &mut dyn IdGenerator,
        id: &ClauseId,
    ) -> Option<ClauseId> {
        let Some(original) = self.get(id) else {
            debug!(clause = %id, "duplicate ignored: unknown clause");
            return None;
        };
        let mut copy = original.clone();
        copy.id = ids.next_id();
        copy.title.push_str(COPY_SUFFIX);
        let new_id = copy.id.clone();
        self.clauses.push(copy);
        debug!(source = %id, clause = %new_id, "clause duplicated");
        Some(new_id)
    }

    /// Remove `id`, keeping the relative order of the rest.
    ///
    /// Returns `true` if a clause was removed.
    pub fn remove_clause(&mut self, id: &ClauseId) -> bool {
        let Some(idx) = self.position(id) else {
            debug!(clause = %id, "remove ignored: unknown clause");
            return false;
        };
        self.clauses.remove(idx);
        true
    }

    /// Swap `id` with its neighbour in `direction`.
    ///
    /// Returns `false` for unknown ids and at the first/last boundary.
    pub fn move_clause(&mut self, id: &ClauseId, direction: MoveDirection) -> bool {
        let Some(idx) = self.position(id) else {
            debug!(clause = %id, "move ignored: unknown clause");
            return false;
        };
        let target = match direction {
            MoveDirection::Up if idx > 0 => idx - 1,
            MoveDirection::Down if idx + 1 < self.clauses.len() => idx + 1,
            _ => return false,
        };
        self.clauses.swap(idx, target);
        true
    }

    /// Replace a single field of `id` in place.
    ///
    /// Returns `true` if the clause exists.
    pub fn update_field(&mut self, id: &ClauseId, field: ClauseField) -> bool {
        let Some(clause) = self.clauses.iter_mut().find(|c| &c.id == id) else {
            debug!(clause = %id, "update ignored: unknown clause");
            return false;
        };
        clause.apply(field);
        true
    }
}

impl<'a> IntoIterator for &'a Draft {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
