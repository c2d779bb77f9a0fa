use uuid::Uuid;

use super::ClauseId;

/// Source of fresh clause ids.
///
/// Implementations must never return the same id twice.
pub trait IdGenerator {
    fn next_id(&mut self) -> ClauseId;
}

/// Random v4 uuids, used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ClauseId {
        ClauseId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic `prefix1`, `prefix2`, ... ids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("c")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ClauseId {
        let id = ClauseId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
