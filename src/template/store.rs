use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::TemplateRecord;

/// Failures reported by a template store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("template not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid template JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Rejected(String),
}

/// Persistence boundary for one template.
///
/// `save` returns the record as stored, which may carry an id and
/// timestamps assigned by the store.
pub trait TemplateStore {
    fn load(&self) -> Result<TemplateRecord, StoreError>;
    fn save(&mut self, record: &TemplateRecord) -> Result<TemplateRecord, StoreError>;
}

/// Stores a single template as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TemplateStore for JsonFileStore {
    fn load(&self) -> Result<TemplateRecord, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, record: &TemplateRecord) -> Result<TemplateRecord, StoreError> {
        let now = Utc::now();
        let mut stored = record.clone();
        if stored.id.is_none() {
            stored.id = Some(Uuid::new_v4().simple().to_string());
        }
        stored.created_at.get_or_insert(now);
        stored.updated_at = Some(now);

        let json = serde_json::to_string_pretty(&stored).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, format!("{json}\n")).map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), sections = stored.sections.len(), "template saved");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{Clause, ClauseId, ClauseInit};
    use tempfile::tempdir;

    fn record() -> TemplateRecord {
        TemplateRecord {
            name: "Services Agreement".to_string(),
            sections: vec![Clause::from_init(
                ClauseId::new("s1"),
                ClauseInit::default().with_content("**Fees** apply."),
            )],
            ..TemplateRecord::new("org-1")
        }
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_save_assigns_id_and_timestamps() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("t.json"));
        let saved = store.save(&record()).unwrap();
        assert!(store.exists());
        assert_eq!(store.path(), dir.path().join("t.json"));
        assert!(saved.id.is_some());
        assert!(saved.created_at.is_some());
        assert_eq!(saved.created_at, saved.updated_at);

        let loaded = store.load().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_resave_keeps_id_and_created_at() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("t.json"));
        let first = store.save(&record()).unwrap();
        let second = store.save(&first).unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json { .. })));
    }
}
