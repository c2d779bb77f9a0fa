use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::Clause;

/// Who can use a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Every branch of the organization
    #[default]
    Organization,
    /// A single branch, named by `branch_id`
    Branch,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Organization => "organization",
            Self::Branch => "branch",
        })
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" | "org" => Ok(Self::Organization),
            "branch" => Ok(Self::Branch),
            other => Err(format!("unknown visibility `{other}`")),
        }
    }
}

/// A template as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    /// Assigned by the store on first save
    #[serde(default)]
    pub id: Option<String>,
    pub organization_id: String,
    #[serde(default)]
    pub branch_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub sections: Vec<Clause>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TemplateRecord {
    /// An unsaved, empty template for `organization_id`.
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            id: None,
            organization_id: organization_id.into(),
            branch_id: None,
            name: String::new(),
            description: String::new(),
            visibility: Visibility::Organization,
            sections: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Check the record can be handed to a store.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.name.trim().is_empty() {
            return Err(SaveError::MissingName);
        }
        if self.visibility == Visibility::Branch
            && self.branch_id.as_deref().is_none_or(|b| b.trim().is_empty())
        {
            return Err(SaveError::MissingBranch);
        }
        Ok(())
    }
}

/// Reasons a save is refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("template name is required")]
    MissingName,
    #[error("branch templates need a branch")]
    MissingBranch,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TemplateRecord {
        TemplateRecord {
            name: name.to_string(),
            ..TemplateRecord::new("org-1")
        }
    }

    #[test]
    fn test_validate_requires_name() {
        assert_eq!(named("").validate(), Err(SaveError::MissingName));
        assert_eq!(named("   ").validate(), Err(SaveError::MissingName));
        assert_eq!(named("NDA").validate(), Ok(()));
    }

    #[test]
    fn test_validate_branch_visibility_needs_branch() {
        let mut record = named("NDA");
        record.visibility = Visibility::Branch;
        assert_eq!(record.validate(), Err(SaveError::MissingBranch));
        record.branch_id = Some("north".to_string());
        assert_eq!(record.validate(), Ok(()));
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let json = serde_json::to_value(named("NDA")).unwrap();
        assert_eq!(json["organizationId"], "org-1");
        assert_eq!(json["visibility"], "organization");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_record_reads_minimal_json() {
        let record: TemplateRecord = serde_json::from_str(
            r#"{"organizationId":"o","name":"Lease","sections":[{"id":"s1","title":"Rent"}]}"#,
        )
        .unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.visibility, Visibility::Organization);
        assert_eq!(record.sections.len(), 1);
        assert_eq!(record.sections[0].title, "Rent");
    }

    #[test]
    fn test_visibility_parses_names() {
        assert_eq!("branch".parse(), Ok(Visibility::Branch));
        assert_eq!("org".parse(), Ok(Visibility::Organization));
        assert!("team".parse::<Visibility>().is_err());
    }
}
