use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

/// Provenance attached to everything handed to the assignment collaborator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub id: String,
    pub assigned_by: String,
    pub created_at: u64,
}

impl Metadata {
    pub fn new(assigned_by: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            assigned_by: assigned_by.into(),
            created_at: OffsetDateTime::now_utc().unix_timestamp().max(0) as u64,
        }
    }

    pub fn assigned_by(&self) -> crate::Result<&str> {
        if self.assigned_by.trim().is_empty() {
            crate::bail!("assigner not found in metadata");
        }

        Ok(&self.assigned_by)
    }
}
