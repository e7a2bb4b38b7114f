//! Academic output (publications and similar deliverables).

use crate::model::project::ProjectId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an academic output record.
pub type AcademicOutputId = Uuid;

/// A publication or similar deliverable produced by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicOutput {
    pub uuid: AcademicOutputId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    /// Free-form output category, e.g. `"Artigo"`.
    pub kind: String,
}

impl AcademicOutput {
    /// Creates a new output record with a generated stable ID.
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            project_id,
            title: title.into(),
            description: description.into(),
            kind: kind.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "academic_output",
                field: "title",
            });
        }
        Ok(())
    }
}
