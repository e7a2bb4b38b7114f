//! Project aggregate and researcher assignment models.
//!
//! # Responsibility
//! - Define the project record and its derived lifecycle status.
//! - Define role-tagged researcher/project assignments.
//!
//! # Invariants
//! - `Project::status()` is recomputed on every call; the status is never
//!   persisted or cached.
//! - Cancellation takes precedence over a set conclusion date.

use crate::model::researcher::ResearcherId;
use crate::model::ValidationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;
/// Stable identifier for a researcher/project assignment.
pub type AssignmentId = Uuid;

/// Derived lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// The project was canceled. Wins over a set conclusion date.
    Cancelado,
    /// The project has a conclusion date and was not canceled.
    Concluido,
    /// Default state: neither canceled nor concluded.
    EmAndamento,
}

impl ProjectStatus {
    /// Canonical uppercase tag, matching the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cancelado => "CANCELADO",
            Self::Concluido => "CONCLUIDO",
            Self::EmAndamento => "EM_ANDAMENTO",
        }
    }
}

/// Role a researcher holds on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Lead researcher. At most one per project.
    Coordenador,
    /// Regular project researcher.
    Pesquisador,
    /// External or supporting collaborator.
    Colaborador,
}

impl Role {
    pub fn is_coordinator(self) -> bool {
        matches!(self, Self::Coordenador)
    }
}

/// A funded research initiative; aggregation root for contributions,
/// outputs, and researcher assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub uuid: ProjectId,
    pub title: String,
    pub objective: String,
    pub created_on: NaiveDate,
    pub requested_amount: Decimal,
    /// Set when the project concluded; `None` while in progress.
    pub concluded_on: Option<NaiveDate>,
    pub canceled: bool,
}

impl Project {
    /// Creates a new in-progress project with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        objective: impl Into<String>,
        created_on: NaiveDate,
        requested_amount: Decimal,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, objective, created_on, requested_amount)
    }

    /// Creates a project with a caller-provided stable ID.
    pub fn with_id(
        uuid: ProjectId,
        title: impl Into<String>,
        objective: impl Into<String>,
        created_on: NaiveDate,
        requested_amount: Decimal,
    ) -> Self {
        Self {
            uuid,
            title: title.into(),
            objective: objective.into(),
            created_on,
            requested_amount,
            concluded_on: None,
            canceled: false,
        }
    }

    /// Derives the current lifecycle status from `canceled` and
    /// `concluded_on`, in that priority order.
    pub fn status(&self) -> ProjectStatus {
        if self.canceled {
            ProjectStatus::Cancelado
        } else if self.concluded_on.is_some() {
            ProjectStatus::Concluido
        } else {
            ProjectStatus::EmAndamento
        }
    }

    /// Flags the project as canceled.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    /// Records the conclusion date.
    pub fn conclude(&mut self, date: NaiveDate) {
        self.concluded_on = Some(date);
    }

    /// Clears both cancellation and conclusion, returning to in-progress.
    pub fn reopen(&mut self) {
        self.canceled = false;
        self.concluded_on = None;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "project",
                field: "title",
            });
        }
        if self.requested_amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(self.requested_amount));
        }
        Ok(())
    }
}

/// Join record linking one researcher to one project with a role tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub uuid: AssignmentId,
    pub researcher_id: ResearcherId,
    pub project_id: ProjectId,
    pub role: Role,
}

impl Assignment {
    /// Creates a new assignment with a generated stable ID.
    pub fn new(researcher_id: ResearcherId, project_id: ProjectId, role: Role) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            researcher_id,
            project_id,
            role,
        }
    }
}
