//! Project use-case service.
//!
//! # Responsibility
//! - Provide lifecycle entry points (create, cancel, conclude, reopen).
//! - Record owned relations (contributions, outputs, assignments).
//! - Combine the derived views into one `ProjectOverview` read model.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Status is derived from the freshly loaded project, never cached here.

use crate::model::funding::{AmountRaised, FundingAgencyId};
use crate::model::output::AcademicOutput;
use crate::model::project::{Assignment, Project, ProjectId, ProjectStatus, Role};
use crate::model::researcher::{Researcher, ResearcherId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Request model for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub title: String,
    pub objective: String,
    pub created_on: NaiveDate,
    pub requested_amount: Decimal,
}

/// Request model for recording one funding contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAmountRequest {
    pub project_id: ProjectId,
    /// Contributing agency, when known.
    pub agency_id: Option<FundingAgencyId>,
    pub amount: Decimal,
    pub description: String,
    pub received_on: NaiveDate,
}

/// Combined read model over a project and its derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    pub status: ProjectStatus,
    pub total_raised: Decimal,
    pub coordinator: Option<Researcher>,
}

/// Use-case service wrapper for the project aggregate.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a new in-progress project.
    pub fn create_project(&self, request: &CreateProjectRequest) -> RepoResult<Project> {
        let project = Project::new(
            request.title.clone(),
            request.objective.clone(),
            request.created_on,
            request.requested_amount,
        );
        self.repo.create_project(&project)?;
        Ok(project)
    }

    /// Persists field mutations of an existing project.
    pub fn update_project(&self, project: &Project) -> RepoResult<()> {
        self.repo.update_project(project)
    }

    /// Gets one project by stable ID.
    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    /// Lists all projects ordered by creation date.
    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.list_projects()
    }

    /// Flags a project as canceled and returns the updated record.
    pub fn cancel_project(&self, id: ProjectId) -> RepoResult<Project> {
        self.mutate(id, Project::cancel)
    }

    /// Records the conclusion date and returns the updated record.
    pub fn conclude_project(&self, id: ProjectId, date: NaiveDate) -> RepoResult<Project> {
        self.mutate(id, |project| project.conclude(date))
    }

    /// Clears cancellation/conclusion and returns the updated record.
    pub fn reopen_project(&self, id: ProjectId) -> RepoResult<Project> {
        self.mutate(id, Project::reopen)
    }

    /// Records one funding contribution against an existing project.
    pub fn record_amount(&self, request: &RecordAmountRequest) -> RepoResult<AmountRaised> {
        let mut amount = AmountRaised::new(
            request.project_id,
            request.amount,
            request.description.clone(),
            request.received_on,
        );
        amount.agency_id = request.agency_id;
        self.repo.record_amount(&amount)?;
        Ok(amount)
    }

    /// Registers one academic output for an existing project.
    pub fn register_output(
        &self,
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: impl Into<String>,
    ) -> RepoResult<AcademicOutput> {
        let output = AcademicOutput::new(project_id, title, description, kind);
        self.repo.register_output(&output)?;
        Ok(output)
    }

    /// Assigns a researcher to a project with the given role.
    ///
    /// Returns `RepoError::DuplicateCoordinator` when the project already has
    /// a COORDENADOR assignment and `role` is COORDENADOR again.
    pub fn assign_researcher(
        &self,
        researcher_id: ResearcherId,
        project_id: ProjectId,
        role: Role,
    ) -> RepoResult<Assignment> {
        let assignment = Assignment::new(researcher_id, project_id, role);
        self.repo.assign_researcher(&assignment)?;
        Ok(assignment)
    }

    /// Exact decimal total of contributions; zero for an unfunded project.
    pub fn total_raised(&self, project_id: ProjectId) -> RepoResult<Decimal> {
        self.repo.total_raised(project_id)
    }

    /// Looks up the project's coordinator, if one is assigned.
    pub fn coordinator(&self, project_id: ProjectId) -> RepoResult<Option<Researcher>> {
        self.repo.coordinator(project_id)
    }

    /// Builds the combined derived-view read model for one project.
    pub fn overview(&self, id: ProjectId) -> RepoResult<ProjectOverview> {
        let project = self.require(id)?;
        let status = project.status();
        let total_raised = self.repo.total_raised(id)?;
        let coordinator = self.repo.coordinator(id)?;
        Ok(ProjectOverview {
            project,
            status,
            total_raised,
            coordinator,
        })
    }

    fn require(&self, id: ProjectId) -> RepoResult<Project> {
        self.repo.get_project(id)?.ok_or(RepoError::NotFound(id))
    }

    fn mutate(&self, id: ProjectId, apply: impl FnOnce(&mut Project)) -> RepoResult<Project> {
        let mut project = self.require(id)?;
        apply(&mut project);
        self.repo.update_project(&project)?;
        Ok(project)
    }
}
