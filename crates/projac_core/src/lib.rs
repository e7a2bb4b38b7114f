//! Core domain logic for Projac research project tracking.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::area::{Area, AreaId, SubArea, SubAreaId};
pub use model::funding::{AmountRaised, AmountRaisedId, FundingAgency, FundingAgencyId};
pub use model::output::{AcademicOutput, AcademicOutputId};
pub use model::project::{
    Assignment, AssignmentId, Project, ProjectId, ProjectStatus, Role,
};
pub use model::researcher::{Researcher, ResearcherId};
pub use model::ValidationError;
pub use repo::agency_repo::{AgencyRepository, SqliteAgencyRepository};
pub use repo::area_repo::{AreaRepository, SqliteAreaRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::researcher_repo::{ResearcherRepository, SqliteResearcherRepository};
pub use repo::{RepoError, RepoResult};
pub use service::project_service::{
    CreateProjectRequest, ProjectOverview, ProjectService, RecordAmountRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
