//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs for the project aggregate and its owned relations
//!   (raised amounts, academic outputs, researcher assignments).
//! - Answer the derived cross-entity queries: total raised, coordinator.
//!
//! # Invariants
//! - At most one COORDENADOR assignment per project; the second write is
//!   rejected with `RepoError::DuplicateCoordinator`.
//! - Money columns are stored as decimal TEXT and summed with exact decimal
//!   arithmetic, never as SQLite floats.

use crate::model::funding::{AmountRaised, AmountRaisedId, FundingAgencyId};
use crate::model::output::{AcademicOutput, AcademicOutputId};
use crate::model::project::{Assignment, AssignmentId, Project, ProjectId, Role};
use crate::model::researcher::Researcher;
use crate::repo::researcher_repo::parse_researcher_row;
use crate::repo::{bool_to_int, parse_bool, parse_decimal, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    objective,
    created_on,
    requested_amount,
    concluded_on,
    canceled
FROM projects";

const AMOUNT_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    agency_uuid,
    amount,
    description,
    received_on
FROM amounts_raised";

const OUTPUT_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    title,
    description,
    kind
FROM academic_outputs";

/// Repository interface for the project aggregate.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;

    /// Records one funding contribution for an existing project.
    ///
    /// Returns `RepoError::NotFound` when the project or a referenced
    /// agency does not exist.
    fn record_amount(&self, amount: &AmountRaised) -> RepoResult<AmountRaisedId>;
    fn list_amounts(&self, project_id: ProjectId) -> RepoResult<Vec<AmountRaised>>;
    /// Exact decimal sum over the project's contributions; zero when none.
    fn total_raised(&self, project_id: ProjectId) -> RepoResult<Decimal>;

    fn register_output(&self, output: &AcademicOutput) -> RepoResult<AcademicOutputId>;
    fn list_outputs(&self, project_id: ProjectId) -> RepoResult<Vec<AcademicOutput>>;

    fn assign_researcher(&self, assignment: &Assignment) -> RepoResult<AssignmentId>;
    fn list_assignments(&self, project_id: ProjectId) -> RepoResult<Vec<Assignment>>;
    /// Returns the researcher holding the COORDENADOR role, if any.
    fn coordinator(&self, project_id: ProjectId) -> RepoResult<Option<Researcher>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn project_exists(&self, id: ProjectId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE uuid = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn agency_exists(&self, id: FundingAgencyId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM funding_agencies WHERE uuid = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn has_coordinator(&self, project_id: ProjectId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM researcher_projects
                WHERE project_uuid = ?1
                  AND role = 'COORDENADOR'
            );",
            [project_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                uuid,
                title,
                objective,
                created_on,
                requested_amount,
                concluded_on,
                canceled
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                project.uuid.to_string(),
                project.title,
                project.objective,
                project.created_on,
                project.requested_amount.to_string(),
                project.concluded_on,
                bool_to_int(project.canceled),
            ],
        )?;

        Ok(project.uuid)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET
                title = ?1,
                objective = ?2,
                created_on = ?3,
                requested_amount = ?4,
                concluded_on = ?5,
                canceled = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                project.title,
                project.objective,
                project.created_on,
                project.requested_amount.to_string(),
                project.concluded_on,
                bool_to_int(project.canceled),
                project.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.uuid));
        }

        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY created_on ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn record_amount(&self, amount: &AmountRaised) -> RepoResult<AmountRaisedId> {
        amount.validate()?;

        if !self.project_exists(amount.project_id)? {
            return Err(RepoError::NotFound(amount.project_id));
        }

        if let Some(agency_id) = amount.agency_id {
            if !self.agency_exists(agency_id)? {
                return Err(RepoError::NotFound(agency_id));
            }
        }

        self.conn.execute(
            "INSERT INTO amounts_raised (
                uuid,
                project_uuid,
                agency_uuid,
                amount,
                description,
                received_on
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                amount.uuid.to_string(),
                amount.project_id.to_string(),
                amount.agency_id.map(|id| id.to_string()),
                amount.amount.to_string(),
                amount.description,
                amount.received_on,
            ],
        )?;

        Ok(amount.uuid)
    }

    fn list_amounts(&self, project_id: ProjectId) -> RepoResult<Vec<AmountRaised>> {
        let mut stmt = self.conn.prepare(&format!(
            "{AMOUNT_SELECT_SQL} WHERE project_uuid = ?1 ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([project_id.to_string()])?;
        let mut amounts = Vec::new();
        while let Some(row) = rows.next()? {
            amounts.push(parse_amount_row(row)?);
        }

        Ok(amounts)
    }

    fn total_raised(&self, project_id: ProjectId) -> RepoResult<Decimal> {
        let mut stmt = self
            .conn
            .prepare("SELECT amount FROM amounts_raised WHERE project_uuid = ?1;")?;

        let mut rows = stmt.query([project_id.to_string()])?;
        let mut total = Decimal::ZERO;
        while let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            total += parse_decimal(&text, "amounts_raised.amount")?;
        }

        Ok(total)
    }

    fn register_output(&self, output: &AcademicOutput) -> RepoResult<AcademicOutputId> {
        output.validate()?;

        if !self.project_exists(output.project_id)? {
            return Err(RepoError::NotFound(output.project_id));
        }

        self.conn.execute(
            "INSERT INTO academic_outputs (
                uuid,
                project_uuid,
                title,
                description,
                kind
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                output.uuid.to_string(),
                output.project_id.to_string(),
                output.title,
                output.description,
                output.kind,
            ],
        )?;

        Ok(output.uuid)
    }

    fn list_outputs(&self, project_id: ProjectId) -> RepoResult<Vec<AcademicOutput>> {
        let mut stmt = self.conn.prepare(&format!(
            "{OUTPUT_SELECT_SQL} WHERE project_uuid = ?1 ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([project_id.to_string()])?;
        let mut outputs = Vec::new();
        while let Some(row) = rows.next()? {
            outputs.push(parse_output_row(row)?);
        }

        Ok(outputs)
    }

    fn assign_researcher(&self, assignment: &Assignment) -> RepoResult<AssignmentId> {
        if !self.project_exists(assignment.project_id)? {
            return Err(RepoError::NotFound(assignment.project_id));
        }

        if assignment.role.is_coordinator() && self.has_coordinator(assignment.project_id)? {
            return Err(RepoError::DuplicateCoordinator(assignment.project_id));
        }

        self.conn.execute(
            "INSERT INTO researcher_projects (
                uuid,
                researcher_uuid,
                project_uuid,
                role
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                assignment.uuid.to_string(),
                assignment.researcher_id.to_string(),
                assignment.project_id.to_string(),
                role_to_db(assignment.role),
            ],
        )?;

        Ok(assignment.uuid)
    }

    fn list_assignments(&self, project_id: ProjectId) -> RepoResult<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, researcher_uuid, project_uuid, role
             FROM researcher_projects
             WHERE project_uuid = ?1
             ORDER BY created_at ASC, uuid ASC;",
        )?;

        let mut rows = stmt.query([project_id.to_string()])?;
        let mut assignments = Vec::new();
        while let Some(row) = rows.next()? {
            assignments.push(parse_assignment_row(row)?);
        }

        Ok(assignments)
    }

    fn coordinator(&self, project_id: ProjectId) -> RepoResult<Option<Researcher>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                r.uuid,
                r.first_name,
                r.last_name,
                r.email,
                r.birth_date,
                r.lattes_url
             FROM researcher_projects rp
             INNER JOIN researchers r ON r.uuid = rp.researcher_uuid
             WHERE rp.project_uuid = ?1
               AND rp.role = 'COORDENADOR';",
        )?;

        stmt.query_row([project_id.to_string()], |row| {
            Ok(parse_researcher_row(row))
        })
        .optional()?
        .transpose()
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    let amount_text: String = row.get("requested_amount")?;
    Ok(Project {
        uuid: parse_uuid(&uuid_text, "projects.uuid")?,
        title: row.get("title")?,
        objective: row.get("objective")?,
        created_on: row.get("created_on")?,
        requested_amount: parse_decimal(&amount_text, "projects.requested_amount")?,
        concluded_on: row.get("concluded_on")?,
        canceled: parse_bool(row.get("canceled")?, "projects.canceled")?,
    })
}

fn parse_amount_row(row: &Row<'_>) -> RepoResult<AmountRaised> {
    let uuid_text: String = row.get("uuid")?;
    let project_uuid_text: String = row.get("project_uuid")?;
    let agency_id = match row.get::<_, Option<String>>("agency_uuid")? {
        Some(text) => Some(parse_uuid(&text, "amounts_raised.agency_uuid")?),
        None => None,
    };
    let amount_text: String = row.get("amount")?;
    Ok(AmountRaised {
        uuid: parse_uuid(&uuid_text, "amounts_raised.uuid")?,
        project_id: parse_uuid(&project_uuid_text, "amounts_raised.project_uuid")?,
        agency_id,
        amount: parse_decimal(&amount_text, "amounts_raised.amount")?,
        description: row.get("description")?,
        received_on: row.get("received_on")?,
    })
}

fn parse_output_row(row: &Row<'_>) -> RepoResult<AcademicOutput> {
    let uuid_text: String = row.get("uuid")?;
    let project_uuid_text: String = row.get("project_uuid")?;
    Ok(AcademicOutput {
        uuid: parse_uuid(&uuid_text, "academic_outputs.uuid")?,
        project_id: parse_uuid(&project_uuid_text, "academic_outputs.project_uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        kind: row.get("kind")?,
    })
}

fn parse_assignment_row(row: &Row<'_>) -> RepoResult<Assignment> {
    let uuid_text: String = row.get("uuid")?;
    let researcher_uuid_text: String = row.get("researcher_uuid")?;
    let project_uuid_text: String = row.get("project_uuid")?;
    let role_text: String = row.get("role")?;
    let role = parse_role(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid role value `{role_text}` in researcher_projects.role"
        ))
    })?;

    Ok(Assignment {
        uuid: parse_uuid(&uuid_text, "researcher_projects.uuid")?,
        researcher_id: parse_uuid(&researcher_uuid_text, "researcher_projects.researcher_uuid")?,
        project_id: parse_uuid(&project_uuid_text, "researcher_projects.project_uuid")?,
        role,
    })
}

fn role_to_db(role: Role) -> &'static str {
    match role {
        Role::Coordenador => "COORDENADOR",
        Role::Pesquisador => "PESQUISADOR",
        Role::Colaborador => "COLABORADOR",
    }
}

fn parse_role(value: &str) -> Option<Role> {
    match value {
        "COORDENADOR" => Some(Role::Coordenador),
        "PESQUISADOR" => Some(Role::Pesquisador),
        "COLABORADOR" => Some(Role::Colaborador),
        _ => None,
    }
}
