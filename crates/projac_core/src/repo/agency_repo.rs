//! Funding agency repository contract and SQLite implementation.

use crate::model::funding::{FundingAgency, FundingAgencyId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const AGENCY_SELECT_SQL: &str = "SELECT uuid, name, acronym FROM funding_agencies";

/// Repository interface for funding agency records.
pub trait AgencyRepository {
    fn create_agency(&self, agency: &FundingAgency) -> RepoResult<FundingAgencyId>;
    fn update_agency(&self, agency: &FundingAgency) -> RepoResult<()>;
    fn get_agency(&self, id: FundingAgencyId) -> RepoResult<Option<FundingAgency>>;
    fn list_agencies(&self) -> RepoResult<Vec<FundingAgency>>;
    fn delete_agency(&self, id: FundingAgencyId) -> RepoResult<()>;
}

/// SQLite-backed funding agency repository.
pub struct SqliteAgencyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAgencyRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AgencyRepository for SqliteAgencyRepository<'_> {
    fn create_agency(&self, agency: &FundingAgency) -> RepoResult<FundingAgencyId> {
        agency.validate()?;

        self.conn.execute(
            "INSERT INTO funding_agencies (uuid, name, acronym) VALUES (?1, ?2, ?3);",
            params![agency.uuid.to_string(), agency.name, agency.acronym],
        )?;

        Ok(agency.uuid)
    }

    fn update_agency(&self, agency: &FundingAgency) -> RepoResult<()> {
        agency.validate()?;

        let changed = self.conn.execute(
            "UPDATE funding_agencies
             SET
                name = ?1,
                acronym = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![agency.name, agency.acronym, agency.uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(agency.uuid));
        }

        Ok(())
    }

    fn get_agency(&self, id: FundingAgencyId) -> RepoResult<Option<FundingAgency>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AGENCY_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_agency_row(row)?));
        }

        Ok(None)
    }

    fn list_agencies(&self) -> RepoResult<Vec<FundingAgency>> {
        let mut stmt = self.conn.prepare(&format!(
            "{AGENCY_SELECT_SQL} ORDER BY acronym ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut agencies = Vec::new();
        while let Some(row) = rows.next()? {
            agencies.push(parse_agency_row(row)?);
        }

        Ok(agencies)
    }

    fn delete_agency(&self, id: FundingAgencyId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM funding_agencies WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_agency_row(row: &Row<'_>) -> RepoResult<FundingAgency> {
    let uuid_text: String = row.get("uuid")?;
    Ok(FundingAgency {
        uuid: parse_uuid(&uuid_text, "funding_agencies.uuid")?,
        name: row.get("name")?,
        acronym: row.get("acronym")?,
    })
}
