//! Researcher repository contract and SQLite implementation.

use crate::model::researcher::{Researcher, ResearcherId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const RESEARCHER_SELECT_SQL: &str = "SELECT
    uuid,
    first_name,
    last_name,
    email,
    birth_date,
    lattes_url
FROM researchers";

/// Repository interface for researcher records.
pub trait ResearcherRepository {
    fn create_researcher(&self, researcher: &Researcher) -> RepoResult<ResearcherId>;
    fn update_researcher(&self, researcher: &Researcher) -> RepoResult<()>;
    fn get_researcher(&self, id: ResearcherId) -> RepoResult<Option<Researcher>>;
    fn list_researchers(&self) -> RepoResult<Vec<Researcher>>;
    fn delete_researcher(&self, id: ResearcherId) -> RepoResult<()>;
}

/// SQLite-backed researcher repository.
pub struct SqliteResearcherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResearcherRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResearcherRepository for SqliteResearcherRepository<'_> {
    fn create_researcher(&self, researcher: &Researcher) -> RepoResult<ResearcherId> {
        researcher.validate()?;

        self.conn.execute(
            "INSERT INTO researchers (
                uuid,
                first_name,
                last_name,
                email,
                birth_date,
                lattes_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                researcher.uuid.to_string(),
                researcher.first_name,
                researcher.last_name,
                researcher.email,
                researcher.birth_date,
                researcher.lattes_url,
            ],
        )?;

        Ok(researcher.uuid)
    }

    fn update_researcher(&self, researcher: &Researcher) -> RepoResult<()> {
        researcher.validate()?;

        let changed = self.conn.execute(
            "UPDATE researchers
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                birth_date = ?4,
                lattes_url = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                researcher.first_name,
                researcher.last_name,
                researcher.email,
                researcher.birth_date,
                researcher.lattes_url,
                researcher.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(researcher.uuid));
        }

        Ok(())
    }

    fn get_researcher(&self, id: ResearcherId) -> RepoResult<Option<Researcher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESEARCHER_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_researcher_row(row)?));
        }

        Ok(None)
    }

    fn list_researchers(&self) -> RepoResult<Vec<Researcher>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESEARCHER_SELECT_SQL} ORDER BY last_name ASC, first_name ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut researchers = Vec::new();
        while let Some(row) = rows.next()? {
            researchers.push(parse_researcher_row(row)?);
        }

        Ok(researchers)
    }

    fn delete_researcher(&self, id: ResearcherId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM researchers WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

pub(crate) fn parse_researcher_row(row: &Row<'_>) -> RepoResult<Researcher> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Researcher {
        uuid: parse_uuid(&uuid_text, "researchers.uuid")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        birth_date: row.get("birth_date")?,
        lattes_url: row.get("lattes_url")?,
    })
}
