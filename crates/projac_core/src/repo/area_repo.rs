//! Area/sub-area repository contract and SQLite implementation.

use crate::model::area::{Area, AreaId, SubArea, SubAreaId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const AREA_SELECT_SQL: &str = "SELECT uuid, name, color FROM areas";
const SUB_AREA_SELECT_SQL: &str = "SELECT uuid, name, area_uuid FROM sub_areas";

/// Repository interface for area classification records.
pub trait AreaRepository {
    fn create_area(&self, area: &Area) -> RepoResult<AreaId>;
    fn update_area(&self, area: &Area) -> RepoResult<()>;
    fn get_area(&self, id: AreaId) -> RepoResult<Option<Area>>;
    fn list_areas(&self) -> RepoResult<Vec<Area>>;
    fn delete_area(&self, id: AreaId) -> RepoResult<()>;

    fn create_sub_area(&self, sub_area: &SubArea) -> RepoResult<SubAreaId>;
    fn get_sub_area(&self, id: SubAreaId) -> RepoResult<Option<SubArea>>;
    fn list_sub_areas(&self, area_id: AreaId) -> RepoResult<Vec<SubArea>>;
    fn delete_sub_area(&self, id: SubAreaId) -> RepoResult<()>;
}

/// SQLite-backed area repository.
pub struct SqliteAreaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAreaRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AreaRepository for SqliteAreaRepository<'_> {
    fn create_area(&self, area: &Area) -> RepoResult<AreaId> {
        area.validate()?;

        self.conn.execute(
            "INSERT INTO areas (uuid, name, color) VALUES (?1, ?2, ?3);",
            params![area.uuid.to_string(), area.name, area.color],
        )?;

        Ok(area.uuid)
    }

    fn update_area(&self, area: &Area) -> RepoResult<()> {
        area.validate()?;

        let changed = self.conn.execute(
            "UPDATE areas
             SET
                name = ?1,
                color = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![area.name, area.color, area.uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(area.uuid));
        }

        Ok(())
    }

    fn get_area(&self, id: AreaId) -> RepoResult<Option<Area>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AREA_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_area_row(row)?));
        }

        Ok(None)
    }

    fn list_areas(&self) -> RepoResult<Vec<Area>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AREA_SELECT_SQL} ORDER BY name ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut areas = Vec::new();
        while let Some(row) = rows.next()? {
            areas.push(parse_area_row(row)?);
        }

        Ok(areas)
    }

    fn delete_area(&self, id: AreaId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM areas WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn create_sub_area(&self, sub_area: &SubArea) -> RepoResult<SubAreaId> {
        sub_area.validate()?;

        if self.get_area(sub_area.area_id)?.is_none() {
            return Err(RepoError::NotFound(sub_area.area_id));
        }

        self.conn.execute(
            "INSERT INTO sub_areas (uuid, name, area_uuid) VALUES (?1, ?2, ?3);",
            params![
                sub_area.uuid.to_string(),
                sub_area.name,
                sub_area.area_id.to_string(),
            ],
        )?;

        Ok(sub_area.uuid)
    }

    fn get_sub_area(&self, id: SubAreaId) -> RepoResult<Option<SubArea>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUB_AREA_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_sub_area_row(row)?));
        }

        Ok(None)
    }

    fn list_sub_areas(&self, area_id: AreaId) -> RepoResult<Vec<SubArea>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SUB_AREA_SELECT_SQL} WHERE area_uuid = ?1 ORDER BY name ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([area_id.to_string()])?;
        let mut sub_areas = Vec::new();
        while let Some(row) = rows.next()? {
            sub_areas.push(parse_sub_area_row(row)?);
        }

        Ok(sub_areas)
    }

    fn delete_sub_area(&self, id: SubAreaId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM sub_areas WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_area_row(row: &Row<'_>) -> RepoResult<Area> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Area {
        uuid: parse_uuid(&uuid_text, "areas.uuid")?,
        name: row.get("name")?,
        color: row.get("color")?,
    })
}

fn parse_sub_area_row(row: &Row<'_>) -> RepoResult<SubArea> {
    let uuid_text: String = row.get("uuid")?;
    let area_uuid_text: String = row.get("area_uuid")?;
    Ok(SubArea {
        uuid: parse_uuid(&uuid_text, "sub_areas.uuid")?,
        name: row.get("name")?,
        area_id: parse_uuid(&area_uuid_text, "sub_areas.area_uuid")?,
    })
}
