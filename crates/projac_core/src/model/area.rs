//! Research area classification entities.
//!
//! # Invariants
//! - `Area::name` is non-empty and `Area::color` is a hex tag.
//! - Every `SubArea` references exactly one `Area`.

use crate::model::{ValidationError, HEX_COLOR_RE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a research area.
pub type AreaId = Uuid;
/// Stable identifier for a sub-area.
pub type SubAreaId = Uuid;

/// Top-level research classification, tagged with a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub uuid: AreaId,
    pub name: String,
    /// Hex color tag used by clients, e.g. `#0000FF`.
    pub color: String,
}

impl Area {
    /// Creates a new area with a generated stable ID.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, color)
    }

    /// Creates an area with a caller-provided stable ID.
    pub fn with_id(uuid: AreaId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "area",
                field: "name",
            });
        }
        if !HEX_COLOR_RE.is_match(&self.color) {
            return Err(ValidationError::InvalidColorTag(self.color.clone()));
        }
        Ok(())
    }
}

/// Second-level classification under one [`Area`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubArea {
    pub uuid: SubAreaId,
    pub name: String,
    pub area_id: AreaId,
}

impl SubArea {
    /// Creates a new sub-area under the given area.
    pub fn new(area_id: AreaId, name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            area_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "sub_area",
                field: "name",
            });
        }
        Ok(())
    }
}
