//! Researcher domain model.

use crate::model::{ValidationError, EMAIL_RE, LATTES_URL_RE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a researcher.
pub type ResearcherId = Uuid;

/// A person who may be assigned to projects with a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
    pub uuid: ResearcherId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    /// Link to the researcher's Lattes curriculum page.
    pub lattes_url: String,
}

impl Researcher {
    /// Creates a new researcher with a generated stable ID.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        lattes_url: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            birth_date,
            lattes_url: lattes_url.into(),
        }
    }

    /// Display name: first name, one space, last name.
    ///
    /// No guarding against empty parts; write paths validate those.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "researcher",
                field: "first_name",
            });
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "researcher",
                field: "last_name",
            });
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if !LATTES_URL_RE.is_match(&self.lattes_url) {
            return Err(ValidationError::InvalidLattesUrl(self.lattes_url.clone()));
        }
        Ok(())
    }
}
