//! Funding agency and raised-amount domain models.
//!
//! # Invariants
//! - `AmountRaised::amount` is an exact decimal, never a float.
//! - Negative contribution amounts are rejected at validation time.

use crate::model::project::ProjectId;
use crate::model::ValidationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a funding agency.
pub type FundingAgencyId = Uuid;
/// Stable identifier for one raised-amount record.
pub type AmountRaisedId = Uuid;

/// An agency that funds research projects, e.g. CNPq or FAPESP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingAgency {
    pub uuid: FundingAgencyId,
    pub name: String,
    pub acronym: String,
}

impl FundingAgency {
    /// Creates a new agency with a generated stable ID.
    pub fn new(name: impl Into<String>, acronym: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            acronym: acronym.into(),
        }
    }

    /// Display name: `"{name} ({acronym})"`.
    pub fn full_name(&self) -> String {
        format!("{} ({})", self.name, self.acronym)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "funding_agency",
                field: "name",
            });
        }
        if self.acronym.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "funding_agency",
                field: "acronym",
            });
        }
        Ok(())
    }
}

/// One funding contribution received by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRaised {
    pub uuid: AmountRaisedId,
    pub project_id: ProjectId,
    /// Contributing agency, when known.
    pub agency_id: Option<FundingAgencyId>,
    pub amount: Decimal,
    pub description: String,
    pub received_on: NaiveDate,
}

impl AmountRaised {
    /// Creates a new contribution record with a generated stable ID.
    pub fn new(
        project_id: ProjectId,
        amount: Decimal,
        description: impl Into<String>,
        received_on: NaiveDate,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            project_id,
            agency_id: None,
            amount,
            description: description.into(),
            received_on,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}
