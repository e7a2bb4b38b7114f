//! Domain model for research project tracking.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep derived views (status, full names) as pure functions on the data.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Project status is derived on every access, never stored.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod area;
pub mod funding;
pub mod output;
pub mod project;
pub mod researcher;

pub(crate) static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex"));
pub(crate) static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
pub(crate) static LATTES_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("valid url regex"));

/// Field-level validation error shared by all domain entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// Area color is not a `#RGB`/`#RRGGBB` hex tag.
    InvalidColorTag(String),
    /// Researcher email does not look like an address.
    InvalidEmail(String),
    /// Lattes curriculum link is not an http(s) URL.
    InvalidLattesUrl(String),
    /// Money fields must not go below zero.
    NegativeAmount(Decimal),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
            Self::InvalidColorTag(value) => write!(f, "invalid color tag: `{value}`"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidLattesUrl(value) => write!(f, "invalid lattes URL: `{value}`"),
            Self::NegativeAmount(value) => write!(f, "amount must not be negative: {value}"),
        }
    }
}

impl Error for ValidationError {}
