use thiserror::Error;
use crate::models::{TaId, TeamId};

/// Errors raised by the allocation engine
///
/// Partial fulfillment is not an error: teams left under their quota are
/// reported through [`crate::models::Allocation::unfilled`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("No TAs available")]
    NoAvailableTas,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Duplicate team id in roster: {0}")]
    DuplicateTeam(TeamId),

    #[error("Duplicate TA id in roster: {0}")]
    DuplicateTa(TaId),
}

impl AllocationError {
    /// Stable machine-readable code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::NoAvailableTas => "no_tas_available",
            AllocationError::InvalidParameter(_) => "invalid_parameter",
            AllocationError::DuplicateTeam(_) | AllocationError::DuplicateTa(_) => "invalid_roster",
        }
    }
}
