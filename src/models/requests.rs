use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{MatchRequest, Ta, Team};

/// Path parameters for `/match/{n}`
///
/// `n` is parsed as a signed integer so that zero and negative values reach
/// validation and get a proper error body instead of a routing failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunAllocationPath {
    #[validate(range(min = 1, message = "Number of TAs per team must be positive"))]
    pub n: i64,
}

impl RunAllocationPath {
    pub fn tas_per_team(&self) -> usize {
        usize::try_from(self.n).unwrap_or(0)
    }
}

/// Request to compute an allocation from caller-supplied rosters without persisting it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewAllocationRequest {
    #[validate(range(min = 1, message = "Number of TAs per team must be positive"))]
    #[serde(alias = "tas_per_team", rename = "tasPerTeam")]
    pub tas_per_team: i64,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub tas: Vec<Ta>,
}

impl PreviewAllocationRequest {
    pub fn into_match_request(self) -> MatchRequest {
        MatchRequest {
            tas_per_team: usize::try_from(self.tas_per_team).unwrap_or(0),
            teams: self.teams,
            tas: self.tas,
        }
    }
}
