use serde::{Deserialize, Serialize};
use crate::models::domain::{Allocation, Skill, SkillId, TaId, TeamAssignment, TeamId, UnfilledTeam};

/// Response for a completed allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResponse {
    pub message: String,
    #[serde(rename = "runId")]
    pub run_id: String,
    #[serde(rename = "tasPerTeam")]
    pub tas_per_team: usize,
    #[serde(rename = "maxTeamsPerTa")]
    pub max_teams_per_ta: usize,
    pub assignments: Vec<TeamAssignment>,
    #[serde(rename = "unfilledTeams")]
    pub unfilled_teams: Vec<UnfilledTeam>,
    #[serde(rename = "linksWritten")]
    pub links_written: u64,
}

impl AllocationResponse {
    pub fn from_allocation(allocation: Allocation, links_written: u64, persisted: bool) -> Self {
        let unfilled_teams = allocation.unfilled();
        let message = if persisted { "allocation is done" } else { "allocation preview" };
        Self {
            message: message.to_string(),
            run_id: uuid::Uuid::new_v4().to_string(),
            tas_per_team: allocation.tas_per_team,
            max_teams_per_ta: allocation.max_teams_per_ta,
            assignments: allocation.assignments,
            unfilled_teams,
            links_written,
        }
    }
}

/// TA as shown in the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaSummary {
    pub id: TaId,
    pub name: String,
}

/// One team with its skills and currently linked TAs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamOverview {
    pub team_id: TeamId,
    pub team_name: String,
    pub skills: Vec<Skill>,
    pub tas: Vec<TaSummary>,
}

/// Read model for `GET /match`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOverviewResponse {
    pub teams: Vec<TeamOverview>,
    pub tas: Vec<TaSkills>,
}

/// A TA and the skills they offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaSkills {
    pub id: TaId,
    pub name: String,
    pub skills: Vec<SkillId>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
