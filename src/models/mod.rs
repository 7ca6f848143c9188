// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Allocation, MatchRequest, ScoredPair, Skill, SkillId, Ta, TaId, Team, TeamAssignment, TeamId,
    TeamTaLink, UnfilledTeam,
};
pub use requests::{PreviewAllocationRequest, RunAllocationPath};
pub use responses::{
    AllocationResponse, ErrorResponse, HealthResponse, MatchOverviewResponse, TaSkills,
    TaSummary, TeamOverview,
};
