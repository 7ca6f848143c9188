//! TA Match - skill-based TA-to-team allocation for course management
//!
//! This library provides the allocation engine used by the course platform.
//! It scores team-TA skill overlap, assigns TAs greedily under per-team and
//! per-TA capacity limits, then fills remaining slots with the least-loaded TAs.

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{run_allocation, Allocator, AllocationError, max_teams_per_ta};
pub use models::{Allocation, MatchRequest, Ta, Team, TeamAssignment, TeamTaLink};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let allocation = run_allocation(1, &[Team::new(1, [1])], &[Ta::new(2, [1])]).unwrap();
        assert_eq!(allocation.get(1), Some(&[2][..]));
    }
}
