// Core algorithm exports
pub mod allocator;
pub mod capacity;
pub mod error;
pub mod scoring;

pub use allocator::{run_allocation, Allocator};
pub use capacity::max_teams_per_ta;
pub use error::AllocationError;
pub use scoring::{rank_pairs, skill_overlap};
