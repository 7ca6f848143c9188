// Service exports
pub mod cache;
pub mod postgres;

pub use cache::OverviewCache;
pub use postgres::{PostgresClient, PostgresError};
