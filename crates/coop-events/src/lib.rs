//! Shared record types and serialization for the cooperation simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod group;
pub mod record;
pub mod snapshot;

// Re-export group types
pub use group::{Choice, Group, CHROMOSOME_LEN};

// Re-export record types
pub use record::{RoundRecord, ROUND_TABLE_HEADER};

// Re-export snapshot types
pub use snapshot::{AgentSnapshot, LineageSnapshot, PopulationSnapshot, RunSummary};
