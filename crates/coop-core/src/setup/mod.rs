//! World Setup
//!
//! Functions to create the initial populations.

pub mod population;

pub use population::{get_spawn_summary, spawn_all_agents, spawn_population, SpawnSummary};
