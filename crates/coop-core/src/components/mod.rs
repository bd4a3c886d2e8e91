//! ECS Components and Resources
//!
//! Agent components and the per-group rosters that order them.

pub mod agent;
pub mod population;

pub use agent::*;
pub use population::*;
