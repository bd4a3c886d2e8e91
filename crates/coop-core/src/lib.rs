//! Cooperation Evolution Engine Library
//!
//! Two sock-colour populations play a prisoner's-dilemma game against each
//! other; every round the weakest players are culled and the survivors breed
//! mutated copies weighted by their score.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::Config;
pub use engine::{run_replicates, Simulation};
pub use error::{ConfigError, SimError};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
