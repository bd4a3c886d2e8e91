//! ECS Systems
//!
//! One round is: reset scores, shuffle rosters, play, cull, breed.

pub mod breeding;
pub mod interaction;
pub mod mutation;
pub mod params;
pub mod selection;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

pub use breeding::{breed_populations, fitness_weights, ParentSampler};
pub use interaction::{choose_move, play_interactions, reset_scores, shuffle_rosters};
pub use mutation::mutate;
pub use params::RoundParams;
pub use selection::{cull_lowest, cull_populations};

/// Build the schedule that advances the world by one round.
///
/// Every system draws from the shared `SimRng`, so the order is fixed and the
/// executor is single-threaded to keep runs reproducible.
pub fn build_round_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);

    schedule.add_systems(
        (
            reset_scores,
            shuffle_rosters,
            play_interactions,
            cull_populations,
            breed_populations,
        )
            .chain(),
    );

    schedule
}
