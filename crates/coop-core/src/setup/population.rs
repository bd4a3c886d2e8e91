//! Population Spawning
//!
//! Spawns both groups with randomized chromosomes and registers them in the
//! rosters.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use std::fmt;

use coop_events::{Choice, Group};

use crate::components::agent::{AgentBundle, AgentId, Membership, Strategy};
use crate::components::population::{IdSequence, Rosters};
use crate::SimRng;

/// Spawn `size` agents of one group, taking identities from the world's
/// [`IdSequence`]
pub fn spawn_population(
    world: &mut World,
    group: Group,
    size: usize,
    rng: &mut SmallRng,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(size);

    for _ in 0..size {
        let id = AgentId(world.resource_mut::<IdSequence>().next_id());
        let strategy = Strategy::random(rng);
        let choice = Choice::from_bit(rng.gen_bool(0.5));

        let entity = world
            .spawn(AgentBundle::new(id, group, strategy, choice))
            .id();
        spawned.push(entity);
    }

    spawned
}

/// Spawn both populations, yellow first, and append them to the rosters.
///
/// Requires the `SimRng`, `IdSequence` and `Rosters` resources.
pub fn spawn_all_agents(world: &mut World, size: usize) {
    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        for group in Group::ALL {
            let entities = spawn_population(world, group, size, &mut rng.0);
            world.resource_mut::<Rosters>().get_mut(group).extend(entities);
        }
    });
}

/// Get summary stats for spawned agents
pub fn get_spawn_summary(world: &mut World) -> SpawnSummary {
    let mut summary = SpawnSummary::default();
    let mut query = world.query::<&Membership>();

    for membership in query.iter(world) {
        summary.total_agents += 1;
        match membership.0 {
            Group::Yellow => summary.yellow += 1,
            Group::Green => summary.green += 1,
        }
    }

    summary
}

/// Summary of spawned agents
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSummary {
    pub total_agents: usize,
    pub yellow: usize,
    pub green: usize,
}

impl fmt::Display for SpawnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} agents ({} yellow, {} green)",
            self.total_agents, self.yellow, self.green
        )
    }
}
