//! Round Measurement
//!
//! Turns the current populations into a [`RoundRecord`].

use bevy_ecs::prelude::*;

use coop_events::{Group, RoundRecord, CHROMOSOME_LEN};

use crate::components::agent::Strategy;
use crate::components::population::Rosters;

/// How strongly `group` leans toward cooperating with `toward`, in percent.
///
/// Sums the weighted bits of every member's `toward` chromosome and divides by
/// the maximum possible sum for the group (all bits set in every member).
pub fn group_bias(
    world: &World,
    rosters: &Rosters,
    group: Group,
    toward: Group,
    weights: &[u32; CHROMOSOME_LEN],
) -> f64 {
    let members = rosters.get(group);
    let max_per_agent: u32 = weights.iter().sum();
    if members.is_empty() || max_per_agent == 0 {
        return 0.0;
    }

    let total: u64 = members
        .iter()
        .filter_map(|&e| world.get::<Strategy>(e))
        .map(|s| u64::from(s.toward(toward).weighted_sum(weights)))
        .sum();

    total as f64 * 100.0 / (f64::from(max_per_agent) * members.len() as f64)
}

/// Measure all four group/chromosome biases
pub fn measure_round(world: &World, round: u64, weights: &[u32; CHROMOSOME_LEN]) -> RoundRecord {
    let rosters = world.resource::<Rosters>();
    let bias = |group, toward| group_bias(world, rosters, group, toward, weights);

    RoundRecord {
        round,
        yellow_to_yellow: bias(Group::Yellow, Group::Yellow),
        yellow_to_green: bias(Group::Yellow, Group::Green),
        green_to_yellow: bias(Group::Green, Group::Yellow),
        green_to_green: bias(Group::Green, Group::Green),
    }
}
