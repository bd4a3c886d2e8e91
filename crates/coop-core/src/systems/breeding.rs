//! Breeding System
//!
//! Refills each population from its survivors. Parents are drawn with
//! replacement in proportion to their score; each child is a mutated value
//! copy with a fresh identity.
//!
//! Scores can be negative (the sucker payoff), so they are clamped to zero
//! before being used as weights. When every clamped weight is zero the draw
//! falls back to uniform over the survivors.

use bevy_ecs::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use coop_events::Group;

use crate::components::agent::{Agent, AgentBundle, AgentId, LastChoice, Score, Strategy};
use crate::components::population::{IdSequence, LineageStats, Rosters};
use crate::SimRng;

use super::mutation::mutate;
use super::params::RoundParams;

/// Selection weights for a set of scores: negatives and non-finite values count as zero
pub fn fitness_weights(scores: &[f64]) -> Vec<f64> {
    scores
        .iter()
        .map(|&s| if s.is_finite() { s.max(0.0) } else { 0.0 })
        .collect()
}

/// Draws parent indices from a survivor list
#[derive(Debug, Clone)]
pub enum ParentSampler {
    /// Proportional to clamped score
    Weighted(WeightedIndex<f64>),
    /// No survivor has a positive score
    Uniform(usize),
}

impl ParentSampler {
    /// Returns `None` when there are no survivors to draw from
    pub fn new(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        match WeightedIndex::new(fitness_weights(scores)) {
            Ok(index) => Some(ParentSampler::Weighted(index)),
            Err(_) => Some(ParentSampler::Uniform(scores.len())),
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, ParentSampler::Uniform(_))
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            ParentSampler::Weighted(index) => index.sample(rng),
            ParentSampler::Uniform(len) => rng.gen_range(0..*len),
        }
    }
}

/// System to breed both populations back up after culling
pub fn breed_populations(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    params: Res<RoundParams>,
    mut rosters: ResMut<Rosters>,
    mut ids: ResMut<IdSequence>,
    mut lineage: ResMut<LineageStats>,
    parents: Query<(&Strategy, &Score, &LastChoice), With<Agent>>,
) {
    let rng = &mut rng.0;

    for group in Group::ALL {
        // Only live agents can parent; anything else would leave the group short
        let roster = rosters.get_mut(group);
        let listed = roster.len();
        roster.retain(|&e| parents.contains(e));
        if roster.len() < listed {
            tracing::warn!(
                "Dropped {} stale {} roster entries before breeding",
                listed - roster.len(),
                group
            );
        }

        // Children never become parents within the same step
        let survivors = roster.clone();
        let scores: Vec<f64> = survivors
            .iter()
            .map(|&e| parents.get(e).map(|(_, score, _)| score.0).unwrap_or(0.0))
            .collect();

        let Some(sampler) = ParentSampler::new(&scores) else {
            tracing::warn!("No {} survivors left to breed from", group);
            continue;
        };
        if sampler.is_uniform() {
            tracing::debug!(
                "No {} survivor has a positive score; breeding uniformly from {}",
                group,
                survivors.len()
            );
        }

        let mut offspring = Vec::with_capacity(params.breed_count);
        for _ in 0..params.breed_count {
            let parent = survivors[sampler.sample(rng)];
            let Ok((strategy, _, last_choice)) = parents.get(parent) else {
                tracing::warn!("Parent {:?} of a {} child vanished mid-breed", parent, group);
                continue;
            };

            let mut child = *strategy;
            lineage.mutated_bits += u64::from(mutate(&mut child, params.mutation_rate, rng));

            let id = AgentId(ids.next_id());
            let entity = commands
                .spawn(AgentBundle::new(id, group, child, last_choice.0))
                .id();
            offspring.push(entity);
        }

        lineage.bred += offspring.len() as u64;
        rosters.get_mut(group).extend(offspring);
    }
}
