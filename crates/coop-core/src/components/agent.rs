//! Agent Components
//!
//! Components for individual agents: identity, strategy chromosomes, score.

use bevy_ecs::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use coop_events::{AgentSnapshot, Choice, Group, CHROMOSOME_LEN};

/// Marker component identifying an entity as an agent
#[derive(Component, Debug, Clone, Default)]
pub struct Agent;

/// Unique identifier for an agent, never reused within a simulation
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

/// Fixed-length bit-vector; locus 0 carries the strongest pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Chromosome(pub [bool; CHROMOSOME_LEN]);

impl Chromosome {
    /// Build from 0/1 values; any non-zero value counts as set
    pub fn from_bits(bits: [u8; CHROMOSOME_LEN]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// Each locus an independent fair coin
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut loci = [false; CHROMOSOME_LEN];
        for locus in loci.iter_mut() {
            *locus = rng.gen_bool(0.5);
        }
        Self(loci)
    }

    pub fn get(&self, locus: usize) -> bool {
        self.0[locus]
    }

    pub fn flip(&mut self, locus: usize) {
        self.0[locus] = !self.0[locus];
    }

    pub fn to_bits(&self) -> [u8; CHROMOSOME_LEN] {
        self.0.map(u8::from)
    }

    /// Sum of the weights of every set locus
    pub fn weighted_sum(&self, weights: &[u32; CHROMOSOME_LEN]) -> u32 {
        self.0
            .iter()
            .zip(weights)
            .filter(|(set, _)| **set)
            .map(|(_, w)| *w)
            .sum()
    }
}

/// The two chromosomes an agent plays with, one per opponent group
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Strategy {
    /// Used against yellow opponents
    pub yellow: Chromosome,
    /// Used against green opponents
    pub green: Chromosome,
}

impl Strategy {
    pub fn new(yellow: Chromosome, green: Chromosome) -> Self {
        Self { yellow, green }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let yellow = Chromosome::random(rng);
        let green = Chromosome::random(rng);
        Self { yellow, green }
    }

    /// Chromosome expressed against an opponent of `group`
    pub fn toward(&self, group: Group) -> &Chromosome {
        match group {
            Group::Yellow => &self.yellow,
            Group::Green => &self.green,
        }
    }
}

/// Fitness accumulated during the current round
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Score(pub f64);

impl Score {
    pub fn reset(&mut self) {
        self.0 = 0.0;
    }
}

/// Which population the agent belongs to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership(pub Group);

/// Most recent move the agent made, as actor or as opponent
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastChoice(pub Choice);

/// Everything an agent entity is spawned with
#[derive(Bundle)]
pub struct AgentBundle {
    pub agent: Agent,
    pub id: AgentId,
    pub strategy: Strategy,
    pub score: Score,
    pub membership: Membership,
    pub last_choice: LastChoice,
}

impl AgentBundle {
    pub fn new(id: AgentId, group: Group, strategy: Strategy, last_choice: Choice) -> Self {
        Self {
            agent: Agent,
            id,
            strategy,
            score: Score::default(),
            membership: Membership(group),
            last_choice: LastChoice(last_choice),
        }
    }
}

/// Read an agent's components back out of the world
pub fn snapshot_agent(world: &World, entity: Entity) -> Option<AgentSnapshot> {
    let id = world.get::<AgentId>(entity)?;
    let strategy = world.get::<Strategy>(entity)?;
    let score = world.get::<Score>(entity)?;
    let membership = world.get::<Membership>(entity)?;
    let last_choice = world.get::<LastChoice>(entity)?;

    Some(AgentSnapshot {
        agent_id: id.0,
        group: membership.0,
        yellow_strategy: strategy.yellow.to_bits(),
        green_strategy: strategy.green.to_bits(),
        score: score.0,
        last_choice: last_choice.0,
    })
}
