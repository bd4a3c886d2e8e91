//! Population Resources
//!
//! The ordered roster of each group, the identity generator, and lineage
//! bookkeeping.

use bevy_ecs::prelude::*;

use coop_events::{Group, LineageSnapshot};

/// Ordered agent handles for each group.
///
/// Roster order is the iteration order of a round and the tie-break order for
/// culling, so it is kept separately from ECS query order.
#[derive(Resource, Debug, Default, Clone)]
pub struct Rosters {
    pub yellow: Vec<Entity>,
    pub green: Vec<Entity>,
}

impl Rosters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: Group) -> &[Entity] {
        match group {
            Group::Yellow => &self.yellow,
            Group::Green => &self.green,
        }
    }

    pub fn get_mut(&mut self, group: Group) -> &mut Vec<Entity> {
        match group {
            Group::Yellow => &mut self.yellow,
            Group::Green => &mut self.green,
        }
    }

    pub fn len(&self, group: Group) -> usize {
        self.get(group).len()
    }

    /// Members of `group` other than `exclude`, in roster order
    pub fn opponents(&self, group: Group, exclude: Entity) -> Vec<Entity> {
        self.get(group)
            .iter()
            .copied()
            .filter(|&e| e != exclude)
            .collect()
    }
}

/// Monotonic agent identity generator owned by the simulation
#[derive(Resource, Debug, Default)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next identity
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Identity the next call to [`IdSequence::next_id`] will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// Running totals of births, deaths and mutations
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LineageStats {
    pub bred: u64,
    pub culled: u64,
    pub mutated_bits: u64,
}

impl LineageStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, ids: &IdSequence) -> LineageSnapshot {
        LineageSnapshot {
            bred: self.bred,
            culled: self.culled,
            mutated_bits: self.mutated_bits,
            next_agent_id: ids.peek(),
        }
    }
}
