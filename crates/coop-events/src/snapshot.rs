//! Snapshot Types
//!
//! Serialization structs for population state and end-of-run summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Choice, Group, RoundRecord, CHROMOSOME_LEN};

/// One agent as it stands at the moment of the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: u64,
    pub group: Group,
    /// Chromosome used against yellow opponents, one 0/1 entry per locus
    pub yellow_strategy: [u8; CHROMOSOME_LEN],
    /// Chromosome used against green opponents
    pub green_strategy: [u8; CHROMOSOME_LEN],
    pub score: f64,
    pub last_choice: Choice,
}

impl fmt::Display for AgentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Y: {:?}, G: {:?}, Score: {}, Group: {}, Choice: {}",
            self.agent_id,
            self.yellow_strategy,
            self.green_strategy,
            self.score,
            self.group,
            self.last_choice.as_bit()
        )
    }
}

/// All members of one group, in roster order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub group: Group,
    pub agents: Vec<AgentSnapshot>,
}

impl PopulationSnapshot {
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn mean_score(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(|a| a.score).sum::<f64>() / self.agents.len() as f64
    }

    /// Highest-scoring agent; the earliest in roster order wins ties
    pub fn best(&self) -> Option<&AgentSnapshot> {
        self.agents
            .iter()
            .reduce(|best, a| if a.score > best.score { a } else { best })
    }
}

/// Birth/death bookkeeping for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageSnapshot {
    pub bred: u64,
    pub culled: u64,
    pub mutated_bits: u64,
    /// Identity the next new agent would receive
    pub next_agent_id: u64,
}

/// Written once per run next to the round table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: u32,
    pub seed: u64,
    pub rounds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_record: Option<RoundRecord>,
    pub lineage: LineageSnapshot,
    pub populations: Vec<PopulationSnapshot>,
}
