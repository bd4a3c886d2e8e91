//! Group and Choice Types
//!
//! The two sock-colour populations and the binary move an agent makes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of loci in each strategy chromosome
pub const CHROMOSOME_LEN: usize = 4;

/// Population an agent belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Yellow,
    Green,
}

impl Group {
    /// Both groups, in the order they act and are reported
    pub const ALL: [Group; 2] = [Group::Yellow, Group::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Yellow => "yellow",
            Group::Green => "green",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single move in the pairwise game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Cooperate,
    #[default]
    Defect,
}

impl Choice {
    /// Map a chromosome bit to a move (set bit cooperates)
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Choice::Cooperate
        } else {
            Choice::Defect
        }
    }

    /// 1 for cooperate, 0 for defect
    pub fn as_bit(&self) -> u8 {
        match self {
            Choice::Cooperate => 1,
            Choice::Defect => 0,
        }
    }

    pub fn cooperates(&self) -> bool {
        matches!(self, Choice::Cooperate)
    }
}
