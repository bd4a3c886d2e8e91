//! Round Records
//!
//! One row of the per-run output table: how strongly each group's strategy
//! chromosomes lean toward cooperation with each group, as a 0-100 percentage.

use serde::{Deserialize, Serialize};

use crate::Group;

/// Header line of the round table
pub const ROUND_TABLE_HEADER: &str =
    "round,yellow_to_yellow,yellow_to_green,green_to_yellow,green_to_green";

/// Strategy bias of both populations after a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 0-based round index within the run
    pub round: u64,
    /// Yellow population, yellow-strategy chromosome
    pub yellow_to_yellow: f64,
    /// Yellow population, green-strategy chromosome
    pub yellow_to_green: f64,
    /// Green population, yellow-strategy chromosome
    pub green_to_yellow: f64,
    /// Green population, green-strategy chromosome
    pub green_to_green: f64,
}

impl RoundRecord {
    /// Bias of `group`'s members toward opponents from `toward`
    pub fn bias(&self, group: Group, toward: Group) -> f64 {
        match (group, toward) {
            (Group::Yellow, Group::Yellow) => self.yellow_to_yellow,
            (Group::Yellow, Group::Green) => self.yellow_to_green,
            (Group::Green, Group::Yellow) => self.green_to_yellow,
            (Group::Green, Group::Green) => self.green_to_green,
        }
    }

    pub fn values(&self) -> [f64; 4] {
        [
            self.yellow_to_yellow,
            self.yellow_to_green,
            self.green_to_yellow,
            self.green_to_green,
        ]
    }

    /// True when every percentage lies in [0, 100]
    pub fn in_range(&self) -> bool {
        self.values().iter().all(|v| (0.0..=100.0).contains(v))
    }

    /// Format as a CSV line matching [`ROUND_TABLE_HEADER`]
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.round,
            self.yellow_to_yellow,
            self.yellow_to_green,
            self.green_to_yellow,
            self.green_to_green
        )
    }
}
