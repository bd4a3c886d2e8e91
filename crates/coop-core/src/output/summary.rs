//! Run Summaries
//!
//! File naming for per-run output and the JSON summary writer.

use std::fs;
use std::path::{Path, PathBuf};

use coop_events::{Group, RunSummary};

use crate::error::SimError;

/// Round table path for run `run` inside `dir`
pub fn run_table_path(dir: impl AsRef<Path>, run: u32) -> PathBuf {
    dir.as_ref().join(format!("run_{:03}.csv", run))
}

/// Summary path for run `run` inside `dir`
pub fn summary_path(dir: impl AsRef<Path>, run: u32) -> PathBuf {
    dir.as_ref().join(format!("run_{:03}_summary.json", run))
}

/// Write a run summary as pretty-printed JSON
pub fn write_summary(path: impl AsRef<Path>, summary: &RunSummary) -> Result<(), SimError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

/// Per-group overview of a finished run: size, mean score, final biases and
/// the best agent
pub fn population_report(summary: &RunSummary) -> String {
    let mut lines = vec![format!(
        "Run {} (seed {}), {} rounds",
        summary.run, summary.seed, summary.rounds
    )];

    for population in &summary.populations {
        let group = population.group;
        let mut line = format!(
            "  {}: {} agents, mean score {:.2}",
            group,
            population.len(),
            population.mean_score()
        );
        if let Some(record) = &summary.final_record {
            line.push_str(&format!(
                ", toward yellow {:.2}%, toward green {:.2}%",
                record.bias(group, Group::Yellow),
                record.bias(group, Group::Green)
            ));
        }
        lines.push(line);

        if let Some(best) = population.best() {
            lines.push(format!("    best {}", best));
        }
    }

    lines.join("\n")
}
