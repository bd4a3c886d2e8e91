//! Simulation Engine
//!
//! Owns the ECS world for one run and advances it round by round.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;

use coop_events::{Group, PopulationSnapshot, RoundRecord, RunSummary};

use crate::components::agent::snapshot_agent;
use crate::components::population::{IdSequence, LineageStats, Rosters};
use crate::config::Config;
use crate::error::SimError;
use crate::output::{self, RoundRecorder};
use crate::setup;
use crate::systems::{build_round_schedule, RoundParams};
use crate::SimRng;

/// Rounds between progress log lines
const PROGRESS_INTERVAL: u64 = 100;

/// One freshly initialised run: both populations, the seeded RNG and the
/// round schedule
pub struct Simulation {
    world: World,
    schedule: Schedule,
    config: Config,
    seed: u64,
    round: u64,
}

impl Simulation {
    /// Validate `config`, seed the RNG and spawn both populations
    pub fn new(config: Config, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let params = RoundParams::from_config(&config)?;

        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
        world.insert_resource(params);
        world.insert_resource(Rosters::new());
        world.insert_resource(IdSequence::new());
        world.insert_resource(LineageStats::new());

        setup::spawn_all_agents(&mut world, config.population.size);
        let summary = setup::get_spawn_summary(&mut world);
        tracing::debug!("Spawned {}", summary);

        Ok(Self {
            world,
            schedule: build_round_schedule(),
            config,
            seed,
            round: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rounds completed so far
    pub fn rounds_completed(&self) -> u64 {
        self.round
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Play one round (reset, shuffle, interact, cull, breed) and measure it
    pub fn step(&mut self) -> RoundRecord {
        self.schedule.run(&mut self.world);

        let record = output::measure_round(
            &self.world,
            self.round,
            &self.config.interaction.locus_weights,
        );
        self.round += 1;
        record
    }

    /// Play every configured round, writing one row per round to `recorder`.
    ///
    /// Returns the last round's record.
    pub fn run(&mut self, recorder: &mut RoundRecorder) -> Result<Option<RoundRecord>, SimError> {
        let mut last = None;

        for _ in 0..self.config.simulation.rounds {
            let record = self.step();
            recorder.record(&record)?;

            if record.round % PROGRESS_INTERVAL == 0 {
                tracing::debug!(
                    "[Round {:>5}] yy {:>6.2} yg {:>6.2} gy {:>6.2} gg {:>6.2}",
                    record.round,
                    record.yellow_to_yellow,
                    record.yellow_to_green,
                    record.green_to_yellow,
                    record.green_to_green
                );
            }
            last = Some(record);
        }

        recorder.flush()?;
        Ok(last)
    }

    /// Current members of `group` in roster order
    pub fn population(&self, group: Group) -> PopulationSnapshot {
        let agents = self
            .world
            .resource::<Rosters>()
            .get(group)
            .iter()
            .filter_map(|&e| snapshot_agent(&self.world, e))
            .collect();

        PopulationSnapshot { group, agents }
    }

    pub fn summary(&self, run: u32, final_record: Option<RoundRecord>) -> RunSummary {
        let lineage = self
            .world
            .resource::<LineageStats>()
            .snapshot(self.world.resource::<IdSequence>());

        RunSummary {
            run,
            seed: self.seed,
            rounds: self.round,
            final_record,
            lineage,
            populations: Group::ALL.iter().map(|&g| self.population(g)).collect(),
        }
    }
}

/// Execute every configured replicate, writing a round table (and optionally
/// a summary) per run into the output directory.
///
/// Run `k` is seeded with `seed + k`.
pub fn run_replicates(config: &Config) -> Result<Vec<RunSummary>, SimError> {
    config.validate()?;
    let sim_config = &config.simulation;
    fs::create_dir_all(&sim_config.output_dir)?;

    let mut summaries = Vec::with_capacity(sim_config.runs as usize);
    for run in 0..sim_config.runs {
        let seed = sim_config.seed.wrapping_add(u64::from(run));
        let table_path = output::run_table_path(&sim_config.output_dir, run);
        tracing::info!(
            "Run {} (seed {}): {} rounds -> {}",
            run,
            seed,
            sim_config.rounds,
            table_path.display()
        );

        let mut simulation = Simulation::new(config.clone(), seed)?;
        let mut recorder = RoundRecorder::create(&table_path)?;
        let final_record = simulation.run(&mut recorder)?;
        let summary = simulation.summary(run, final_record);

        if sim_config.write_summary {
            output::write_summary(output::summary_path(&sim_config.output_dir, run), &summary)?;
        }

        if let Some(record) = &summary.final_record {
            tracing::info!(
                "Run {} finished: yy {:.2} yg {:.2} gy {:.2} gg {:.2} ({} agents bred, {} bits mutated)",
                run,
                record.yellow_to_yellow,
                record.yellow_to_green,
                record.green_to_yellow,
                record.green_to_green,
                summary.lineage.bred,
                summary.lineage.mutated_bits
            );
        }
        summaries.push(summary);
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> Config {
        let mut config = Config::default();
        config.simulation.rounds = 5;
        config
    }

    #[test]
    fn test_new_simulation_has_full_populations() {
        let simulation = Simulation::new(quick_config(), 42).unwrap();

        assert_eq!(simulation.population(Group::Yellow).len(), 50);
        assert_eq!(simulation.population(Group::Green).len(), 50);
        assert_eq!(simulation.rounds_completed(), 0);
    }

    #[test]
    fn test_step_keeps_population_size() {
        let mut simulation = Simulation::new(quick_config(), 42).unwrap();

        for round in 0..5 {
            let record = simulation.step();
            assert_eq!(record.round, round);
            assert!(record.in_range());
            assert_eq!(simulation.population(Group::Yellow).len(), 50);
            assert_eq!(simulation.population(Group::Green).len(), 50);
        }

        let mut query = simulation.world_mut().query::<&crate::components::agent::AgentId>();
        assert_eq!(query.iter(simulation.world()).count(), 100);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = quick_config();
        config.population.cull_count = 60;
        assert!(matches!(
            Simulation::new(config, 42),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn test_summary_tracks_lineage() {
        let mut simulation = Simulation::new(quick_config(), 42).unwrap();
        let final_record = simulation.run(&mut RoundRecorder::null()).unwrap();
        let summary = simulation.summary(0, final_record);

        assert_eq!(summary.rounds, 5);
        // 20 per group per round
        assert_eq!(summary.lineage.bred, 200);
        assert_eq!(summary.lineage.culled, 200);
        assert_eq!(summary.lineage.next_agent_id, 300);
        assert_eq!(summary.populations.len(), 2);
        assert_eq!(summary.final_record.map(|r| r.round), Some(4));
    }
}
