//! Interaction System
//!
//! Every agent plays a sample of both populations. Each side picks its move
//! from the chromosome matching the opponent's colour; only the acting agent
//! is scored; the opponent earns its own score when it acts.

use bevy_ecs::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use coop_events::{Choice, Group};

use crate::components::agent::{Agent, LastChoice, Membership, Score, Strategy};
use crate::components::population::Rosters;
use crate::SimRng;

use super::params::RoundParams;

/// Agents as the interaction phase sees them
pub type AgentQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Strategy,
        &'static Membership,
        &'static mut Score,
        &'static mut LastChoice,
    ),
    With<Agent>,
>;

/// Pick a move against an opponent of `opponent` colour.
///
/// A locus is drawn from `loci` and its bit decides: set cooperates.
pub fn choose_move<R: Rng + ?Sized>(
    strategy: &Strategy,
    opponent: Group,
    loci: &WeightedIndex<u32>,
    rng: &mut R,
) -> Choice {
    let locus = loci.sample(rng);
    Choice::from_bit(strategy.toward(opponent).get(locus))
}

/// System to zero every score at the start of a round
pub fn reset_scores(mut scores: Query<&mut Score, With<Agent>>) {
    for mut score in scores.iter_mut() {
        score.reset();
    }
}

/// System to permute each roster so no agent always acts first
pub fn shuffle_rosters(mut rng: ResMut<SimRng>, mut rosters: ResMut<Rosters>) {
    for group in Group::ALL {
        rosters.get_mut(group).shuffle(&mut rng.0);
    }
}

/// System to run the interaction phase for every agent, yellow roster first
pub fn play_interactions(
    mut rng: ResMut<SimRng>,
    params: Res<RoundParams>,
    rosters: Res<Rosters>,
    mut agents: AgentQuery,
) {
    let rng = &mut rng.0;

    for group in Group::ALL {
        for &actor in rosters.get(group) {
            play_agent(actor, &rosters, &params, &mut agents, rng);
        }
    }
}

fn play_agent<R: Rng + ?Sized>(
    actor: Entity,
    rosters: &Rosters,
    params: &RoundParams,
    agents: &mut AgentQuery,
    rng: &mut R,
) {
    let Ok((&actor_strategy, &Membership(actor_group), _, _)) = agents.get(actor) else {
        return;
    };

    for pool_group in Group::ALL {
        let pool = rosters.opponents(pool_group, actor);
        let opponents: Vec<Entity> = pool
            .choose_multiple(rng, params.sample_size)
            .copied()
            .collect();

        for opponent in opponents {
            let Ok((&opponent_strategy, &Membership(opponent_group), _, _)) = agents.get(opponent)
            else {
                continue;
            };

            // Both moves are drawn fresh for every pairing
            let own = choose_move(&actor_strategy, opponent_group, &params.loci, rng);
            let other = choose_move(&opponent_strategy, actor_group, &params.loci, rng);

            if let Ok((_, _, _, mut last)) = agents.get_mut(opponent) {
                last.0 = other;
            }
            if let Ok((_, _, mut score, mut last)) = agents.get_mut(actor) {
                score.0 += params.payoff.payoff(own, other);
                last.0 = own;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::{AgentBundle, AgentId, Chromosome};
    use crate::config::Config;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.population.size = 6;
        config.population.cull_count = 2;
        config.interaction.sample_size = 4;
        config
    }

    /// World with a full roster for each group, every agent sharing `strategy`
    fn world_with(config: &Config, strategy: Strategy) -> World {
        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(42)));
        world.insert_resource(RoundParams::from_config(config).unwrap());

        let mut rosters = Rosters::new();
        let mut next_id = 0;
        for group in Group::ALL {
            for _ in 0..config.population.size {
                let entity = world
                    .spawn(AgentBundle::new(AgentId(next_id), group, strategy, Choice::Defect))
                    .id();
                rosters.get_mut(group).push(entity);
                next_id += 1;
            }
        }
        world.insert_resource(rosters);
        world
    }

    fn run_play(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(play_interactions);
        schedule.run(world);
    }

    fn scores_of(world: &World, group: Group) -> Vec<f64> {
        world
            .resource::<Rosters>()
            .get(group)
            .iter()
            .map(|&e| world.get::<Score>(e).unwrap().0)
            .collect()
    }

    #[test]
    fn test_choose_move_follows_opponent_colour() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let loci = WeightedIndex::new([8u32, 4, 2, 1]).unwrap();
        let strategy = Strategy::new(
            Chromosome::from_bits([1, 1, 1, 1]),
            Chromosome::from_bits([0, 0, 0, 0]),
        );

        for _ in 0..100 {
            assert_eq!(choose_move(&strategy, Group::Yellow, &loci, &mut rng), Choice::Cooperate);
            assert_eq!(choose_move(&strategy, Group::Green, &loci, &mut rng), Choice::Defect);
        }
    }

    #[test]
    fn test_choose_move_weights_leading_locus() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let loci = WeightedIndex::new([8u32, 4, 2, 1]).unwrap();
        let strategy = Strategy::new(
            Chromosome::from_bits([1, 0, 0, 0]),
            Chromosome::from_bits([1, 0, 0, 0]),
        );

        let cooperations = (0..15_000)
            .filter(|_| choose_move(&strategy, Group::Yellow, &loci, &mut rng).cooperates())
            .count();

        // Locus 0 carries 8/15 of the weight
        assert!(
            cooperations > 7_500 && cooperations < 8_500,
            "cooperated {} times",
            cooperations
        );
    }

    #[test]
    fn test_all_cooperators_earn_reward_for_every_opponent() {
        let config = small_config();
        let cooperator = Strategy::new(
            Chromosome::from_bits([1, 1, 1, 1]),
            Chromosome::from_bits([1, 1, 1, 1]),
        );
        let mut world = world_with(&config, cooperator);

        run_play(&mut world);

        // 4 opponents from each group, reward 5 each
        for group in Group::ALL {
            assert!(scores_of(&world, group).iter().all(|&s| s == 40.0));
        }
    }

    #[test]
    fn test_all_defectors_score_nothing() {
        let config = small_config();
        let mut world = world_with(&config, Strategy::default());

        run_play(&mut world);

        for group in Group::ALL {
            assert!(scores_of(&world, group).iter().all(|&s| s == 0.0));
            for &e in world.resource::<Rosters>().get(group) {
                assert_eq!(world.get::<LastChoice>(e).unwrap().0, Choice::Defect);
            }
        }
    }

    #[test]
    fn test_everyone_trusts_yellow_only() {
        // Cooperate with yellow opponents, defect against green ones
        let config = small_config();
        let strategy = Strategy::new(
            Chromosome::from_bits([1, 1, 1, 1]),
            Chromosome::from_bits([0, 0, 0, 0]),
        );
        let mut world = world_with(&config, strategy);

        run_play(&mut world);

        // Yellow: (C,C) x4 = 20, then defects on cooperating greens (temptation 0) x4
        assert!(scores_of(&world, Group::Yellow).iter().all(|&s| s == 20.0));
        // Green: cooperates with yellows who defect (sucker -5) x4, (D,D) x4
        assert!(scores_of(&world, Group::Green).iter().all(|&s| s == -20.0));
    }

    #[test]
    fn test_reset_scores() {
        let config = small_config();
        let mut world = world_with(&config, Strategy::default());
        let first = world.resource::<Rosters>().yellow[0];
        world.get_mut::<Score>(first).unwrap().0 = 35.0;

        let mut schedule = Schedule::default();
        schedule.add_systems(reset_scores);
        schedule.run(&mut world);

        assert_eq!(world.get::<Score>(first).unwrap().0, 0.0);
    }

    #[test]
    fn test_shuffle_keeps_members() {
        let config = small_config();
        let mut world = world_with(&config, Strategy::default());
        let before = world.resource::<Rosters>().clone();

        let mut schedule = Schedule::default();
        schedule.add_systems(shuffle_rosters);
        schedule.run(&mut world);

        let after = world.resource::<Rosters>();
        for group in Group::ALL {
            let mut a = before.get(group).to_vec();
            let mut b = after.get(group).to_vec();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }
}
