//! Selection System
//!
//! Removes the lowest scorers from each population after play.

use bevy_ecs::prelude::*;
use std::cmp::Ordering;

use coop_events::Group;

use crate::components::agent::Score;
use crate::components::population::{LineageStats, Rosters};

use super::params::RoundParams;

/// Sort `roster` by ascending score and drain its `count` lowest members.
///
/// The sort is stable, so equal scores keep their roster order and the
/// earlier one is culled first.
pub fn cull_lowest<T: Copy>(roster: &mut Vec<T>, count: usize, score_of: impl Fn(T) -> f64) -> Vec<T> {
    roster.sort_by(|&a, &b| {
        score_of(a)
            .partial_cmp(&score_of(b))
            .unwrap_or(Ordering::Equal)
    });
    let count = count.min(roster.len());
    roster.drain(..count).collect()
}

/// System to cull both populations and despawn the losers
pub fn cull_populations(
    mut commands: Commands,
    params: Res<RoundParams>,
    mut rosters: ResMut<Rosters>,
    mut lineage: ResMut<LineageStats>,
    scores: Query<&Score>,
) {
    for group in Group::ALL {
        let culled = cull_lowest(rosters.get_mut(group), params.cull_count, |entity| {
            scores.get(entity).map(|s| s.0).unwrap_or(f64::NEG_INFINITY)
        });

        lineage.culled += culled.len() as u64;
        for entity in culled {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::{AgentBundle, AgentId, Strategy};
    use crate::config::Config;
    use coop_events::Choice;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn test_cull_keeps_top_thirty() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut roster: Vec<u64> = (0..50).collect();
        roster.shuffle(&mut rng);

        // Score equals id
        let culled = cull_lowest(&mut roster, 20, |id| id as f64);

        let mut culled_sorted = culled.clone();
        culled_sorted.sort();
        assert_eq!(culled_sorted, (0..20).collect::<Vec<_>>());

        let mut kept = roster.clone();
        kept.sort();
        assert_eq!(kept, (20..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_cull_ties_follow_roster_order() {
        // (id, score)
        let scores = [(0u64, 5.0), (1, 1.0), (2, 5.0), (3, 1.0), (4, 5.0)];
        let mut roster: Vec<u64> = vec![4, 3, 2, 1, 0];

        let culled = cull_lowest(&mut roster, 3, |id| scores[id as usize].1);

        // Both 1.0 scorers go, then the first 5.0 scorer in roster order
        assert_eq!(culled, vec![3, 1, 4]);
        assert_eq!(roster, vec![2, 0]);
    }

    #[test]
    fn test_cull_handles_negative_scores() {
        let mut roster = vec![0u64, 1, 2, 3];
        let scores = [-10.0, 5.0, -200.0, 0.0];

        let culled = cull_lowest(&mut roster, 2, |id| scores[id as usize]);

        assert_eq!(culled, vec![2, 0]);
        assert_eq!(roster, vec![3, 1]);
    }

    #[test]
    fn test_cull_count_larger_than_roster() {
        let mut roster = vec![1u64, 2];
        let culled = cull_lowest(&mut roster, 5, |id| id as f64);
        assert_eq!(culled.len(), 2);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_cull_populations_despawns_lowest() {
        let mut config = Config::default();
        config.population.size = 10;
        config.population.cull_count = 4;
        config.interaction.sample_size = 5;

        let mut world = World::new();
        world.insert_resource(RoundParams::from_config(&config).unwrap());
        world.insert_resource(LineageStats::new());

        let mut rosters = Rosters::new();
        for group in Group::ALL {
            for i in 0..10u64 {
                let id = if group == Group::Yellow { i } else { 100 + i };
                let entity = world
                    .spawn(AgentBundle::new(AgentId(id), group, Strategy::default(), Choice::Defect))
                    .id();
                world.get_mut::<Score>(entity).unwrap().0 = i as f64;
                rosters.get_mut(group).push(entity);
            }
        }
        world.insert_resource(rosters);

        let mut schedule = Schedule::default();
        schedule.add_systems(cull_populations);
        schedule.run(&mut world);

        let rosters = world.resource::<Rosters>().clone();
        for group in Group::ALL {
            assert_eq!(rosters.len(group), 6);
            for &e in rosters.get(group) {
                assert!(world.get::<Score>(e).unwrap().0 >= 4.0);
            }
        }
        assert_eq!(world.resource::<LineageStats>().culled, 8);

        let mut agents = world.query::<&AgentId>();
        assert_eq!(agents.iter(&world).count(), 12);
    }
}
