//! Round Parameters
//!
//! The slice of [`Config`] the round systems read, with the locus distribution
//! built once up front.

use bevy_ecs::prelude::*;
use rand::distributions::WeightedIndex;

use crate::config::{Config, PayoffConfig};
use crate::error::ConfigError;

/// Parameters shared by every system in a round
#[derive(Resource, Debug, Clone)]
pub struct RoundParams {
    /// Opponents drawn from each group per acting agent
    pub sample_size: usize,
    /// Agents removed from each group after play
    pub cull_count: usize,
    /// Agents bred into each group after culling
    pub breed_count: usize,
    pub mutation_rate: f64,
    pub payoff: PayoffConfig,
    /// Distribution over chromosome loci used when choosing a move
    pub loci: WeightedIndex<u32>,
}

impl RoundParams {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let loci = WeightedIndex::new(config.interaction.locus_weights.iter().copied())
            .map_err(|e| ConfigError::Invalid(format!("interaction.locus_weights: {}", e)))?;

        Ok(Self {
            sample_size: config.interaction.sample_size,
            cull_count: config.population.cull_count,
            breed_count: config.breed_count(),
            mutation_rate: config.mutation.rate,
            payoff: config.payoff,
            loci,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let params = RoundParams::from_config(&Config::default()).unwrap();
        assert_eq!(params.sample_size, 20);
        assert_eq!(params.cull_count, 20);
        assert_eq!(params.breed_count, 20);
        assert_eq!(params.mutation_rate, 0.001);
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut config = Config::default();
        config.interaction.locus_weights = [0, 0, 0, 0];
        assert!(matches!(
            RoundParams::from_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
