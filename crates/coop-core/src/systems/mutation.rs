//! Mutation
//!
//! Independent per-bit flips applied to freshly bred children.

use rand::Rng;

use coop_events::CHROMOSOME_LEN;

use crate::components::agent::Strategy;

/// Flip each of the strategy's bits with probability `rate`.
///
/// Bits are visited yellow chromosome first, locus 0 upward, then green; a bit
/// flips when its uniform draw falls below `rate`. Returns the number of flips.
pub fn mutate<R: Rng + ?Sized>(strategy: &mut Strategy, rate: f64, rng: &mut R) -> u32 {
    let mut flips = 0;
    for chromosome in [&mut strategy.yellow, &mut strategy.green] {
        for locus in 0..CHROMOSOME_LEN {
            if rng.gen::<f64>() < rate {
                chromosome.flip(locus);
                flips += 1;
            }
        }
    }
    flips
}
