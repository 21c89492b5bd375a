//! Seeded generators of learnable outcome batches.
//!
//! In every generated batch the outcome is exactly "a sportsbook signal was
//! present", so a working trainer separates the classes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::LabeledOpportunity;
use crate::domain::{Direction, Opportunity, SignalSource, Urgency};

const URGENCIES: [Urgency; 3] = [Urgency::Critical, Urgency::Standard, Urgency::Fyi];

/// `n` labeled outcomes, deterministic for a given `seed`.
pub fn separable_outcomes(n: usize, seed: u64) -> Vec<LabeledOpportunity> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let sportsbook = rng.gen_bool(0.5);
            let mut builder = Opportunity::builder()
                .market(format!("market-{i}"))
                .edge(rng.gen_range(0.01..0.30))
                .confidence(rng.gen_range(0.3..0.9))
                .urgency(URGENCIES[rng.gen_range(0..URGENCIES.len())])
                .direction(if rng.gen_bool(0.5) {
                    Direction::BuyYes
                } else {
                    Direction::BuyNo
                });
            if sportsbook {
                builder = builder.signal(SignalSource::Sportsbook);
            }
            if rng.gen_bool(0.5) {
                builder = builder.signal(SignalSource::News);
            }
            LabeledOpportunity::new(builder.build(), sportsbook)
        })
        .collect()
}

/// Unlabeled opportunities drawn the same way.
pub fn opportunities(n: usize, seed: u64) -> Vec<Opportunity> {
    separable_outcomes(n, seed)
        .into_iter()
        .map(|sample| sample.opportunity)
        .collect()
}
