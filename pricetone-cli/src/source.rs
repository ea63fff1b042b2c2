//! Demo price series for the player.
//!
//! The engine only needs a finite ordered run of values; these generators
//! stand in for a real market feed. Both are deterministic for a given seed.

use clap::ValueEnum;
use pricetone_engine::Span;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fraction of the domain width a random-walk step may move.
const WALK_VOLATILITY: f32 = 0.08;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Seeded random walk starting mid-domain, clamped to the domain.
    RandomWalk,
    /// Straight line from the bottom of the domain to the top.
    Ramp,
}

pub fn generate(kind: SourceKind, len: usize, domain: Span, seed: u64) -> Vec<f32> {
    match kind {
        SourceKind::RandomWalk => random_walk(len, domain, seed),
        SourceKind::Ramp => ramp(len, domain),
    }
}

fn random_walk(len: usize, domain: Span, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_step = domain.width() * WALK_VOLATILITY;
    let mut price = domain.min + 0.5 * domain.width();
    (0..len)
        .map(|_| {
            let current = price;
            price = domain.clamp(price + rng.gen_range(-max_step..=max_step));
            current
        })
        .collect()
}

fn ramp(len: usize, domain: Span) -> Vec<f32> {
    match len {
        0 => Vec::new(),
        1 => vec![domain.min + 0.5 * domain.width()],
        _ => (0..len)
            .map(|i| domain.min + domain.width() * i as f32 / (len - 1) as f32)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: Span = Span::new(10.0, 100.0);

    #[test]
    fn random_walk_is_seeded_and_bounded() {
        let a = generate(SourceKind::RandomWalk, 500, DOMAIN, 42);
        let b = generate(SourceKind::RandomWalk, 500, DOMAIN, 42);
        let c = generate(SourceKind::RandomWalk, 500, DOMAIN, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 500);
        assert_eq!(a[0], 55.0);
        assert!(a.iter().all(|&p| DOMAIN.contains(p)));
    }

    #[test]
    fn ramp_spans_the_domain() {
        let r = generate(SourceKind::Ramp, 10, DOMAIN, 0);
        assert_eq!(r.first(), Some(&10.0));
        assert_eq!(r.last(), Some(&100.0));
        assert!(r.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(generate(SourceKind::Ramp, 1, DOMAIN, 0), [55.0]);
        assert!(generate(SourceKind::Ramp, 0, DOMAIN, 0).is_empty());
    }
}
