use crate::config::PriceRange;

/// Random salary-cap prices
///
/// Prices are not tied to player quality; every player draws uniformly from
/// the configured range.
pub struct PriceAssigner {
    rng: fastrand::Rng,
    range: PriceRange,
}

impl PriceAssigner {
    pub fn new(range: PriceRange) -> Self {
        Self { rng: fastrand::Rng::new(), range }
    }

    /// Deterministic prices, for tests and reproducible dumps
    pub fn with_seed(range: PriceRange, seed: u64) -> Self {
        Self { rng: fastrand::Rng::with_seed(seed), range }
    }

    pub fn next_price(&mut self) -> u32 {
        self.rng.u32(self.range.min..self.range.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_stay_in_range() {
        let mut pricer = PriceAssigner::new(PriceRange::default());
        for _ in 0..1000 {
            let price = pricer.next_price();
            assert!((20..50).contains(&price), "price {price} out of range");
        }
    }

    #[test]
    fn test_seeded_prices_repeat() {
        let mut a = PriceAssigner::with_seed(PriceRange::default(), 7);
        let mut b = PriceAssigner::with_seed(PriceRange::default(), 7);
        let first: Vec<u32> = (0..10).map(|_| a.next_price()).collect();
        let second: Vec<u32> = (0..10).map(|_| b.next_price()).collect();
        assert_eq!(first, second);
    }
}
