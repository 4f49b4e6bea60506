use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open interval `[low, high)` that initial weights are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub low: f64,
    pub high: f64,
}

impl WeightRange {
    pub fn new(low: f64, high: f64) -> WeightRange {
        WeightRange { low, high }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.low..self.high)
    }
}

impl Default for WeightRange {
    /// Centred on zero so fresh units sit on the steep part of the sigmoid.
    fn default() -> Self {
        WeightRange { low: -0.5, high: 0.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_inside_half_open_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = WeightRange::new(-0.1, 0.2);
        for _ in 0..1000 {
            let w = range.sample(&mut rng);
            assert!((-0.1..0.2).contains(&w), "{w} escaped the range");
        }
    }

    #[test]
    fn default_is_centred_on_zero() {
        let range = WeightRange::default();
        assert_eq!(range.low, -range.high);
    }
}
