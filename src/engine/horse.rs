//! Horse - Per-horse advancement rule
//!
//! Every tick a horse moves 0-2 units, plus one bonus unit with a
//! probability tied to its share of the total weight.

use rand::Rng;

/// A horse's fixed race parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horse {
    /// 1-based horse number
    pub number: usize,
    /// Share of total weight, capped at `MAX_BONUS_PROBABILITY`
    pub bonus_probability: f64,
}

impl Horse {
    /// Largest base step per tick
    const MAX_BASE_STEP: u32 = 2;
    const MAX_BONUS_PROBABILITY: f64 = 0.6;
    /// Chance of a bonus unit per tick is `bonus_probability * BONUS_SCALE`
    const BONUS_SCALE: f64 = 0.5;

    /// Build the field from profile weights
    pub fn field(weights: &[f64]) -> Vec<Horse> {
        let total: f64 = weights.iter().sum();
        let total = if total > 0.0 { total } else { 1.0 };

        weights
            .iter()
            .enumerate()
            .map(|(i, weight)| Horse {
                number: i + 1,
                bonus_probability: (weight / total).clamp(0.0, Self::MAX_BONUS_PROBABILITY),
            })
            .collect()
    }

    /// Units this horse advances on one tick
    pub fn step<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let base = rng.gen_range(0..=Self::MAX_BASE_STEP);
        let bonus = rng.gen_bool(self.bonus_probability * Self::BONUS_SCALE);
        base + u32::from(bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bonus_is_share_of_total() {
        let field = Horse::field(&[1.0, 1.0, 2.0]);
        assert_eq!(field.len(), 3);
        assert_eq!(field[0].number, 1);
        assert!((field[0].bonus_probability - 0.25).abs() < 1e-12);
        assert!((field[2].bonus_probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bonus_is_capped() {
        let field = Horse::field(&[9.0, 1.0]);
        assert_eq!(field[0].bonus_probability, 0.6);
    }

    #[test]
    fn zero_total_weight_has_no_bonus() {
        let field = Horse::field(&[0.0, 0.0]);
        assert!(field.iter().all(|h| h.bonus_probability == 0.0));
    }

    #[test]
    fn steps_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let horse = Horse { number: 1, bonus_probability: 0.6 };
        let steps = (0..1000).map(|_| horse.step(&mut rng)).collect::<Vec<_>>();
        assert!(steps.iter().all(|s| *s <= 3));
        assert!(steps.contains(&0));
        assert!(steps.contains(&3));
    }

    #[test]
    fn bonus_raises_mean_step() {
        let mut rng = StdRng::seed_from_u64(11);
        let plain = Horse { number: 1, bonus_probability: 0.0 };
        let boosted = Horse { number: 2, bonus_probability: 0.6 };
        let n = 20_000;
        let plain_mean = (0..n).map(|_| plain.step(&mut rng)).sum::<u32>() as f64 / n as f64;
        let boosted_mean = (0..n).map(|_| boosted.step(&mut rng)).sum::<u32>() as f64 / n as f64;
        assert!((plain_mean - 1.0).abs() < 0.05);
        assert!((boosted_mean - 1.3).abs() < 0.05);
    }
}
