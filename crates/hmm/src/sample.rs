//! Categorical sampling over the columns of probability tables.

use ndarray::ArrayView1;

/// Draws one index from the categorical distribution `probs`.
///
/// Entries are treated as unnormalised weights: a uniform draw in `[0, 1)` is
/// scaled by the total positive weight and the cumulative weights are walked
/// until one exceeds it. Zero, negative and NaN entries are never selected.
/// If rounding leaves the draw above the final cumulative sum, the last index
/// with positive weight is returned (the last index overall when no entry is
/// positive).
///
/// Exactly one `f64` is drawn from `rng` per call.
pub fn sample_categorical(probs: ArrayView1<'_, f64>, rng: &mut impl rand::Rng) -> usize {
    let u: f64 = rng.random();
    let total: f64 = probs.iter().filter(|&&p| p > 0.0).sum();
    let target = u * total;

    let mut cumulative = 0.0;
    let mut last_positive = probs.len().saturating_sub(1);
    for (i, &p) in probs.iter().enumerate() {
        if p > 0.0 {
            cumulative += p;
            last_positive = i;
            if target < cumulative {
                return i;
            }
        }
    }
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn point_mass_always_selected() {
        let probs = array![0.0, 0.0, 1.0, 0.0];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(sample_categorical(probs.view(), &mut rng), 2);
        }
    }

    #[test]
    fn zero_probability_never_selected() {
        let probs = array![0.0, 0.5, 0.0, 0.5];
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let i = sample_categorical(probs.view(), &mut rng);
            assert!(i == 1 || i == 3, "drew zero-probability index {i}");
        }
    }

    #[test]
    fn unnormalised_weights_are_rescaled() {
        let probs = array![0.2, 0.2];
        let mut rng = StdRng::seed_from_u64(3);
        let n = 20_000;
        let zeros = (0..n)
            .filter(|_| sample_categorical(probs.view(), &mut rng) == 0)
            .count();
        let f = zeros as f64 / n as f64;
        assert!((f - 0.5).abs() < 0.02, "index 0 frequency: {f}, expected ~0.5");
    }

    #[test]
    fn weights_above_one_are_rescaled() {
        let probs = array![3.0, 1.0, 0.0];
        let mut rng = StdRng::seed_from_u64(17);
        let n = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            counts[sample_categorical(probs.view(), &mut rng)] += 1;
        }
        assert_eq!(counts[2], 0);
        let f = counts[0] as f64 / n as f64;
        assert!((f - 0.75).abs() < 0.02, "index 0 frequency: {f}, expected ~0.75");
    }

    #[test]
    fn all_zero_returns_last_index() {
        let probs = array![0.0, 0.0, 0.0];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_categorical(probs.view(), &mut rng), 2);
    }

    #[test]
    fn frequencies_match_probabilities() {
        let probs = array![0.2, 0.5, 0.3];
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            counts[sample_categorical(probs.view(), &mut rng)] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            let f = c as f64 / n as f64;
            assert!(
                (f - probs[i]).abs() < 0.02,
                "index {i}: frequency {f}, expected ~{}",
                probs[i]
            );
        }
    }

    #[test]
    fn deterministic_with_seed() {
        let probs = array![0.25, 0.25, 0.25, 0.25];
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| sample_categorical(probs.view(), &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(123), draw(123));
    }
}
