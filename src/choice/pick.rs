use crate::Weight;
use rand::Rng;

/// Picks an index with probability proportional to its weight.
///
/// Draws `r` uniformly from `[0, Σw)` and returns the first index whose
/// cumulative sum reaches `r`, so a draw landing exactly on a boundary
/// resolves to the lower index.
///
/// Entries that are negative or not finite count as zero. Reinforcement with
/// negative payoffs can push weights there. When no entry is positive the
/// choice falls back to uniform over every index.
///
/// Precondition: `weights` is not empty.
pub fn pick_index<R: Rng + ?Sized>(weights: &[Weight], rng: &mut R) -> usize {
    debug_assert!(!weights.is_empty(), "pick_index requires a choice");
    let cumulative = weights
        .iter()
        .map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 })
        .scan(0.0, |sum, w| {
            *sum += w;
            Some(*sum)
        })
        .collect::<Vec<Weight>>();
    let total = cumulative.last().copied().unwrap_or_default();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..weights.len().max(1));
    }
    let draw = rng.random::<Weight>() * total;
    cumulative
        .iter()
        .position(|c| *c >= draw)
        .unwrap_or(weights.len() - 1)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::RngCore;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Rng whose `random::<f64>()` yields a fixed fraction.
    pub(crate) struct Fixed(pub f64);
    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }
        fn next_u64(&mut self) -> u64 {
            // StandardUniform<f64> takes the top 53 bits.
            ((self.0 * (1u64 << 53) as f64) as u64) << 11
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.iter_mut().for_each(|b| *b = 0);
        }
    }

    #[test]
    fn fixed_rng_reproduces_fraction() {
        let ref mut rng = Fixed(0.25);
        assert_eq!(rng.random::<f64>(), 0.25);
    }
    #[test]
    fn index_in_bounds() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let weights = [3.0, 0.0, 1.5, 9.0];
        for _ in 0..1000 {
            assert!(pick_index(&weights, rng) < weights.len());
        }
    }
    #[test]
    fn boundary_draw_resolves_to_lower_index() {
        // cumulative [1, 2]; a draw of exactly 1.0 reaches the first sum
        assert_eq!(pick_index(&[1.0, 1.0], &mut Fixed(0.5)), 0);
        assert_eq!(pick_index(&[1.0, 1.0], &mut Fixed(0.51)), 1);
        assert_eq!(pick_index(&[1.0, 1.0], &mut Fixed(0.0)), 0);
    }
    #[test]
    fn zero_weights_only_win_on_boundary() {
        assert_eq!(pick_index(&[0.0, 5.0], &mut Fixed(0.0)), 0);
        assert_eq!(pick_index(&[0.0, 5.0], &mut Fixed(0.01)), 1);
        assert_eq!(pick_index(&[5.0, 0.0], &mut Fixed(0.999)), 0);
        let ref mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_ne!(pick_index(&[0.0, 2.0, 0.0], rng), 2);
        }
    }
    #[test]
    fn negative_weights_count_as_zero() {
        // cumulative [0, 80]
        assert_eq!(pick_index(&[-20.0, 80.0], &mut Fixed(0.5)), 1);
        assert_eq!(pick_index(&[80.0, -20.0], &mut Fixed(0.999)), 0);
        let ref mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..1000 {
            assert_eq!(pick_index(&[-1.0, f64::NAN, 3.0], rng), 2);
        }
    }
    #[test]
    fn no_positive_weight_falls_back_to_uniform() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        let draws = 30_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            counts[pick_index(&[-5.0, 0.0, -100.0], rng)] += 1;
        }
        for count in counts {
            assert!((count as f64 / draws as f64 - 1.0 / 3.0).abs() < 0.015);
        }
    }
    #[test]
    fn frequencies_converge_to_weights() {
        let ref mut rng = SmallRng::seed_from_u64(42);
        let weights = [1.0, 3.0, 6.0];
        let draws = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            counts[pick_index(&weights, rng)] += 1;
        }
        for (count, weight) in counts.iter().zip(weights.iter()) {
            let observed = *count as f64 / draws as f64;
            let expected = weight / 10.0;
            assert!((observed - expected).abs() < 0.01, "{} vs {}", observed, expected);
        }
    }
    #[test]
    fn frequencies_hold_after_large_updates() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let mut weights: [f64; 2] = [80.0, 80.0];
        for _ in 0..10_000 {
            weights[0] += 100.0;
            weights[1] += 20.0;
        }
        assert!(weights.iter().all(|w| w.is_finite()));
        let draws = 50_000;
        let hits = (0..draws).filter(|_| pick_index(&weights, rng) == 0).count();
        let expected = weights[0] / (weights[0] + weights[1]);
        assert!((hits as f64 / draws as f64 - expected).abs() < 0.01);
    }
}
