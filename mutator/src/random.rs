//! Uniform and skewed integer draws consumed by every operator in
//! [`crate::mutator`]. Backed by `fastrand`'s global generator, the same
//! bit-source `common::random::FastRand` wraps for the rest of the workspace.

/// Hard ceiling for [`RandomOracle::rand_skewed`]; larger buffers than this
/// are outside any realistic fuzzing target and would risk `u128` overflow
/// in the cubic term of the skew formula.
pub const RAND_SKEWED_HARD_MAX: usize = 1 << 24;

pub trait RandomOracle {
    /// Uniform integer in `[min, max]`. Fatal if `min > max` — a programmer
    /// error, never a data error.
    fn rand(&mut self, min: usize, max: usize) -> usize;

    /// Integer in `[1, max]`, quadratically biased toward 1. Fatal if
    /// `max == 0` or `max > RAND_SKEWED_HARD_MAX`.
    fn rand_skewed(&mut self, max: usize) -> usize {
        assert!(max > 0, "rand_skewed: max must be > 0");
        assert!(
            max <= RAND_SKEWED_HARD_MAX,
            "rand_skewed: max exceeds hard maximum"
        );

        if max == 1 {
            return 1;
        }

        let max_u128 = max as u128;
        let upper = max_u128 * max_u128 - 1; // max^2 - 1
        let r = self.rand(1, upper as usize) as u128;
        let scaled = (r * r) / (max_u128 * max_u128 * max_u128);

        (scaled as usize + 1).clamp(1, max)
    }

    /// Offset into a buffer of `size` bytes, biased toward the front.
    fn rand_offset(&mut self, size: usize) -> usize {
        self.rand_skewed(size).saturating_sub(1)
    }

    fn rand_byte(&mut self) -> u8 {
        self.rand(0, u8::MAX as usize) as u8
    }

    fn rand_printable_byte(&mut self) -> u8 {
        self.rand(32, 126) as u8
    }

    fn fill_random(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = self.rand_byte();
        }
    }

    fn fill_printable(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = self.rand_printable_byte();
        }
    }

    fn bool(&mut self) -> bool {
        self.rand(0, 1) == 1
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FastRandOracle;

impl RandomOracle for FastRandOracle {
    fn rand(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "rand({min}, {max}): min must be <= max");

        if min == max {
            min
        } else {
            fastrand::usize(min..=max)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rand_is_inclusive_and_in_bounds() {
        fastrand::seed(1);
        let mut oracle = FastRandOracle;
        for _ in 0..1_000 {
            let v = oracle.rand(5, 5);
            assert_eq!(v, 5);
        }
    }

    #[test]
    #[should_panic(expected = "min must be <= max")]
    fn rand_rejects_inverted_range() {
        let mut oracle = FastRandOracle;
        oracle.rand(10, 1);
    }

    #[test]
    fn rand_skewed_of_one_is_one() {
        let mut oracle = FastRandOracle;
        for _ in 0..100 {
            assert_eq!(oracle.rand_skewed(1), 1);
        }
    }

    #[test]
    #[should_panic(expected = "max must be > 0")]
    fn rand_skewed_rejects_zero() {
        let mut oracle = FastRandOracle;
        oracle.rand_skewed(0);
    }

    #[test]
    fn rand_offset_is_below_size() {
        fastrand::seed(42);
        let mut oracle = FastRandOracle;
        for _ in 0..10_000 {
            let off = oracle.rand_offset(64);
            assert!(off < 64);
        }
    }

    #[test]
    #[ignore = "statistical property; run with `cargo test -- --ignored`"]
    fn rand_skewed_mean_is_below_35_percent() {
        fastrand::seed(7);
        let mut oracle = FastRandOracle;
        let n = 16usize;
        let draws = 2_000_000;
        let sum: u64 = (0..draws).map(|_| oracle.rand_skewed(n) as u64).sum();
        let mean = sum as f64 / draws as f64;
        assert!(mean <= 0.35 * n as f64, "mean {mean} exceeds 0.35*{n}");
    }

    #[test]
    #[ignore = "statistical property; run with `cargo test -- --ignored`"]
    fn rand_offset_lower_quarter_majority() {
        fastrand::seed(99);
        let mut oracle = FastRandOracle;
        let n = 256usize;
        let draws = 2_000_000;
        let below_quarter = (0..draws)
            .filter(|_| oracle.rand_offset(n) < n / 4)
            .count();
        let ratio = below_quarter as f64 / draws as f64;
        assert!(ratio >= 0.5, "ratio {ratio} below 0.5");
    }
}
