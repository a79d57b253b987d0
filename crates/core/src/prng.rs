//! Random sources for particle placement and turbulence.
//!
//! The engine never reaches for a global RNG. It owns a [`RandomSource`]
//! supplied at construction, so a host can seed it for reproducible runs and
//! tests can script it to assert exact placements.

use crate::vector::{normalize, Vec3};
use serde::{Deserialize, Serialize};

/// A stream of uniformly distributed 64-bit values.
///
/// Only [`next_u64`](RandomSource::next_u64) is required; the float and
/// index helpers derive from it.
pub trait RandomSource {
    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform f64 in [0, 1), built from the upper 53 bits of `next_u64()`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }

    /// Direction drawn from a per-axis uniform cube in [-1, 1)³, normalized.
    ///
    /// Three draws per call, always. The result is not uniform over the
    /// sphere: directions toward the cube's corners are over-represented.
    /// An all-zero draw yields the zero vector rather than NaN.
    fn next_unit_vector(&mut self) -> Vec3 {
        let x = self.next_range(-1.0, 1.0);
        let y = self.next_range(-1.0, 1.0);
        let z = self.next_range(-1.0, 1.0);
        normalize(Vec3::new(x, y, z))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Xorshift64 deterministic PRNG, shifts (13, 7, 17).
///
/// Same seed, same sequence, on every platform. A seed of 0 is the
/// all-zeros fixed point of xorshift and is replaced by a fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(Self::FALLBACK_SEED)
    }
}

impl RandomSource for Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::length;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Changing this breaks every saved scene that relies on seed 42.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_stick_at_zero() {
        let mut rng = Xorshift64::new(0);
        for _ in 0..3 {
            assert_ne!(rng.next_u64(), 0);
        }
    }

    #[test]
    fn same_seed_produces_identical_sequences() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn next_range_stays_within_bounds() {
        let mut rng = Xorshift64::new(9999);
        for i in 0..10_000 {
            let v = rng.next_range(-10.0, 10.0);
            assert!((-10.0..10.0).contains(&v), "{v} out of bounds at {i}");
        }
    }

    #[test]
    fn next_unit_vector_is_unit_length() {
        let mut rng = Xorshift64::new(3);
        for _ in 0..1000 {
            let v = rng.next_unit_vector();
            assert!((length(v) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn next_unit_vector_from_centered_draw_is_zero() {
        // 1 << 63 maps to exactly 0.5 in [0, 1), i.e. 0.0 in [-1, 1).
        struct Midpoint;
        impl RandomSource for Midpoint {
            fn next_u64(&mut self) -> u64 {
                1 << 63
            }
        }
        assert_eq!(Midpoint.next_unit_vector(), Vec3::ZERO);
    }

    #[test]
    fn next_unit_vector_consumes_exactly_three_draws() {
        let mut a = Xorshift64::new(21);
        let mut b = a.clone();
        a.next_unit_vector();
        for _ in 0..3 {
            b.next_u64();
        }
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn mutable_reference_is_a_random_source() {
        let mut rng = Xorshift64::new(11);
        let mut copy = rng.clone();
        let expected = copy.next_u64();
        let borrowed = &mut rng;
        assert_eq!(borrowed.next_u64(), expected);
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v}");
                }
            }

            #[test]
            fn next_usize_below_max_for_any_seed(seed: u64, max in 1_usize..64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_usize(max) < max);
                }
            }
        }
    }
}
