//! Uniform random sources consumed by selection and attack systems.
//!
//! Systems never own a generator. They borrow anything implementing
//! [`UnitRng`], which lets tests drive them with a closure that returns a
//! fixed sequence while the session runs on a seeded [`SeededUnitRng`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Source of uniform samples in `[0, 1)`.
pub trait UnitRng {
    /// Draws the next sample.
    fn next_unit(&mut self) -> f64;

    /// Draws an index in `0..len` as `floor(sample * len)`, clamped to the last index.
    ///
    /// Returns zero when `len` is zero.
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let sample = self.next_unit();
        let scaled = (sample * len as f64).floor();
        if scaled.is_nan() || scaled < 0.0 {
            0
        } else {
            (scaled as usize).min(len - 1)
        }
    }
}

impl<F> UnitRng for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Deterministic generator backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SeededUnitRng {
    inner: ChaCha8Rng,
}

impl SeededUnitRng {
    /// Creates a generator from a 64-bit seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl UnitRng for SeededUnitRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Derives the seed for a single wave from the session seed.
///
/// Waves replay identically for the same `(session_seed, wave_index)` pair
/// regardless of how many samples earlier waves consumed.
#[must_use]
pub fn derive_wave_seed(session_seed: u64, wave_index: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(session_seed.to_le_bytes());
    hasher.update(b"wave");
    hasher.update(wave_index.to_le_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
