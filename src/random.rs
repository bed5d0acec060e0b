// Seedable random source for reproducible action sampling.
//
// Actions never own random state: every sampling operation takes a
// `&mut dyn RngCore` (or a generic `R: Rng`) from the caller. `FastRng` is a
// small PCG-LCG generator the scheduler can hand out per action, seeded from
// a run seed so that runs are reproducible independently of evaluation order.

use rand::{RngCore, SeedableRng};

const PRN_MULT: u64 = 6364136223846793005;
const PRN_ADD: u64 = 1442695040888963407;
/// Stride between the streams handed out by [`FastRng::for_stream`].
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// PCG generator: LCG state with an RXS-M-XS output permutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastRng {
    state: u64,
}

impl FastRng {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent generator for stream `index` of a run seeded with `seed`,
    /// e.g. one stream per collision candidate in a time step.
    pub fn for_stream(seed: u64, index: u64) -> Self {
        let mut rng = Self::new(seed ^ index.wrapping_mul(STREAM_STRIDE));
        // decorrelate neighbouring streams
        rng.next_u64();
        rng
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline(always)]
    pub fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    #[inline]
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }
}

impl SeedableRng for FastRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }
}

impl RngCore for FastRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.state = PRN_MULT.wrapping_mul(self.state).wrapping_add(PRN_ADD);
        let word = ((self.state >> ((self.state >> 59) + 5)) ^ self.state)
            .wrapping_mul(12605985483714917081);
        (word >> 43) ^ word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_fast_rng_deterministic() {
        let mut rng1 = FastRng::new(12345);
        let mut rng2 = FastRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.uniform(), rng2.uniform());
        }
    }

    #[test]
    fn test_fast_rng_range() {
        let mut rng = FastRng::new(42);
        for _ in 0..10000 {
            let val = rng.uniform();
            assert!((0.0..1.0).contains(&val), "Value {} out of range [0, 1)", val);
        }
    }

    #[test]
    fn test_fast_rng_as_rand_rng() {
        let mut rng = FastRng::seed_from_u64(12345);
        let x: f64 = rng.gen();
        assert!((0.0..1.0).contains(&x));
        let k = rng.gen_range(0..10);
        assert!(k < 10);
    }

    #[test]
    fn test_streams_differ() {
        let mut a = FastRng::for_stream(1, 0);
        let mut b = FastRng::for_stream(1, 1);
        let same = (0..16).filter(|_| a.next_u64() == b.next_u64()).count();
        assert!(same < 16);
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut rng = FastRng::new(9);
        let mut buf = [0u8; 13];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_reseed() {
        let mut rng = FastRng::new(12345);
        let first_val = rng.uniform();
        for _ in 0..100 {
            rng.uniform();
        }
        rng.reseed(12345);
        assert_eq!(rng.uniform(), first_val);
    }
}
