use rand::{RngCore, SeedableRng};

use crate::hash::fnv1a32;

const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

// Mulberry32: one u32 of state, reproducible for a given seed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 { state: u32 }

impl Mulberry32 {
    pub fn new(seed: u32) -> Self { Self { state: seed } }

    pub fn from_seed_str(seed: &str) -> Self { Self::new(fnv1a32(seed)) }

    pub fn state(&self) -> u32 { self.state }

    pub fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 { self.step() as f64 / TWO_POW_32 }
}

/// Closure form: every call advances a private generator.
pub fn make_generator(seed: u32) -> impl FnMut() -> f64 {
    let mut rng = Mulberry32::new(seed);
    move || rng.next_f64()
}

/// Float in `[0, 1)` from any `RngCore`, using the same scaling as `Mulberry32::next_f64`.
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 { rng.next_u32() as f64 / TWO_POW_32 }

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 { self.step() }

    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self { Self::new(u32::from_le_bytes(seed)) }
}
