//! Random Number Generator

use hexf::*;

// hypersphere
use crate::core::hypersphere::Float;

// see rng.h

pub const FLOAT_ONE_MINUS_EPSILON: Float = hexf64!("0x1.fffffffffffffp-1");
pub const PCG32_DEFAULT_STATE: u64 = 0x853c_49e6_748f_ea9b;
pub const PCG32_DEFAULT_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;
pub const PCG32_MULT: u64 = 0x5851_f42d_4c95_7f2d;

/// A source of independent uniform deviates. Every sampler draws its
/// randomness through this trait, and every instance owns its own
/// state so that workers never share a generator.
pub trait UniformDeviateSource {
    /// Uniform deviate in [0, 1).
    fn uniform_float(&mut self) -> Float;
    /// Uniform deviate in [-1, 1).
    fn uniform_symmetric(&mut self) -> Float {
        2.0 as Float * self.uniform_float() - 1.0 as Float
    }
}

/// Random number generator
#[derive(Debug, Copy, Clone)]
pub struct Rng {
    state: u64,
    inc: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Rng::new()
    }
}

impl Rng {
    pub fn new() -> Self {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
    /// Generator positioned at the start of stream *seed*. Distinct
    /// seeds give statistically independent streams.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Rng::new();
        rng.set_sequence(seed);
        rng
    }
    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0_u64;
        self.inc = initseq.wrapping_shl(1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted: u32 = (oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27) as u32;
        let rot: u32 = oldstate.wrapping_shr(59) as u32;
        xorshifted.wrapping_shr(rot)
            | xorshifted.wrapping_shl(rot.wrapping_neg() & 31)
    }
}

impl UniformDeviateSource for Rng {
    fn uniform_float(&mut self) -> Float {
        // two 32-bit draws fill the 53-bit mantissa
        let hi: u64 = (self.uniform_uint32() as u64) << 21;
        let lo: u64 = (self.uniform_uint32() as u64) >> 11;
        ((hi | lo) as Float * hexf64!("0x1.0p-53")).min(FLOAT_ONE_MINUS_EPSILON)
    }
}
