//! Random source used for chance gates and cooldown jitter.
//!
//! The AI never reaches for a global generator. Every roll goes through an
//! injected [`rand::RngCore`], so seeding the source (for example with
//! `rand_chacha::ChaCha8Rng::seed_from_u64`) makes a whole simulation
//! reproducible.

use rand::{Rng, RngCore};

/// Game-facing helpers over any [`RngCore`].
///
/// Blanket-implemented for every random source, including trait objects.
pub trait AiRng: RngCore {
    /// Uniform roll in `[0, 100)`.
    ///
    /// A configured chance of `c` passes when the roll is strictly below `c`,
    /// so a chance of 100 always passes.
    fn roll_percent(&mut self) -> u8 {
        self.gen_range(0..100u8)
    }

    /// Uniform value in `[min, max]` inclusive.
    ///
    /// Returns `min` when the range is empty or degenerate.
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    /// Random delay in milliseconds from a range expressed in whole seconds.
    fn delay_ms(&mut self, min_secs: u32, max_secs: u32) -> u32 {
        self.range_inclusive(min_secs, max_secs).saturating_mul(1000)
    }
}

impl<R: RngCore + ?Sized> AiRng for R {}
