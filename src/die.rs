use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::config::DIE_SIDES;

/// Anything that can produce die faces for the game
pub trait Roller: Send {
    /// Returns a face in `1..=sides()`
    fn roll(&mut self) -> u8;

    fn sides(&self) -> u8;
}

/// Fair die backed by a xorshift generator
#[derive(Debug, Clone)]
pub struct Die {
    sides: u8,
    rng: XorShiftRng,
}

impl Die {
    /// Six-sided die seeded from OS entropy
    pub fn new() -> Self {
        Die {
            sides: DIE_SIDES,
            rng: XorShiftRng::from_entropy(),
        }
    }

    /// Six-sided die with a reproducible sequence
    pub fn with_seed(seed: u64) -> Self {
        Die {
            sides: DIE_SIDES,
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

impl Roller for Die {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=self.sides)
    }

    fn sides(&self) -> u8 {
        self.sides
    }
}
