use serde::Serialize;
use tracing::warn;

use crate::game::traits::{Base, Runs};

const FIRST_BASE_BIT: u8 = 1 << 0;
const SECOND_BASE_BIT: u8 = 1 << 1;
const THIRD_BASE_BIT: u8 = 1 << 2;
const ON_BASE_MASK: u8 = FIRST_BASE_BIT | SECOND_BASE_BIT | THIRD_BASE_BIT;
/// First scoring slot. A home run puts the batter here directly.
const HOME_BIT_INDEX: u32 = 3;
const HOME_BIT: u8 = 1 << HOME_BIT_INDEX;
/// Three bases plus room for all of them to be pushed past home.
const MAX_BIT: u32 = 7;

/// Base occupancy as a bitmask, one bit per base starting from first.
///
/// Advancing everybody `n` bases is a left shift by `n`; whatever lands at
/// bit 3 or above has crossed the plate. Those bits are counted as runs
/// and dropped before the next play, so only bits 0-2 ever survive a call.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize)]
pub struct BaseRunners {
    bases: u8,
    /// Runs scored by the most recent advancement only.
    home_in_count: Runs,
}

impl BaseRunners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.bases = 0;
        self.home_in_count = 0;
    }

    /// Batter reaches on a base hit worth `bases` (1 to 3); everybody else
    /// moves up the same number of bases. Any other length is ignored.
    pub fn apply_hit(&mut self, bases: u8) {
        if !(1..=3).contains(&bases) {
            warn!("Ignoring a {bases}-base hit");
            self.home_in_count = 0;
            return;
        }
        self.bases <<= bases;
        self.bases |= 1 << (bases - 1);
        self.tally_runs();
    }

    pub fn apply_home_run(&mut self) {
        self.bases <<= 4;
        self.bases |= HOME_BIT;
        self.tally_runs();
    }

    /// Batter takes the lowest open base, forcing only the runners in the way.
    pub fn apply_walk(&mut self) {
        if let Some(open) = (0..MAX_BIT).find(|bit| self.bases & (1 << bit) == 0) {
            self.bases |= 1 << open;
        }
        self.tally_runs();
    }

    fn tally_runs(&mut self) {
        self.home_in_count = (HOME_BIT_INDEX..MAX_BIT)
            .filter(|bit| self.bases & (1 << bit) != 0)
            .map(|_| 1)
            .sum();
        self.bases &= ON_BASE_MASK;
    }

    pub const fn home_in_count(&self) -> Runs {
        self.home_in_count
    }

    pub fn has_runner_on(&self, base: Base) -> bool {
        self.bases & (1 << u8::from(base)) != 0
    }

    /// Integer representation of the base state with each binary digit
    /// representing a base.
    pub const fn base_state(&self) -> u8 {
        self.bases
    }

    pub const fn runners_on_base(&self) -> u32 {
        self.bases.count_ones()
    }
}
