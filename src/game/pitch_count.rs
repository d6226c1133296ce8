use serde::Serialize;

use crate::game::traits::PlayResult;

pub const STRIKES_FOR_OUT: u8 = 3;
/// Fouls stop adding strikes once the count reaches this many.
pub const MAX_FOUL_STRIKES: u8 = 2;
pub const BALLS_FOR_WALK: u8 = 4;
pub const OUTS_FOR_CHANGE: u8 = 3;

/// Balls, strikes and outs for the current batter and half-inning.
///
/// Updating is two-phase: every mutator for a play is applied first, the
/// boundary checks (`is_struck_out`, `is_walked`, `is_side_retired`) are read,
/// and only then does `commit` zero whatever those boundaries call for.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize)]
pub struct PitchCount {
    strikes: u8,
    balls: u8,
    outs: u8,
    #[serde(skip)]
    pending_reset: bool,
}

impl PitchCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a pitch. Anything other than `Strike` or `Ball` is left to
    /// the batting resolution.
    pub fn apply_result(&mut self, result: PlayResult) {
        match result {
            PlayResult::Strike => self.strikes += 1,
            PlayResult::Ball => self.balls += 1,
            _ => {}
        }
    }

    pub fn apply_foul(&mut self) {
        if self.strikes < MAX_FOUL_STRIKES {
            self.strikes += 1;
        }
    }

    pub fn add_out(&mut self) {
        self.outs += 1;
        self.reserve_reset();
    }

    /// Marks the batter's count to be cleared on the next `commit`.
    pub fn reserve_reset(&mut self) {
        self.pending_reset = true;
    }

    pub const fn is_struck_out(&self) -> bool {
        self.strikes >= STRIKES_FOR_OUT
    }

    pub const fn is_walked(&self) -> bool {
        self.balls >= BALLS_FOR_WALK
    }

    pub const fn is_side_retired(&self) -> bool {
        self.outs >= OUTS_FOR_CHANGE
    }

    pub fn commit(&mut self) {
        if self.is_struck_out() || self.is_walked() || self.pending_reset {
            self.strikes = 0;
            self.balls = 0;
        }
        if self.is_side_retired() {
            self.strikes = 0;
            self.balls = 0;
            self.outs = 0;
        }
        self.pending_reset = false;
    }

    pub const fn strikes(&self) -> u8 {
        self.strikes
    }

    pub const fn balls(&self) -> u8 {
        self.balls
    }

    pub const fn outs(&self) -> u8 {
        self.outs
    }
}
