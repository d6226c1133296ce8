use serde::Serialize;

use crate::game::game_state::PlayOutcome;
use crate::game::traits::PlayResult;

/// Running totals for one team, split by whether the team was at bat or in
/// the field when the play happened.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize)]
pub struct TeamDiag {
    // At bat
    pub batters: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,

    // In the field
    pub pitches: u32,
    pub outs: u32,
    pub strikeouts: u32,
    pub walks: u32,
}

impl TeamDiag {
    pub fn apply(&mut self, is_batting: bool, outcome: &PlayOutcome) {
        if is_batting {
            self.apply_batting(outcome.result);
        } else {
            self.apply_fielding(outcome);
        }
    }

    fn apply_batting(&mut self, result: PlayResult) {
        match result {
            PlayResult::Hit1Base => self.singles += 1,
            PlayResult::Hit2Base => self.doubles += 1,
            PlayResult::Hit3Base => self.triples += 1,
            PlayResult::HomeRun => self.home_runs += 1,
            _ => {}
        }
        if result.is_hit() || result == PlayResult::Out {
            self.batters += 1;
        }
    }

    fn apply_fielding(&mut self, outcome: &PlayOutcome) {
        self.pitches += 1;
        if outcome.result == PlayResult::Out {
            self.outs += 1;
        }
        if outcome.strikeout {
            self.strikeouts += 1;
        }
        if outcome.walk {
            self.walks += 1;
        }
    }

    pub const fn hits(&self) -> u32 {
        self.singles + self.doubles + self.triples + self.home_runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: PlayResult) -> PlayOutcome {
        PlayOutcome {
            result,
            ..PlayOutcome::default()
        }
    }

    #[test]
    fn batting_counts_hits_and_batters() {
        let mut diag = TeamDiag::default();
        for result in [
            PlayResult::Hit1Base,
            PlayResult::Hit1Base,
            PlayResult::Hit3Base,
            PlayResult::HomeRun,
            PlayResult::Out,
            PlayResult::Strike,
            PlayResult::Foul,
        ] {
            diag.apply(true, &outcome(result));
        }
        assert_eq!(diag.singles, 2);
        assert_eq!(diag.hits(), 4);
        assert_eq!(diag.batters, 5);
        assert_eq!(diag.pitches, 0);
    }

    #[test]
    fn fielding_counts_pitches_and_results() {
        let mut diag = TeamDiag::default();
        diag.apply(false, &outcome(PlayResult::Out));
        diag.apply(
            false,
            &PlayOutcome {
                strikeout: true,
                ..outcome(PlayResult::Strike)
            },
        );
        diag.apply(
            false,
            &PlayOutcome {
                walk: true,
                ..outcome(PlayResult::Ball)
            },
        );
        diag.apply(false, &outcome(PlayResult::Hit2Base));
        assert_eq!(diag.pitches, 4);
        assert_eq!(diag.outs, 1);
        assert_eq!(diag.strikeouts, 1);
        assert_eq!(diag.walks, 1);
        assert_eq!(diag.hits(), 0);
    }
}
