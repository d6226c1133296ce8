use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::game::awards::{Award, FinalTally, PointsTracker, Situation};
use crate::game::diag::TeamDiag;
use crate::game::game_state::{GameConfig, GameEnding, GameResult, InningState, PlayOutcome};
use crate::game::traits::{InningsSetting, Matchup, PlayResult, Runs, Side};

/// One game as the host loop sees it: the rules engine plus the per-team
/// statistics and the player's points, all fed from the same plays.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: InningState,
    diags: Matchup<TeamDiag>,
    points: PointsTracker,
}

/// Runs on the board for the side at bat, captured before a play is applied.
struct PrePlay {
    side: Side,
    is_batting: bool,
    inning_start: Runs,
    before_play: Runs,
    other: Runs,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        let state = InningState::new(config).context("Invalid game configuration")?;
        Ok(Self {
            state,
            diags: Matchup::default(),
            points: PointsTracker::new(),
        })
    }

    fn capture(&self) -> Result<PrePlay> {
        let side = self.state.current_side();
        let score = self.state.score();
        Ok(PrePlay {
            side,
            is_batting: self.state.is_batting(),
            inning_start: score.total_through_inning(self.state.current_inning(), side)?,
            before_play: score.total(side),
            other: score.total(side.flip()),
        })
    }

    pub fn apply_play(&mut self, result: PlayResult) -> Result<PlayOutcome> {
        if self.state.is_game_over() {
            return Ok(self.state.apply_play(result));
        }
        // The engine moves on to the next half-inning inside `apply_play`,
        // so who was batting has to be read first.
        let pre = self.capture()?;
        let outcome = self.state.apply_play(result);
        if result.is_signal() {
            return Ok(outcome);
        }

        let batting_side = pre.side;
        self.diags.get_mut(batting_side).apply(true, &outcome);
        self.diags.get_mut(batting_side.flip()).apply(false, &outcome);

        self.points.record_play(pre.is_batting, result, outcome.strikeout);
        if pre.is_batting {
            self.points.record_situation(Situation {
                current: self.state.total(batting_side),
                inning_start: pre.inning_start,
                before_play: pre.before_play,
                other: pre.other,
            });
        }

        if outcome.side_change {
            self.points.start_half_inning();
        }
        if outcome.game_over {
            self.record_game_end();
        }
        debug!("Points after {}: {}", result, self.points.total());
        Ok(outcome)
    }

    fn record_game_end(&mut self) {
        let own_side = self.state.config().player_side;
        let tally = FinalTally {
            won: self.state.result() == GameResult::Win,
            innings: self.state.config().innings,
            own: self.diags.get(own_side),
            other: self.diags.get(own_side.flip()),
            own_runs: self.state.total(own_side),
            other_runs: self.state.total(own_side.flip()),
            walkoff: self.state.ending().is_some_and(|e| e.walkoff),
        };
        self.points.record_game_end(&tally);
    }

    pub const fn state(&self) -> &InningState {
        &self.state
    }

    pub const fn diag(&self, side: Side) -> &TeamDiag {
        self.diags.get(side)
    }

    pub const fn points(&self) -> &PointsTracker {
        &self.points
    }

    pub fn summary(&self) -> GameSummary {
        let config = self.state.config();
        let score = self.state.score();
        let line = |side: Side| SideSummary {
            team: config.team_names.get(side).clone(),
            line_score: score.row(side).to_vec(),
            runs: score.total(side),
            hits: self.diags.get(side).hits(),
            diag: *self.diags.get(side),
        };
        GameSummary {
            innings: config.innings,
            player_side: config.player_side,
            first: line(Side::First),
            second: line(Side::Second),
            finished: self.state.is_game_over(),
            result: self.state.is_game_over().then(|| self.state.result()),
            ending: self.state.ending(),
            points: self.points.total(),
            awards: self.points.awards().to_vec(),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct SideSummary {
    pub team: String,
    pub line_score: Vec<Runs>,
    pub runs: Runs,
    pub hits: u32,
    pub diag: TeamDiag,
}

/// Serializable snapshot of a game, finished or not.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct GameSummary {
    pub innings: InningsSetting,
    pub player_side: Side,
    pub first: SideSummary,
    pub second: SideSummary,
    pub finished: bool,
    pub result: Option<GameResult>,
    pub ending: Option<GameEnding>,
    pub points: u32,
    pub awards: Vec<Award>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::awards::AwardKind;

    fn session(innings: InningsSetting, player_side: Side) -> GameSession {
        GameSession::new(GameConfig {
            innings,
            player_side,
            ..GameConfig::default()
        })
        .unwrap()
    }

    fn play_all(session: &mut GameSession, plays: &[PlayResult]) {
        for play in plays {
            session.apply_play(*play).unwrap();
        }
    }

    const THREE_OUTS: [PlayResult; 3] = [PlayResult::Out, PlayResult::Out, PlayResult::Out];

    #[test]
    fn invalid_config_is_rejected() {
        let result = GameSession::new(GameConfig {
            mercy_margin: 0,
            ..GameConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn diags_follow_the_side_at_bat() {
        let mut session = session(InningsSetting::One, Side::First);
        play_all(
            &mut session,
            &[PlayResult::Hit1Base, PlayResult::Ball, PlayResult::Out],
        );
        let batting = session.diag(Side::First);
        let fielding = session.diag(Side::Second);
        assert_eq!(batting.hits(), 1);
        assert_eq!(batting.batters, 2);
        assert_eq!(fielding.pitches, 3);
        assert_eq!(fielding.outs, 1);
    }

    #[test]
    fn first_run_then_big_inning() {
        let mut session = session(InningsSetting::Three, Side::First);
        play_all(
            &mut session,
            &[
                PlayResult::HomeRun,
                PlayResult::HomeRun,
                PlayResult::HomeRun,
                PlayResult::HomeRun,
                PlayResult::HomeRun,
                PlayResult::HomeRun,
            ],
        );
        let kinds: Vec<_> = session.points().awards().iter().map(|a| a.kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == AwardKind::HomeRun).count(), 6);
        assert_eq!(kinds.iter().filter(|k| **k == AwardKind::FirstRun).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == AwardKind::BigInning).count(), 1);
    }

    #[test]
    fn fielding_player_scores_outs() {
        let mut session = session(InningsSetting::One, Side::Second);
        play_all(
            &mut session,
            &[PlayResult::Strike, PlayResult::Strike, PlayResult::Strike],
        );
        play_all(&mut session, &[PlayResult::Out, PlayResult::Out]);
        assert!(session.state().last_play().side_change);
        assert_eq!(session.points().total(), 50 + 10 + 10);
        assert_eq!(session.diag(Side::Second).strikeouts, 1);
    }

    #[test]
    fn walkoff_win_summary() {
        let mut session = session(InningsSetting::One, Side::Second);
        play_all(&mut session, &THREE_OUTS);
        let outcome = session.apply_play(PlayResult::HomeRun).unwrap();
        assert!(outcome.walkoff);

        let summary = session.summary();
        assert!(summary.finished);
        assert_eq!(summary.result, Some(GameResult::Win));
        assert_eq!(summary.second.line_score, vec![1]);
        assert_eq!(summary.second.hits, 1);
        let kinds: Vec<_> = summary.awards.iter().map(|a| a.kind).collect();
        // One inning is too short for a perfect game, so it's a shutout.
        assert!(kinds.contains(&AwardKind::Shutout));
        assert!(kinds.contains(&AwardKind::Walkoff));
        assert!(kinds.contains(&AwardKind::RunDifferential));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["result"], "win");
        assert_eq!(json["innings"], 1);
    }

    #[test]
    fn plays_after_the_end_change_nothing() {
        let mut session = session(InningsSetting::One, Side::First);
        play_all(&mut session, &THREE_OUTS);
        play_all(&mut session, &THREE_OUTS);
        assert!(session.state().is_game_over());
        let before = session.summary();
        let outcome = session.apply_play(PlayResult::HomeRun).unwrap();
        assert!(!outcome.game_over);
        assert_eq!(session.summary(), before);
    }
}
