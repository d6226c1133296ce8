use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use tracing::{debug, info, warn};

use crate::game::base_state::BaseRunners;
use crate::game::line_score::{InningScore, ScoreError};
use crate::game::pitch_count::PitchCount;
use crate::game::traits::{Base, Inning, InningsSetting, Matchup, PlayResult, Runs, Side};

/// Settings fixed for the lifetime of a game.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub innings: InningsSetting,
    /// Run differential that ends the game early.
    pub mercy_margin: Runs,
    /// The side the local player's team bats as. Play always opens with
    /// `Side::First` at bat.
    pub player_side: Side,
    pub team_names: Matchup<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            innings: InningsSetting::default(),
            mercy_margin: 10,
            player_side: Side::First,
            team_names: Matchup::new(String::from("Visitors"), String::from("Home")),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.mercy_margin == 0 {
            bail!("Mercy margin must be at least one run")
        }
        if self.team_names.first.trim().is_empty() || self.team_names.second.trim().is_empty() {
            bail!("Both teams need a name")
        }
        Ok(())
    }
}

/// Everything that happened on a single play. A fresh value is produced
/// for every call to `InningState::apply_play`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize)]
pub struct PlayOutcome {
    pub result: PlayResult,
    pub runs_scored: Runs,
    pub strikeout: bool,
    pub walk: bool,
    pub side_change: bool,
    pub game_over: bool,
    pub walkoff: bool,
    pub mercy_rule: bool,
    /// The game ended after the top half, so the second side never batted
    /// in its final turn.
    pub skipped_final_second_half: bool,
}

impl PlayOutcome {
    const fn ignored(result: PlayResult) -> Self {
        Self {
            result,
            runs_scored: 0,
            strikeout: false,
            walk: false,
            side_change: false,
            game_over: false,
            walkoff: false,
            mercy_rule: false,
            skipped_final_second_half: false,
        }
    }

    /// The signal the engine emits for this play, if any.
    pub const fn signal(&self) -> PlayResult {
        if self.game_over {
            PlayResult::GameSet
        } else if self.side_change {
            PlayResult::Change
        } else {
            PlayResult::None
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize)]
pub struct GameEnding {
    pub walkoff: bool,
    pub mercy_rule: bool,
    pub skipped_final_second_half: bool,
}

/// Result from the local player's point of view.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Display, AsRefStr, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Win,
    Lose,
    Draw,
}

/// The half-inning state machine. Owns the count, the base runners and the
/// line score for one game.
#[derive(Debug, Clone)]
pub struct InningState {
    config: GameConfig,
    pitch: PitchCount,
    runners: BaseRunners,
    score: InningScore,
    current_inning: Inning,
    current_side: Side,
    ending: Option<GameEnding>,
    last_play: PlayOutcome,
}

impl InningState {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let score = InningScore::new(config.innings.count());
        Ok(Self {
            config,
            pitch: PitchCount::new(),
            runners: BaseRunners::new(),
            score,
            current_inning: 0,
            current_side: Side::First,
            ending: None,
            last_play: PlayOutcome::default(),
        })
    }

    /// Applies one play and reports what it caused. Once the game is over
    /// every call is a no-op returning an outcome with no flags set.
    pub fn apply_play(&mut self, result: PlayResult) -> PlayOutcome {
        if self.is_game_over() {
            debug!("Game is over, ignoring {result}");
            self.last_play = PlayOutcome::ignored(result);
            return self.last_play;
        }
        if result.is_signal() {
            warn!("{result} is an engine signal, not a play; ignoring");
            self.last_play = PlayOutcome::ignored(result);
            return self.last_play;
        }
        let mut outcome = PlayOutcome::ignored(result);

        // Pitch
        self.pitch.apply_result(result);
        if self.pitch.is_struck_out() {
            outcome.strikeout = true;
            self.pitch.add_out();
            self.pitch.reserve_reset();
        } else if self.pitch.is_walked() {
            outcome.walk = true;
            self.runners.apply_walk();
            self.score_runs(result, &mut outcome);
            self.pitch.reserve_reset();
        }

        // Batted ball
        match result {
            PlayResult::Out => {
                self.pitch.add_out();
                self.pitch.reserve_reset();
            }
            PlayResult::Foul => self.pitch.apply_foul(),
            hit if hit.is_hit() => {
                match hit.bases() {
                    Some(bases) => self.runners.apply_hit(bases),
                    None => self.runners.apply_home_run(),
                }
                self.score_runs(hit, &mut outcome);
                self.pitch.reserve_reset();
            }
            _ => {}
        }

        let half_inning_over =
            self.pitch.is_side_retired() || self.score.is_walkoff() || outcome.walkoff;
        self.pitch.commit();
        if half_inning_over {
            self.runners.reset();
            self.progress_inning(&mut outcome);
        }

        debug!(
            "{} {} of inning {}: {:?}",
            result,
            self.current_side,
            self.current_inning + 1,
            outcome
        );
        if outcome.game_over {
            let ending = GameEnding {
                walkoff: outcome.walkoff,
                mercy_rule: outcome.mercy_rule,
                skipped_final_second_half: outcome.skipped_final_second_half,
            };
            info!(
                "Game over after inning {}: {} {} - {} {} ({:?})",
                self.current_inning + 1,
                self.config.team_names.first,
                self.total(Side::First),
                self.config.team_names.second,
                self.total(Side::Second),
                ending
            );
            self.ending = Some(ending);
        }
        self.last_play = outcome;
        outcome
    }

    /// Credits the runs from the latest advancement to the side at bat,
    /// cut short if they end the game.
    fn score_runs(&mut self, result: PlayResult, outcome: &mut PlayOutcome) {
        let runs = self.adjust_walkoff(self.runners.home_in_count(), result, outcome);
        self.score.add(self.current_inning, self.current_side, runs);
        outcome.runs_scored += runs;
    }

    /// Play stops as soon as the winning run crosses the plate, so only
    /// the runs needed to win count. A home run counts in full.
    fn adjust_walkoff(&self, runs: Runs, result: PlayResult, outcome: &mut PlayOutcome) -> Runs {
        if self.current_side != Side::Second {
            return runs;
        }
        let first = self.total(Side::First);
        let second = self.total(Side::Second);
        let margin = self.config.mercy_margin;

        if self.is_last_inning() {
            if second + runs > first {
                outcome.walkoff = true;
                if result != PlayResult::HomeRun {
                    return (first + 1).saturating_sub(second);
                }
            }
        } else if (second + runs).saturating_sub(first) >= margin {
            outcome.walkoff = true;
            outcome.mercy_rule = true;
            if result != PlayResult::HomeRun {
                return first.saturating_add(margin).saturating_sub(second);
            }
        }
        runs
    }

    fn progress_inning(&mut self, outcome: &mut PlayOutcome) {
        match self.current_side {
            Side::First => {
                if self.check_game_over(outcome) {
                    outcome.game_over = true;
                    outcome.skipped_final_second_half = true;
                } else {
                    self.current_side = Side::Second;
                    outcome.side_change = true;
                }
            }
            Side::Second => {
                if self.check_game_over(outcome) {
                    outcome.game_over = true;
                } else {
                    self.current_inning += 1;
                    self.current_side = Side::First;
                    outcome.side_change = true;
                }
            }
        }
        if outcome.side_change {
            info!(
                "Change: {} side up in inning {}",
                self.current_side,
                self.current_inning + 1
            );
        }
    }

    fn check_game_over(&self, outcome: &mut PlayOutcome) -> bool {
        let first = self.total(Side::First);
        let second = self.total(Side::Second);
        let margin = self.config.mercy_margin;

        let called = match (self.current_side, self.is_last_inning()) {
            // No need for the bottom half if the second side already leads
            (Side::First, true) => return second > first,
            (Side::First, false) => second.saturating_sub(first) >= margin,
            (Side::Second, true) => return true,
            (Side::Second, false) => first.abs_diff(second) >= margin,
        };
        if called {
            outcome.mercy_rule = true;
        }
        called
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn pitch_count(&self) -> &PitchCount {
        &self.pitch
    }

    pub const fn runners(&self) -> &BaseRunners {
        &self.runners
    }

    pub const fn score(&self) -> &InningScore {
        &self.score
    }

    pub const fn strikes(&self) -> u8 {
        self.pitch.strikes()
    }

    pub const fn balls(&self) -> u8 {
        self.pitch.balls()
    }

    pub const fn outs(&self) -> u8 {
        self.pitch.outs()
    }

    pub fn has_runner_on(&self, base: Base) -> bool {
        self.runners.has_runner_on(base)
    }

    pub fn total(&self, side: Side) -> Runs {
        self.score.total(side)
    }

    pub fn get(&self, inning: Inning, side: Side) -> Result<Runs, ScoreError> {
        self.score.get(inning, side)
    }

    pub const fn current_inning(&self) -> Inning {
        self.current_inning
    }

    pub const fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn is_last_inning(&self) -> bool {
        self.is_last(self.current_inning)
    }

    pub fn is_last(&self, inning: Inning) -> bool {
        inning + 1 == self.config.innings.count()
    }

    /// Whether the local player's team is at bat.
    pub fn is_batting(&self) -> bool {
        self.config.player_side == self.current_side
    }

    pub fn is_fielding(&self) -> bool {
        !self.is_batting()
    }

    pub const fn is_game_over(&self) -> bool {
        self.ending.is_some()
    }

    pub const fn ending(&self) -> Option<GameEnding> {
        self.ending
    }

    /// The outcome of the most recent call to `apply_play`.
    pub const fn last_play(&self) -> PlayOutcome {
        self.last_play
    }

    pub fn result(&self) -> GameResult {
        let own = self.total(self.config.player_side);
        let other = self.total(self.config.player_side.flip());
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => GameResult::Win,
            std::cmp::Ordering::Less => GameResult::Lose,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}
