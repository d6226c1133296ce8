use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::game::diag::TeamDiag;
use crate::game::traits::{InningsSetting, PlayResult, Runs};

/// Runs in one half-inning that count as a big inning.
const BIG_INNING_RUNS: Runs = 5;
/// No-hitters and perfect games only count in games at least this long.
const MIN_INNINGS_FOR_NO_HITTER: usize = 5;

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    HighCommon,
    Rare,
    HighRare,
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    Single,
    Double,
    Triple,
    #[strum(serialize = "Home run")]
    HomeRun,
    Out,
    Strikeout,
    #[strum(serialize = "Walk-off win")]
    Walkoff,
    Shutout,
    #[strum(serialize = "No-hitter")]
    NoHitter,
    #[strum(serialize = "Perfect game")]
    PerfectGame,
    /// Paid per run of the winning margin.
    #[strum(serialize = "Run differential")]
    RunDifferential,
    #[strum(serialize = "First run")]
    FirstRun,
    #[strum(serialize = "Go-ahead run")]
    GoAhead,
    #[strum(serialize = "Big inning")]
    BigInning,
}

impl AwardKind {
    pub const fn rarity(self) -> Rarity {
        match self {
            Self::Single | Self::Out | Self::RunDifferential => Rarity::Common,
            Self::Double | Self::Triple | Self::Strikeout | Self::FirstRun | Self::GoAhead => {
                Rarity::HighCommon
            }
            Self::HomeRun | Self::Walkoff | Self::Shutout | Self::BigInning => Rarity::Rare,
            Self::NoHitter | Self::PerfectGame => Rarity::HighRare,
        }
    }

    pub const fn points(self) -> u32 {
        match self {
            Self::Single | Self::Out => 10,
            Self::Double | Self::GoAhead => 30,
            Self::Triple | Self::Strikeout | Self::FirstRun => 50,
            Self::HomeRun | Self::Walkoff | Self::RunDifferential | Self::BigInning => 100,
            Self::Shutout => 500,
            Self::NoHitter => 1000,
            Self::PerfectGame => 3000,
        }
    }

    const fn for_hit(result: PlayResult) -> Option<Self> {
        match result {
            PlayResult::Hit1Base => Some(Self::Single),
            PlayResult::Hit2Base => Some(Self::Double),
            PlayResult::Hit3Base => Some(Self::Triple),
            PlayResult::HomeRun => Some(Self::HomeRun),
            _ => None,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize)]
pub struct Award {
    pub kind: AwardKind,
    pub rarity: Rarity,
    pub points: u32,
}

impl From<AwardKind> for Award {
    fn from(kind: AwardKind) -> Self {
        Self {
            kind,
            rarity: kind.rarity(),
            points: kind.points(),
        }
    }
}

/// Runs on the board around a play, from the batting side's point of view.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct Situation {
    /// Batting side's runs after the play.
    pub current: Runs,
    /// Batting side's runs when the half-inning began.
    pub inning_start: Runs,
    /// Batting side's runs before the play.
    pub before_play: Runs,
    pub other: Runs,
}

/// What the award table needs to know about a finished game.
#[derive(Debug, Copy, Clone)]
pub struct FinalTally<'a> {
    pub won: bool,
    pub innings: InningsSetting,
    pub own: &'a TeamDiag,
    pub other: &'a TeamDiag,
    pub own_runs: Runs,
    pub other_runs: Runs,
    pub walkoff: bool,
}

/// Points earned by the local player over one game.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct PointsTracker {
    awards: Vec<Award>,
    #[serde(skip)]
    big_inning_awarded: bool,
}

impl PointsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: AwardKind) {
        self.awards.push(kind.into());
    }

    /// Big innings can be awarded once per half-inning.
    pub fn start_half_inning(&mut self) {
        self.big_inning_awarded = false;
    }

    pub fn record_play(&mut self, is_batting: bool, result: PlayResult, strikeout: bool) {
        if is_batting {
            if let Some(kind) = AwardKind::for_hit(result) {
                self.push(kind);
            }
        } else {
            if result == PlayResult::Out {
                self.push(AwardKind::Out);
            }
            if strikeout {
                self.push(AwardKind::Strikeout);
            }
        }
    }

    /// Only meaningful while the player is batting.
    pub fn record_situation(&mut self, situation: Situation) {
        let Situation {
            current,
            inning_start,
            before_play,
            other,
        } = situation;
        if before_play == 0 && other == 0 && current > 0 {
            self.push(AwardKind::FirstRun);
        } else if before_play <= other && other > 0 && current > other {
            self.push(AwardKind::GoAhead);
        } else if current.saturating_sub(inning_start) >= BIG_INNING_RUNS && !self.big_inning_awarded
        {
            self.big_inning_awarded = true;
            self.push(AwardKind::BigInning);
        }
    }

    pub fn record_game_end(&mut self, tally: &FinalTally<'_>) {
        if !tally.won {
            return;
        }
        if tally.other.hits() == 0 && tally.innings.count() >= MIN_INNINGS_FOR_NO_HITTER {
            if tally.own.walks == 0 {
                self.push(AwardKind::PerfectGame);
            } else {
                self.push(AwardKind::NoHitter);
            }
        } else if tally.other_runs == 0 {
            self.push(AwardKind::Shutout);
        }
        if tally.walkoff {
            self.push(AwardKind::Walkoff);
        }
        let margin = tally.own_runs.saturating_sub(tally.other_runs);
        if margin > 0 {
            let mut award = Award::from(AwardKind::RunDifferential);
            award.points *= margin;
            self.awards.push(award);
        }
    }

    pub fn awards(&self) -> &[Award] {
        &self.awards
    }

    pub fn total(&self) -> u32 {
        self.awards.iter().map(|a| a.points).sum()
    }
}
