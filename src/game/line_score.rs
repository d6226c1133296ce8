use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::game::traits::{Inning, Matchup, Runs, Side};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Error)]
pub enum ScoreError {
    #[error("inning index {inning} is outside a {innings}-inning line score")]
    InningOutOfRange { inning: Inning, innings: usize },
}

/// Runs per inning for each side. Both rows have one entry per configured
/// inning and never grow.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct InningScore {
    line_score: Matchup<Vec<Runs>>,
}

impl InningScore {
    pub fn new(innings: usize) -> Self {
        Self {
            line_score: Matchup::new(vec![0; innings], vec![0; innings]),
        }
    }

    pub fn innings(&self) -> usize {
        self.line_score.first.len()
    }

    fn check_inning(&self, inning: Inning) -> Result<(), ScoreError> {
        if inning < self.innings() {
            Ok(())
        } else {
            Err(ScoreError::InningOutOfRange {
                inning,
                innings: self.innings(),
            })
        }
    }

    /// Out-of-range innings are ignored here, unlike the queries.
    pub fn add(&mut self, inning: Inning, side: Side, runs: Runs) {
        match self.line_score.get_mut(side).get_mut(inning) {
            Some(entry) => *entry += runs,
            None => warn!("Ignoring {runs} run(s) for {side} side in inning index {inning}"),
        }
    }

    pub fn get(&self, inning: Inning, side: Side) -> Result<Runs, ScoreError> {
        self.check_inning(inning)?;
        Ok(self.line_score.get(side)[inning])
    }

    pub fn total(&self, side: Side) -> Runs {
        self.line_score.get(side).iter().sum()
    }

    /// Runs scored before `inning` began.
    pub fn total_through_inning(&self, inning: Inning, side: Side) -> Result<Runs, ScoreError> {
        self.check_inning(inning)?;
        Ok(self.line_score.get(side)[..inning].iter().sum())
    }

    /// The second side leads and scored in the final inning.
    pub fn is_walkoff(&self) -> bool {
        let Some(&last) = self.line_score.second.last() else {
            return false;
        };
        self.total(Side::Second) > self.total(Side::First) && last > 0
    }

    pub fn row(&self, side: Side) -> &[Runs] {
        self.line_score.get(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_per_inning() {
        let mut score = InningScore::new(3);
        score.add(0, Side::First, 2);
        score.add(0, Side::First, 1);
        score.add(2, Side::Second, 4);
        assert_eq!(score.get(0, Side::First), Ok(3));
        assert_eq!(score.get(1, Side::First), Ok(0));
        assert_eq!(score.get(2, Side::Second), Ok(4));
        assert_eq!(score.total(Side::First), 3);
        assert_eq!(score.total(Side::Second), 4);
    }

    #[test]
    fn add_out_of_range_is_ignored() {
        let mut score = InningScore::new(3);
        score.add(3, Side::First, 5);
        score.add(usize::MAX, Side::Second, 5);
        assert_eq!(score, InningScore::new(3));
    }

    #[test]
    fn queries_out_of_range_fail() {
        let score = InningScore::new(5);
        assert_eq!(
            score.get(5, Side::First),
            Err(ScoreError::InningOutOfRange {
                inning: 5,
                innings: 5
            })
        );
        assert!(score.total_through_inning(7, Side::Second).is_err());
        let err: anyhow::Error = score.get(9, Side::Second).unwrap_err().into();
        assert!(err.downcast_ref::<ScoreError>().is_some());
    }

    #[test]
    fn total_through_inning_excludes_named_inning() {
        let mut score = InningScore::new(4);
        for inning in 0..4 {
            score.add(inning, Side::First, 1 + inning as Runs);
        }
        assert_eq!(score.total_through_inning(0, Side::First), Ok(0));
        assert_eq!(score.total_through_inning(2, Side::First), Ok(3));
        assert_eq!(score.total_through_inning(3, Side::First), Ok(6));
        assert_eq!(score.total(Side::First), 10);
    }

    #[test]
    fn walkoff_needs_lead_and_final_inning_runs() {
        let mut score = InningScore::new(3);
        score.add(0, Side::Second, 2);
        assert!(!score.is_walkoff());

        score.add(2, Side::First, 2);
        score.add(2, Side::Second, 1);
        assert!(score.is_walkoff());

        let mut tied = InningScore::new(3);
        tied.add(2, Side::First, 1);
        tied.add(2, Side::Second, 1);
        assert!(!tied.is_walkoff());
    }

    #[test]
    fn empty_line_score_is_never_a_walkoff() {
        assert!(!InningScore::new(0).is_walkoff());
    }
}
