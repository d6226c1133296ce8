use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Zero-based inning index.
pub type Inning = usize;
pub type Runs = u32;

/// Which team is at bat, by batting order rather than home/away.
#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Copy,
    Clone,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    First,
    Second,
}

impl Side {
    pub const fn flip(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Outcome of a single pitch or at-bat. `Change` and `GameSet` are only ever
/// produced as signals, never accepted as input.
#[derive(
    Debug,
    Eq,
    PartialEq,
    Hash,
    Copy,
    Clone,
    Default,
    Display,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlayResult {
    #[default]
    None,
    Strike,
    Ball,
    Out,
    Foul,
    Hit1Base,
    Hit2Base,
    Hit3Base,
    HomeRun,
    Change,
    GameSet,
}

impl PlayResult {
    pub const fn is_hit(self) -> bool {
        matches!(
            self,
            Self::Hit1Base | Self::Hit2Base | Self::Hit3Base | Self::HomeRun
        )
    }

    pub const fn is_signal(self) -> bool {
        matches!(self, Self::Change | Self::GameSet)
    }

    /// Bases awarded to the batter for a base hit. Home runs are not
    /// included since they are advanced differently.
    pub const fn bases(self) -> Option<u8> {
        match self {
            Self::Hit1Base => Some(1),
            Self::Hit2Base => Some(2),
            Self::Hit3Base => Some(3),
            _ => None,
        }
    }
}

#[derive(
    Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Display, EnumIter, IntoPrimitive,
)]
#[repr(u8)]
pub enum Base {
    First = 0,
    Second,
    Third,
}

/// Game lengths the game offers.
#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Copy,
    Clone,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum InningsSetting {
    One = 1,
    Three = 3,
    Five = 5,
    Seven = 7,
    Nine = 9,
}

// `#[default]` would make num_enum treat Nine as a catch-all and accept
// any number in `try_from`.
#[allow(clippy::derivable_impls)]
impl Default for InningsSetting {
    fn default() -> Self {
        Self::Nine
    }
}

impl InningsSetting {
    pub fn count(self) -> usize {
        usize::from(u8::from(self))
    }
}

impl std::fmt::Display for InningsSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// A value held once per side.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Matchup<T> {
    pub first: T,
    pub second: T,
}

impl<T> Matchup<T> {
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    pub const fn get(&self, side: Side) -> &T {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn side_parses_and_flips() {
        assert_eq!(Side::from_str("first").unwrap(), Side::First);
        assert_eq!(Side::from_str("SECOND").unwrap(), Side::Second);
        assert!(Side::from_str("home").is_err());
        for side in Side::iter() {
            assert_eq!(side.flip().flip(), side);
            assert_ne!(side.flip(), side);
        }
    }

    #[test]
    fn only_recognized_innings_convert() {
        for n in 0..=12_u8 {
            let setting = InningsSetting::try_from(n);
            assert_eq!(setting.is_ok(), [1, 3, 5, 7, 9].contains(&n), "{n}");
        }
        assert_eq!(InningsSetting::default(), InningsSetting::Nine);
        assert_eq!(InningsSetting::Seven.count(), 7);
        assert_eq!(serde_json::to_string(&InningsSetting::Five).unwrap(), "5");
        assert_eq!(
            serde_json::from_str::<InningsSetting>("3").unwrap(),
            InningsSetting::Three
        );
    }

    #[test]
    fn hit_classification() {
        let hits = PlayResult::iter().filter(|r| r.is_hit()).count();
        assert_eq!(hits, 4);
        assert_eq!(PlayResult::Hit2Base.bases(), Some(2));
        assert_eq!(PlayResult::HomeRun.bases(), None);
        assert!(PlayResult::GameSet.is_signal());
        assert!(!PlayResult::Out.is_signal());
    }

    #[test]
    fn matchup_indexes_by_side() {
        let mut m = Matchup::new(1, 2);
        *m.get_mut(Side::Second) += 5;
        assert_eq!(*m.get(Side::First), 1);
        assert_eq!(*m.get(Side::Second), 7);
    }
}
