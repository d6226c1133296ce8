use std::str::FromStr;

use anyhow::{anyhow, Result};
use lazy_regex::regex;
use strum_macros::EnumString;

use crate::game::traits::PlayResult;

/// Spellings accepted in a play script. Engine signals have no spelling.
#[derive(Debug, Eq, PartialEq, Copy, Clone, EnumString)]
#[strum(ascii_case_insensitive)]
enum PlayToken {
    #[strum(serialize = "s", serialize = "strike")]
    Strike,
    #[strum(serialize = "b", serialize = "ball")]
    Ball,
    #[strum(serialize = "f", serialize = "foul")]
    Foul,
    #[strum(serialize = "o", serialize = "out")]
    Out,
    #[strum(serialize = "1b", serialize = "single")]
    Single,
    #[strum(serialize = "2b", serialize = "double")]
    Double,
    #[strum(serialize = "3b", serialize = "triple")]
    Triple,
    #[strum(serialize = "hr", serialize = "homerun")]
    HomeRun,
}

impl From<PlayToken> for PlayResult {
    fn from(token: PlayToken) -> Self {
        match token {
            PlayToken::Strike => Self::Strike,
            PlayToken::Ball => Self::Ball,
            PlayToken::Foul => Self::Foul,
            PlayToken::Out => Self::Out,
            PlayToken::Single => Self::Hit1Base,
            PlayToken::Double => Self::Hit2Base,
            PlayToken::Triple => Self::Hit3Base,
            PlayToken::HomeRun => Self::HomeRun,
        }
    }
}

/// Parses a script such as `"S B F 1B # leadoff single\nO, O, O"`.
/// Positions in errors are 1-based line numbers and token numbers.
pub fn parse_script(script: &str) -> Result<Vec<PlayResult>> {
    let separator = regex!(r"[\s,]+");
    let mut plays = vec![];
    for (line_number, line) in script.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(code, _)| code);
        for token in separator.split(line).filter(|t| !t.is_empty()) {
            let play = PlayToken::from_str(token).map_err(|_| {
                anyhow!(
                    "Unknown play `{}` at line {}, play {}",
                    token,
                    line_number + 1,
                    plays.len() + 1
                )
            })?;
            plays.push(play.into());
        }
    }
    Ok(plays)
}
