#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::cargo)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

//! Rules engine for a short baseball game: ball/strike/out counting,
//! base runner advancement, the line score, and the half-inning state
//! machine that decides side changes, walk-offs and called games.

pub mod game;
pub mod records;
