#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::cargo)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use walkoff::game::game_state::GameConfig;
use walkoff::game::script::parse_script;
use walkoff::game::session::GameSession;
use walkoff::game::traits::{InningsSetting, Matchup, PlayResult, Side};
use walkoff::records::{RecordBook, RecordEntry};

const ABOUT: &str = "Plays a scripted baseball game through the half-inning rules engine.";

#[derive(Parser, Debug)]
#[command(name = "walkoff", about = ABOUT)]
struct Opt {
    /// JSON game configuration. Flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Game length: 1, 3, 5, 7 or 9
    #[arg(short, long)]
    innings: Option<u8>,

    #[arg(short, long)]
    mercy_margin: Option<u32>,

    #[arg(long)]
    player_side: Option<Side>,

    #[arg(long)]
    first_team: Option<String>,

    #[arg(long)]
    second_team: Option<String>,

    /// Plays inline, e.g. "S B 1B O O HR"
    #[arg(short, long, conflicts_with = "script", required_unless_present = "script")]
    plays: Option<String>,

    /// File of plays, one or more per line, `#` for comments
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print the game summary as JSON
    #[arg(long)]
    json: bool,

    /// Records file to add this game's points to
    #[arg(short, long)]
    records: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

impl Opt {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        if let Some(innings) = self.innings {
            config.innings = InningsSetting::try_from(innings)
                .with_context(|| format!("Unsupported game length: {innings} innings"))?;
        }
        if let Some(margin) = self.mercy_margin {
            config.mercy_margin = margin;
        }
        if let Some(side) = self.player_side {
            config.player_side = side;
        }
        if let Some(name) = &self.first_team {
            config.team_names.first = name.clone();
        }
        if let Some(name) = &self.second_team {
            config.team_names.second = name.clone();
        }
        Ok(config)
    }

    fn plays(&self) -> Result<Vec<PlayResult>> {
        let script = match (&self.plays, &self.script) {
            (Some(plays), _) => plays.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => bail!("Either --plays or --script is required"),
        };
        parse_script(&script)
    }
}

fn run_game(config: GameConfig, plays: &[PlayResult]) -> Result<GameSession> {
    let mut session = GameSession::new(config)?;
    for (i, play) in plays.iter().enumerate() {
        if session.state().is_game_over() {
            warn!("Game ended with {} play(s) left over", plays.len() - i);
            break;
        }
        let outcome = session.apply_play(*play)?;
        debug!("{} -> {:?}", play, outcome.signal());
    }
    if !session.state().is_game_over() {
        info!("Script ran out before the game ended");
    }
    Ok(session)
}

/// Display width of the team-name column, in characters.
fn name_width(names: &Matchup<String>) -> usize {
    names.first.chars().count().max(names.second.chars().count())
}

fn print_line_score(session: &GameSession) {
    let state = session.state();
    let config = state.config();
    let skipped = state.ending().is_some_and(|e| e.skipped_final_second_half);
    let innings = config.innings.count();
    let width = name_width(&config.team_names);

    let header = (1..=innings).map(|i| format!("{i:>3}")).join("");
    println!("{:width$} {header} |   R   H", "");
    for side in [Side::First, Side::Second] {
        let cells = (0..innings)
            .map(|inning| {
                let played = inning < state.current_inning()
                    || (inning == state.current_inning()
                        && (side == Side::First || state.current_side() == Side::Second));
                if skipped && side == Side::Second && inning == state.current_inning() {
                    String::from("  X")
                } else if played {
                    state
                        .get(inning, side)
                        .map_or_else(|_| String::from("  ?"), |runs| format!("{runs:>3}"))
                } else {
                    String::from("  -")
                }
            })
            .join("");
        println!(
            "{:width$} {cells} | {:>3} {:>3}",
            config.team_names.get(side),
            state.total(side),
            session.diag(side).hits()
        );
    }
    if state.is_game_over() {
        println!("{}: {}", config.team_names.get(config.player_side), state.result());
    }
    println!("Points: {}", session.points().total());
}

fn update_records(session: &GameSession, path: &Path) -> Result<()> {
    let config = session.state().config();
    let mut book = RecordBook::load(path)?;
    let entry = RecordEntry::new(
        config.team_names.get(config.player_side),
        config.team_names.get(config.player_side.flip()),
        session.points().total(),
        chrono::Utc::now().timestamp(),
    );
    book.add(config.innings, entry);
    book.save(path)?;

    println!("Best {}-inning games:", config.innings);
    for (rank, record) in book.get(config.innings).entries().iter().enumerate() {
        println!(
            "{:>2}. {:>6}  {} vs {}",
            rank + 1,
            record.points,
            record.own_team,
            record.other_team
        );
    }
    Ok(())
}

fn run(opt: &Opt) -> Result<()> {
    let config = opt.game_config()?;
    let plays = opt.plays()?;
    info!(
        "{} vs {}, {} innings, {} play(s)",
        config.team_names.first,
        config.team_names.second,
        config.innings,
        plays.len()
    );
    let session = run_game(config, &plays)?;

    if opt.json {
        let summary = serde_json::to_string_pretty(&session.summary())
            .context("Failed to serialize game summary")?;
        println!("{summary}");
    } else {
        print_line_score(&session);
    }

    if let Some(path) = &opt.records {
        if session.state().is_game_over() {
            update_records(&session, path)?;
        } else {
            warn!("Unfinished games are not recorded");
        }
    }
    Ok(())
}

#[allow(clippy::expect_used)]
fn main() {
    let opt: Opt = Opt::parse();
    let level = if opt.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    run(&opt).expect("Error occurred while playing the game");
}
