use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::traits::InningsSetting;

pub const MAX_RECORD_COUNT: usize = 5;

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    pub own_team: String,
    pub other_team: String,
    pub points: u32,
    /// Seconds since the Unix epoch.
    pub epoch_time: i64,
}

impl RecordEntry {
    pub fn new(own_team: &str, other_team: &str, points: u32, epoch_time: i64) -> Self {
        Self {
            own_team: own_team.to_string(),
            other_team: other_team.to_string(),
            points,
            epoch_time,
        }
    }
}

/// Best entries sort first: more points, then the more recent game.
impl Ord for RecordEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.epoch_time.cmp(&self.epoch_time))
            .then_with(|| self.own_team.cmp(&other.own_team))
            .then_with(|| self.other_team.cmp(&other.other_team))
    }
}

impl PartialOrd for RecordEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct BestRecords(ArrayVec<RecordEntry, MAX_RECORD_COUNT>);

impl BestRecords {
    /// Inserts the entry if it makes the table, returning its 1-based rank.
    pub fn add(&mut self, entry: RecordEntry) -> Option<usize> {
        if self.0.is_full() {
            match self.0.last() {
                Some(worst) if entry < *worst => {
                    self.0.pop();
                }
                _ => return None,
            }
        }
        self.0.push(entry.clone());
        self.0.sort();
        self.0.iter().position(|e| *e == entry).map(|i| i + 1)
    }

    pub fn entries(&self) -> &[RecordEntry] {
        &self.0
    }

    pub fn best(&self) -> Option<&RecordEntry> {
        self.0.first()
    }
}

/// The player's best games, kept separately for every game length.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordBook {
    inning1: BestRecords,
    inning3: BestRecords,
    inning5: BestRecords,
    inning7: BestRecords,
    inning9: BestRecords,
}

impl RecordBook {
    pub const fn get(&self, setting: InningsSetting) -> &BestRecords {
        match setting {
            InningsSetting::One => &self.inning1,
            InningsSetting::Three => &self.inning3,
            InningsSetting::Five => &self.inning5,
            InningsSetting::Seven => &self.inning7,
            InningsSetting::Nine => &self.inning9,
        }
    }

    fn get_mut(&mut self, setting: InningsSetting) -> &mut BestRecords {
        match setting {
            InningsSetting::One => &mut self.inning1,
            InningsSetting::Three => &mut self.inning3,
            InningsSetting::Five => &mut self.inning5,
            InningsSetting::Seven => &mut self.inning7,
            InningsSetting::Nine => &mut self.inning9,
        }
    }

    pub fn add(&mut self, setting: InningsSetting, entry: RecordEntry) -> Option<usize> {
        let rank = self.get_mut(setting).add(entry);
        match rank {
            Some(rank) => info!("New record for {setting}-inning games at rank {rank}"),
            None => debug!("Score did not make the {setting}-inning records"),
        }
        rank
    }

    /// A missing file is an empty book.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No records at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse records in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize records")?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(points: u32, epoch_time: i64) -> RecordEntry {
        RecordEntry::new("Visitors", "Home", points, epoch_time)
    }

    #[test]
    fn ordering_prefers_points_then_recency() {
        let mut entries = vec![entry(100, 5), entry(300, 1), entry(100, 9), entry(0, 20)];
        entries.sort();
        assert_eq!(
            entries,
            vec![entry(300, 1), entry(100, 9), entry(100, 5), entry(0, 20)]
        );
    }

    #[test]
    fn keeps_only_the_best_five() {
        let mut records = BestRecords::default();
        for (i, points) in [50, 10, 40, 30, 20].into_iter().enumerate() {
            assert!(records.add(entry(points, i as i64)).is_some());
        }
        assert_eq!(records.add(entry(5, 100)), None);
        assert_eq!(records.add(entry(45, 100)), Some(2));

        let points: Vec<_> = records.entries().iter().map(|e| e.points).collect();
        assert_eq!(points, vec![50, 45, 40, 30, 20]);
        assert_eq!(records.best(), Some(&entry(50, 0)));
    }

    #[test]
    fn tie_with_newer_game_ranks_higher() {
        let mut records = BestRecords::default();
        records.add(entry(10, 1));
        assert_eq!(records.add(entry(10, 2)), Some(1));
    }

    #[test]
    fn book_keeps_settings_apart() {
        let mut book = RecordBook::default();
        book.add(InningsSetting::Three, entry(70, 1));
        assert_eq!(book.get(InningsSetting::Three).entries().len(), 1);
        assert!(book.get(InningsSetting::Nine).entries().is_empty());
    }

    #[test]
    fn missing_file_is_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let book = RecordBook::load(&dir.path().join("records.json")).unwrap();
        assert_eq!(book, RecordBook::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut book = RecordBook::default();
        book.add(InningsSetting::One, entry(3300, 1_700_000_000));
        book.add(InningsSetting::One, entry(120, 1_700_000_100));
        book.save(&path).unwrap();

        let loaded = RecordBook::load(&path).unwrap();
        assert_eq!(loaded, book);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["inning1"][0]["points"], 3300);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "not json").unwrap();
        let err = RecordBook::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse records"));
    }
}
