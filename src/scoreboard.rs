//! Per-run tally of finished sessions, shown on the host's menu. Nothing
//! here outlives the process.

use chrono::{DateTime, Local};

use crate::game::GameKind;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub kind: GameKind,
    pub score: u32,
    pub finished_at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct Scoreboard {
    records: Vec<SessionRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: GameKind, score: u32) -> &SessionRecord {
        self.records.push(SessionRecord {
            kind,
            score,
            finished_at: Local::now(),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn plays(&self, kind: GameKind) -> usize {
        self.scores(kind).count()
    }

    pub fn best(&self, kind: GameKind) -> Option<u32> {
        self.scores(kind).max()
    }

    pub fn average(&self, kind: GameKind) -> Option<f64> {
        let (sum, count) = self
            .scores(kind)
            .fold((0u64, 0u32), |(sum, count), s| (sum + s as u64, count + 1));
        (count > 0).then(|| sum as f64 / count as f64)
    }

    /// When the latest session of `kind` finished.
    pub fn last_played(&self, kind: GameKind) -> Option<DateTime<Local>> {
        self.records
            .iter()
            .rev()
            .find(|r| r.kind == kind)
            .map(|r| r.finished_at)
    }

    pub fn total(&self) -> u64 {
        self.records.iter().map(|r| r.score as u64).sum()
    }

    /// Whether the latest session of `kind` beat every earlier one.
    pub fn is_new_best(&self, kind: GameKind) -> bool {
        let mut scores: Vec<u32> = self.scores(kind).collect();
        match scores.pop() {
            Some(latest) => latest > 0 && scores.iter().all(|&s| latest > s),
            None => false,
        }
    }

    fn scores(&self, kind: GameKind) -> impl Iterator<Item = u32> + '_ {
        self.records
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| r.score)
    }
}
