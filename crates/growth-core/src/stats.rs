//! Per-generation statistics for growth runs.

use crate::types::PatternKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single growth step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation produced by the step (the first step yields generation 1)
    pub generation: u64,
    /// Rule set the step was evaluated with
    pub pattern: PatternKind,
    /// Live cells after the step
    pub active_cells: usize,
    /// Dead cells that became live
    pub births: usize,
    /// Live cells that died
    pub deaths: usize,
    /// Wall-clock time the step completed
    pub recorded_at: DateTime<Utc>,
}

impl GenerationRecord {
    pub fn new(
        generation: u64,
        pattern: PatternKind,
        active_cells: usize,
        births: usize,
        deaths: usize,
    ) -> Self {
        Self {
            generation,
            pattern,
            active_cells,
            births,
            deaths,
            recorded_at: Utc::now(),
        }
    }

    /// Net change in live cells over the step
    pub fn net_change(&self) -> i64 {
        self.births as i64 - self.deaths as i64
    }

    pub fn is_extinct(&self) -> bool {
        self.active_cells == 0
    }
}

/// Ordered record of every step an engine has taken.
///
/// Records are appended in step order; retention is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationHistory {
    records: Vec<GenerationRecord>,
}

impl GenerationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenerationRecord> + '_ {
        self.records.iter()
    }

    /// Drop the oldest records so that at most `keep` remain
    pub fn retain_latest(&mut self, keep: usize) {
        if self.records.len() > keep {
            let excess = self.records.len() - keep;
            self.records.drain(..excess);
        }
    }

    /// Remove and return all records
    pub fn take(&mut self) -> Vec<GenerationRecord> {
        std::mem::take(&mut self.records)
    }

    /// True when the last `window` records all report the same active count
    pub fn is_stable(&self, window: usize) -> bool {
        if window == 0 || self.records.len() < window {
            return false;
        }
        let tail = &self.records[self.records.len() - window..];
        tail.iter().all(|r| r.active_cells == tail[0].active_cells)
    }

    /// Largest active count seen so far
    pub fn peak_active(&self) -> Option<usize> {
        self.records.iter().map(|r| r.active_cells).max()
    }

    pub fn into_vec(self) -> Vec<GenerationRecord> {
        self.records
    }
}

impl From<Vec<GenerationRecord>> for GenerationHistory {
    fn from(records: Vec<GenerationRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(counts: &[usize]) -> GenerationHistory {
        let mut history = GenerationHistory::new();
        for (i, &count) in counts.iter().enumerate() {
            history.push(GenerationRecord::new(
                i as u64 + 1,
                PatternKind::Coral,
                count,
                0,
                0,
            ));
        }
        history
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let history = history_of(&[5, 3, 8]);
        let generations: Vec<u64> = history.iter().map(|r| r.generation).collect();
        assert_eq!(generations, vec![1, 2, 3]);
        assert_eq!(history.latest().unwrap().active_cells, 8);
        assert_eq!(history.peak_active(), Some(8));
    }

    #[test]
    fn test_retain_latest() {
        let mut history = history_of(&[1, 2, 3, 4, 5]);
        history.retain_latest(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].generation, 4);

        history.retain_latest(10);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_stability_window() {
        let history = history_of(&[9, 4, 4, 4]);
        assert!(history.is_stable(3));
        assert!(!history.is_stable(4));
        assert!(!history.is_stable(0));
        assert!(!history_of(&[4]).is_stable(2));
    }

    #[test]
    fn test_take_empties_history() {
        let mut history = history_of(&[1, 2]);
        let taken = history.take();
        assert_eq!(taken.len(), 2);
        assert!(history.is_empty());
    }

    #[test]
    fn test_net_change() {
        let record = GenerationRecord::new(1, PatternKind::Lichen, 10, 3, 7);
        assert_eq!(record.net_change(), -4);
        assert!(!record.is_extinct());
    }
}
