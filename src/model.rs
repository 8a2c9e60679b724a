use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as listed by the commits endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub sha: String,
    pub author_name: String,
    pub author_date: DateTime<Utc>,
    pub message_first_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    pub path: String,
    pub author_name: String,
    pub author_date: DateTime<Utc>,
}

/// Known source paths from a previous frequency run.
pub type SourceFileSet = HashSet<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTouches {
    pub path: String,
    pub touches: u64,
}

/// Touch counter keyed by path. Iterates in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyMap {
    index: HashMap<String, usize>,
    entries: Vec<FileTouches>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, path: &str) {
        match self.index.get(path) {
            Some(&i) => self.entries[i].touches += 1,
            None => {
                self.index.insert(path.to_string(), self.entries.len());
                self.entries.push(FileTouches {
                    path: path.to_string(),
                    touches: 1,
                });
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<u64> {
        self.index.get(path).map(|&i| self.entries[i].touches)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileTouches] {
        &self.entries
    }

    /// Most touched path; the earliest seen wins a tie.
    pub fn most_touched(&self) -> Option<&FileTouches> {
        self.entries
            .iter()
            .fold(None, |best: Option<&FileTouches>, e| match best {
                Some(b) if b.touches >= e.touches => Some(b),
                _ => Some(e),
            })
    }

    pub fn total_touches(&self) -> u64 {
        self.entries.iter().map(|e| e.touches).sum()
    }

    pub fn into_entries(self) -> Vec<FileTouches> {
        self.entries
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub all_files: Vec<FileTouches>,
    pub source_files: Vec<FileTouches>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub entries: Vec<AttributionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_map_keeps_first_seen_order() {
        let mut map = FrequencyMap::new();
        for p in ["b", "a", "b", "c", "a", "b"] {
            map.increment(p);
        }
        let order: Vec<_> = map.entries().iter().map(|e| (e.path.as_str(), e.touches)).collect();
        assert_eq!(order, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(map.get("a"), Some(2));
        assert_eq!(map.get("zzz"), None);
        assert_eq!(map.total_touches(), 6);
    }

    #[test]
    fn most_touched_prefers_earliest_on_tie() {
        let mut map = FrequencyMap::new();
        for p in ["x", "y", "y", "x"] {
            map.increment(p);
        }
        assert_eq!(map.most_touched().map(|e| e.path.as_str()), Some("x"));
        assert!(FrequencyMap::new().most_touched().is_none());
    }
}
