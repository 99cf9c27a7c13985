//! Bounded, most-recent-first list of fetched profiles.
//!
//! Entries are unique by case-insensitive subject name. The persisted form is
//! a JSON array of profile records.

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::ProfileRecord;

/// Most entries a history ever holds, and the default capacity.
pub const MAX_HISTORY_CAPACITY: usize = 10;

/// Recent results, newest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Arc<ProfileRecord>>,
    capacity: usize,
}

impl History {
    /// Empty history holding at most `capacity` entries, clamped to
    /// `1..=MAX_HISTORY_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_CAPACITY);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Decode a persisted blob.
    ///
    /// The stored list is normalized on the way in: duplicates after the first
    /// occurrence are dropped and the list is truncated to `capacity`.
    pub fn from_blob(blob: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let records: Vec<ProfileRecord> = serde_json::from_str(blob)?;
        let mut history = Self::new(capacity);
        for record in records {
            if history.entries.len() >= history.capacity {
                break;
            }
            if history.position(&record.name).is_none() {
                history.entries.push(Arc::new(record));
            }
        }
        Ok(history)
    }

    /// Decode a persisted blob, treating anything unreadable as no history.
    pub fn load_or_empty(blob: Option<&str>, capacity: usize) -> Self {
        match blob {
            None => Self::new(capacity),
            Some(blob) => Self::from_blob(blob, capacity).unwrap_or_else(|e| {
                warn!(error = %e, "Stored history is corrupt, starting empty");
                Self::new(capacity)
            }),
        }
    }

    /// Encode for persistence.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        let records: Vec<&ProfileRecord> = self.entries.iter().map(AsRef::as_ref).collect();
        serde_json::to_string(&records)
    }

    /// Move `record` to the front, replacing any entry with the same name.
    pub fn upsert(&mut self, record: Arc<ProfileRecord>) {
        if let Some(index) = self.position(&record.name) {
            self.entries.remove(index);
        }
        self.entries.insert(0, record);
        self.entries.truncate(self.capacity);
    }

    /// Entry whose name matches case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Arc<ProfileRecord>> {
        self.position(name).map(|index| &self.entries[index])
    }

    pub fn get(&self, index: usize) -> Option<&Arc<ProfileRecord>> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Arc<ProfileRecord>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.same_subject(name))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_CAPACITY)
    }
}
