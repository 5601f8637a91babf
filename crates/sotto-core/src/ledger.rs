//! Durable ledger mapping sequential ids to their original submissions.
//!
//! The ledger is a single JSON document holding the id counter and the
//! recorded entries. It is loaded once at startup, mutated only by the
//! submission pipeline, and rewritten whole after every successful
//! mutation. Entries are only ever appended.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;

use crate::error::LedgerError;
use crate::types::{AuthorRef, MessageId};

/// One recorded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Sequential number assigned at allocation.
    pub id: MessageId,
    /// Sanitized text exactly as published.
    pub content: String,
    /// When the submission was accepted; immutable thereafter.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Opaque author reference; exposed only through disclosure.
    pub author: AuthorRef,
}

/// The serialized ledger document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Last allocated id; `0` before the first submission. May exceed
    /// the highest recorded key when an allocated id was burned by a
    /// publish failure.
    pub last_id: u64,
    /// Recorded entries keyed by id.
    pub entries: HashMap<MessageId, LedgerEntry>,
}

/// File-backed ledger store.
///
/// Owns the id counter and the entry mapping. The document is replaced
/// whole on every save, via a temporary file and a rename so a partial
/// write never corrupts the previous document.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    state: LedgerState,
}

impl LedgerStore {
    /// Load the ledger from `path`, or initialize an empty document
    /// (creating the parent directory) if none exists yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let state = serde_json::from_str(&raw)?;
                Ok(Self { path, state })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no ledger document found, starting empty");
                let store = Self {
                    path,
                    state: LedgerState::default(),
                };
                store.save().await?;
                Ok(store)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Allocate the next sequential id.
    ///
    /// The counter only moves forward; an id handed out here is never
    /// handed out again, whether or not an entry is ever recorded under
    /// it. The advanced counter reaches disk with the next [`save`].
    ///
    /// [`save`]: LedgerStore::save
    pub fn allocate(&mut self) -> MessageId {
        self.state.last_id += 1;
        MessageId(self.state.last_id)
    }

    /// Insert (or overwrite) the entry and persist the whole document.
    ///
    /// On failure the in-memory state may already hold the entry;
    /// callers must not assume a rollback.
    pub async fn record(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        self.state.entries.insert(entry.id, entry);
        self.save().await
    }

    /// Look up a recorded entry. No side effects.
    pub fn get(&self, id: MessageId) -> Option<&LedgerEntry> {
        self.state.entries.get(&id)
    }

    /// Last allocated id; `0` if nothing was ever allocated.
    pub fn last_id(&self) -> u64 {
        self.state.last_id
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    /// Whether no entry has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    /// Ids that were allocated but never recorded, in ascending order.
    ///
    /// These are the permanent gaps left by publish failures; surfaced
    /// for moderator visibility rather than reused.
    pub fn missing_ids(&self) -> Vec<MessageId> {
        (1..=self.state.last_id)
            .map(MessageId)
            .filter(|id| !self.state.entries.contains_key(id))
            .collect()
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole document, atomically replacing the previous one.
    pub async fn save(&self) -> Result<(), LedgerError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.state)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(id: u64, content: &str, author: &str) -> LedgerEntry {
        LedgerEntry {
            id: MessageId(id),
            content: content.into(),
            timestamp: datetime!(2025-06-01 12:00:00 UTC),
            author: AuthorRef::new(author),
        }
    }

    #[tokio::test]
    async fn open_initializes_empty_document_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");

        let store = LedgerStore::open(&path).await.unwrap();
        assert_eq!(store.last_id(), 0);
        assert!(store.is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn allocate_is_strictly_increasing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(dir.path().join("ledger.json"))
            .await
            .unwrap();

        assert_eq!(store.allocate(), MessageId(1));
        assert_eq!(store.allocate(), MessageId(2));
        assert_eq!(store.allocate(), MessageId(3));
        assert_eq!(store.last_id(), 3);
    }

    #[tokio::test]
    async fn save_then_load_round_trips_counter_and_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut store = LedgerStore::open(&path).await.unwrap();
        let first = store.allocate();
        store.record(entry(first.0, "hello", "100")).await.unwrap();
        let second = store.allocate();
        store.record(entry(second.0, "again", "200")).await.unwrap();

        let reloaded = LedgerStore::open(&path).await.unwrap();
        assert_eq!(reloaded.last_id(), 2);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(MessageId(1)), store.get(MessageId(1)));
        assert_eq!(reloaded.get(MessageId(2)), store.get(MessageId(2)));
    }

    #[tokio::test]
    async fn burned_counter_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut store = LedgerStore::open(&path).await.unwrap();
        store.allocate();
        store.allocate();
        // Only the second allocation gets recorded.
        store.record(entry(2, "kept", "100")).await.unwrap();

        let reloaded = LedgerStore::open(&path).await.unwrap();
        assert_eq!(reloaded.last_id(), 2);
        assert_eq!(reloaded.missing_ids(), vec![MessageId(1)]);
    }

    #[tokio::test]
    async fn missing_ids_lists_every_gap() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(dir.path().join("ledger.json"))
            .await
            .unwrap();

        for _ in 0..5 {
            store.allocate();
        }
        store.record(entry(2, "two", "1")).await.unwrap();
        store.record(entry(4, "four", "1")).await.unwrap();

        assert_eq!(
            store.missing_ids(),
            vec![MessageId(1), MessageId(3), MessageId(5)]
        );
    }

    #[tokio::test]
    async fn get_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(dir.path().join("ledger.json"))
            .await
            .unwrap();
        store.allocate();
        store.record(entry(1, "hello", "7")).await.unwrap();

        assert!(store.get(MessageId(1)).is_some());
        assert!(store.get(MessageId(99)).is_none());
        assert_eq!(store.last_id(), 1);
    }
}
