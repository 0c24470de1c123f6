//! Ballot snapshot persistence
//!
//! Wraps [`Storage`] with the one record this node keeps: the current
//! ballot snapshot and the time it was written. Counters are validated
//! against the voter set on load, never trusted blindly.

use crate::{Storage, StorageError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vibes_ballot::{Ballot, BallotSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBallot {
    pub ballot: BallotSnapshot,
    pub saved_at: i64, // Unix timestamp
}

pub struct BallotStore {
    storage: Storage,
    name: String,
}

impl BallotStore {
    pub fn open<P: AsRef<Path>>(data_dir: P, name: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self {
            storage: Storage::open(data_dir)?,
            name: name.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_dir(&self) -> &Path {
        self.storage.data_dir()
    }

    pub fn exists(&self) -> bool {
        self.storage.has_snapshot(&self.name)
    }

    /// Load the persisted ballot, or a fresh one if nothing was saved yet.
    pub fn load(&self) -> Result<Ballot, StorageError> {
        match self.storage.load_snapshot::<StoredBallot>(&self.name) {
            Ok(stored) => Ok(Ballot::restore(stored.ballot)?),
            Err(StorageError::SnapshotNotFound(_)) => Ok(Ballot::new()),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, ballot: &Ballot) -> Result<(), StorageError> {
        let stored = StoredBallot {
            ballot: ballot.snapshot(),
            saved_at: chrono::Utc::now().timestamp(),
        };
        self.storage.save_snapshot(&self.name, &stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vibes_ballot::{BallotError, Identity, Tally};

    #[test]
    fn test_load_without_snapshot_gives_fresh_ballot() {
        let dir = tempdir().unwrap();
        let store = BallotStore::open(dir.path(), "ballot").unwrap();

        assert!(!store.exists());
        let ballot = store.load().unwrap();
        assert_eq!(ballot.tally(), Tally::new(0, 0));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let store = BallotStore::open(dir.path(), "ballot").unwrap();

        let ballot = Ballot::new();
        ballot.cast_good(&Identity::from("0xa1")).unwrap();
        ballot.cast_bad(&Identity::from("0xb2")).unwrap();
        store.save(&ballot).unwrap();

        let reopened = BallotStore::open(dir.path(), "ballot").unwrap();
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.tally(), Tally::new(1, 1));
        assert!(loaded.has_voted(&Identity::from("0xa1")));
        assert_eq!(
            loaded.cast_bad(&Identity::from("0xb2")),
            Err(BallotError::AlreadyVoted(Identity::from("0xb2")))
        );
    }

    #[test]
    fn test_tampered_snapshot_is_rejected() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let stored = StoredBallot {
            ballot: BallotSnapshot {
                good: 5,
                bad: 0,
                voted: vec![Identity::from("0xa1")],
            },
            saved_at: 0,
        };
        storage.save_snapshot("ballot", &stored).unwrap();

        let store = BallotStore::open(dir.path(), "ballot").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Corrupt(BallotError::InconsistentSnapshot { .. })
        ));
    }

    #[test]
    fn test_unreadable_snapshot_is_io_level_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ballot.json"), "not json").unwrap();

        let store = BallotStore::open(dir.path(), "ballot").unwrap();
        assert!(matches!(
            store.load().unwrap_err(),
            StorageError::SerializationError(_)
        ));
    }
}
