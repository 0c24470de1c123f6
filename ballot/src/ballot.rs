//! Ballot state machine
//!
//! Holds the canonical counters and the voted-identity set behind a single
//! lock. Casting checks membership and applies the increment inside one
//! write guard, so two concurrent casts from the same identity can never
//! both pass the "not yet voted" check.

use crate::{BallotError, Identity, Result, Tally, VoteChoice};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Default)]
struct BallotState {
    good: u64,
    bad: u64,
    voted: HashSet<Identity>,
}

impl BallotState {
    fn tally(&self) -> Tally {
        Tally::new(self.good, self.bad)
    }
}

/// Serializable copy of a ballot: both counters plus every identity that voted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub good: u64,
    pub bad: u64,
    pub voted: Vec<Identity>,
}

/// One-vote-per-identity poll.
#[derive(Debug, Default)]
pub struct Ballot {
    state: RwLock<BallotState>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `choice` for `voter`.
    ///
    /// Fails with [`BallotError::AlreadyVoted`] if the identity has voted
    /// before, leaving counters and voter set untouched.
    pub fn cast(&self, voter: &Identity, choice: VoteChoice) -> Result<Tally> {
        let mut state = self.state.write();

        if !state.voted.insert(voter.clone()) {
            return Err(BallotError::AlreadyVoted(voter.clone()));
        }

        match choice {
            VoteChoice::Good => state.good += 1,
            VoteChoice::Bad => state.bad += 1,
        }

        Ok(state.tally())
    }

    pub fn cast_good(&self, voter: &Identity) -> Result<Tally> {
        self.cast(voter, VoteChoice::Good)
    }

    pub fn cast_bad(&self, voter: &Identity) -> Result<Tally> {
        self.cast(voter, VoteChoice::Bad)
    }

    pub fn has_voted(&self, voter: &Identity) -> bool {
        self.state.read().voted.contains(voter)
    }

    pub fn tally(&self) -> Tally {
        self.state.read().tally()
    }

    pub fn voter_count(&self) -> usize {
        self.state.read().voted.len()
    }

    /// Consistent copy of the whole ballot. Voters are sorted so repeated
    /// snapshots of the same state serialize identically.
    pub fn snapshot(&self) -> BallotSnapshot {
        let state = self.state.read();
        let mut voted: Vec<Identity> = state.voted.iter().cloned().collect();
        voted.sort();

        BallotSnapshot {
            good: state.good,
            bad: state.bad,
            voted,
        }
    }

    /// Rebuild a ballot from a snapshot, rejecting any snapshot whose
    /// counters do not add up to the number of distinct voters.
    pub fn restore(snapshot: BallotSnapshot) -> Result<Self> {
        let BallotSnapshot { good, bad, voted } = snapshot;

        let mut set = HashSet::with_capacity(voted.len());
        for voter in voted {
            if set.contains(&voter) {
                return Err(BallotError::DuplicateVoter(voter));
            }
            set.insert(voter);
        }

        if good.checked_add(bad) != Some(set.len() as u64) {
            return Err(BallotError::InconsistentSnapshot {
                good,
                bad,
                voters: set.len(),
            });
        }

        Ok(Self {
            state: RwLock::new(BallotState {
                good,
                bad,
                voted: set,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn id(s: &str) -> Identity {
        Identity::from(s)
    }

    #[test]
    fn test_fresh_ballot_is_empty() {
        let ballot = Ballot::new();
        assert_eq!(ballot.tally(), Tally::new(0, 0));
        assert!(!ballot.has_voted(&id("alice")));
        assert_eq!(ballot.voter_count(), 0);
    }

    #[test]
    fn test_vote_sequence() {
        let ballot = Ballot::new();

        assert_eq!(ballot.cast_good(&id("a")).unwrap(), Tally::new(1, 0));
        assert!(ballot.has_voted(&id("a")));

        assert_eq!(ballot.cast_bad(&id("b")).unwrap(), Tally::new(1, 1));

        assert_eq!(
            ballot.cast_good(&id("a")),
            Err(BallotError::AlreadyVoted(id("a")))
        );
        assert_eq!(ballot.tally(), Tally::new(1, 1));

        assert_eq!(
            ballot.cast_bad(&id("b")),
            Err(BallotError::AlreadyVoted(id("b")))
        );
        assert_eq!(ballot.tally(), Tally::new(1, 1));

        assert_eq!(ballot.cast_good(&id("c")).unwrap(), Tally::new(2, 1));
        assert!(ballot.has_voted(&id("c")));
        assert!(!ballot.has_voted(&id("d")));
    }

    #[test]
    fn test_rejected_vote_with_other_choice_is_noop() {
        let ballot = Ballot::new();
        ballot.cast_good(&id("a")).unwrap();
        let before = ballot.snapshot();

        assert!(ballot.cast_bad(&id("a")).is_err());
        assert_eq!(ballot.snapshot(), before);
    }

    #[test]
    fn test_concurrent_casts_same_identity() {
        let ballot = Arc::new(Ballot::new());
        let voter = id("0xdeadbeef");

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let ballot = Arc::clone(&ballot);
                let voter = voter.clone();
                thread::spawn(move || {
                    let choice = if i % 2 == 0 {
                        VoteChoice::Good
                    } else {
                        VoteChoice::Bad
                    };
                    ballot.cast(&voter, choice).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(ballot.tally().total(), 1);
        assert_eq!(ballot.voter_count(), 1);
    }

    #[test]
    fn test_snapshot_restore() {
        let ballot = Ballot::new();
        ballot.cast_good(&id("b")).unwrap();
        ballot.cast_bad(&id("a")).unwrap();
        ballot.cast_good(&id("c")).unwrap();

        let snapshot = ballot.snapshot();
        assert_eq!(snapshot.voted, vec![id("a"), id("b"), id("c")]);

        let restored = Ballot::restore(snapshot).unwrap();
        assert_eq!(restored.tally(), Tally::new(2, 1));
        assert!(restored.has_voted(&id("a")));
        assert!(restored.cast_good(&id("a")).is_err());
    }

    #[test]
    fn test_restore_rejects_inconsistent_counts() {
        let snapshot = BallotSnapshot {
            good: 2,
            bad: 1,
            voted: vec![id("a"), id("b")],
        };
        assert_eq!(
            Ballot::restore(snapshot).unwrap_err(),
            BallotError::InconsistentSnapshot {
                good: 2,
                bad: 1,
                voters: 2
            }
        );
    }

    #[test]
    fn test_restore_rejects_duplicate_voter() {
        let snapshot = BallotSnapshot {
            good: 1,
            bad: 1,
            voted: vec![id("a"), id("a")],
        };
        assert_eq!(
            Ballot::restore(snapshot).unwrap_err(),
            BallotError::DuplicateVoter(id("a"))
        );
    }

    #[test]
    fn test_restore_rejects_overflowing_counts() {
        let snapshot = BallotSnapshot {
            good: u64::MAX,
            bad: 1,
            voted: vec![],
        };
        assert!(matches!(
            Ballot::restore(snapshot),
            Err(BallotError::InconsistentSnapshot { .. })
        ));
    }
}
