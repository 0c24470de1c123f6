//! Ballot error types

use crate::Identity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("Already voted: {0}")]
    AlreadyVoted(Identity),

    #[error("Inconsistent snapshot: {good} good + {bad} bad != {voters} voters")]
    InconsistentSnapshot { good: u64, bad: u64, voters: usize },

    #[error("Duplicate voter in snapshot: {0}")]
    DuplicateVoter(Identity),
}

pub type Result<T> = std::result::Result<T, BallotError>;
