//! Vibes Ballot
//!
//! One-vote-per-identity binary poll. Every identity may cast a single,
//! irrevocable "good" or "bad" vote; the ballot keeps the running tally
//! and the set of identities that have voted.

pub mod ballot;
pub mod error;
pub mod identity;
pub mod voting;

pub use ballot::{Ballot, BallotSnapshot};
pub use error::{BallotError, Result};
pub use identity::Identity;
pub use voting::{Tally, VoteChoice};
