//! Vibes node and client plumbing
//!
//! Shared by the `vibesd` daemon and the `vibes-cli` query tool.

pub mod client;
pub mod config;

pub use client::{BallotClient, ClientError};
pub use config::{ConfigError, NodeConfig};
