//! Runtime core: session orchestration and scheduling.
//!
//! ## Contents
//! - `session`: composition root ([`FeedSession`]) and shutdown sequencing
//! - `aggregator`: spawns scheduling actors, owns the fan-in wiring
//! - `actor`: drives one producer's generation loop
//! - `config`: session tunables ([`FeedConfig`])

mod actor;
mod aggregator;
mod config;
mod session;

pub use config::FeedConfig;
pub use session::{FeedSession, FeedSessionBuilder};
