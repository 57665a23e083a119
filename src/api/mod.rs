//! Typed endpoint surface
//!
//! Methods on [`crate::ApiClient`], grouped per backend resource. Every call
//! goes through the renewal-aware dispatch in [`crate::client`]; these
//! modules only shape paths, queries, and bodies.

mod auth;
mod groups;
mod progress;
mod quests;
mod social;
mod store;

pub use progress::LeaderboardQuery;
pub use quests::QuestFilter;
