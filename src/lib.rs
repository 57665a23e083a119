//! Questlog API Client
//!
//! Async client library for the Questlog gamified task platform: users
//! complete quests, earn XP and coins, join groups, trade items, and message
//! each other. All business logic (rewards, leveling, ranking) lives
//! server-side; this crate is the typed HTTP surface plus the session
//! machinery around it.
//!
//! # Features
//!
//! - **Transparent renewal**: a request that fails with 401 is retried once
//!   after exchanging the refresh token for a new access token
//! - **Explicit sessions**: credentials live in a [`session::Session`] object
//!   injected into the client, persisted across runs
//! - **Coalesced renewal**: concurrent 401s share a single in-flight refresh
//! - **Typed endpoints**: quests, groups, store, friends, messages,
//!   achievements, leaderboard

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use client::{ApiClient, SessionObserver};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use session::{Session, SessionStore, SessionTokens};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
