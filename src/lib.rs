//! Shared leaderboard of cleaned storage.
//!
//! - **`board`**: entries, submissions and the ranked name-keyed table.
//! - **`storage`**: the process-wide store handle shared by all requests.
//! - **`snapshot`**: whole-table persistence to a JSON file.
//! - **`scheduler`**: the periodic autosave job.
//! - **`server`**: axum routes and handlers.

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod server;
pub mod snapshot;
pub mod storage;
