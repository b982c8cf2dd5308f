//! Leaderboard domain: entries, incoming payloads and the ranked table.
//!
//! - **`entry`**: the stored record for one submitter and its ranked projection.
//! - **`submission`**: request payloads and their validation into entry fields.
//! - **`leaderboard`**: the name-keyed table with upsert/remove/rank/export/replace.

pub mod entry;
pub mod leaderboard;
pub mod submission;

#[cfg(test)]
mod tests;
