use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::board::entry::RankedEntry;
use crate::board::leaderboard::{EntryMap, Leaderboard};
use crate::board::submission::{Edit, Submission, ValidSubmission};
use crate::error::{BoardError, BoardResult};

#[derive(Debug, Default)]
struct Table {
    leaderboard: Leaderboard,
    // Bumped on every mutation, used by the autosave job to skip idle ticks.
    revision: u64,
}

type SharedTable = Arc<Mutex<Table>>;

/// Process-wide handle on the leaderboard. Clones share the same table and
/// every operation runs in a single critical section, so readers never see a
/// half-applied write or replace.
#[derive(Clone, Debug, Default)]
pub struct LeaderboardStore {
    data: SharedTable,
}

impl LeaderboardStore {
    pub fn new() -> LeaderboardStore {
        LeaderboardStore::default()
    }

    // Mutations are single map operations, a poisoned lock still guards a
    // consistent table.
    fn table(&self) -> MutexGuard<'_, Table> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate `submission` and insert or replace the entry of its name.
    /// Nothing is written when validation fails.
    pub fn upsert(&self, submission: Submission) -> BoardResult<RankedEntry> {
        let submission = submission.validate().map_err(|e| {
            warn!("Rejected submission. {e}");
            e
        })?;
        let mut table = self.table();
        let written = table.leaderboard.upsert(submission);
        table.revision += 1;
        info!(
            "Recorded {} GB cleaned for '{}'",
            written.entry.cleaned_gb, written.name
        );
        Ok(written)
    }

    /// Remove the entry of `name`. Returns whether an entry existed.
    pub fn remove(&self, name: &str) -> bool {
        let mut table = self.table();
        match table.leaderboard.remove(name) {
            Some(_) => {
                table.revision += 1;
                info!("Removed entry of '{name}'");
                true
            }
            None => false,
        }
    }

    pub fn list_ranked(&self) -> Vec<RankedEntry> {
        self.table().leaderboard.ranked()
    }

    pub fn export_all(&self) -> EntryMap {
        self.table().leaderboard.export()
    }

    /// Export together with the revision it was taken at.
    pub fn export_with_revision(&self) -> (EntryMap, u64) {
        let table = self.table();
        (table.leaderboard.export(), table.revision)
    }

    /// Replace the whole table.
    pub fn replace_all(&self, entries: impl Into<Leaderboard>) {
        let leaderboard = entries.into();
        let mut table = self.table();
        table.leaderboard = leaderboard;
        table.revision += 1;
        info!("Replaced leaderboard with {} entries", table.leaderboard.len());
    }

    /// Apply an administrative edit and return the resulting table.
    /// Updating an unknown name is an error, removing one is not.
    pub fn edit(&self, edit: Edit) -> BoardResult<EntryMap> {
        let action = edit.action();
        let mut table = self.table();
        match edit {
            Edit::Add { name, cleaned_gb } => {
                table.leaderboard.upsert(entry_for(name, cleaned_gb));
            }
            Edit::Update { name, cleaned_gb } => {
                if !table.leaderboard.contains_key(&name) {
                    return Err(BoardError::NotFound(format!("No entry for '{name}'")));
                }
                table.leaderboard.upsert(entry_for(name, cleaned_gb));
            }
            Edit::Remove { name } => {
                if table.leaderboard.remove(&name).is_none() {
                    return Ok(table.leaderboard.export());
                }
            }
        }
        table.revision += 1;
        info!("Applied '{action}' edit");
        Ok(table.leaderboard.export())
    }

    pub fn len(&self) -> usize {
        self.table().leaderboard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revision(&self) -> u64 {
        self.table().revision
    }
}

fn entry_for(name: String, cleaned_gb: f64) -> ValidSubmission {
    ValidSubmission {
        name,
        cleaned_gb,
        starting_gb: 0.0,
        location: String::new(),
    }
}
