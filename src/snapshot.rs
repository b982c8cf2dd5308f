use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

use crate::board::leaderboard::{EntryMap, Leaderboard};
use crate::error::{BoardError, BoardResult};

/// JSON file holding the whole table as `name -> entry`. It is always read and
/// written in full.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SnapshotFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. `Ok(None)` when no file exists yet.
    pub async fn read(&self) -> BoardResult<Option<Leaderboard>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let leaderboard: Leaderboard = serde_json::from_slice(&raw)?;
        Ok(Some(leaderboard))
    }

    /// Read the snapshot for startup. A missing, unreadable or invalid file
    /// yields an empty table.
    pub async fn load(&self) -> Leaderboard {
        match self.read().await {
            Ok(Some(leaderboard)) => {
                info!(
                    "Loaded {} entries from {}",
                    leaderboard.len(),
                    self.path.display()
                );
                leaderboard
            }
            Ok(None) => {
                info!("No snapshot at {}, starting empty", self.path.display());
                Leaderboard::new()
            }
            Err(e) => {
                let error = BoardError::Persistence(format!(
                    "Could not load snapshot {}. {e}",
                    self.path.display()
                ));
                error!("{error}");
                Leaderboard::new()
            }
        }
    }

    /// Overwrite the snapshot with `entries`. The new content is written next
    /// to the file and renamed over it, so a crash mid-write keeps the old one.
    pub async fn save(&self, entries: &EntryMap) -> BoardResult<()> {
        let raw = serde_json::to_vec_pretty(entries)?;
        let staging = self.staging_path();
        fs::write(&staging, raw).await?;
        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        info!(
            "Saved {} entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}
