use tokio_cron_scheduler::{Job, JobScheduler};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{BoardError, BoardResult};
use crate::snapshot::SnapshotFile;
use crate::storage::LeaderboardStore;

pub struct Scheduler {
    scheduler: JobScheduler,
    store: LeaderboardStore,
    snapshot: SnapshotFile,
    saved: SavedRevision,
}

pub enum JobProcess<'schedule> {
    /// Save the table to the snapshot file on the given cron schedule.
    Autosave(&'schedule str),
}

impl Scheduler {
    /// The store is expected to be hydrated from `snapshot` already: its
    /// current revision counts as saved.
    pub async fn new(store: LeaderboardStore, snapshot: SnapshotFile) -> BoardResult<Self> {
        let scheduler = JobScheduler::new().await?;
        let saved = SavedRevision::at(store.revision());
        Ok(Scheduler {
            scheduler,
            store,
            snapshot,
            saved,
        })
    }

    pub async fn add_job(&self, job_process: JobProcess<'_>) -> BoardResult<uuid::Uuid> {
        let job = match job_process {
            JobProcess::Autosave(schedule) => {
                autosave_job(
                    schedule,
                    self.store.clone(),
                    self.snapshot.clone(),
                    self.saved.clone(),
                )
                .await?
            }
        };
        Ok(self.scheduler.add(job).await?)
    }

    pub async fn start(&self) -> BoardResult<()> {
        Ok(self.scheduler.start().await?)
    }

    pub async fn shutdown(&mut self) -> BoardResult<()> {
        Ok(self.scheduler.shutdown().await?)
    }

    /// Write the table unless it is unchanged since hydration or the last
    /// autosave. An untouched store never overwrites the file it came from.
    pub async fn save_if_changed(&self) -> BoardResult<bool> {
        autosave_once(&self.store, &self.snapshot, &self.saved).await
    }
}

/// Revision of the table last written to the snapshot file.
#[derive(Clone, Debug)]
pub struct SavedRevision(Arc<AtomicU64>);

impl SavedRevision {
    pub fn at(revision: u64) -> Self {
        SavedRevision(Arc::new(AtomicU64::new(revision)))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, revision: u64) {
        self.0.store(revision, Ordering::SeqCst)
    }
}

/// One autosave pass: write the table if it changed since the last pass.
/// Returns whether the file was written.
pub async fn autosave_once(
    store: &LeaderboardStore,
    snapshot: &SnapshotFile,
    saved: &SavedRevision,
) -> BoardResult<bool> {
    let (entries, revision) = store.export_with_revision();
    if revision == saved.get() {
        return Ok(false);
    }
    snapshot.save(&entries).await?;
    saved.set(revision);
    Ok(true)
}

//////////////////
// Jobs definition
//////////////////

async fn autosave_job(
    schedule: &str,
    store: LeaderboardStore,
    snapshot: SnapshotFile,
    saved: SavedRevision,
) -> BoardResult<Job> {
    let job = Job::new_async(schedule, move |uuid, mut l| {
        let store = store.clone();
        let snapshot = snapshot.clone();
        let saved = saved.clone();
        Box::pin(async move {
            match autosave_once(&store, &snapshot, &saved).await {
                Ok(true) => debug!("Autosaved leaderboard"),
                Ok(false) => {}
                Err(e) => {
                    let error = BoardError::Persistence(format!("Autosave failed. {e}"));
                    error!("{error}");
                }
            };

            // Query the next execution time for this job
            let next_tick = l.next_tick_for_job(uuid).await;
            match next_tick {
                Ok(Some(ts)) => debug!("Next autosave at {:?}", ts),
                _ => error!("Could not get next tick for autosave job"),
            }
        })
    })?;
    info!("Autosave scheduled with '{schedule}'");
    Ok(job)
}
