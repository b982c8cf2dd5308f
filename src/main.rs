use cleanboard::config::Settings;
use cleanboard::scheduler::{JobProcess, Scheduler};
use cleanboard::server::{self, AppState};
use cleanboard::snapshot::SnapshotFile;
use cleanboard::storage::LeaderboardStore;

use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::new()?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(settings.get_trace_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(file) = &settings.local_file {
        info!("Found '{}' file, loaded local configuration.", file.display());
    }

    // Hydrate before the first request is accepted.
    let snapshot = SnapshotFile::new(&settings.data_file);
    let store = LeaderboardStore::new();
    store.replace_all(snapshot.load().await);

    let mut sched = Scheduler::new(store.clone(), snapshot.clone()).await?;
    if settings.autosave {
        sched
            .add_job(JobProcess::Autosave(&settings.autosave_schedule))
            .await?;
        info!("Starting scheduler.");
        sched.start().await?;
    }

    let app = server::router(AppState::new(store.clone(), snapshot.clone()));
    let listener = TcpListener::bind(settings.bind_addr.as_str()).await?;
    info!("HTTP server listening on {}", settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down.");
    if settings.autosave {
        if let Err(e) = sched.shutdown().await {
            error!("{e}");
        }
    }
    match sched.save_if_changed().await? {
        true => info!("Saved leaderboard to {}", snapshot.path().display()),
        false => info!("Leaderboard unchanged, snapshot left as is."),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Could not listen for shutdown signal. {e}");
        std::future::pending::<()>().await;
    }
}
