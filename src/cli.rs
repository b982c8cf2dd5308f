use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Default, Parser, Serialize)]
#[command(name = "cleanboard", about = "Live leaderboard of cleaned storage")]
pub struct Cli {
    /// Address the HTTP server listens on, e.g. 0.0.0.0:5001
    #[arg(long = "bind")]
    #[serde(rename = "bind_addr", skip_serializing_if = "Option::is_none")]
    pub bind_addr: Option<String>,
    /// JSON file the leaderboard is loaded from and saved to
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Cron schedule (with seconds) of the autosave job
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosave_schedule: Option<String>,
    /// Disable the autosave job
    #[arg(long)]
    #[serde(skip)]
    pub no_autosave: bool,
    /// One of TRACE, DEBUG, INFO, WARN, ERROR
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_level: Option<String>,
}
