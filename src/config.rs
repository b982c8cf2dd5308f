use crate::cli::Cli;
use crate::error::BoardResult;
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::Level;

const TRACE_LEVELS: [&'static str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
const LOCAL_SETTINGS_YAML_FILE: &str = ".env.local.yaml";
const ENV_PREFIX: &str = "CLEANBOARD_";

// Settings are resolved once at startup. Sources, lowest priority first:
// the optional '.env.local.yaml' file, CLEANBOARD_* environment variables
// (CLEANBOARD_DATA_FILE="x.json" sets data_file), then command line flags.
#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_trace_level")]
    trace_level: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    // Cron expression with seconds, as understood by tokio-cron-scheduler
    #[serde(default = "default_autosave_schedule")]
    pub autosave_schedule: String,
    #[serde(default = "default_autosave")]
    pub autosave: bool,
    #[serde(skip)]
    pub local_file: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> BoardResult<Self> {
        let local_file = Path::new(LOCAL_SETTINGS_YAML_FILE);
        let local_file = local_file.exists().then(|| local_file.to_path_buf());
        let mut settings = Settings::from_sources(local_file.as_deref(), Cli::parse())?;
        settings.local_file = local_file;
        Ok(settings)
    }

    pub fn from_sources(local_file: Option<&Path>, cli: Cli) -> BoardResult<Self> {
        let mut figment = Figment::new();
        if let Some(file) = local_file {
            figment = figment.merge(Yaml::file(file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));
        Settings::from_figment(figment, cli)
    }

    pub fn from_figment(figment: Figment, cli: Cli) -> BoardResult<Self> {
        let no_autosave = cli.no_autosave;
        let mut figment = figment.merge(Serialized::defaults(cli));
        if no_autosave {
            figment = figment.merge(Serialized::default("autosave", false));
        }
        Ok(figment.extract()?)
    }

    pub fn get_trace_level(&self) -> Level {
        get_trace_level(&self.trace_level)
    }
}

fn get_trace_level(level_str: &str) -> Level {
    match level_str.to_uppercase().as_str() {
        level if level == TRACE_LEVELS[0] => Level::TRACE,
        level if level == TRACE_LEVELS[1] => Level::DEBUG,
        level if level == TRACE_LEVELS[2] => Level::INFO,
        level if level == TRACE_LEVELS[3] => Level::WARN,
        level if level == TRACE_LEVELS[4] => Level::ERROR,
        // Default trace level
        _ => Level::INFO,
    }
}

fn default_trace_level() -> String {
    "INFO".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data_export.json")
}

fn default_autosave_schedule() -> String {
    "*/2 * * * * *".to_string()
}

fn default_autosave() -> bool {
    true
}
