use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use gridfetch_engine::{EngineConfig, FetchSettings};
use serde::{Deserialize, Serialize};

use super::cli::Cli;
use super::provider;

pub const SETTINGS_FILENAME: &str = "settings.ron";
const DEFAULT_WIDTH: f32 = 390.0;

/// Optional overrides read from a RON file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub output_dir: Option<PathBuf>,
    pub urls_file: Option<PathBuf>,
    pub max_concurrent: Option<usize>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub columns: Option<u32>,
    pub view_width: Option<f32>,
}

/// Fully resolved settings for one run: CLI flags over file values over
/// defaults.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub output_dir: PathBuf,
    pub urls_file: Option<PathBuf>,
    pub columns: u32,
    pub view_width: f32,
    pub engine: EngineConfig,
}

pub fn default_settings_path() -> PathBuf {
    provider::storage_root().join(SETTINGS_FILENAME)
}

/// Missing or unreadable files fall back to defaults with a warning.
pub fn load_settings(path: &Path) -> PersistedSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PersistedSettings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return PersistedSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            PersistedSettings::default()
        }
    }
}

pub fn resolve(cli: &Cli, file: PersistedSettings) -> SessionSettings {
    let fetch = FetchSettings {
        connect_timeout: file.connect_timeout_secs.map(Duration::from_secs),
        request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        ..FetchSettings::default()
    };

    SessionSettings {
        output_dir: cli
            .out
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(provider::default_image_dir),
        urls_file: cli.urls.clone().or(file.urls_file),
        columns: cli.columns.or(file.columns).unwrap_or(3).max(1),
        view_width: cli.width.or(file.view_width).unwrap_or(DEFAULT_WIDTH),
        engine: EngineConfig {
            fetch,
            max_concurrent: cli.max_concurrent.or(file.max_concurrent),
        },
    }
}
