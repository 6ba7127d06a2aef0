//! User settings from `config.toml`.

use directories::ProjectDirs;
use runway_engine::engine::{DEFAULT_MAX_PASSES, ViewMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    max_passes: Option<usize>,
    store_dir: Option<PathBuf>,
    view_mode: Option<ViewMode>,
}

/// Effective settings after defaults are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub max_passes: usize,
    pub store_dir: Option<PathBuf>,
    /// Overrides each model's stored view when set.
    pub view_mode: Option<ViewMode>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_passes: DEFAULT_MAX_PASSES,
            store_dir: None,
            view_mode: None,
        }
    }
}

impl Settings {
    /// Where models live when no directory is configured.
    pub fn store_dir_or_default(&self) -> PathBuf {
        self.store_dir
            .clone()
            .or_else(|| ProjectDirs::from("", "", "runway").map(|p| p.data_dir().join("models")))
            .unwrap_or_else(|| PathBuf::from("runway-models"))
    }
}

/// Load settings. Problems are returned as warnings and defaults are kept.
pub fn load_settings(config_file: Option<&PathBuf>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut settings = Settings::default();
    let config_path = config_file.cloned().or_else(user_config_path);

    let Some(path) = config_path.as_ref() else {
        return (settings, warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (settings, warnings);
    }

    let Some(file) = read_config(path, &mut warnings) else {
        return (settings, warnings);
    };

    if let Some(max_passes) = file.max_passes {
        if max_passes == 0 {
            warnings.push("max_passes must be at least 1; using 1".to_string());
            settings.max_passes = 1;
        } else {
            settings.max_passes = max_passes;
        }
    }
    settings.store_dir = file.store_dir;
    settings.view_mode = file.view_mode;

    (settings, warnings)
}

fn read_config(path: &Path, warnings: &mut Vec<String>) -> Option<ConfigFile> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "runway")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
