use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::{EditorState, HistoryConfig, ToolKind, DEFAULT_COALESCE_WINDOW_MS};
use crate::geometry::{Color, DEFAULT_CELL_SCALE};
use crate::picture::{Picture, PictureResult};
use crate::storage::{DEFAULT_EXPORT_FILE_NAME, MAX_IMPORT_DIMENSION};

const APP_DIR: &str = "pixel8";
const APP_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read editor config: {path}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("failed to write editor config: {path}")]
    WriteConfig { path: PathBuf, source: io::Error },
    #[error("failed to parse editor config")]
    ParseConfig(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Editor settings from `config.json`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color,
    pub initial_color: Color,
    pub initial_tool: ToolKind,
    pub coalesce_window_ms: u64,
    pub max_history: Option<usize>,
    pub import_max_dimension: u32,
    pub export_file_name: String,
    pub cell_scale: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 100,
            canvas_height: 50,
            background: Color::WHITE,
            initial_color: Color::BLACK,
            initial_tool: ToolKind::Draw,
            coalesce_window_ms: DEFAULT_COALESCE_WINDOW_MS,
            max_history: None,
            import_max_dimension: MAX_IMPORT_DIMENSION,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            cell_scale: DEFAULT_CELL_SCALE,
        }
    }
}

impl EditorConfig {
    pub fn history(&self) -> HistoryConfig {
        HistoryConfig {
            coalesce_window_ms: self.coalesce_window_ms,
            max_depth: self.max_history,
        }
    }

    /// Blank canvas, configured tool and color, empty history.
    pub fn initial_state(&self) -> PictureResult<EditorState> {
        let picture = Picture::empty(
            i64::from(self.canvas_width),
            i64::from(self.canvas_height),
            self.background,
        )?;
        Ok(EditorState::new(
            self.initial_tool,
            self.initial_color,
            picture,
        ))
    }
}

pub fn load_editor_config() -> EditorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_editor_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EditorConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return EditorConfig::default(),
    };
    if !path.exists() {
        return EditorConfig::default();
    }
    read_editor_config(&path).unwrap_or_else(|err| {
        tracing::warn!(%err, ?path, "unusable config.json; using defaults");
        EditorConfig::default()
    })
}

fn read_editor_config(path: &Path) -> ConfigResult<EditorConfig> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    parse_editor_config(&contents)
}

pub fn parse_editor_config(serialized: &str) -> ConfigResult<EditorConfig> {
    Ok(serde_json::from_str(serialized)?)
}

pub fn save_editor_config(config: &EditorConfig) -> ConfigResult<PathBuf> {
    let (xdg_config_home, home) = config_env_dirs();
    save_editor_config_with(config, xdg_config_home.as_deref(), home.as_deref())
}

fn save_editor_config_with(
    config: &EditorConfig,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<PathBuf> {
    let path = app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home).map_err(
        |error| match error {
            ConfigPathError::MissingHomeDirectory => ConfigError::MissingHomeDirectory,
        },
    )?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteConfig {
            path: path.clone(),
            source,
        })?;
    }

    let serialized = serde_json::to_string_pretty(config)?;
    fs::write(&path, serialized).map_err(|source| ConfigError::WriteConfig {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
