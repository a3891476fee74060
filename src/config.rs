use crate::error::ConfigError;
use crate::grid::{Bounds, Cell};
use crate::navigation::SafetyMode;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub snake: SnakeConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnakeConfig {
    #[serde(default = "default_start_x")]
    pub start_x: i32,
    #[serde(default = "default_start_y")]
    pub start_y: i32,
    #[serde(default = "default_initial_length")]
    pub initial_length: usize,
    #[serde(default = "default_autopilot")]
    pub autopilot: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub safety_mode: SafetyMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    #[serde(default = "default_episodes")]
    pub episodes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_render_every")]
    pub every: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    /// Store every autopilot decision in the session log, not just branch changes
    #[serde(default)]
    pub log_decisions: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_cols() -> i32 { 24 }
fn default_rows() -> i32 { 36 }
fn default_start_x() -> i32 { 5 }
fn default_start_y() -> i32 { 5 }
fn default_initial_length() -> usize { 3 }
fn default_autopilot() -> bool { true }
fn default_max_ticks() -> u64 { 10_000 }
fn default_episodes() -> u32 { 1 }
fn default_render_every() -> u64 { 1 }
fn default_log_level() -> String { "info".to_string() }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            start_x: default_start_x(),
            start_y: default_start_y(),
            initial_length: default_initial_length(),
            autopilot: default_autopilot(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: default_max_ticks(),
            episodes: default_episodes(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            every: default_render_every(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            enable_action_log: default_enable_action_log(),
            log_decisions: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or broken
    pub fn load() -> Self {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using default configuration", path.display());
            return Config::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}", e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    /// Load and validate configuration from `path`
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.grid.cols, self.grid.rows)
    }

    pub fn start_head(&self) -> Cell {
        Cell::new(self.snake.start_x, self.snake.start_y)
    }

    /// Reject boards the starting snake cannot fit on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.cols <= 0 || self.grid.rows <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.cols, self.grid.rows
            )));
        }
        // Cell ids are row-major i32
        if self.grid.cols.checked_mul(self.grid.rows).is_none() {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} has too many cells",
                self.grid.cols, self.grid.rows
            )));
        }
        if self.snake.initial_length == 0 {
            return Err(ConfigError::Invalid("snake.initial_length must be at least 1".to_string()));
        }

        // The starting snake lies to the right of its head
        let head = self.start_head();
        let tail_x = i32::try_from(self.snake.initial_length - 1)
            .ok()
            .and_then(|extra| head.x.checked_add(extra))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "snake.initial_length {} does not fit on a {}x{} grid",
                    self.snake.initial_length, self.grid.cols, self.grid.rows
                ))
            })?;
        let tail = Cell::new(tail_x, head.y);
        let bounds = self.bounds();
        if !bounds.contains(head) || !bounds.contains(tail) {
            return Err(ConfigError::Invalid(format!(
                "starting snake {} .. {} does not fit on a {}x{} grid",
                head, tail, self.grid.cols, self.grid.rows
            )));
        }
        if self.render.every == 0 {
            return Err(ConfigError::Invalid("render.every must be at least 1".to_string()));
        }
        Ok(())
    }
}
