pub mod action_log;
pub mod config;
pub mod error;
pub mod grid;
pub mod logger;
pub mod navigation;
pub mod pathfinding;
pub mod render;
pub mod session;
pub mod snake;

pub use config::Config;
pub use error::{ConfigError, GridError, NavigationError};
pub use grid::{Bounds, Cell, Direction};
pub use navigation::{apply_manual_direction, Decision, DecisionKind, NavigationPolicy, SafetyMode};
pub use pathfinding::{heuristic, GridPathfinder, Path};
pub use session::{GameSession, TickOutcome};
pub use snake::{ObstacleMode, Snake};
