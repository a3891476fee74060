use crate::error::NavigationError;
use crate::grid::{Bounds, Cell, Direction};
use crate::pathfinding::{format_path, GridPathfinder};
use crate::snake::{ObstacleMode, Snake};
use log::debug;
use serde::{Deserialize, Serialize};

/// How much checking happens before committing to the path to food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMode {
    /// Take the food path only if the first step leaves more open space than
    /// the snake is long
    #[default]
    FloodFill,
    /// Take any path to food
    Direct,
}

/// Which branch of the policy produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    Food,
    TailChase,
    OpenNeighbor,
    /// Every neighbour is blocked; the snake collides next tick
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub direction: Direction,
    pub kind: DecisionKind,
}

/// Picks the snake's next direction each tick. Holds no memory between ticks.
#[derive(Debug, Clone, Copy)]
pub struct NavigationPolicy {
    pathfinder: GridPathfinder,
    safety: SafetyMode,
}

impl NavigationPolicy {
    pub fn new(bounds: Bounds, safety: SafetyMode) -> Self {
        NavigationPolicy {
            pathfinder: GridPathfinder::new(bounds),
            safety,
        }
    }

    pub fn pathfinder(&self) -> &GridPathfinder {
        &self.pathfinder
    }

    /// Next direction for the snake
    pub fn decide_direction(
        &self,
        snake: &Snake,
        food: Cell,
        current: Direction,
    ) -> Result<Direction, NavigationError> {
        Ok(self.decide(snake, food, current)?.direction)
    }

    /// Next direction plus the branch that chose it
    pub fn decide(
        &self,
        snake: &Snake,
        food: Cell,
        current: Direction,
    ) -> Result<Decision, NavigationError> {
        let head = snake.head();
        let passable_tail = snake.obstacles(ObstacleMode::ExcludeTail);

        if let Some(path) = self.pathfinder.search(head, food, &passable_tail)? {
            if let Some(&next) = path.first() {
                if self.is_safe_step(snake, next) {
                    debug!("[decide] food path {}", format_path(&path));
                    return Ok(self.step_towards(head, next, current, DecisionKind::Food));
                }
                debug!("[decide] food path via {} fails area check", next);
            }
        } else {
            debug!("[decide] no path to food at {}", food);
        }

        self.chase_tail(snake, current)
    }

    /// Flood-fill check: the step must leave more open cells than the snake is long
    fn is_safe_step(&self, snake: &Snake, next: Cell) -> bool {
        match self.safety {
            SafetyMode::Direct => true,
            SafetyMode::FloodFill => {
                let body = snake.obstacles(ObstacleMode::WholeBody);
                self.pathfinder.reachable_area(next, &body) > snake.len()
            }
        }
    }

    /// Follow the tail, which frees its cell next tick. Falls back to the first
    /// open neighbour in `Direction::ALL` order.
    fn chase_tail(&self, snake: &Snake, current: Direction) -> Result<Decision, NavigationError> {
        let head = snake.head();
        let tail = snake.tail();
        let passable_tail = snake.obstacles(ObstacleMode::ExcludeTail);

        if let Some(path) = self.pathfinder.search(head, tail, &passable_tail)? {
            if let Some(&next) = path.first() {
                debug!("[decide] tail chase {}", format_path(&path));
                return Ok(self.step_towards(head, next, current, DecisionKind::TailChase));
            }
        }

        let body = snake.obstacles(ObstacleMode::WholeBody);
        for direction in Direction::ALL {
            if self.pathfinder.is_passable(head.step(direction), &body) {
                debug!("[decide] no tail path, open neighbour {:?}", direction);
                return Ok(Decision {
                    direction,
                    kind: DecisionKind::OpenNeighbor,
                });
            }
        }

        debug!("[decide] boxed in at {}, keeping {:?}", head, current);
        Ok(Decision {
            direction: current,
            kind: DecisionKind::Unchanged,
        })
    }

    fn step_towards(&self, head: Cell, next: Cell, current: Direction, kind: DecisionKind) -> Decision {
        match head.direction_to(&next) {
            Some(direction) => Decision { direction, kind },
            None => Decision {
                direction: current,
                kind: DecisionKind::Unchanged,
            },
        }
    }
}

/// Anti-reversal rule for externally sourced directions: a request to turn
/// straight back is ignored.
pub fn apply_manual_direction(current: Direction, proposed: Direction) -> Direction {
    if proposed.is_opposite(&current) {
        current
    } else {
        proposed
    }
}
