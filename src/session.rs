use crate::action_log::{ActionLog, SessionEvent};
use crate::config::Config;
use crate::error::NavigationError;
use crate::grid::{Bounds, Cell, Direction};
use crate::navigation::{apply_manual_direction, NavigationPolicy};
use crate::render::Frame;
use crate::snake::Snake;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Heading of a freshly started snake; its body trails the other way
const START_FACING: Direction = Direction::Left;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { length: usize },
    /// Episode ended; the session has already restarted
    Collided { at: Cell, score: usize },
    /// Snake fills the board; the session has already restarted
    BoardFull { score: usize },
}

impl TickOutcome {
    pub fn ends_episode(&self) -> bool {
        matches!(self, TickOutcome::Collided { .. } | TickOutcome::BoardFull { .. })
    }
}

/// One running game: owns the snake, the food and the autopilot.
///
/// The navigation core only ever sees read-only snapshots of the snake.
pub struct GameSession {
    bounds: Bounds,
    start_head: Cell,
    initial_length: usize,
    autopilot: bool,
    policy: NavigationPolicy,
    snake: Snake,
    direction: Direction,
    food: Option<Cell>,
    rng: StdRng,
    tick: u64,
    episode_ticks: u64,
    episode: u32,
    log: ActionLog,
}

impl GameSession {
    /// Create a session and start the first episode
    pub fn new(config: &Config) -> Self {
        let rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let bounds = config.bounds();
        let start_head = config.start_head();
        let initial_length = config.snake.initial_length.max(1);

        let mut session = GameSession {
            bounds,
            start_head,
            initial_length,
            autopilot: config.snake.autopilot,
            policy: NavigationPolicy::new(bounds, config.navigation.safety_mode),
            snake: Self::initial_snake(start_head, initial_length),
            direction: START_FACING,
            food: None,
            rng,
            tick: 0,
            episode_ticks: 0,
            episode: 0,
            log: ActionLog::new().log_every_decision(config.logging.log_decisions),
        };
        session.start_game();
        session
    }

    /// Initial snake: head at `start_head`, body extending to the right
    fn initial_snake(start_head: Cell, length: usize) -> Snake {
        Snake::straight(start_head, START_FACING, length)
    }

    /// Reset snake, direction and food for a new episode
    pub fn start_game(&mut self) {
        self.episode += 1;
        self.episode_ticks = 0;
        self.snake = Self::initial_snake(self.start_head, self.initial_length);
        self.direction = START_FACING;
        self.food = self.random_food_position();

        if let Some(food) = self.food {
            self.log.log(
                self.tick,
                SessionEvent::EpisodeStarted {
                    episode: self.episode,
                    length: self.snake.len(),
                    food,
                },
            );
        }
        debug!("Episode {} started, food at {:?}", self.episode, self.food);
    }

    /// Uniformly random cell not covered by the snake, or None if the board is full
    fn random_food_position(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = self
            .bounds
            .cells()
            .filter(|cell| !self.snake.contains(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> Result<TickOutcome, NavigationError> {
        self.tick += 1;
        self.episode_ticks += 1;

        let Some(food) = self.food else {
            return Ok(self.finish_board_full());
        };

        if self.autopilot {
            let decision = self.policy.decide(&self.snake, food, self.direction)?;
            self.direction = decision.direction;
            self.log.record_decision(self.tick, decision.direction, decision.kind);
        }

        let new_head = self.snake.head().step(self.direction);
        self.snake.push_head(new_head);

        let ate = new_head == food;
        if ate {
            self.log.log(
                self.tick,
                SessionEvent::Ate {
                    at: new_head,
                    length: self.snake.len(),
                },
            );
            self.food = self.random_food_position();
            if let Some(at) = self.food {
                self.log.log(self.tick, SessionEvent::FoodPlaced { at });
            }
        } else {
            self.snake.pop_tail();
        }

        if self.check_collision() {
            let score = self.score();
            info!(
                "Episode {} ended: collision at {} after {} ticks, score {}",
                self.episode, new_head, self.episode_ticks, score
            );
            self.log.log(self.tick, SessionEvent::Collided { at: new_head, score });
            self.start_game();
            return Ok(TickOutcome::Collided { at: new_head, score });
        }

        if self.food.is_none() {
            return Ok(self.finish_board_full());
        }

        if ate {
            Ok(TickOutcome::Ate {
                length: self.snake.len(),
            })
        } else {
            Ok(TickOutcome::Moved)
        }
    }

    fn finish_board_full(&mut self) -> TickOutcome {
        let score = self.score();
        info!(
            "Episode {} ended: board full after {} ticks, score {}",
            self.episode, self.episode_ticks, score
        );
        self.log.log(self.tick, SessionEvent::BoardFull { score });
        self.start_game();
        TickOutcome::BoardFull { score }
    }

    /// Head out of bounds or on the body
    pub fn check_collision(&self) -> bool {
        !self.bounds.contains(self.snake.head()) || self.snake.head_overlaps_body()
    }

    /// Manual direction change; a straight reversal is ignored
    pub fn steer(&mut self, requested: Direction) -> Direction {
        let applied = apply_manual_direction(self.direction, requested);
        self.log.log(
            self.tick,
            SessionEvent::Steered {
                requested,
                accepted: applied == requested,
            },
        );
        self.direction = applied;
        applied
    }

    /// Hand control to the autopilot or take it back for manual steering
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Food eaten this episode
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(self.initial_length)
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        Frame {
            bounds: self.bounds,
            snake: self.snake.cells(),
            food: self.food,
            score: self.score(),
            tick: self.tick,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Place food explicitly; ignored if the cell is out of bounds or on the snake
    pub fn set_food(&mut self, cell: Cell) -> bool {
        if !self.bounds.contains(cell) || self.snake.contains(&cell) {
            return false;
        }
        self.food = Some(cell);
        true
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn episode_ticks(&self) -> u64 {
        self.episode_ticks
    }

    pub fn total_ticks(&self) -> u64 {
        self.tick
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }
}
