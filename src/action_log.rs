use crate::grid::{Cell, Direction};
use crate::navigation::DecisionKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Things that happen during a game session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// New episode started (snake length, food position)
    EpisodeStarted { episode: u32, length: usize, food: Cell },
    /// Autopilot chose a direction
    Decided { direction: Direction, kind: DecisionKind },
    /// External direction request, and whether it was accepted
    Steered { requested: Direction, accepted: bool },
    /// Food eaten at cell, new length
    Ate { at: Cell, length: usize },
    /// New food placed
    FoodPlaced { at: Cell },
    /// Head hit a wall or the body
    Collided { at: Cell, score: usize },
    /// No free cell left for food
    BoardFull { score: usize },
}

/// Logged event with timestamp and tick number
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub tick: u64,
    pub event: SessionEvent,
}

/// Session event logger.
///
/// Autopilot decisions are counted every tick but only stored as events when
/// the deciding branch changes, unless `log_every_decision` is set.
pub struct ActionLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
    decision_counts: [usize; 4],
    last_decision: Option<DecisionKind>,
    every_decision: bool,
}

fn kind_slot(kind: DecisionKind) -> usize {
    match kind {
        DecisionKind::Food => 0,
        DecisionKind::TailChase => 1,
        DecisionKind::OpenNeighbor => 2,
        DecisionKind::Unchanged => 3,
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            events: Vec::new(),
            decision_counts: [0; 4],
            last_decision: None,
            every_decision: false,
        }
    }

    /// Store a `Decided` event for every tick instead of only on branch changes
    pub fn log_every_decision(mut self, enabled: bool) -> Self {
        self.every_decision = enabled;
        self
    }

    /// Log an event with current timestamp
    pub fn log(&mut self, tick: u64, event: SessionEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            tick,
            event,
        });
    }

    /// Count an autopilot decision, logging it if the branch changed
    pub fn record_decision(&mut self, tick: u64, direction: Direction, kind: DecisionKind) {
        self.decision_counts[kind_slot(kind)] += 1;
        if self.every_decision || self.last_decision != Some(kind) {
            self.log(tick, SessionEvent::Decided { direction, kind });
        }
        self.last_decision = Some(kind);
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Decisions of `kind` made so far, logged or not
    pub fn decision_count(&self, kind: DecisionKind) -> usize {
        self.decision_counts[kind_slot(kind)]
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Session Log ({} events) ===", self.events.len());
        for (i, logged) in self.events.iter().enumerate() {
            println!("[{:6}ms] #{:4} tick {:5} {:?}", logged.timestamp_ms, i + 1, logged.tick, logged.event);
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut episodes = 0;
        let mut food_eaten = 0;
        let mut collisions = 0;
        let mut boards_filled = 0;
        let mut best_score = 0;

        for logged in &self.events {
            match &logged.event {
                SessionEvent::EpisodeStarted { .. } => episodes += 1,
                SessionEvent::Ate { .. } => food_eaten += 1,
                SessionEvent::Collided { score, .. } => {
                    collisions += 1;
                    best_score = best_score.max(*score);
                }
                SessionEvent::BoardFull { score } => {
                    boards_filled += 1;
                    best_score = best_score.max(*score);
                }
                _ => {}
            }
        }

        let duration = self.events.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Episodes: {} ({} collisions, {} full boards, best score {})\n\
             Food Eaten: {}\n\
             Decisions: {} food, {} tail chase, {} open neighbour, {} unchanged",
            duration,
            self.events.len(),
            episodes,
            collisions,
            boards_filled,
            best_score,
            food_eaten,
            self.decision_counts[0],
            self.decision_counts[1],
            self.decision_counts[2],
            self.decision_counts[3]
        )
    }
}
