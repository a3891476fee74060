use crate::error::NavigationError;
use crate::grid::{Cell, Direction};
use std::collections::{HashSet, VecDeque};

/// Which body cells count as obstacles for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleMode {
    WholeBody,
    /// The tail vacates before the head could arrive there
    ExcludeTail,
}

/// Snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake from its cells, head first
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Result<Self, NavigationError> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return Err(NavigationError::EmptySnake);
        }
        Ok(Snake { body })
    }

    /// Straight snake of `length` cells with its head at `head`, body trailing
    /// away from `facing`
    pub fn straight(head: Cell, facing: Direction, length: usize) -> Self {
        let back = facing.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_back(cell);
            cell = cell.step(back);
        }
        Snake { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body.contains(cell)
    }

    /// True if the head overlaps any other segment
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|c| *c == head)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drop the tail segment; a single-segment snake is left untouched
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Owned snapshot of the cells that block a search
    pub fn obstacles(&self, mode: ObstacleMode) -> HashSet<Cell> {
        let take = match mode {
            ObstacleMode::WholeBody => self.body.len(),
            ObstacleMode::ExcludeTail => self.body.len() - 1,
        };
        self.body.iter().take(take).copied().collect()
    }

    pub fn cells(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }
}
