use crate::error::GridError;
use crate::grid::{Bounds, Cell};
use log::trace;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

/// Cells from (exclusive) start to (inclusive) goal
pub type Path = Vec<Cell>;

/// Manhattan distance, admissible and consistent on a 4-connected unit-cost grid
pub fn heuristic(a: Cell, b: Cell) -> u32 {
    a.manhattan(&b)
}

/// An entry in the A* open set
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    cell: Cell,
    f_score: u32,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap (BinaryHeap is max-heap by default)
        other.f_score.cmp(&self.f_score)
            // Tie-breaker: lowest x, then lowest y
            .then_with(|| other.cell.x.cmp(&self.cell.x))
            .then_with(|| other.cell.y.cmp(&self.cell.y))
    }
}

/// A* search and flood fill over a bounded 4-connected grid.
///
/// Holds nothing but the board dimensions; every call works on the obstacle
/// snapshot it is handed.
#[derive(Debug, Clone, Copy)]
pub struct GridPathfinder {
    bounds: Bounds,
}

impl GridPathfinder {
    pub fn new(bounds: Bounds) -> Self {
        GridPathfinder { bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Check if a cell can be entered
    pub fn is_passable(&self, cell: Cell, obstacles: &HashSet<Cell>) -> bool {
        self.bounds.contains(cell) && !obstacles.contains(&cell)
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), GridError> {
        if self.bounds.contains(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                cell,
                bounds: self.bounds,
            })
        }
    }

    /// Shortest obstacle-avoiding path from `start` to `goal`.
    ///
    /// `start` itself is never tested against `obstacles`. Returns `Ok(None)`
    /// when the goal cannot be reached and `Ok(Some(vec![]))` when
    /// `start == goal`.
    pub fn search(
        &self,
        start: Cell,
        goal: Cell,
        obstacles: &HashSet<Cell>,
    ) -> Result<Option<Path>, GridError> {
        self.check_bounds(start)?;
        self.check_bounds(goal)?;

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_score: HashMap<Cell, u32> = HashMap::new();

        g_score.insert(start, 0);
        open_set.push(OpenNode {
            cell: start,
            f_score: heuristic(start, goal),
        });

        let mut expanded = 0usize;

        while let Some(OpenNode { cell: current, f_score }) = open_set.pop() {
            let current_g = g_score[&current];

            // Stale entry, a cheaper route was pushed after this one
            if f_score > current_g + heuristic(current, goal) {
                continue;
            }

            if current == goal {
                trace!(
                    "[search] {} -> {}: cost {} after {} expansions",
                    start, goal, current_g, expanded
                );
                return Ok(Some(reconstruct_path(&came_from, current)));
            }

            expanded += 1;

            for neighbor in current.neighbors() {
                if !self.is_passable(neighbor, obstacles) {
                    continue;
                }

                let tentative_g = current_g + 1;
                let improved = g_score
                    .get(&neighbor)
                    .map_or(true, |&known| tentative_g < known);

                if improved {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(OpenNode {
                        cell: neighbor,
                        f_score: tentative_g + heuristic(neighbor, goal),
                    });
                }
            }
        }

        trace!("[search] {} -> {}: no path after {} expansions", start, goal, expanded);
        Ok(None)
    }

    /// Number of cells reachable from `start`, `start` included.
    ///
    /// Returns 0 when `start` is out of bounds or an obstacle.
    pub fn reachable_area(&self, start: Cell, obstacles: &HashSet<Cell>) -> usize {
        if !self.is_passable(start, obstacles) {
            return 0;
        }

        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::from([start]);

        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors() {
                if self.is_passable(neighbor, obstacles) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len()
    }
}

/// Walk predecessor links back from `goal`, excluding the start cell
fn reconstruct_path(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Path {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(current);
        current = previous;
    }
    path.reverse();
    path
}

/// Format path for display
pub fn format_path(path: &[Cell]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
