#![allow(dead_code)]

use snake_autopilot::{Bounds, Cell, Direction, SafetyMode, Snake};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::Path;

pub fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
    coords.iter().map(|&c| Cell::from(c)).collect()
}

pub fn obstacle_set(coords: &[(i32, i32)]) -> HashSet<Cell> {
    coords.iter().map(|&c| Cell::from(c)).collect()
}

pub fn snake_from(coords: &[(i32, i32)]) -> Snake {
    Snake::new(cells(coords)).expect("test snake must not be empty")
}

/// All cells of the rectangle `[x0, x1] x [y0, y1]`
pub fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> HashSet<Cell> {
    let mut set = HashSet::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            set.insert(Cell::new(x, y));
        }
    }
    set
}

/// Brute-force BFS distance, used to check search optimality
pub fn bfs_distance(bounds: Bounds, start: Cell, goal: Cell, obstacles: &HashSet<Cell>) -> Option<usize> {
    let mut queue = VecDeque::from([(start, 0usize)]);
    let mut visited = HashSet::from([start]);

    while let Some((current, dist)) = queue.pop_front() {
        if current == goal {
            return Some(dist);
        }
        for next in current.neighbors() {
            if bounds.contains(next) && !obstacles.contains(&next) && visited.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    None
}

/// Panics unless `path` is a valid 4-connected, in-bounds, obstacle-free walk
/// from `start` (exclusive) to `goal` (inclusive)
pub fn assert_valid_path(bounds: Bounds, start: Cell, goal: Cell, obstacles: &HashSet<Cell>, path: &[Cell]) {
    assert!(!path.is_empty(), "path from {} to {} is empty", start, goal);
    assert_eq!(*path.last().unwrap(), goal, "path must end at the goal");

    let mut previous = start;
    for cell in path {
        assert!(bounds.contains(*cell), "{} is out of bounds", cell);
        assert!(!obstacles.contains(cell), "{} is an obstacle", cell);
        assert_eq!(previous.manhattan(cell), 1, "{} -> {} is not a single step", previous, cell);
        previous = *cell;
    }
}

/// Visualize a path on the board
pub fn visualize(bounds: Bounds, obstacles: &HashSet<Cell>, path: &[Cell], start: Cell, goal: Cell) -> String {
    let mut result = String::new();
    for y in 0..bounds.rows {
        for x in 0..bounds.cols {
            let cell = Cell::new(x, y);
            let symbol = if cell == start {
                'S'
            } else if cell == goal {
                'G'
            } else if path.contains(&cell) {
                '*'
            } else if obstacles.contains(&cell) {
                '#'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// A board position with the decision the autopilot should make
#[derive(Debug)]
pub struct Scenario {
    pub name: String,
    pub bounds: Bounds,
    pub snake: Snake,
    pub food: Cell,
    pub current: Direction,
    pub safety: SafetyMode,
    pub expect_any_of: Vec<Direction>,
    pub expect_kind: Option<String>,
}

fn parse_cell(text: &str) -> Result<Cell, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("bad cell '{}'", text))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in '{}'", text))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in '{}'", text))?;
    Ok(Cell::new(x, y))
}

fn parse_direction(text: &str) -> Result<Direction, String> {
    match text {
        "Up" => Ok(Direction::Up),
        "Down" => Ok(Direction::Down),
        "Left" => Ok(Direction::Left),
        "Right" => Ok(Direction::Right),
        other => Err(format!("bad direction '{}'", other)),
    }
}

/// Parse a scenario file of `key: value` lines; `#` starts a comment
pub fn parse_scenario(path: &Path) -> Result<Scenario, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mut bounds = None;
    let mut snake = None;
    let mut food = None;
    let mut current = None;
    let mut safety = SafetyMode::FloodFill;
    let mut expect_any_of = Vec::new();
    let mut expect_kind = None;

    for line in contents.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| format!("{}: bad line '{}'", name, line))?;
        let value = value.trim();

        match key.trim() {
            "size" => {
                let (cols, rows) = value
                    .split_once('x')
                    .ok_or_else(|| format!("bad size '{}'", value))?;
                let cols = cols.trim().parse().map_err(|_| format!("bad cols '{}'", cols))?;
                let rows = rows.trim().parse().map_err(|_| format!("bad rows '{}'", rows))?;
                bounds = Some(Bounds::new(cols, rows));
            }
            "snake" => {
                let body = value
                    .split_whitespace()
                    .map(parse_cell)
                    .collect::<Result<Vec<_>, _>>()?;
                snake = Some(Snake::new(body).map_err(|e| e.to_string())?);
            }
            "food" => food = Some(parse_cell(value)?),
            "current" => current = Some(parse_direction(value)?),
            "safety" => {
                safety = match value {
                    "flood_fill" => SafetyMode::FloodFill,
                    "direct" => SafetyMode::Direct,
                    other => return Err(format!("bad safety '{}'", other)),
                }
            }
            "expect" => {
                expect_any_of = value
                    .split_whitespace()
                    .map(parse_direction)
                    .collect::<Result<Vec<_>, _>>()?;
            }
            "kind" => expect_kind = Some(value.to_string()),
            other => return Err(format!("{}: unknown key '{}'", name, other)),
        }
    }

    Ok(Scenario {
        name: name.clone(),
        bounds: bounds.ok_or_else(|| format!("{}: missing size", name))?,
        snake: snake.ok_or_else(|| format!("{}: missing snake", name))?,
        food: food.ok_or_else(|| format!("{}: missing food", name))?,
        current: current.ok_or_else(|| format!("{}: missing current", name))?,
        safety,
        expect_any_of,
        expect_kind,
    })
}

/// Mirror a scenario left-right; expected directions mirror with it
pub fn flip_scenario_horizontal(scenario: &Scenario) -> Scenario {
    let cols = scenario.bounds.cols;
    let flip_cell = |c: &Cell| Cell::new(cols - 1 - c.x, c.y);
    let flip_dir = |d: &Direction| match d {
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
        other => *other,
    };

    Scenario {
        name: format!("{}_h_flip", scenario.name),
        bounds: scenario.bounds,
        snake: Snake::new(scenario.snake.iter().map(flip_cell)).unwrap(),
        food: flip_cell(&scenario.food),
        current: flip_dir(&scenario.current),
        safety: scenario.safety,
        expect_any_of: scenario.expect_any_of.iter().map(flip_dir).collect(),
        expect_kind: scenario.expect_kind.clone(),
    }
}
