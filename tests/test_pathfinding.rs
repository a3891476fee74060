mod common;

use common::{assert_valid_path, bfs_distance, obstacle_set, rect, visualize};
use snake_autopilot::pathfinding::format_path;
use snake_autopilot::{heuristic, Bounds, Cell, GridError, GridPathfinder};
use std::collections::HashSet;

#[test]
fn test_open_board_manhattan_path() {
    let bounds = Bounds::new(8, 8);
    let pathfinder = GridPathfinder::new(bounds);
    let start = Cell::new(5, 5);
    let goal = Cell::new(0, 0);
    let obstacles = obstacle_set(&[(5, 5)]);

    let path = pathfinder.search(start, goal, &obstacles).unwrap().expect("path should exist");
    println!("{}\n{}", format_path(&path), visualize(bounds, &obstacles, &path, start, goal));

    assert_eq!(path.len(), 10);
    assert_valid_path(bounds, start, goal, &obstacles, &path);
}

#[test]
fn test_path_around_wall() {
    let bounds = Bounds::new(10, 10);
    let pathfinder = GridPathfinder::new(bounds);

    // Vertical wall with a gap at the bottom
    let obstacles: HashSet<Cell> = (0..9).map(|y| Cell::new(5, y)).collect();
    let start = Cell::new(2, 2);
    let goal = Cell::new(8, 2);

    let path = pathfinder.search(start, goal, &obstacles).unwrap().expect("path around wall");
    println!("{}", visualize(bounds, &obstacles, &path, start, goal));

    assert_valid_path(bounds, start, goal, &obstacles, &path);
    assert_eq!(Some(path.len()), bfs_distance(bounds, start, goal, &obstacles));
    assert!(path.contains(&Cell::new(5, 9)), "path must use the gap");
}

#[test]
fn test_optimal_against_bfs_with_rectangle() {
    let bounds = Bounds::new(7, 6);
    let pathfinder = GridPathfinder::new(bounds);
    let obstacles = rect(2, 1, 4, 3);

    let free: Vec<Cell> = bounds.cells().filter(|c| !obstacles.contains(c)).collect();
    for &start in &free {
        for &goal in &free {
            if start == goal {
                continue;
            }
            let path = pathfinder
                .search(start, goal, &obstacles)
                .unwrap()
                .unwrap_or_else(|| panic!("no path {} -> {}", start, goal));
            assert_valid_path(bounds, start, goal, &obstacles, &path);
            assert_eq!(
                Some(path.len()),
                bfs_distance(bounds, start, goal, &obstacles),
                "suboptimal path {} -> {}: {}",
                start,
                goal,
                format_path(&path)
            );
        }
    }
}

#[test]
fn test_optimal_with_snake_shaped_obstacle() {
    let bounds = Bounds::new(6, 6);
    let pathfinder = GridPathfinder::new(bounds);
    // An S-shaped body forcing a detour
    let obstacles = obstacle_set(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (4, 2), (4, 3), (3, 3), (2, 3), (1, 3)]);
    let start = Cell::new(0, 0);
    let goal = Cell::new(0, 2);

    let path = pathfinder.search(start, goal, &obstacles).unwrap().expect("detour exists");
    println!("{}", visualize(bounds, &obstacles, &path, start, goal));

    assert_valid_path(bounds, start, goal, &obstacles, &path);
    assert_eq!(Some(path.len()), bfs_distance(bounds, start, goal, &obstacles));
    assert_eq!(path.len(), 16);
}

#[test]
fn test_enclosed_goal_has_no_path() {
    let bounds = Bounds::new(8, 8);
    let pathfinder = GridPathfinder::new(bounds);
    let goal = Cell::new(4, 4);
    let obstacles: HashSet<Cell> = goal.neighbors().into_iter().collect();

    assert_eq!(pathfinder.search(Cell::new(0, 0), goal, &obstacles), Ok(None));
}

#[test]
fn test_goal_in_corner_enclosed_by_walls_and_body() {
    let bounds = Bounds::new(5, 5);
    let pathfinder = GridPathfinder::new(bounds);
    let obstacles = obstacle_set(&[(1, 0), (1, 1), (0, 1)]);

    assert_eq!(pathfinder.search(Cell::new(4, 4), Cell::new(0, 0), &obstacles), Ok(None));
}

#[test]
fn test_goal_on_obstacle_has_no_path() {
    let pathfinder = GridPathfinder::new(Bounds::new(5, 5));
    let obstacles = obstacle_set(&[(3, 3)]);

    assert_eq!(pathfinder.search(Cell::new(0, 0), Cell::new(3, 3), &obstacles), Ok(None));
}

#[test]
fn test_start_is_not_checked_against_obstacles() {
    let bounds = Bounds::new(5, 5);
    let pathfinder = GridPathfinder::new(bounds);
    let start = Cell::new(2, 2);
    let obstacles = obstacle_set(&[(2, 2), (2, 3)]);

    let path = pathfinder.search(start, Cell::new(2, 0), &obstacles).unwrap().unwrap();
    assert_eq!(path, vec![Cell::new(2, 1), Cell::new(2, 0)]);
}

#[test]
fn test_start_equals_goal() {
    let pathfinder = GridPathfinder::new(Bounds::new(5, 5));
    let cell = Cell::new(1, 1);

    assert_eq!(pathfinder.search(cell, cell, &HashSet::new()), Ok(Some(Vec::new())));
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let bounds = Bounds::new(5, 5);
    let pathfinder = GridPathfinder::new(bounds);
    let empty = HashSet::new();

    assert_eq!(
        pathfinder.search(Cell::new(-1, 0), Cell::new(2, 2), &empty),
        Err(GridError::OutOfBounds { cell: Cell::new(-1, 0), bounds })
    );
    assert_eq!(
        pathfinder.search(Cell::new(0, 0), Cell::new(5, 2), &empty),
        Err(GridError::OutOfBounds { cell: Cell::new(5, 2), bounds })
    );
}

#[test]
fn test_heuristic_is_manhattan() {
    assert_eq!(heuristic(Cell::new(5, 5), Cell::new(0, 0)), 10);
    assert_eq!(heuristic(Cell::new(0, 3), Cell::new(4, 0)), 7);
    assert_eq!(heuristic(Cell::new(2, 2), Cell::new(2, 2)), 0);
}

#[test]
fn test_reachable_area_empty_board() {
    let pathfinder = GridPathfinder::new(Bounds::new(24, 36));
    assert_eq!(pathfinder.reachable_area(Cell::new(0, 0), &HashSet::new()), 24 * 36);
}

#[test]
fn test_reachable_area_split_board() {
    let pathfinder = GridPathfinder::new(Bounds::new(6, 4));
    // Full-height wall at x = 2
    let wall: HashSet<Cell> = (0..4).map(|y| Cell::new(2, y)).collect();

    assert_eq!(pathfinder.reachable_area(Cell::new(0, 0), &wall), 8);
    assert_eq!(pathfinder.reachable_area(Cell::new(5, 3), &wall), 12);
}

#[test]
fn test_reachable_area_blocked_start() {
    let pathfinder = GridPathfinder::new(Bounds::new(4, 4));
    let obstacles = obstacle_set(&[(1, 1)]);

    assert_eq!(pathfinder.reachable_area(Cell::new(1, 1), &obstacles), 0);
    assert_eq!(pathfinder.reachable_area(Cell::new(4, 0), &obstacles), 0);
}

#[test]
fn test_reachable_area_isolated_cell() {
    let pathfinder = GridPathfinder::new(Bounds::new(3, 3));
    let obstacles = obstacle_set(&[(1, 0), (0, 1)]);

    assert_eq!(pathfinder.reachable_area(Cell::new(0, 0), &obstacles), 1);
}
