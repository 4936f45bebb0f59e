/*
solver.rs

Copyright 2025 The Amazeing contributors

This file is part of Amazeing.

Amazeing is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Amazeing is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Amazeing. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Solve the maze.
//!
//! - [`shortest_path`] runs a breadth-first search from the entry to the exit.
//! - [`count_paths`] tells whether the shortest path is the only path from the entry to the
//!   exit, with a depth-first search for the bridges of the open cells.

use log::debug;
use std::collections::VecDeque;

use super::grid::{CellState, Coord, Direction, Grid};
use super::path::Path;

/// The path counter never goes above this value.
pub const MAX_PATH_COUNT: usize = 2;

/// Return the shortest path from the entry to the exit, both included.
///
/// The path is empty when the exit cannot be reached.
pub fn shortest_path(grid: &Grid) -> Path {
    let start: Coord = grid.entry();
    let end: Coord = grid.exit();
    let width: usize = grid.width();
    let index = |c: Coord| c.1 * width + c.0;

    let mut visited: Vec<bool> = vec![false; width * grid.height()];
    let mut came_from: Vec<Option<Coord>> = vec![None; width * grid.height()];
    let mut queue: VecDeque<Coord> = VecDeque::new();

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == end {
            let mut reversed: Vec<Coord> = vec![cell];
            let mut current: Coord = cell;
            while let Some(previous) = came_from[index(current)] {
                reversed.push(previous);
                current = previous;
            }
            reversed.reverse();
            debug!("Shortest path: {} grid steps", reversed.len() - 1);
            return Path::from_vec(reversed);
        }

        for d in Direction::ALL {
            let Some(neighbor) = grid.step(cell, d, 1) else {
                continue;
            };
            if visited[index(neighbor)] {
                continue;
            }
            if matches!(grid.state(neighbor), CellState::Empty | CellState::Exit) {
                visited[index(neighbor)] = true;
                came_from[index(neighbor)] = Some(cell);
                queue.push_back(neighbor);
            }
        }
    }
    debug!("Shortest path: exit {end:?} unreachable from {start:?}");
    Path::default()
}

/// Count the paths from the entry to the exit, up to [`MAX_PATH_COUNT`].
///
/// A second path exists only when an edge of the shortest path belongs to a cycle. A single
/// depth-first search flags the edges that do not (the bridges), so each call is linear in the
/// grid size.
pub fn count_paths(grid: &Grid) -> usize {
    let route: Path = shortest_path(grid);
    if route.is_empty() {
        debug!("Path count: 0");
        return 0;
    }

    let bridges: Bridges = Bridges::new(grid);
    let count: usize = if route
        .coords()
        .windows(2)
        .all(|w| bridges.is_bridge(w[0], w[1]))
    {
        1
    } else {
        MAX_PATH_COUNT
    };
    debug!("Path count: {count}");
    count
}

/// Tree edges of a depth-first search from the entry, over the open cells, with their bridge
/// status.
struct Bridges {
    width: usize,

    /// Parent of each cell in the search tree.
    parent: Vec<Option<Coord>>,

    /// Whether the edge between the cell and its parent is a bridge.
    bridge: Vec<bool>,
}

impl Bridges {
    fn new(grid: &Grid) -> Self {
        let width: usize = grid.width();
        let size: usize = width * grid.height();
        let index = |c: Coord| c.1 * width + c.0;
        let start: Coord = grid.entry();

        // Discovery order, starting at 1 so that 0 means not visited yet
        let mut order: Vec<usize> = vec![0; size];
        let mut low: Vec<usize> = vec![0; size];
        let mut parent: Vec<Option<Coord>> = vec![None; size];
        let mut bridge: Vec<bool> = vec![false; size];

        let mut time: usize = 1;
        order[index(start)] = time;
        low[index(start)] = time;
        // For each cell on the search stack, the index of the next direction to try
        let mut stack: Vec<(Coord, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let cell: Coord = frame.0;
            if frame.1 >= Direction::ALL.len() {
                stack.pop();
                if let Some(p) = parent[index(cell)] {
                    low[index(p)] = low[index(p)].min(low[index(cell)]);
                    bridge[index(cell)] = low[index(cell)] > order[index(p)];
                }
                continue;
            }
            let direction: Direction = Direction::ALL[frame.1];
            frame.1 += 1;

            let Some(neighbor) = grid.step(cell, direction, 1) else {
                continue;
            };
            if !grid.is_open(neighbor) || parent[index(cell)] == Some(neighbor) {
                continue;
            }
            if order[index(neighbor)] == 0 {
                time += 1;
                order[index(neighbor)] = time;
                low[index(neighbor)] = time;
                parent[index(neighbor)] = Some(cell);
                stack.push((neighbor, 0));
            } else {
                low[index(cell)] = low[index(cell)].min(order[index(neighbor)]);
            }
        }
        Self {
            width,
            parent,
            bridge,
        }
    }

    /// Whether the edge between the two adjacent cells is a bridge.
    ///
    /// Edges outside the search tree close a cycle and are never bridges.
    fn is_bridge(&self, a: Coord, b: Coord) -> bool {
        let index = |c: Coord| c.1 * self.width + c.0;
        if self.parent[index(b)] == Some(a) {
            self.bridge[index(b)]
        } else if self.parent[index(a)] == Some(b) {
            self.bridge[index(a)]
        } else {
            false
        }
    }
}
