/*
loops.rs

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

//! Turn a perfect maze into a maze with several solutions.
//!
//! Walls are removed until the path counter reports at least two paths between the entry and
//! the exit. Three passes are tried in order, each one more aggressive than the previous:
//!
//! 1. Dead-end pass: walls at the end of dead ends, removed with a 50% chance.
//! 2. Forced dead-end pass: the same walls, removed unconditionally.
//! 3. Direct cycle pass: any wall between two open cells.
//!
//! A wall is never removed when that would open a 2x2 area.

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::grid::{CellState, Coord, Direction, Grid};
use super::solver;

/// Injection passes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pass {
    DeadEnd,
    ForcedDeadEnd,
    DirectCycle,
}

/// Result of the loop injection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoopReport {
    /// Number of removed walls.
    pub removed: usize,

    /// Path count after the injection (saturated at [`solver::MAX_PATH_COUNT`]).
    pub path_count: usize,

    /// Pass that created the second path, if any.
    pub pass: Option<Pass>,
}

/// Remove walls until there are at least two paths from the entry to the exit.
///
/// When no pass succeeds the maze stays perfect. This is not an error: very small grids do not
/// always have a wall that can be removed.
pub fn inject<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> LoopReport {
    let mut report = LoopReport {
        removed: 0,
        path_count: solver::count_paths(grid),
        pass: None,
    };
    if report.path_count >= solver::MAX_PATH_COUNT {
        return report;
    }

    let mut candidates: Vec<Coord> = dead_end_walls(grid);
    candidates.shuffle(rng);
    debug!("Loop injection: {} dead-end walls", candidates.len());

    if remove_walls(grid, &candidates, Some(&mut *rng), &mut report) {
        report.pass = Some(Pass::DeadEnd);
        return report;
    }

    if remove_walls(grid, &candidates, None::<&mut R>, &mut report) {
        report.pass = Some(Pass::ForcedDeadEnd);
        return report;
    }

    let mut cycle_walls: Vec<Coord> = cycle_walls(grid);
    cycle_walls.shuffle(rng);
    debug!("Loop injection: {} cycle walls", cycle_walls.len());
    if remove_walls(grid, &cycle_walls, None::<&mut R>, &mut report) {
        report.pass = Some(Pass::DirectCycle);
        return report;
    }

    warn!(
        "Could not create a second path ({} walls removed): the maze stays perfect",
        report.removed
    );
    report
}

/// Remove the given walls, one at a time, until the path counter reports two paths.
///
/// With a random generator, a coin is flipped for each wall and the wall is skipped half the time.
fn remove_walls<R: Rng + ?Sized>(
    grid: &mut Grid,
    walls: &[Coord],
    mut coin: Option<&mut R>,
    report: &mut LoopReport,
) -> bool {
    for wall in walls {
        if let Some(rng) = coin.as_deref_mut()
            && !rng.random_bool(0.5)
        {
            continue;
        }
        if grid.state(*wall) != CellState::Wall || creates_open_area(grid, *wall) {
            continue;
        }
        if !grid.break_wall(*wall) {
            continue;
        }
        report.removed += 1;
        report.path_count = solver::count_paths(grid);
        debug!(
            "Removed wall {wall:?}: path count = {}",
            report.path_count
        );
        if report.path_count >= solver::MAX_PATH_COUNT {
            return true;
        }
    }
    false
}

/// Return the walls that close dead ends.
///
/// A dead end is an empty passage cell with at least three blocked sides. Each of its walls that
/// has an open cell behind it is a candidate.
fn dead_end_walls(grid: &Grid) -> Vec<Coord> {
    let mut seen: HashSet<Coord> = HashSet::new();
    let mut walls: Vec<Coord> = Vec::new();

    for cell in grid.passage_cells() {
        if grid.state(cell) != CellState::Empty {
            continue;
        }
        let blocked: usize = Direction::ALL
            .iter()
            .filter(|d| grid.step(cell, **d, 1).is_none_or(|c| grid.is_blocking(c)))
            .count();
        if blocked < 3 {
            continue;
        }
        for d in Direction::ALL {
            let (Some(wall), Some(beyond)) = (grid.step(cell, d, 1), grid.step(cell, d, 2)) else {
                continue;
            };
            if grid.state(wall) == CellState::Wall
                && !grid.is_reserved(wall)
                && grid.is_open(beyond)
                && seen.insert(wall)
            {
                walls.push(wall);
            }
        }
    }
    walls
}

/// Return the inner walls that sit between two open cells, horizontally or vertically.
fn cycle_walls(grid: &Grid) -> Vec<Coord> {
    let mut walls: Vec<Coord> = Vec::new();

    for y in 1..grid.height().saturating_sub(1) {
        for x in 1..grid.width().saturating_sub(1) {
            let wall: Coord = (x, y);
            // Only the walls between two passage cells, not the corners
            if x % 2 == y % 2 {
                continue;
            }
            if grid.state(wall) != CellState::Wall || grid.is_reserved(wall) {
                continue;
            }
            let horizontal = grid.is_open((x - 1, y)) && grid.is_open((x + 1, y));
            let vertical = grid.is_open((x, y - 1)) && grid.is_open((x, y + 1));
            if horizontal || vertical {
                walls.push(wall);
            }
        }
    }
    walls
}

/// Whether removing the wall would create a 2x2 open area.
fn creates_open_area(grid: &Grid, wall: Coord) -> bool {
    let (x, y) = wall;
    let corners: [(isize, isize); 4] = [(-1, -1), (0, -1), (-1, 0), (0, 0)];

    corners.iter().any(|(dx, dy)| {
        let (Some(left), Some(top)) = (x.checked_add_signed(*dx), y.checked_add_signed(*dy))
        else {
            return false;
        };
        let square: [Coord; 4] = [
            (left, top),
            (left + 1, top),
            (left, top + 1),
            (left + 1, top + 1),
        ];
        square
            .iter()
            .all(|c| grid.in_bounds(*c) && (*c == wall || grid.is_open(*c)))
    })
}
