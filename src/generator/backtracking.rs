/*
backtracking.rs

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

//! Carve a maze with the recursive backtracking algorithm.
//!
//! The walk goes deep first: from the current cell, a random carvable neighbor two steps away is
//! linked and becomes the current cell. When no such neighbor remains, the walk backtracks.
//! Instead of recursing, the visited cells are kept in an explicit stack, with the directions
//! that are still to be tried for each of them.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Coord, Direction, Grid};

/// A cell on the walk, with its shuffled list of candidate directions.
struct Frame {
    cell: Coord,
    directions: Vec<Direction>,
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(grid: &Grid, cell: Coord, rng: &mut R) -> Self {
        let mut directions: Vec<Direction> = Direction::ALL
            .iter()
            .filter(|d| grid.carving_move(cell, **d).is_some())
            .copied()
            .collect();
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Carve the grid from the given starting cell. Return the number of carved passage cells.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, start: Coord, rng: &mut R) -> usize {
    let mut carved: usize = 0;
    let mut stack: Vec<Frame> = vec![Frame::new(grid, start, rng)];
    let mut max_depth: usize = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell: Coord = frame.cell;

        // Candidates are computed when the cell is entered. Another branch might have reached
        // the target since.
        if let Some((wall, target)) = grid.carving_move(cell, direction) {
            grid.break_wall(wall);
            grid.break_wall(target);
            carved += 1;
            let next_frame = Frame::new(grid, target, rng);
            stack.push(next_frame);
            max_depth = max_depth.max(stack.len());
        }
    }
    debug!("Backtracking: carved cells = {carved}  max depth = {max_depth}");
    carved
}
