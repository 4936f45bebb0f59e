/*
hunt_and_kill.rs

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

//! Carve a maze with the hunt-and-kill algorithm.
//!
//! - Kill phase: random walk from the current cell, linking carvable neighbors, until a dead end.
//! - Hunt phase: scan the passage cells in raster order for the first uncarved cell next to a
//!   carved one, link them, and resume the kill phase from there.
//!
//! The algorithm stops when a full scan finds nothing.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::{Coord, Direction, Grid};

/// Carve the grid from the given starting cell. Return the number of carved passage cells.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, start: Coord, rng: &mut R) -> usize {
    let mut carved: usize = 0;
    let mut hunts: usize = 0;
    // Rows before this one do not have uncarved cells anymore
    let mut first_row: usize = 1;
    let mut current: Option<Coord> = Some(start);

    while let Some(cell) = current {
        carved += kill(grid, cell, rng);
        current = hunt(grid, &mut first_row, rng);
        if current.is_some() {
            carved += 1;
            hunts += 1;
        }
    }
    debug!("Hunt-and-kill: carved cells = {carved}  hunts = {hunts}");
    carved
}

/// Random walk from the given cell until it reaches a dead end.
fn kill<R: Rng + ?Sized>(grid: &mut Grid, start: Coord, rng: &mut R) -> usize {
    let mut carved: usize = 0;
    let mut cell: Coord = start;

    loop {
        let moves: Vec<(Coord, Coord)> = Direction::ALL
            .iter()
            .filter_map(|d| grid.carving_move(cell, *d))
            .collect();
        let Some(&(wall, target)) = moves.choose(rng) else {
            return carved;
        };
        grid.break_wall(wall);
        grid.break_wall(target);
        carved += 1;
        cell = target;
    }
}

/// Find the first uncarved cell with a carved neighbor, and link them.
fn hunt<R: Rng + ?Sized>(grid: &mut Grid, first_row: &mut usize, rng: &mut R) -> Option<Coord> {
    for y in (*first_row..grid.height()).step_by(2) {
        let mut row_done: bool = true;
        for x in (1..grid.width()).step_by(2) {
            let cell: Coord = (x, y);
            if !grid.is_carvable(cell) {
                continue;
            }
            row_done = false;

            let walls: Vec<Coord> = Direction::ALL
                .iter()
                .filter_map(|d| {
                    let wall: Coord = grid.step(cell, *d, 1)?;
                    let neighbor: Coord = grid.step(cell, *d, 2)?;
                    if grid.is_carvable(wall) && grid.is_carved(neighbor) {
                        Some(wall)
                    } else {
                        None
                    }
                })
                .collect();
            if let Some(&wall) = walls.choose(rng) {
                grid.break_wall(wall);
                grid.break_wall(cell);
                return Some(cell);
            }
        }
        if row_done && y == *first_row {
            *first_row = y + 2;
        }
    }
    None
}
