/*
grid.rs

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

//! Maze grid, cell states, and directions.
//!
//! The grid uses doubled coordinates: the maze cell `(i, j)` is stored at grid coordinate
//! `(2i + 1, 2j + 1)`. Cells with an even coordinate on at least one axis are walls that can be
//! broken to link two passage cells.

use log::debug;
use std::collections::HashSet;
use strum_macros::FromRepr;

/// Grid coordinate, `(x, y)`.
pub type Coord = (usize, usize);

/// State of a grid cell.
///
/// - A `Wall` cell has not been carved yet.
/// - An `Empty` cell is a carved passage.
/// - `Entry` and `Exit` are the two endpoints of the maze.
/// - A `Reserved` cell belongs to the decorative pattern and is never carved.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Wall,
    Empty,
    Entry,
    Exit,
    Reserved,
}

/// Cardinal directions.
///
/// The discriminant is the bit index used for the direction in the output file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All the directions in bit order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Offset of one step in this direction. North is toward `y = 0`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Wall bit of the direction in a cell mask.
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Letter used in the solution string.
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Direction of a single move between two orthogonally adjacent coordinates.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        if to.1 < from.1 {
            Some(Direction::North)
        } else if to.1 > from.1 {
            Some(Direction::South)
        } else if to.0 > from.0 {
            Some(Direction::East)
        } else if to.0 < from.0 {
            Some(Direction::West)
        } else {
            None
        }
    }
}

/// Rectangular maze grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Number of columns, always odd.
    width: usize,

    /// Number of rows, always odd.
    height: usize,

    /// Cell states in row-major order.
    cells: Vec<CellState>,

    /// Coordinates of the decorative pattern.
    reserved: HashSet<Coord>,

    entry: Coord,
    exit: Coord,
}

impl Grid {
    /// Create a [`Grid`] where every cell is a wall, except the entry, the exit, and the reserved
    /// pattern.
    ///
    /// The entry and the exit must already be valid passage coordinates outside of the reserved
    /// set (see [`clamp_to_passage`]). A reserved coordinate never overwrites them.
    pub fn new(
        width: usize,
        height: usize,
        entry: Coord,
        exit: Coord,
        reserved: HashSet<Coord>,
    ) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![CellState::Wall; width * height],
            reserved: HashSet::with_capacity(reserved.len()),
            entry,
            exit,
        };

        grid.set(entry, CellState::Entry);
        grid.set(exit, CellState::Exit);
        for coord in reserved {
            if coord == entry || coord == exit || !grid.in_bounds(coord) {
                continue;
            }
            grid.set(coord, CellState::Reserved);
            grid.reserved.insert(coord);
        }
        debug!(
            "Grid {}x{}  entry = {:?}  exit = {:?}  reserved cells = {}",
            width,
            height,
            entry,
            exit,
            grid.reserved.len()
        );
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid coordinate of the entry.
    pub fn entry(&self) -> Coord {
        self.entry
    }

    /// Grid coordinate of the exit.
    pub fn exit(&self) -> Coord {
        self.exit
    }

    /// The reserved pattern.
    pub fn reserved(&self) -> &HashSet<Coord> {
        &self.reserved
    }

    /// Whether the coordinate belongs to the reserved pattern.
    pub fn is_reserved(&self, coord: Coord) -> bool {
        self.reserved.contains(&coord)
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Return the state of a cell, or [`None`] outside of the grid.
    pub fn get(&self, coord: Coord) -> Option<CellState> {
        if self.in_bounds(coord) {
            Some(self.cells[coord.1 * self.width + coord.0])
        } else {
            None
        }
    }

    /// Return the state of a cell. Cells outside of the grid are walls.
    pub fn state(&self, coord: Coord) -> CellState {
        self.get(coord).unwrap_or(CellState::Wall)
    }

    fn set(&mut self, coord: Coord, state: CellState) {
        if self.in_bounds(coord) {
            self.cells[coord.1 * self.width + coord.0] = state;
        }
    }

    /// Carve the given cell.
    ///
    /// Only `Wall` cells change. Reserved cells, the entry, the exit, and coordinates outside of
    /// the grid are left untouched. Return whether the cell changed.
    pub fn break_wall(&mut self, coord: Coord) -> bool {
        if self.is_reserved(coord) {
            return false;
        }
        match self.get(coord) {
            Some(CellState::Wall) => {
                self.set(coord, CellState::Empty);
                true
            }
            _ => false,
        }
    }

    /// Whether the cell can be the far side of a wall break.
    ///
    /// A wall cell is carvable. The entry and the exit are carvable until they get linked to a
    /// passage.
    pub fn is_carvable(&self, coord: Coord) -> bool {
        if self.is_reserved(coord) {
            return false;
        }
        match self.get(coord) {
            Some(CellState::Wall) => true,
            Some(CellState::Entry | CellState::Exit) => !self.is_linked(coord),
            _ => false,
        }
    }

    /// Whether one of the four neighbors is an open cell.
    fn is_linked(&self, coord: Coord) -> bool {
        Direction::ALL
            .iter()
            .filter_map(|d| self.step(coord, *d, 1))
            .any(|c| self.is_open(c))
    }

    /// Whether the cell is part of the maze passages: carved, or one of the linked endpoints.
    pub fn is_carved(&self, coord: Coord) -> bool {
        match self.get(coord) {
            Some(CellState::Empty) => true,
            Some(CellState::Entry | CellState::Exit) => self.is_linked(coord),
            _ => false,
        }
    }

    /// Whether a walker can stand on the cell.
    pub fn is_open(&self, coord: Coord) -> bool {
        matches!(
            self.get(coord),
            Some(CellState::Empty | CellState::Entry | CellState::Exit)
        )
    }

    /// Whether the cell blocks the way: a wall, a reserved cell, or outside of the grid.
    pub fn is_blocking(&self, coord: Coord) -> bool {
        matches!(
            self.get(coord),
            None | Some(CellState::Wall | CellState::Reserved)
        )
    }

    /// Return the coordinate `distance` steps away in the given direction, if it is in the grid.
    pub fn step(&self, coord: Coord, direction: Direction, distance: usize) -> Option<Coord> {
        let (dx, dy) = direction.offset();
        let x = coord.0.checked_add_signed(dx * distance as isize)?;
        let y = coord.1.checked_add_signed(dy * distance as isize)?;
        if self.in_bounds((x, y)) {
            Some((x, y))
        } else {
            None
        }
    }

    /// Passage cells (odd coordinates) in raster order.
    pub fn passage_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (1..self.height)
            .step_by(2)
            .flat_map(move |y| (1..self.width).step_by(2).map(move |x| (x, y)))
    }

    /// Whether the carving move from `coord` in `direction` is legal.
    ///
    /// The wall between both cells must still be a plain wall, and the cell two steps away must
    /// be carvable. Return the wall and the target coordinates.
    pub fn carving_move(&self, coord: Coord, direction: Direction) -> Option<(Coord, Coord)> {
        let wall = self.step(coord, direction, 1)?;
        let target = self.step(coord, direction, 2)?;
        if self.state(wall) == CellState::Wall
            && !self.is_reserved(wall)
            && self.is_carvable(target)
        {
            Some((wall, target))
        } else {
            None
        }
    }

    /// Counters used for checking the spanning-tree property: the number of carved passage cells
    /// (endpoints included), and the number of carved connecting walls.
    #[cfg(test)]
    pub fn carved_counts(&self) -> (usize, usize) {
        let mut passages: usize = 0;
        let mut walls: usize = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let is_passage = x % 2 == 1 && y % 2 == 1;
                if is_passage && self.is_carved((x, y)) {
                    passages += 1;
                } else if !is_passage && self.state((x, y)) == CellState::Empty {
                    walls += 1;
                }
            }
        }
        (passages, walls)
    }
}

/// Convert a maze cell coordinate to a grid coordinate.
pub fn grid_coordinates(cell: Coord) -> Coord {
    (cell.0 * 2 + 1, cell.1 * 2 + 1)
}

/// Convert a passage grid coordinate to a maze cell coordinate.
pub fn cell_coordinates(coord: Coord) -> Coord {
    (coord.0.saturating_sub(1) / 2, coord.1.saturating_sub(1) / 2)
}

/// Force a coordinate onto a passage cell inside the grid, away from the reserved set.
///
/// Even coordinates move one step back (or forward on the first column or row). If the result is
/// reserved, the nearest free passage cell is used, searching rings of increasing distance.
pub fn clamp_to_passage(
    coord: Coord,
    width: usize,
    height: usize,
    reserved: &HashSet<Coord>,
) -> Coord {
    let clamp_axis = |v: usize, dim: usize| -> usize {
        let max: usize = dim.saturating_sub(2).max(1);
        let v: usize = v.clamp(1, max);
        if v % 2 == 1 {
            v
        } else if v < max {
            v + 1
        } else {
            v - 1
        }
    };
    let clamped: Coord = (clamp_axis(coord.0, width), clamp_axis(coord.1, height));
    if !reserved.contains(&clamped) {
        return clamped;
    }

    let max_ring: usize = width.max(height);
    for ring in (2..=max_ring).step_by(2) {
        let (cx, cy) = (clamped.0 as isize, clamped.1 as isize);
        let r = ring as isize;
        for dy in (-r..=r).step_by(2) {
            for dx in (-r..=r).step_by(2) {
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x < 1 || y < 1 || x >= width as isize - 1 || y >= height as isize - 1 {
                    continue;
                }
                let candidate: Coord = (x as usize, y as usize);
                if !reserved.contains(&candidate) {
                    debug!("Coordinate {coord:?} is reserved, moved to {candidate:?}");
                    return candidate;
                }
            }
        }
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> Grid {
        let reserved: HashSet<Coord> = HashSet::from([(3, 3), (3, 4)]);
        Grid::new(7, 7, (1, 1), (5, 5), reserved)
    }

    #[test]
    fn test_new_grid_is_filled() {
        let grid = small_grid();

        assert_eq!(grid.state((1, 1)), CellState::Entry);
        assert_eq!(grid.state((5, 5)), CellState::Exit);
        assert_eq!(grid.state((3, 3)), CellState::Reserved);
        assert_eq!(grid.state((3, 4)), CellState::Reserved);
        assert_eq!(grid.state((0, 0)), CellState::Wall);
        assert_eq!(grid.state((3, 1)), CellState::Wall);
        assert_eq!(grid.reserved().len(), 2);
    }

    #[test]
    fn test_reserved_never_overwrites_endpoints() {
        let reserved: HashSet<Coord> = HashSet::from([(1, 1), (3, 3)]);
        let grid = Grid::new(7, 7, (1, 1), (5, 5), reserved);

        assert_eq!(grid.state((1, 1)), CellState::Entry);
        assert!(!grid.is_reserved((1, 1)));
        assert!(grid.is_reserved((3, 3)));
    }

    #[test]
    fn test_break_wall() {
        let mut grid = small_grid();

        assert!(grid.break_wall((2, 1)));
        assert_eq!(grid.state((2, 1)), CellState::Empty);

        // Already carved
        assert!(!grid.break_wall((2, 1)));

        // Reserved cells and endpoints are never carved
        assert!(!grid.break_wall((3, 3)));
        assert_eq!(grid.state((3, 3)), CellState::Reserved);
        assert!(!grid.break_wall((1, 1)));
        assert_eq!(grid.state((1, 1)), CellState::Entry);

        // Outside of the grid
        assert!(!grid.break_wall((7, 1)));
        assert!(!grid.break_wall((100, 100)));
    }

    #[test]
    fn test_is_carvable() {
        let mut grid = small_grid();

        assert!(grid.is_carvable((3, 1)));
        assert!(!grid.is_carvable((3, 3)));
        assert!(grid.is_carvable((5, 5)));

        grid.break_wall((4, 5));
        assert!(!grid.is_carvable((5, 5)));
        assert!(!grid.is_carvable((4, 5)));
        assert!(grid.is_carved((5, 5)));
    }

    #[test]
    fn test_step_is_bounds_checked() {
        let grid = small_grid();

        assert_eq!(grid.step((1, 1), Direction::North, 2), None);
        assert_eq!(grid.step((1, 1), Direction::West, 1), Some((0, 1)));
        assert_eq!(grid.step((1, 1), Direction::East, 2), Some((3, 1)));
        assert_eq!(grid.step((5, 5), Direction::South, 2), None);
    }

    #[test]
    fn test_carving_move() {
        let grid = small_grid();

        assert_eq!(
            grid.carving_move((1, 1), Direction::East),
            Some(((2, 1), (3, 1)))
        );
        assert_eq!(grid.carving_move((1, 1), Direction::North), None);
        // The wall (3, 4) is reserved
        assert_eq!(grid.carving_move((3, 5), Direction::North), None);
    }

    #[test]
    fn test_passage_cells_raster_order() {
        let grid = small_grid();
        let cells: Vec<Coord> = grid.passage_cells().collect();

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], (1, 1));
        assert_eq!(cells[1], (3, 1));
        assert_eq!(cells[3], (1, 3));
        assert_eq!(cells[8], (5, 5));
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::from_repr(2), Some(Direction::South));
        assert_eq!(Direction::West.bit(), 8);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::between((3, 3), (3, 1)), Some(Direction::North));
        assert_eq!(Direction::between((3, 3), (5, 3)), Some(Direction::East));
        assert_eq!(Direction::between((3, 3), (3, 3)), None);
    }

    #[test]
    fn test_coordinate_conversions() {
        assert_eq!(grid_coordinates((0, 0)), (1, 1));
        assert_eq!(grid_coordinates((2, 1)), (5, 3));
        assert_eq!(cell_coordinates((5, 3)), (2, 1));
    }

    #[test]
    fn test_clamp_to_passage() {
        let empty: HashSet<Coord> = HashSet::new();

        assert_eq!(clamp_to_passage((2, 4), 9, 9, &empty), (3, 5));
        assert_eq!(clamp_to_passage((0, 0), 9, 9, &empty), (1, 1));
        assert_eq!(clamp_to_passage((8, 20), 9, 9, &empty), (7, 7));

        let reserved: HashSet<Coord> = HashSet::from([(3, 3)]);
        let c = clamp_to_passage((3, 3), 9, 9, &reserved);
        assert_ne!(c, (3, 3));
        assert!(c.0 % 2 == 1 && c.1 % 2 == 1);
        assert!(c.0 < 8 && c.1 < 8);
    }
}
