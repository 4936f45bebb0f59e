/*
encoder.rs

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

//! Write mazes in the hexadecimal wall format, and read them back.
//!
//! Each passage cell is written as one hexadecimal digit. Bit 0 is set when the cell has a wall
//! to the north, bit 1 to the east, bit 2 to the south, and bit 3 to the west. Reserved cells
//! count as walls.
//!
//! ```text
//! 9515391539551795151151153
//! EBABAE812853C1412BA812812
//! ...
//!
//! 0,0
//! 24,17
//! SSEENESSWS...
//! ```
//!
//! The grid rows are followed by a blank line, the entry and the exit cell coordinates, and the
//! solution, one `N`, `E`, `S`, or `W` letter per move.

use std::error::Error;
use std::fmt;

use crate::generator::grid::{Coord, Direction, Grid, cell_coordinates};
use crate::generator::path::Path;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum EncodingError {
    /// Character that is not an hexadecimal digit, with its line and column numbers.
    InvalidDigit { line: usize, column: usize, c: char },

    /// Row with a different length than the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// No grid rows.
    Empty,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodingError::InvalidDigit { line, column, c } => {
                write!(f, "line {line}, column {column}: invalid digit {c:?}")
            }
            EncodingError::RaggedRow {
                line,
                expected,
                found,
            } => write!(f, "line {line}: {found} cells instead of {expected}"),
            EncodingError::Empty => write!(f, "no maze rows"),
        }
    }
}

impl Error for EncodingError {}

/// Return the wall mask of the given passage cell.
pub fn cell_mask(grid: &Grid, cell: Coord) -> u8 {
    Direction::ALL
        .iter()
        .filter(|d| grid.step(cell, **d, 1).is_none_or(|c| grid.is_blocking(c)))
        .fold(0, |mask, d| mask | d.bit())
}

/// Encode the grid and its solution.
///
/// The returned text ends with a newline.
pub fn encode(grid: &Grid, path: &Path) -> String {
    let columns: usize = grid.width() / 2;
    let rows: usize = grid.height() / 2;
    let mut out = String::with_capacity((columns + 1) * rows + 64);

    for y in (1..grid.height().saturating_sub(1)).step_by(2) {
        for x in (1..grid.width().saturating_sub(1)).step_by(2) {
            let mask: u8 = cell_mask(grid, (x, y));
            out.push(char::from(HEX_DIGITS[usize::from(mask)]));
        }
        out.push('\n');
    }
    out.push('\n');

    let (entry_x, entry_y) = cell_coordinates(grid.entry());
    let (exit_x, exit_y) = cell_coordinates(grid.exit());
    out.push_str(&format!("{entry_x},{entry_y}\n{exit_x},{exit_y}\n"));
    out.push_str(&path.direction_string());
    out.push('\n');
    out
}

/// Parse the grid rows of an encoded maze, up to the first blank line.
///
/// # Errors
///
/// The function returns an error when a character is not an hexadecimal digit, when the rows do
/// not have the same length, or when there is no row.
pub fn decode(text: &str) -> Result<Vec<Vec<u8>>, EncodingError> {
    let mut rows: Vec<Vec<u8>> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line: &str = line.trim();
        if line.is_empty() {
            break;
        }
        let mut row: Vec<u8> = Vec::with_capacity(line.len());
        for (column, c) in line.chars().enumerate() {
            let Some(v) = c.to_digit(16) else {
                return Err(EncodingError::InvalidDigit {
                    line: i + 1,
                    column: column + 1,
                    c,
                });
            };
            row.push(v as u8);
        }
        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(EncodingError::RaggedRow {
                line: i + 1,
                expected: first.len(),
                found: row.len(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(EncodingError::Empty);
    }
    Ok(rows)
}

/// Return the (column, row) cells for which a wall bit disagrees with the neighbor cell.
///
/// A wall between two cells must be encoded on both sides.
pub fn check_symmetry(rows: &[Vec<u8>]) -> Vec<Coord> {
    let mut wrong: Vec<Coord> = Vec::new();
    let wall = |v: u8, d: Direction| v & d.bit() != 0;

    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            let consistent: bool = (0..4).filter_map(Direction::from_repr).all(|d| {
                let (dx, dy) = d.offset();
                let neighbor: Option<u8> = c
                    .checked_add_signed(dx)
                    .zip(r.checked_add_signed(dy))
                    .and_then(|(nc, nr)| rows.get(nr)?.get(nc).copied());
                neighbor.is_none_or(|n| wall(*v, d) == wall(n, d.opposite()))
            });
            if !consistent {
                wrong.push((c, r));
            }
        }
    }
    wrong
}
