/*
pattern.rs

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

//! Decorative "42" pattern drawn with reserved cells in the middle of the grid.

use log::warn;
use std::collections::HashSet;

use super::grid::Coord;

/// Smallest grid width that can hold the pattern (7 maze cells).
pub const PATTERN_MIN_WIDTH: usize = 15;

/// Smallest grid height that can hold the pattern (5 maze cells).
pub const PATTERN_MIN_HEIGHT: usize = 11;

/// Pattern offsets from the grid center: a "4" on the left and a "2" on the right.
const PATTERN: [(isize, isize); 18] = [
    // 4
    (-3, -2),
    (-3, -1),
    (-3, 0),
    (-2, 0),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    // 2
    (1, -2),
    (2, -2),
    (3, -2),
    (3, -1),
    (1, 0),
    (2, 0),
    (3, 0),
    (1, 1),
    (1, 2),
    (2, 2),
    (3, 2),
];

/// Whether a grid of the given dimensions is large enough for the pattern.
pub fn fits(width: usize, height: usize) -> bool {
    width >= PATTERN_MIN_WIDTH && height >= PATTERN_MIN_HEIGHT
}

/// Return the reserved coordinates for a grid of the given dimensions.
///
/// The set is empty when the grid is too small.
pub fn reserved_cells(width: usize, height: usize) -> HashSet<Coord> {
    if !fits(width, height) {
        warn!(
            "Grid {width}x{height} is too small for the 42 pattern (minimum {PATTERN_MIN_WIDTH}x{PATTERN_MIN_HEIGHT})"
        );
        return HashSet::new();
    }
    let (cx, cy) = ((width / 2) as isize, (height / 2) as isize);
    PATTERN
        .iter()
        .map(|(dx, dy)| ((cx + dx) as usize, (cy + dy) as usize))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_for_smallest_grid() {
        let cells = reserved_cells(15, 11);

        assert_eq!(cells.len(), 18);
        // Center is (7, 5)
        assert!(cells.contains(&(4, 3)));
        assert!(cells.contains(&(6, 7)));
        assert!(cells.contains(&(10, 7)));
        assert!(!cells.contains(&(7, 5)));
        // The border stays free
        assert!(cells.iter().all(|(x, y)| *x > 0 && *x < 14 && *y > 0 && *y < 10));
    }

    #[test]
    fn test_pattern_too_small() {
        assert!(reserved_cells(13, 11).is_empty());
        assert!(reserved_cells(15, 9).is_empty());
        assert!(!fits(5, 5));
    }

    #[test]
    fn test_pattern_is_centered() {
        let cells = reserved_cells(41, 31);
        let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let max_x = cells.iter().map(|c| c.0).max().unwrap_or(0);

        assert_eq!(min_x, 17);
        assert_eq!(max_x, 23);
    }
}
