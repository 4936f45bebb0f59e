/*
path.rs

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

//! Path in the maze grid.

use std::collections::HashSet;

use super::grid::{Coord, Direction};

/// Path object.
#[derive(Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of grid coordinates.
    path: Vec<Coord>,

    /// Stores the visited status of the coordinates.
    /// Instead of looking for the coordinate in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Coord>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object from a vector.
    pub fn from_vec(path: Vec<Coord>) -> Self {
        let visited: HashSet<Coord> = path.iter().copied().collect();
        Self { path, visited }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the coordinate is in the path or not.
    pub fn contains(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    /// Return the coordinates of the path, in order.
    pub fn coords(&self) -> &[Coord] {
        &self.path
    }

    /// Return the moves between consecutive passage cells (odd coordinates) of the path.
    ///
    /// The wall cells crossed between two passage cells are skipped, so each move covers two grid
    /// steps.
    pub fn directions(&self) -> Vec<Direction> {
        let passages: Vec<Coord> = self
            .path
            .iter()
            .filter(|(x, y)| x % 2 == 1 && y % 2 == 1)
            .copied()
            .collect();
        passages
            .windows(2)
            .filter_map(|w| Direction::between(w[0], w[1]))
            .collect()
    }

    /// Return the solution string, with one `N`, `E`, `S`, or `W` letter per move.
    pub fn direction_string(&self) -> String {
        self.directions().iter().map(|d| d.letter()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_contains() {
        let path = Path::from_vec(vec![(1, 1), (2, 1), (3, 1)]);

        assert!(path.contains((2, 1)));
        assert!(!path.contains((1, 2)));
        assert_eq!(path.coords(), &[(1, 1), (2, 1), (3, 1)]);
        assert!(!path.is_empty());
        assert!(Path::default().is_empty());
    }

    #[test]
    fn test_directions_skip_wall_cells() {
        let path = Path::from_vec(vec![(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3)]);

        assert_eq!(
            path.directions(),
            vec![Direction::East, Direction::South, Direction::West]
        );
        assert_eq!(path.direction_string(), "ESW");
    }

    #[test]
    fn test_directions_going_north() {
        let path = Path::from_vec(vec![(3, 5), (3, 4), (3, 3), (3, 2), (3, 1)]);

        assert_eq!(path.direction_string(), "NN");
    }
}
