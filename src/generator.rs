/*
generator.rs

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

//! Generate random mazes.
//!
//! A maze is generated in one pass, with a random generator seeded once:
//!
//! 1. A [`grid::Grid`] is filled with walls, the entry, the exit, and the reserved "42"
//!    pattern (see [`pattern`]).
//! 2. One carving algorithm links all the passage cells: [`backtracking`] or [`hunt_and_kill`].
//!    The result is a perfect maze, where only one path exists between two cells.
//! 3. For imperfect mazes, [`loops`] removes more walls until a second path exists between the
//!    entry and the exit.
//! 4. The [`solver`] computes the shortest path. A maze without any path is an error.
//!
//! The resulting [`Maze`] object can then be encoded (see [`crate::encoder`]) and drawn (see
//! [`crate::draw`]).

pub mod backtracking;
pub mod grid;
pub mod hunt_and_kill;
pub mod loops;
pub mod path;
pub mod pattern;
pub mod solver;

use clap::ValueEnum;
use log::{debug, info};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Instant;

use crate::config::MazeConfig;
use grid::{Coord, Grid};
use path::Path;

/// Length of the seeds generated when the configuration does not provide one.
const RANDOM_SEED_LENGTH: usize = 16;

/// Carving algorithms.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Recursive backtracking.
    #[default]
    #[value(alias = "rb")]
    Backtracking,

    /// Hunt-and-kill.
    #[value(alias = "hk")]
    HuntAndKill,
}

impl Algorithm {
    /// Parse the algorithm name used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "rb" | "backtracking" => Some(Algorithm::Backtracking),
            "hk" | "huntandkill" | "hunt-and-kill" => Some(Algorithm::HuntAndKill),
            _ => None,
        }
    }

    /// Carve the grid from the given cell. Return the number of carved passage cells.
    pub fn carve<R: Rng + ?Sized>(self, grid: &mut Grid, start: Coord, rng: &mut R) -> usize {
        match self {
            Algorithm::Backtracking => backtracking::carve(grid, start, rng),
            Algorithm::HuntAndKill => hunt_and_kill::carve(grid, start, rng),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Backtracking => write!(f, "recursive backtracking"),
            Algorithm::HuntAndKill => write!(f, "hunt-and-kill"),
        }
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerationError {
    /// The exit cannot be reached from the entry.
    Unsolvable { seed: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::Unsolvable { seed } => {
                write!(f, "the generated maze has no solution (seed {seed:?})")
            }
        }
    }
}

impl Error for GenerationError {}

/// A generated maze and its solution.
#[derive(Debug, Clone)]
pub struct Maze {
    /// Maze grid.
    pub grid: Grid,

    /// Shortest path from the entry to the exit.
    pub path: Path,

    /// Seed used for the random generator.
    pub seed: String,

    /// Path count after generation, saturated at [`solver::MAX_PATH_COUNT`].
    pub path_count: usize,

    /// Duration in seconds it took to generate the maze.
    pub duration: f32,
}

impl Maze {
    /// Return the solution string, with one `N`, `E`, `S`, or `W` letter per move.
    pub fn solution(&self) -> String {
        self.path.direction_string()
    }
}

/// Generate a maze for the given configuration.
///
/// The configured seed is used if any. Otherwise a random seed is drawn, and stored in the
/// returned [`Maze`] so that the maze can be generated again.
///
/// # Errors
///
/// The function returns an error if the exit cannot be reached.
pub fn generate(config: &MazeConfig) -> Result<Maze, GenerationError> {
    match &config.seed {
        Some(seed) => generate_with_seed(config, seed),
        None => generate_with_seed(config, &random_seed()),
    }
}

/// Generate a new maze for the given configuration, ignoring the configured seed.
pub fn regenerate(config: &MazeConfig, seed: &str) -> Result<Maze, GenerationError> {
    debug!("Regenerating with seed {seed:?}");
    generate_with_seed(config, seed)
}

/// Generate a maze from the given seed.
///
/// Two calls with the same configuration and seed return the same maze.
pub fn generate_with_seed(config: &MazeConfig, seed: &str) -> Result<Maze, GenerationError> {
    let start: Instant = Instant::now();
    let mut rng: StdRng = StdRng::seed_from_u64(seed_value(seed));

    let mut grid: Grid = build_grid(config);
    let entry: Coord = grid.entry();
    let carved: usize = config.algorithm.carve(&mut grid, entry, &mut rng);
    debug!("Carved {carved} cells with {}", config.algorithm);

    let mut path_count: usize = 1;
    if !config.perfect {
        let report: loops::LoopReport = loops::inject(&mut grid, &mut rng);
        debug!(
            "Loop injection: {} walls removed by the {:?} pass",
            report.removed, report.pass
        );
        path_count = report.path_count;
    }

    let path: Path = solver::shortest_path(&grid);
    if path.is_empty() {
        return Err(GenerationError::Unsolvable {
            seed: seed.to_string(),
        });
    }

    let duration: f32 = start.elapsed().as_secs_f32();
    info!(
        "Generated {}x{} maze with {} (seed {:?}): {} moves, {:.3}s",
        config.width,
        config.height,
        config.algorithm,
        seed,
        path.directions().len(),
        duration
    );
    Ok(Maze {
        grid,
        path,
        seed: seed.to_string(),
        path_count,
        duration,
    })
}

/// Create the grid for the configuration: walls everywhere, except the entry, the exit, and the
/// reserved pattern.
pub fn build_grid(config: &MazeConfig) -> Grid {
    let (width, height) = config.grid_dimensions();
    let reserved = pattern::reserved_cells(width, height);
    let entry: Coord =
        grid::clamp_to_passage(grid::grid_coordinates(config.entry), width, height, &reserved);
    let mut exit: Coord =
        grid::clamp_to_passage(grid::grid_coordinates(config.exit), width, height, &reserved);
    if exit == entry {
        // Only possible for configurations that skipped validation
        exit = grid::clamp_to_passage((width, height), width, height, &reserved);
    }
    Grid::new(width, height, entry, exit, reserved)
}

/// Return a random alphanumeric seed.
pub fn random_seed() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SEED_LENGTH)
        .map(char::from)
        .collect()
}

/// Convert a seed string to the value used for seeding the random generator.
///
/// Leading and trailing whitespace is ignored. Numbers are used as is. Other strings are hashed
/// with 64-bit FNV-1a, which does not depend on the platform or the compiler version.
pub fn seed_value(seed: &str) -> u64 {
    let seed: &str = seed.trim();
    if let Ok(v) = seed.parse::<u64>() {
        return v;
    }
    seed.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder;
    use grid::CellState;
    use proptest::prelude::*;

    fn config(width: usize, height: usize, perfect: bool, algorithm: Algorithm) -> MazeConfig {
        MazeConfig {
            width,
            height,
            entry: (0, 0),
            exit: (width - 1, height - 1),
            perfect,
            algorithm,
            ..MazeConfig::default()
        }
    }

    #[test]
    fn test_scenario_perfect_backtracking() {
        let mut cfg = config(7, 5, true, Algorithm::Backtracking);
        cfg.exit = (2, 1);
        cfg.seed = Some("test".to_string());

        let maze = generate(&cfg).expect("maze");

        assert_eq!(maze.grid.width(), 15);
        assert_eq!(maze.grid.height(), 11);
        assert_eq!(maze.seed, "test");
        assert!(!maze.solution().is_empty());
        assert_eq!(solver::count_paths(&maze.grid), 1);

        let text = encoder::encode(&maze.grid, &maze.path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5 + 1 + 3);
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "0,0");
        assert_eq!(lines[7], "2,1");
        assert_eq!(lines[8], maze.solution());
    }

    #[test]
    fn test_scenario_imperfect_backtracking() {
        let mut cfg = config(7, 5, false, Algorithm::Backtracking);
        cfg.exit = (2, 1);
        cfg.seed = Some("test".to_string());

        let maze = generate(&cfg).expect("maze");

        assert!(solver::count_paths(&maze.grid) >= 2);
        assert_eq!(maze.path_count, 2);
    }

    #[test]
    fn test_same_seed_same_maze() {
        for algorithm in [Algorithm::Backtracking, Algorithm::HuntAndKill] {
            let cfg = config(20, 15, false, algorithm);
            let maze1 = generate_with_seed(&cfg, "determinism").expect("maze");
            let maze2 = generate_with_seed(&cfg, "determinism").expect("maze");

            assert_eq!(maze1.grid, maze2.grid);
            assert_eq!(
                encoder::encode(&maze1.grid, &maze1.path),
                encoder::encode(&maze2.grid, &maze2.path)
            );
        }
    }

    #[test]
    fn test_different_seeds() {
        let cfg = config(20, 20, true, Algorithm::Backtracking);
        let maze1 = generate_with_seed(&cfg, "11111").expect("maze");
        let maze2 = regenerate(&cfg, "22222").expect("maze");

        assert_ne!(maze1.grid, maze2.grid);
    }

    #[test]
    fn test_generate_without_seed() {
        let cfg = config(10, 8, true, Algorithm::HuntAndKill);
        let maze = generate(&cfg).expect("maze");

        assert_eq!(maze.seed.len(), RANDOM_SEED_LENGTH);
        let again = generate_with_seed(&cfg, &maze.seed).expect("maze");
        assert_eq!(maze.grid, again.grid);
    }

    #[test]
    fn test_small_grid_without_pattern() {
        let cfg = config(3, 2, false, Algorithm::HuntAndKill);
        let maze = generate_with_seed(&cfg, "small").expect("maze");

        assert!(maze.grid.reserved().is_empty());
        assert!(!maze.path.is_empty());
    }

    #[test]
    fn test_seed_value() {
        assert_eq!(seed_value("42"), 42);
        assert_eq!(seed_value(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(seed_value("a"), 0xaf63_dc4c_8601_ec8c);
        assert_ne!(seed_value("test"), seed_value("tesu"));

        assert_eq!(seed_value(" 42\n"), 42);
        assert_eq!(seed_value(" a"), seed_value("a"));
        assert_eq!(seed_value("a\t"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(seed_value("   "), seed_value(""));
    }

    #[test]
    fn test_large_imperfect_maze_is_fast() {
        for algorithm in [Algorithm::Backtracking, Algorithm::HuntAndKill] {
            let cfg = config(100, 100, false, algorithm);
            let start = Instant::now();
            let maze = generate_with_seed(&cfg, "large").expect("maze");
            let elapsed = start.elapsed();

            assert_eq!(maze.path_count, 2);
            assert_eq!(solver::count_paths(&maze.grid), 2);
            assert!(
                elapsed.as_secs() < 10,
                "{algorithm} took {elapsed:?} for a 100x100 imperfect maze"
            );
        }
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::from_name("RB"), Some(Algorithm::Backtracking));
        assert_eq!(
            Algorithm::from_name("HuntAndKill"),
            Some(Algorithm::HuntAndKill)
        );
        assert_eq!(Algorithm::from_name("prim"), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_perfect_maze_is_spanning_tree(
            seed in any::<u64>(),
            width in 7usize..25,
            height in 5usize..20,
            hunt in any::<bool>(),
        ) {
            let algorithm = if hunt { Algorithm::HuntAndKill } else { Algorithm::Backtracking };
            let cfg = config(width, height, true, algorithm);
            let maze = generate_with_seed(&cfg, &seed.to_string()).expect("maze");

            let (passages, walls) = maze.grid.carved_counts();
            prop_assert_eq!(passages, walls + 1);
            prop_assert_eq!(solver::count_paths(&maze.grid), 1);
            prop_assert!(!maze.path.is_empty());
            for c in maze.grid.reserved() {
                prop_assert_eq!(maze.grid.state(*c), CellState::Reserved);
            }
        }

        #[test]
        fn prop_imperfect_maze_has_two_paths(
            seed in any::<u64>(),
            width in 7usize..25,
            height in 5usize..20,
            hunt in any::<bool>(),
        ) {
            let algorithm = if hunt { Algorithm::HuntAndKill } else { Algorithm::Backtracking };
            let cfg = config(width, height, false, algorithm);
            let maze = generate_with_seed(&cfg, &seed.to_string()).expect("maze");

            prop_assert_eq!(solver::count_paths(&maze.grid), 2);
            prop_assert_eq!(maze.grid.reserved().len(), 18);
            for c in maze.grid.reserved() {
                prop_assert_eq!(maze.grid.state(*c), CellState::Reserved);
            }
        }

        #[test]
        fn prop_encoding_is_consistent(
            seed in any::<u64>(),
            width in 2usize..25,
            height in 2usize..20,
            perfect in any::<bool>(),
            hunt in any::<bool>(),
        ) {
            let algorithm = if hunt { Algorithm::HuntAndKill } else { Algorithm::Backtracking };
            let cfg = config(width, height, perfect, algorithm);
            let maze = generate_with_seed(&cfg, &seed.to_string()).expect("maze");
            let text = encoder::encode(&maze.grid, &maze.path);
            let rows = encoder::decode(&text).expect("hex rows");

            prop_assert_eq!(rows.len(), height);
            prop_assert!(rows.iter().all(|r| r.len() == width));
            prop_assert!(encoder::check_symmetry(&rows).is_empty());
        }
    }
}
