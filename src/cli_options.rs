/*
cli_options.rs

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

//! Process command-line options.
//!
//! Amazeing reads the maze settings from a configuration file, generates the maze, and writes it
//! to the output file that the configuration names.
//!
//! # Examples
//!
//! Generate a maze and display it with its solution:
//!
//! ```
//! $ amazeing config.txt --print --solution
//! ```
//!
//! Generate ten mazes with the configured settings and print some statistics:
//!
//! ```
//! $ amazeing -c 10 -S config.txt
//!
//!            mazes = 10
//!       total time = 0.0213s
//!     average time = 0.00213s
//!         max time = 0.00412s
//!    average moves = 61.3
//!  imperfect mazes = 10
//! ```
//!
//! Check that the walls of an existing maze file are consistent:
//!
//! ```
//! $ amazeing --validate maze.txt
//! ```

use clap::Parser;
use log::{debug, error};
use std::env;
use std::path::PathBuf;

use crate::config::{COPYRIGHT_NOTICE, MazeConfig};
use crate::draw::{self, RenderTheme, Theme};
use crate::encoder;
use crate::generator::{self, Algorithm, Maze, path::Path, solver};
use crate::saver::maze::SaverMaze;

/// Success.
const EXIT_OK: u8 = 0;

/// The maze cannot be generated or written, or the validated file is wrong.
const EXIT_FAILURE: u8 = 1;

/// Wrong configuration or usage.
const EXIT_CONFIG: u8 = 2;

/// Generate mazes from a configuration file.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Configuration file
    #[arg(default_value = "config.txt")]
    config: PathBuf,

    /// Seed for the random generator, instead of the configured seed
    #[arg(short, long)]
    seed: Option<String>,

    /// Carving algorithm, instead of the configured algorithm
    #[arg(value_enum, short, long)]
    algorithm: Option<Algorithm>,

    /// Characters used to draw the maze, instead of the configured theme
    #[arg(value_enum, short, long)]
    theme: Option<Theme>,

    /// Number of mazes to generate. The output file holds the last one
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the mazes
    #[arg(short = 'S', long, default_value_t = false)]
    summary: bool,

    /// Draw the maze in the terminal
    #[arg(short, long, default_value_t = false)]
    print: bool,

    /// Draw the solution with the maze
    #[arg(long, default_value_t = false, requires = "print")]
    solution: bool,

    /// Print the configuration, with the seed in use, in JSON format
    #[arg(long, default_value_t = false)]
    dump_config: bool,

    /// Verify the wall encoding of an existing maze file, and exit
    #[arg(long, value_name = "FILE")]
    validate: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit code.
pub fn run() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    if let Some(file) = &args.validate {
        return validate(file);
    }

    //
    // Read the configuration and resolve the seed, so that the run can be reproduced
    //
    let mut config: MazeConfig = match MazeConfig::from_file(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}: {e}", args.config.display());
            return EXIT_CONFIG;
        }
    };
    if let Some(seed) = &args.seed {
        if seed.is_empty() {
            eprintln!("Error: the seed cannot be empty");
            return EXIT_CONFIG;
        }
        config.seed = Some(seed.clone());
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(theme) = args.theme {
        config.display = theme;
    }
    if config.seed.is_none() {
        config.seed = Some(generator::random_seed());
    }

    if args.dump_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return EXIT_FAILURE;
            }
        }
    }

    //
    // Generate the mazes
    //
    let count: usize = args.count.max(1);
    let mut last: Option<Maze> = None;
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut moves: usize = 0;
    let mut imperfect: usize = 0;
    for i in 0..count {
        debug!("Iteration {i}");
        let ret = if i == 0 {
            generator::generate(&config)
        } else {
            generator::regenerate(&config, &generator::random_seed())
        };
        let maze: Maze = match ret {
            Ok(m) => m,
            Err(e) => {
                error!("{e}");
                eprintln!("Error: {e}");
                return EXIT_FAILURE;
            }
        };

        total += maze.duration;
        if maze.duration > max {
            max = maze.duration;
        }
        moves += maze.path.directions().len();
        if maze.path_count >= solver::MAX_PATH_COUNT {
            imperfect += 1;
        }
        last = Some(maze);
    }
    let Some(maze) = last else {
        return EXIT_FAILURE;
    };

    //
    // Save the last maze
    //
    let saver = SaverMaze::new(&config.output_file);
    if let Err(e) = saver.save_maze(&maze) {
        eprintln!("Error: cannot write {}: {e}", saver.path().display());
        return EXIT_FAILURE;
    }

    if args.print {
        let empty: Path = Path::default();
        let path: &Path = if args.solution { &maze.path } else { &empty };
        let theme = RenderTheme::from(config.display);
        print!("{}", draw::render(&maze.grid, path, &theme));
        println!("{}", draw::legend(&maze.grid, &theme, args.solution));
        println!("Seed: {}", maze.seed);
        if args.solution {
            println!("Solution: {}", maze.solution());
        }
    }

    // Print some stats
    if args.summary {
        println!(
            "
           mazes = {}
      total time = {}s
    average time = {}s
        max time = {}s
   average moves = {}
 imperfect mazes = {}",
            count,
            total,
            total / count as f32,
            max,
            moves as f32 / count as f32,
            imperfect
        );
    }
    EXIT_OK
}

/// Verify that each wall of the given maze file is encoded on both sides.
fn validate(file: &std::path::Path) -> u8 {
    let text: String = match SaverMaze::new(file).get_maze() {
        Ok(Some(t)) => t,
        Ok(None) => {
            eprintln!("Error: {}: file not found", file.display());
            return EXIT_FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}: {e}", file.display());
            return EXIT_FAILURE;
        }
    };
    let rows: Vec<Vec<u8>> = match encoder::decode(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}: {e}", file.display());
            return EXIT_FAILURE;
        }
    };

    let wrong = encoder::check_symmetry(&rows);
    for (c, r) in &wrong {
        println!("Wrong encoding for ({c},{r})");
    }
    if wrong.is_empty() {
        debug!("{}: {} rows verified", file.display(), rows.len());
        EXIT_OK
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["amazeing", "-s", "42", "-c", "3", "-S", "maze.cfg"])
            .expect("args");
        assert_eq!(args.config, PathBuf::from("maze.cfg"));
        assert_eq!(args.seed.as_deref(), Some("42"));
        assert_eq!(args.count, 3);
        assert!(args.summary);
        assert!(!args.print);
        assert_eq!(args.algorithm, None);

        let args = Args::try_parse_from(["amazeing", "-a", "hk", "-t", "blocks", "-p"])
            .expect("args");
        assert_eq!(args.algorithm, Some(Algorithm::HuntAndKill));
        assert_eq!(args.theme, Some(Theme::Blocks));
        assert!(args.print);

        let args = Args::try_parse_from(["amazeing"]).expect("args");
        assert_eq!(args.config, PathBuf::from("config.txt"));
        assert_eq!(args.count, 1);

        assert!(Args::try_parse_from(["amazeing", "--solution"]).is_err());
    }

    #[test]
    fn test_long_version() {
        let version = Args::command().render_long_version();

        assert!(version.contains("Copyright 2025 The Amazeing contributors"));
        assert!(version.contains("GPL-3.0-or-later"));
    }

    #[test]
    fn test_validate() {
        let file = std::env::temp_dir().join(format!("amazeing-validate-{}.txt", std::process::id()));

        fs::write(&file, "93\nEE\n\n0,0\n1,1\nES\n").expect("write");
        assert_eq!(validate(&file), EXIT_OK);

        fs::write(&file, "D3\nEE\n").expect("write");
        assert_eq!(validate(&file), EXIT_FAILURE);

        fs::write(&file, "Z3\nEE\n").expect("write");
        assert_eq!(validate(&file), EXIT_FAILURE);

        let _ = fs::remove_file(&file);
        assert_eq!(validate(&file), EXIT_FAILURE);
    }
}
