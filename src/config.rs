/*
config.rs

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

//! Read and validate the maze configuration file.
//!
//! The file has one `KEY=VALUE` setting per line. Blank lines and lines starting with `#` are
//! ignored, and the keys are not case-sensitive.
//!
//! ```text
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=42
//! ALGORITHM=hk
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::draw::Theme;
use crate::generator::Algorithm;
use crate::generator::grid::{Coord, grid_coordinates};
use crate::generator::pattern;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 The Amazeing contributors
License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Smallest width and height, in cells.
pub const MIN_DIMENSION: usize = 2;

/// Largest width and height, in cells.
pub const MAX_DIMENSION: usize = 1000;

/// Settings that must be present in the configuration file.
const MANDATORY_KEYS: [&str; 6] = ["WIDTH", "HEIGHT", "ENTRY", "EXIT", "OUTPUT_FILE", "PERFECT"];

/// Settings that can be omitted.
const OPTIONAL_KEYS: [&str; 3] = ["SEED", "ALGORITHM", "DISPLAY"];

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The file cannot be read.
    Io { path: PathBuf, message: String },

    /// Line without the `=` separator.
    Syntax { line: usize },

    UnknownKey { line: usize, key: String },

    DuplicateKey { line: usize, key: String },

    MissingKey { key: &'static str },

    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The entry or the exit is outside of the maze or on the reserved pattern.
    Placement { reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "{}: {message}", path.display()),
            ConfigError::Syntax { line } => {
                write!(f, "line {line}: syntax error, expecting KEY=VALUE")
            }
            ConfigError::UnknownKey { line, key } => write!(f, "line {line}: unknown key {key:?}"),
            ConfigError::DuplicateKey { line, key } => {
                write!(f, "line {line}: key {key:?} is already defined")
            }
            ConfigError::MissingKey { key } => write!(f, "missing mandatory key {key:?}"),
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "invalid value {value:?} for {key}: {reason}")
            }
            ConfigError::Placement { reason } => write!(f, "{reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Maze settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MazeConfig {
    /// Number of cell columns.
    pub width: usize,

    /// Number of cell rows.
    pub height: usize,

    /// Entry cell, as (column, row).
    pub entry: Coord,

    /// Exit cell, as (column, row).
    pub exit: Coord,

    /// File where the encoded maze is written.
    pub output_file: PathBuf,

    /// Whether there is only one path between the entry and the exit.
    pub perfect: bool,

    /// Seed for the random generator. A random seed is used when not set.
    pub seed: Option<String>,

    pub algorithm: Algorithm,

    /// Characters used to draw the maze in the terminal.
    pub display: Theme,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            entry: (0, 0),
            exit: (19, 14),
            output_file: PathBuf::from("maze.txt"),
            perfect: true,
            seed: None,
            algorithm: Algorithm::default(),
            display: Theme::default(),
        }
    }
}

impl MazeConfig {
    /// Read and validate the given configuration file.
    ///
    /// # Errors
    ///
    /// The function returns an error if the file cannot be read, if a setting is wrong or missing,
    /// or if the entry and exit cannot be placed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration file {path:?}");
        let text: String = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: MazeConfig = Self::parse(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the content of a configuration file.
    ///
    /// The entry and exit placement is not verified. Use [`MazeConfig::validate`] for that.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut settings: Vec<(&'static str, String)> = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let line: &str = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Syntax { line: i + 1 });
            };
            let key: String = key.trim().to_uppercase();
            let Some(known) = MANDATORY_KEYS
                .iter()
                .chain(OPTIONAL_KEYS.iter())
                .find(|k| **k == key)
            else {
                return Err(ConfigError::UnknownKey { line: i + 1, key });
            };
            if settings.iter().any(|(k, _)| *k == *known) {
                return Err(ConfigError::DuplicateKey { line: i + 1, key });
            }
            settings.push((*known, value.trim().to_string()));
        }

        let get = |key: &str| {
            settings
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        let mandatory = |key: &'static str| get(key).ok_or(ConfigError::MissingKey { key });

        let mut config = MazeConfig {
            width: parse_dimension("WIDTH", mandatory("WIDTH")?)?,
            height: parse_dimension("HEIGHT", mandatory("HEIGHT")?)?,
            entry: parse_coordinates("ENTRY", mandatory("ENTRY")?)?,
            exit: parse_coordinates("EXIT", mandatory("EXIT")?)?,
            output_file: parse_output_file(mandatory("OUTPUT_FILE")?)?,
            perfect: parse_bool("PERFECT", mandatory("PERFECT")?)?,
            ..MazeConfig::default()
        };

        if let Some(seed) = get("SEED") {
            if seed.is_empty() {
                return Err(invalid("SEED", seed, "the seed cannot be empty"));
            }
            config.seed = Some(seed.to_string());
        }
        if let Some(name) = get("ALGORITHM") {
            config.algorithm = Algorithm::from_name(name).ok_or_else(|| {
                invalid("ALGORITHM", name, "expecting rb, backtracking, hk, or huntandkill")
            })?;
        }
        if let Some(name) = get("DISPLAY") {
            config.display = Theme::from_name(name)
                .ok_or_else(|| invalid("DISPLAY", name, "expecting ascii or blocks"))?;
        }
        debug!("Configuration: {config:?}");
        Ok(config)
    }

    /// Verify the dimensions, and that the entry and the exit are inside the maze, different,
    /// and not on the reserved pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, v) in [("WIDTH", self.width), ("HEIGHT", self.height)] {
            check_dimension(key, v)?;
        }
        for (name, (x, y)) in [("entry", self.entry), ("exit", self.exit)] {
            if x >= self.width || y >= self.height {
                return Err(ConfigError::Placement {
                    reason: format!(
                        "the {name} ({x},{y}) is outside of the {}x{} maze",
                        self.width, self.height
                    ),
                });
            }
        }
        if self.entry == self.exit {
            return Err(ConfigError::Placement {
                reason: "the entry and the exit must be different cells".to_string(),
            });
        }

        let (width, height) = self.grid_dimensions();
        let reserved = pattern::reserved_cells(width, height);
        for (name, (x, y)) in [("entry", self.entry), ("exit", self.exit)] {
            if reserved.contains(&grid_coordinates((x, y))) {
                return Err(ConfigError::Placement {
                    reason: format!("the {name} ({x},{y}) is on the 42 pattern"),
                });
            }
        }
        Ok(())
    }

    /// Return the width and height of the grid, which has a wall between each cell.
    ///
    /// The dimensions are capped to the grid of a [`MAX_DIMENSION`] maze. They are exact for a
    /// validated configuration.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        let grid = |v: usize| v.min(MAX_DIMENSION) * 2 + 1;
        (grid(self.width), grid(self.height))
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_dimension(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    let v: usize = value
        .parse()
        .map_err(|_| invalid(key, value, "expecting a positive integer"))?;
    check_dimension(key, v)?;
    Ok(v)
}

fn check_dimension(key: &'static str, v: usize) -> Result<(), ConfigError> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&v) {
        return Err(invalid(
            key,
            &v.to_string(),
            &format!("must be between {MIN_DIMENSION} and {MAX_DIMENSION}"),
        ));
    }
    Ok(())
}

fn parse_coordinates(key: &'static str, value: &str) -> Result<Coord, ConfigError> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| invalid(key, value, "expecting x,y"))?;
    match (x.trim().parse::<usize>(), y.trim().parse::<usize>()) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(invalid(key, value, "coordinates must be positive integers")),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expecting true or false")),
    }
}

fn parse_output_file(value: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(value);
    if path.extension().is_none_or(|e| e != "txt") || path.file_stem().is_none() {
        return Err(invalid("OUTPUT_FILE", value, "expecting a .txt file"));
    }
    Ok(path)
}
