/*
maze.rs

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

//! Save mazes in the hexadecimal wall format, and read saved mazes back.
//!
//! The file content is produced by [`encoder::encode`]. Nothing is written for mazes that could
//! not be generated.

use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::encoder;
use crate::generator::Maze;

/// Object to save and read back a maze file.
pub struct SaverMaze {
    /// Path to the output file.
    output_file: PathBuf,
}

impl SaverMaze {
    /// Create a [`SaverMaze`] object for the given output file.
    pub fn new(output_file: &Path) -> Self {
        debug!("Maze file: {output_file:?}");
        Self {
            output_file: output_file.to_path_buf(),
        }
    }

    /// Return the path to the output file.
    pub fn path(&self) -> &Path {
        &self.output_file
    }

    /// Save the provided [`Maze`] object.
    pub fn save_maze(&self, maze: &Maze) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.output_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        writer.write_all(encoder::encode(&maze.grid, &maze.path).as_bytes())?;
        writer.flush()?;
        debug!("Saved maze with seed {:?} in {:?}", maze.seed, self.output_file);
        Ok(())
    }

    /// Read the content of the maze file.
    ///
    /// Return None if the file does not exist.
    pub fn get_maze(&self) -> Result<Option<String>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.output_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let mut reader: BufReader<File> = BufReader::new(file);
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::generator;
    use std::env;
    use std::fs;

    fn temp_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("amazeing-{}-{name}.txt", std::process::id()))
    }

    #[test]
    fn test_save_and_read() {
        let config = MazeConfig {
            seed: Some("saver".to_string()),
            ..MazeConfig::default()
        };
        let maze = generator::generate(&config).expect("maze");
        let path = temp_file("save");
        let saver = SaverMaze::new(&path);

        saver.save_maze(&maze).expect("save");
        let text = saver.get_maze().expect("read");
        let _ = fs::remove_file(&path);

        let text = text.expect("file content");
        assert_eq!(text, encoder::encode(&maze.grid, &maze.path));
        let rows = encoder::decode(&text).expect("rows");
        assert_eq!(rows.len(), 15);
        assert!(rows.iter().all(|r| r.len() == 20));
        assert!(encoder::check_symmetry(&rows).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let saver = SaverMaze::new(&temp_file("missing"));

        assert!(saver.get_maze().expect("no error").is_none());
    }

    #[test]
    fn test_unwritable_file() {
        let config = MazeConfig {
            seed: Some("1".to_string()),
            ..MazeConfig::default()
        };
        let maze = generator::generate(&config).expect("maze");
        let saver = SaverMaze::new(Path::new("/nonexistent/dir/maze.txt"));

        assert!(saver.save_maze(&maze).is_err());
    }
}
