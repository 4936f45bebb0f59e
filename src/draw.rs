/*
draw.rs

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

//! Draw mazes in the terminal.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::generator::grid::{CellState, Grid};
use crate::generator::path::Path;

/// Available themes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// One ASCII character per cell.
    #[default]
    Ascii,

    /// Two block characters per cell, so that cells look square.
    Blocks,
}

impl Theme {
    /// Parse the theme name used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ascii" => Some(Theme::Ascii),
            "blocks" => Some(Theme::Blocks),
            _ => None,
        }
    }
}

/// Glyphs for each cell state, and for the cells on the solution path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderTheme {
    pub wall: &'static str,
    pub empty: &'static str,
    pub entry: &'static str,
    pub exit: &'static str,
    pub reserved: &'static str,
    pub solution: &'static str,
}

impl RenderTheme {
    /// Return the glyph for the given cell.
    pub fn glyph(&self, state: CellState, on_path: bool) -> &'static str {
        match state {
            CellState::Wall => self.wall,
            CellState::Empty if on_path => self.solution,
            CellState::Empty => self.empty,
            CellState::Entry => self.entry,
            CellState::Exit => self.exit,
            CellState::Reserved => self.reserved,
        }
    }
}

impl From<Theme> for RenderTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Ascii => RenderTheme {
                wall: "#",
                empty: " ",
                entry: "E",
                exit: "X",
                reserved: "@",
                solution: ".",
            },
            Theme::Blocks => RenderTheme {
                wall: "██",
                empty: "  ",
                entry: "EE",
                exit: "XX",
                reserved: "▓▓",
                solution: "░░",
            },
        }
    }
}

/// Return the grid as text, one line per grid row.
///
/// The cells of the given path are drawn with the solution glyph. Use an empty path to hide the
/// solution.
pub fn render(grid: &Grid, path: &Path, theme: &RenderTheme) -> String {
    let mut out = String::with_capacity((grid.width() * theme.wall.len() + 1) * grid.height());

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push_str(theme.glyph(grid.state((x, y)), path.contains((x, y))));
        }
        out.push('\n');
    }
    debug!(
        "Rendered {}x{} grid ({} bytes)",
        grid.width(),
        grid.height(),
        out.len()
    );
    out
}

/// Return the line that explains the glyphs of the drawing.
///
/// The pattern glyph is listed only when the grid is large enough to hold the pattern.
pub fn legend(grid: &Grid, theme: &RenderTheme, with_solution: bool) -> String {
    let mut items: Vec<String> = vec![
        format!("{} entry", theme.entry),
        format!("{} exit", theme.exit),
    ];
    if !grid.reserved().is_empty() {
        items.push(format!(
            "{} pattern ({} cells)",
            theme.reserved,
            grid.reserved().len()
        ));
    }
    if with_solution {
        items.push(format!("{} solution", theme.solution));
    }
    items.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::solver;
    use std::collections::HashSet;

    fn corridor() -> Grid {
        let mut grid = Grid::new(5, 3, (1, 1), (3, 1), HashSet::new());
        grid.break_wall((2, 1));
        grid
    }

    #[test]
    fn test_render_ascii() {
        let grid = corridor();
        let theme = RenderTheme::from(Theme::Ascii);

        assert_eq!(
            render(&grid, &Path::default(), &theme),
            "#####\n#E X#\n#####\n"
        );
        assert_eq!(
            render(&grid, &solver::shortest_path(&grid), &theme),
            "#####\n#E.X#\n#####\n"
        );
    }

    #[test]
    fn test_render_blocks() {
        let mut reserved = HashSet::new();
        reserved.insert((2, 1));
        let grid = Grid::new(5, 3, (1, 1), (3, 1), reserved);
        let text = render(&grid, &Path::default(), &RenderTheme::from(Theme::Blocks));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "██EE▓▓XX██");
        assert!(lines.iter().all(|l| l.chars().count() == 10));
    }

    #[test]
    fn test_legend() {
        let theme = RenderTheme::from(Theme::Ascii);

        assert_eq!(legend(&corridor(), &theme, false), "E entry  X exit");

        let reserved: HashSet<_> = HashSet::from([(2, 1), (2, 2)]);
        let grid = Grid::new(5, 3, (1, 1), (3, 1), reserved);
        assert_eq!(
            legend(&grid, &theme, true),
            "E entry  X exit  @ pattern (2 cells)  . solution"
        );
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_name("Blocks"), Some(Theme::Blocks));
        assert_eq!(Theme::from_name("ascii"), Some(Theme::Ascii));
        assert_eq!(Theme::from_name("color"), None);
    }
}
