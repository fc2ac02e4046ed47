//! Rectangular character grid.
//!
//! Program text is ragged; everything downstream wants a perfect rectangle,
//! so rows are right-padded with blanks on construction. Blank leading and
//! trailing lines are stripped when reading source text.

use riv_types::{Direction, Pos};
use std::ops::Range;

const BLANK: char = ' ';

/// A rectangular grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Grid {
    /// Read program text into a grid, stripping blank leading/trailing lines
    /// and padding every row to the width of the longest.
    pub fn from_source(text: &str) -> Self {
        let mut rows: Vec<Vec<char>> = text.lines().map(|ln| ln.chars().collect()).collect();
        while rows.first().is_some_and(|r| is_blank(r)) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|r| is_blank(r)) {
            rows.pop();
        }
        Self::from_rows(rows)
    }

    /// Build a grid from pre-split rows, padding to a rectangle.
    pub fn from_rows(mut rows: Vec<Vec<char>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, BLANK);
        }
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The character at `pos`. Callers stay in bounds; positions come from
    /// [`Direction::step`] or grid scans.
    pub fn cell(&self, pos: Pos) -> char {
        self.rows[pos.y][pos.x]
    }

    /// Overwrite the character at `pos` (used to blank glyph markers).
    pub fn set(&mut self, pos: Pos, ch: char) {
        self.rows[pos.y][pos.x] = ch;
    }

    /// The adjacent cell in `dir`, if it stays on the grid.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<(Pos, char)> {
        let next = dir.step(pos, self.width, self.height())?;
        Some((next, self.cell(next)))
    }

    /// `true` if row `y` is entirely blank.
    pub fn row_blank(&self, y: usize) -> bool {
        is_blank(&self.rows[y])
    }

    /// `true` if column `x` is blank over the given rows. Columns past the
    /// right edge count as blank.
    pub fn col_blank(&self, x: usize, ys: Range<usize>) -> bool {
        ys.into_iter()
            .all(|y| self.rows[y].get(x).is_none_or(|&c| c == BLANK))
    }

    /// Cut out the rectangle spanning columns `x0..=x1` and rows `y0..=y1`.
    pub fn slice(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> Grid {
        let rows = self.rows[y0..=y1]
            .iter()
            .map(|row| row[x0..=x1].to_vec())
            .collect();
        Self::from_rows(rows)
    }
}

fn is_blank(row: &[char]) -> bool {
    row.iter().all(|&c| c == BLANK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riv_types::Direction;

    #[test]
    fn test_from_source_strips_and_pads() {
        let grid = Grid::from_source("\n╰─╮\n  │\n\n");
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.cell(Pos::new(0, 0)), '╰');
        assert_eq!(grid.cell(Pos::new(2, 1)), '│');
    }

    #[test]
    fn test_ragged_rows_padded() {
        let grid = Grid::from_source("╰────╮\n─┘");
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.cell(Pos::new(5, 1)), ' ');
    }

    #[test]
    fn test_neighbor_bounds() {
        let grid = Grid::from_source("╰╮\n╰┘");
        let corner = Pos::new(1, 1);
        assert_eq!(grid.neighbor(corner, Direction::Right), None);
        assert_eq!(grid.neighbor(corner, Direction::Down), None);
        assert_eq!(
            grid.neighbor(corner, Direction::Up),
            Some((Pos::new(1, 0), '╮'))
        );
    }

    #[test]
    fn test_slice_and_blank_checks() {
        let grid = Grid::from_source("abcd\nefgh\nijkl");
        let inner = grid.slice(1, 2, 0, 1);
        assert_eq!(inner.width(), 2);
        assert_eq!(inner.height(), 2);
        assert_eq!(inner.cell(Pos::new(0, 1)), 'f');

        let grid = Grid::from_source("a  \na  ");
        assert!(grid.col_blank(1, 0..2));
        assert!(!grid.col_blank(0, 0..2));
        assert!(grid.col_blank(9, 0..2));
    }
}
