use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based cell coordinates within a program or glyph grid.
///
/// `x` is the column, `y` the row, matching how glyphs are drawn and how
/// error messages report locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    /// Create a new position.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Translate by another position (used to map glyph-local coordinates
    /// back to program coordinates for error reporting).
    pub fn offset(self, by: Pos) -> Pos {
        Pos::new(self.x + by.x, self.y + by.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One of the four cardinal directions a strand can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The reverse direction — the way back along the strand.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `true` for left/right.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Step one cell in this direction from `pos`, if it stays on a grid of
    /// the given width/height.
    pub fn step(self, pos: Pos, width: usize, height: usize) -> Option<Pos> {
        match self {
            Direction::Up if pos.y > 0 => Some(Pos::new(pos.x, pos.y - 1)),
            Direction::Down if pos.y + 1 < height => Some(Pos::new(pos.x, pos.y + 1)),
            Direction::Left if pos.x > 0 => Some(Pos::new(pos.x - 1, pos.y)),
            Direction::Right if pos.x + 1 < width => Some(Pos::new(pos.x + 1, pos.y)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_step_stays_on_grid() {
        let p = Pos::new(0, 0);
        assert_eq!(Direction::Up.step(p, 3, 3), None);
        assert_eq!(Direction::Left.step(p, 3, 3), None);
        assert_eq!(Direction::Right.step(p, 3, 3), Some(Pos::new(1, 0)));
        assert_eq!(Direction::Down.step(p, 3, 3), Some(Pos::new(0, 1)));

        let edge = Pos::new(2, 2);
        assert_eq!(Direction::Right.step(edge, 3, 3), None);
        assert_eq!(Direction::Down.step(edge, 3, 3), None);
    }

    #[test]
    fn test_pos_display() {
        assert_eq!(format!("{}", Pos::new(4, 7)), "4,7");
    }

    #[test]
    fn test_direction_deserializes_lowercase() {
        let d: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(d, Direction::Down);
    }
}
