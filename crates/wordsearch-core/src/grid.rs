use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Smallest supported grid size
pub const MIN_GRID_SIZE: usize = 10;
/// Largest supported grid size
pub const MAX_GRID_SIZE: usize = 25;

/// A cell coordinate (row, column), zero-based from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// Persisted as a two-element [row, col] sequence
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.row, self.col).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (row, col) = <(usize, usize)>::deserialize(deserializer)?;
        Ok(Self { row, col })
    }
}

/// One of the eight straight-line directions a word can run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl Direction {
    /// All eight directions
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::UpLeft,
    ];

    /// The unit step (delta row, delta col) for this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
            Direction::UpRight => (-1, 1),
            Direction::UpLeft => (-1, -1),
        }
    }

    /// Look up the direction for a unit step, if it is one of the eight
    pub fn from_delta(drow: isize, dcol: isize) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.delta() == (drow, dcol))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::DownRight => "down-right",
            Direction::DownLeft => "down-left",
            Direction::UpRight => "up-right",
            Direction::UpLeft => "up-left",
        };
        write!(f, "{}", label)
    }
}

// Persisted as a two-element [drow, dcol] sequence; anything outside the
// eight unit vectors is rejected on load
impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.delta().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (drow, dcol) = <(isize, isize)>::deserialize(deserializer)?;
        Direction::from_delta(drow, dcol).ok_or_else(|| {
            D::Error::custom(format!("invalid direction vector [{}, {}]", drow, dcol))
        })
    }
}

/// A square letter grid. Cells hold uppercase letters, or [`Grid::BLANK`]
/// while generation is still placing words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<char>>,
}

impl Grid {
    /// Sentinel for a cell no word has claimed yet
    pub const BLANK: char = ' ';

    /// Create a blank size x size grid
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![Self::BLANK; size]; size],
        }
    }

    /// Build a grid from prepared rows (tests and loaders)
    pub fn from_rows(cells: Vec<Vec<char>>) -> Self {
        Self { cells }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size() && pos.col < self.size()
    }

    /// The letter at `pos`, or `None` out of bounds
    pub fn get(&self, pos: Position) -> Option<char> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn set(&mut self, pos: Position, letter: char) {
        self.cells[pos.row][pos.col] = letter;
    }

    /// Concatenate the letters along a path, in path order
    pub fn letters_along(&self, path: &[Position]) -> String {
        path.iter().filter_map(|&pos| self.get(pos)).collect()
    }

    /// Whether every cell holds a letter (no blanks left)
    pub fn is_filled(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&c| c != Self::BLANK))
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (i, c) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Whether two cells lie on a common horizontal, vertical, or diagonal line
pub fn is_straight_line(a: Position, b: Position) -> bool {
    let drow = b.row as isize - a.row as isize;
    let dcol = b.col as isize - a.col as isize;
    drow == 0 || dcol == 0 || drow.abs() == dcol.abs()
}

/// The inclusive cell-by-cell line from `a` to `b`, clipped to a size x size
/// grid. The step is the per-axis sign of the delta; callers must have
/// checked [`is_straight_line`] first.
pub fn line_between(a: Position, b: Position, size: usize) -> Vec<Position> {
    let drow = b.row as isize - a.row as isize;
    let dcol = b.col as isize - a.col as isize;
    let steps = drow.abs().max(dcol.abs());

    let step_row = drow.signum();
    let step_col = dcol.signum();

    let mut path = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let row = a.row as isize + step_row * i;
        let col = a.col as isize + step_col * i;
        if row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size {
            path.push(Position::new(row as usize, col as usize));
        }
    }
    path
}
