use crate::generator::Placement;
use crate::grid::{Grid, MAX_GRID_SIZE, MIN_GRID_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A malformed persisted puzzle. Loaders surface this and leave any
/// in-memory puzzle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("grid size {size} is outside the supported {MIN_GRID_SIZE}-{MAX_GRID_SIZE} range")]
    SizeOutOfRange { size: usize },

    #[error("grid has {rows} rows but declares size {declared}")]
    SizeMismatch { rows: usize, declared: usize },

    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("grid cell ({row}, {col}) holds {cell:?}, expected an uppercase letter")]
    InvalidCell { row: usize, col: usize, cell: char },

    #[error("placement path for {word:?} has {actual} cells, expected {expected}")]
    PathLength {
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("placement for {word:?} leaves the grid at ({row}, {col})")]
    OutOfBounds { word: String, row: usize, col: usize },

    #[error("placement path for {word:?} does not step along its direction")]
    CrookedPath { word: String },

    #[error("letters along the path for {word:?} spell {found:?}")]
    LetterMismatch { word: String, found: String },

    #[error("word {word:?} has {count} placements, expected exactly one")]
    PlacementCount { word: String, count: usize },

    #[error("placement for {word:?} has no matching entry in the word list")]
    UnlistedWord { word: String },
}

/// A generated puzzle: the filled grid, the target word list, and where
/// each word was placed. This struct is the persistence schema; it is
/// serialized verbatim and reloaded with [`Puzzle::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Grid,
    pub words: Vec<String>,
    pub placed_words: Vec<Placement>,
    pub grid_size: usize,
}

impl Puzzle {
    /// Re-check every structural invariant after deserialization.
    ///
    /// Coordinates arrive as generic number pairs; this confirms they fall
    /// inside `[0, grid_size)`, that each path steps along its recorded
    /// direction and spells its word, and that words and placements match
    /// one-to-one.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(PuzzleError::SizeOutOfRange {
                size: self.grid_size,
            });
        }

        if self.grid.size() != self.grid_size {
            return Err(PuzzleError::SizeMismatch {
                rows: self.grid.size(),
                declared: self.grid_size,
            });
        }

        for (row, cells) in self.grid.rows().enumerate() {
            if cells.len() != self.grid_size {
                return Err(PuzzleError::RaggedRow {
                    row,
                    len: cells.len(),
                    expected: self.grid_size,
                });
            }
            for (col, &cell) in cells.iter().enumerate() {
                if !cell.is_ascii_uppercase() {
                    return Err(PuzzleError::InvalidCell { row, col, cell });
                }
            }
        }

        for placement in &self.placed_words {
            let word = &placement.word;

            if placement.path.len() != word.chars().count() {
                return Err(PuzzleError::PathLength {
                    word: word.clone(),
                    expected: word.chars().count(),
                    actual: placement.path.len(),
                });
            }

            for pos in &placement.path {
                if pos.row >= self.grid_size || pos.col >= self.grid_size {
                    return Err(PuzzleError::OutOfBounds {
                        word: word.clone(),
                        row: pos.row,
                        col: pos.col,
                    });
                }
            }

            let (drow, dcol) = placement.direction.delta();
            for pair in placement.path.windows(2) {
                let step_row = pair[1].row as isize - pair[0].row as isize;
                let step_col = pair[1].col as isize - pair[0].col as isize;
                if (step_row, step_col) != (drow, dcol) {
                    return Err(PuzzleError::CrookedPath { word: word.clone() });
                }
            }

            let found = self.grid.letters_along(&placement.path);
            if &found != word {
                return Err(PuzzleError::LetterMismatch {
                    word: word.clone(),
                    found,
                });
            }

            if !self.words.contains(word) {
                return Err(PuzzleError::UnlistedWord { word: word.clone() });
            }
        }

        for word in &self.words {
            let count = self
                .placed_words
                .iter()
                .filter(|p| &p.word == word)
                .count();
            if count != 1 {
                return Err(PuzzleError::PlacementCount {
                    word: word.clone(),
                    count,
                });
            }
        }

        Ok(())
    }

    /// Look up where a word was placed
    pub fn placement_for(&self, word: &str) -> Option<&Placement> {
        self.placed_words.iter().find(|p| p.word == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    fn sample_puzzle() -> Puzzle {
        let words: Vec<String> = ["CORAL", "WAVE", "FOAM", "SALT"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        Generator::with_seed(11).generate(10, &words).unwrap()
    }

    #[test]
    fn test_generated_puzzle_validates() {
        assert_eq!(sample_puzzle().validate(), Ok(()));
    }

    #[test]
    fn test_save_load_round_trip_is_identical() {
        let puzzle = sample_puzzle();
        let json = serde_json::to_string(&puzzle).unwrap();
        let loaded: Puzzle = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, puzzle);
        assert_eq!(loaded.validate(), Ok(()));
        // Re-saving without solving reproduces the same bytes
        assert_eq!(serde_json::to_string(&loaded).unwrap(), json);
    }

    #[test]
    fn test_placement_path_round_trips_as_pairs() {
        let puzzle = sample_puzzle();
        let placement = &puzzle.placed_words[0];
        let json = serde_json::to_string(&placement.path).unwrap();
        let back: Vec<crate::Position> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, placement.path);
    }

    #[test]
    fn test_schema_field_names() {
        let puzzle = sample_puzzle();
        let value: serde_json::Value = serde_json::to_value(&puzzle).unwrap();
        assert!(value.get("grid").is_some());
        assert!(value.get("words").is_some());
        assert!(value.get("placed_words").is_some());
        assert!(value.get("grid_size").is_some());

        let first = &value["placed_words"][0];
        assert!(first.get("word").is_some());
        assert!(first["path"][0].is_array());
        assert!(first["direction"].is_array());
    }

    #[test]
    fn test_tampered_letter_is_rejected() {
        let mut puzzle = sample_puzzle();
        let pos = puzzle.placed_words[0].path[0];
        let word = puzzle.placed_words[0].word.clone();
        let wrong = if word.starts_with('Z') { 'Q' } else { 'Z' };
        puzzle.grid.set(pos, wrong);
        assert!(matches!(
            puzzle.validate(),
            Err(PuzzleError::LetterMismatch { .. })
        ));
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected() {
        let mut puzzle = sample_puzzle();
        puzzle.placed_words[0].path[0] = crate::Position::new(99, 0);
        let err = puzzle.validate().unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::OutOfBounds { row: 99, .. } | PuzzleError::CrookedPath { .. }
        ));
    }

    #[test]
    fn test_undersized_grid_is_rejected() {
        let words: Vec<String> = ["HAT", "RUG"].iter().map(|w| w.to_string()).collect();
        let puzzle = Generator::with_seed(13).generate(9, &words).unwrap();
        assert_eq!(
            puzzle.validate(),
            Err(PuzzleError::SizeOutOfRange { size: 9 })
        );
    }

    #[test]
    fn test_declared_size_must_match() {
        let mut puzzle = sample_puzzle();
        puzzle.grid_size = 12;
        assert!(matches!(
            puzzle.validate(),
            Err(PuzzleError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_placement_is_rejected() {
        let mut puzzle = sample_puzzle();
        puzzle.placed_words.remove(0);
        assert!(matches!(
            puzzle.validate(),
            Err(PuzzleError::PlacementCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_blank_cell_is_rejected() {
        let mut puzzle = sample_puzzle();
        puzzle.grid.set(crate::Position::new(9, 9), Grid::BLANK);
        let result = puzzle.validate();
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidCell { .. }) | Err(PuzzleError::LetterMismatch { .. })
        ));
    }
}
