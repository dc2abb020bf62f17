use crate::grid::{Direction, Grid, Position};
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for puzzle generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Random (cell, direction) candidates tried per word before the run fails
    pub max_placement_attempts: usize,
    /// Whole-grid attempts made by [`Generator::generate_with_retries`]
    pub max_generation_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_placement_attempts: 100,
            max_generation_attempts: 50,
        }
    }
}

/// Why a generation run produced no puzzle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A word is longer than the grid edge, so no run can ever place it
    #[error("word {word:?} is {len} letters long and cannot fit in a {size}x{size} grid")]
    WordTooLong { word: String, len: usize, size: usize },

    /// The retry budget ran out for a word; the whole run is discarded
    #[error("no valid placement found for {word:?} after {attempts} attempts")]
    NoFit { word: String, attempts: usize },
}

impl GenerateError {
    /// Whether another run with a fresh random stream could still succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerateError::NoFit { .. })
    }
}

/// A word's committed location on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub path: Vec<Position>,
    pub direction: Direction,
}

impl Placement {
    /// The cell holding the word's first letter
    pub fn first_cell(&self) -> Position {
        self.path[0]
    }
}

/// Word-search puzzle generator
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Run a single generation attempt.
    ///
    /// Places every word into a blank `size` x `size` grid along a random
    /// straight line, longest word first, allowing crossings where letters
    /// agree, then fills the leftover cells with noise letters. Words must
    /// already be validated (uppercase, deduplicated, length-bounded); only
    /// the length-versus-grid constraint is re-checked here. Failure is
    /// all-or-nothing: a partial grid is never returned.
    pub fn generate(&mut self, size: usize, words: &[String]) -> Result<Puzzle, GenerateError> {
        for word in words {
            let len = word.chars().count();
            if len > size {
                return Err(GenerateError::WordTooLong {
                    word: word.clone(),
                    len,
                    size,
                });
            }
        }

        // Longest first: long words have the fewest valid placements and
        // should claim cells before the grid gets crowded
        let mut order: Vec<&str> = words.iter().map(String::as_str).collect();
        order.sort_by_key(|w| std::cmp::Reverse(w.len()));

        let mut grid = Grid::new(size);
        let mut placements: Vec<Placement> = Vec::with_capacity(order.len());

        for word in order {
            let mut placed = false;

            for _ in 0..self.config.max_placement_attempts {
                let start = Position::new(self.rng.next_usize(size), self.rng.next_usize(size));
                let direction = Direction::ALL[self.rng.next_usize(Direction::ALL.len())];

                if let Some(path) = straight_path(word.len(), start, direction, size) {
                    if can_place(&grid, word, &path) {
                        for (letter, &pos) in word.chars().zip(path.iter()) {
                            grid.set(pos, letter);
                        }
                        placements.push(Placement {
                            word: word.to_string(),
                            path,
                            direction,
                        });
                        placed = true;
                        break;
                    }
                }
            }

            if !placed {
                return Err(GenerateError::NoFit {
                    word: word.to_string(),
                    attempts: self.config.max_placement_attempts,
                });
            }
        }

        self.fill_blanks(&mut grid);

        Ok(Puzzle {
            grid,
            words: words.to_vec(),
            placed_words: placements,
            grid_size: size,
        })
    }

    /// Retry whole generation runs up to the configured outer budget.
    ///
    /// An unretryable failure (a word longer than the grid) is returned
    /// immediately; otherwise the last run's error is reported once the
    /// budget is spent.
    pub fn generate_with_retries(
        &mut self,
        size: usize,
        words: &[String],
    ) -> Result<Puzzle, GenerateError> {
        let mut last = None;
        for _ in 0..self.config.max_generation_attempts {
            match self.generate(size, words) {
                Ok(puzzle) => return Ok(puzzle),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => last = Some(err),
            }
        }
        Err(last.unwrap_or(GenerateError::NoFit {
            word: String::new(),
            attempts: 0,
        }))
    }

    /// Fill every remaining blank cell with a uniformly random letter
    fn fill_blanks(&mut self, grid: &mut Grid) {
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let pos = Position::new(row, col);
                if grid.get(pos) == Some(Grid::BLANK) {
                    grid.set(pos, self.rng.next_letter());
                }
            }
        }
    }
}

/// The cells a word of `len` letters would cover from `start` in
/// `direction`, or `None` if any of them falls outside the grid
fn straight_path(
    len: usize,
    start: Position,
    direction: Direction,
    size: usize,
) -> Option<Vec<Position>> {
    let (drow, dcol) = direction.delta();
    let mut path = Vec::with_capacity(len);

    for i in 0..len as isize {
        let row = start.row as isize + drow * i;
        let col = start.col as isize + dcol * i;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            return None;
        }
        path.push(Position::new(row as usize, col as usize));
    }
    Some(path)
}

/// A candidate is accepted iff every covered cell is blank or already holds
/// the matching letter (crossings welcome)
fn can_place(grid: &Grid, word: &str, path: &[Position]) -> bool {
    word.chars()
        .zip(path.iter())
        .all(|(letter, &pos)| matches!(grid.get(pos), Some(c) if c == Grid::BLANK || c == letter))
}

/// Simple PRNG for no-std compatibility
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        // Use getrandom for WASM-compatible random seeding
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: use a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        let seed = u64::from_le_bytes(seed_bytes);
        Self::with_seed(seed)
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        // PCG-like PRNG
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    fn next_letter(&mut self) -> char {
        (b'A' + self.next_usize(26) as u8) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_generate_places_every_word_once() {
        let list = words(&["CRANE", "ORBIT", "PLUM", "JAZZ", "VOW"]);
        let mut generator = Generator::with_seed(42);
        let puzzle = generator.generate(12, &list).unwrap();

        assert_eq!(puzzle.placed_words.len(), list.len());
        for word in &list {
            let count = puzzle
                .placed_words
                .iter()
                .filter(|p| &p.word == word)
                .count();
            assert_eq!(count, 1, "{} should be placed exactly once", word);
        }
    }

    #[test]
    fn test_generate_paths_spell_their_words() {
        let list = words(&["GLACIER", "STONE", "FERN", "OAK"]);
        let mut generator = Generator::with_seed(7);
        let puzzle = generator.generate(10, &list).unwrap();

        for placement in &puzzle.placed_words {
            assert_eq!(placement.path.len(), placement.word.len());
            assert_eq!(puzzle.grid.letters_along(&placement.path), placement.word);
            for pos in &placement.path {
                assert!(pos.row < 10 && pos.col < 10);
            }
        }
    }

    #[test]
    fn test_generate_leaves_no_blanks() {
        let list = words(&["ANCHOR", "TIDE", "REEF", "KELP"]);
        let mut generator = Generator::with_seed(99);
        let puzzle = generator.generate(10, &list).unwrap();
        assert!(puzzle.grid.is_filled());
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let list = words(&["MAPLE", "BIRCH", "CEDAR", "PINE"]);
        let a = Generator::with_seed(1234).generate(11, &list).unwrap();
        let b = Generator::with_seed(1234).generate(11, &list).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_word_longer_than_grid_fails_whole_run() {
        let list = words(&["EXTRAVAGANZA", "CAT"]);
        let mut generator = Generator::with_seed(5);
        let err = generator.generate(10, &list).unwrap_err();
        assert_eq!(
            err,
            GenerateError::WordTooLong {
                word: "EXTRAVAGANZA".to_string(),
                len: 12,
                size: 10,
            }
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_edge_length_word_still_fits() {
        // A word exactly as long as the grid edge has valid placements
        let list = words(&["ABCDEFGHIJ"]);
        let mut generator = Generator::with_seed(3);
        let puzzle = generator.generate(10, &list).unwrap();
        assert_eq!(puzzle.placed_words.len(), 1);
    }

    #[test]
    fn test_overcrowded_grid_reports_no_fit() {
        // Four disjoint-letter 3-letter words cannot all fit in a 3x3 grid
        let list = words(&["ABC", "DEF", "GHI", "JKL"]);
        let mut generator = Generator::with_seed(21);
        let err = generator.generate(3, &list).unwrap_err();
        assert!(matches!(err, GenerateError::NoFit { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_retries_stop_on_unretryable_error() {
        let list = words(&["TOOLONGFORTHEGRID"]);
        let mut generator = Generator::with_seed(8);
        let err = generator.generate_with_retries(10, &list).unwrap_err();
        assert!(matches!(err, GenerateError::WordTooLong { .. }));
    }

    #[test]
    fn test_crossings_share_letters() {
        let list = words(&["RIVER", "EVER", "RIDGE", "GROVE", "DELTA"]);
        let mut generator = Generator::with_seed(2);
        let puzzle = generator.generate(10, &list).unwrap();

        // Wherever two placements share a cell, they agree on its letter
        for (i, a) in puzzle.placed_words.iter().enumerate() {
            for b in puzzle.placed_words.iter().skip(i + 1) {
                for (ai, pa) in a.path.iter().enumerate() {
                    for (bi, pb) in b.path.iter().enumerate() {
                        if pa == pb {
                            assert_eq!(
                                a.word.as_bytes()[ai],
                                b.word.as_bytes()[bi],
                                "{} and {} disagree at {:?}",
                                a.word,
                                b.word,
                                pa
                            );
                        }
                    }
                }
            }
        }
    }
}
