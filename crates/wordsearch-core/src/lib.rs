//! Core word-search engine.
//!
//! Generation builds a square letter grid from a validated word list by
//! random straight-line placement ([`Generator`]); solving runs through a
//! [`Session`] that turns pointer gestures into candidate paths and tracks
//! found words and hint markers. [`Puzzle`] is the persisted schema tying
//! the two together.

pub mod generator;
pub mod grid;
pub mod puzzle;
pub mod session;
pub mod words;

pub use generator::{GenerateError, Generator, GeneratorConfig, Placement};
pub use grid::{is_straight_line, line_between, Direction, Grid, Position};
pub use grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use puzzle::{Puzzle, PuzzleError};
pub use session::{HintOutcome, SelectionOutcome, Session};
pub use words::{validate_words, MAX_WORD_COUNT, MAX_WORD_LEN, MIN_WORD_COUNT, MIN_WORD_LEN};
