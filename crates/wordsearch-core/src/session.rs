use crate::grid::{is_straight_line, line_between, Grid, Position};
use crate::puzzle::Puzzle;
use crate::words::MIN_WORD_LEN;
use std::collections::{BTreeSet, HashSet};

/// What finishing a drag produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selected letters matched an unfound word (read forward or
    /// backward); `solved` is set when it was the last one
    Found { word: String, solved: bool },
    /// The letters matched nothing, or the selection was a bare click
    NoMatch,
    /// No drag was in progress
    NotDragging,
}

/// What a hint request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// The hint set now holds exactly the word's first cell
    Revealed(Position),
    /// Ignored: the word is already found
    AlreadyFound,
    /// Ignored: the word is not in this puzzle
    UnknownWord,
}

/// A drag in progress: the anchor cell, the cell the pointer last reached,
/// and the straight-line path between them
#[derive(Debug, Clone)]
struct Drag {
    anchor: Position,
    current: Position,
    path: Vec<Position>,
}

/// Solving-session state over a frozen puzzle.
///
/// The grid never changes after generation; the session only tracks which
/// words were found (as unordered cell-sets), the current hint marker, and
/// the transient drag path. Pointer events drive it through
/// [`begin_selection`](Session::begin_selection),
/// [`extend_selection`](Session::extend_selection), and
/// [`end_selection`](Session::end_selection).
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    found_words: HashSet<String>,
    unfound_words: HashSet<String>,
    found_paths: HashSet<BTreeSet<Position>>,
    hint_paths: HashSet<BTreeSet<Position>>,
    drag: Option<Drag>,
}

impl Session {
    /// Start a fresh session: nothing found, no hints, no drag
    pub fn new(puzzle: Puzzle) -> Self {
        let unfound_words = puzzle.words.iter().cloned().collect();
        Self {
            puzzle,
            found_words: HashSet::new(),
            unfound_words,
            found_paths: HashSet::new(),
            hint_paths: HashSet::new(),
            drag: None,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn grid(&self) -> &Grid {
        &self.puzzle.grid
    }

    /// The target word list, in puzzle order
    pub fn words(&self) -> &[String] {
        &self.puzzle.words
    }

    pub fn is_word_found(&self, word: &str) -> bool {
        self.found_words.contains(word)
    }

    pub fn found_count(&self) -> usize {
        self.found_words.len()
    }

    pub fn is_solved(&self) -> bool {
        self.unfound_words.is_empty()
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The current drag path, if any
    pub fn drag_path(&self) -> Option<&[Position]> {
        self.drag.as_ref().map(|d| d.path.as_slice())
    }

    pub fn is_found_cell(&self, pos: Position) -> bool {
        self.found_paths.iter().any(|path| path.contains(&pos))
    }

    pub fn is_hint_cell(&self, pos: Position) -> bool {
        self.hint_paths.iter().any(|path| path.contains(&pos))
    }

    pub fn is_drag_cell(&self, pos: Position) -> bool {
        self.drag
            .as_ref()
            .map(|d| d.path.contains(&pos))
            .unwrap_or(false)
    }

    /// Start a new candidate path at `cell`, discarding any stale drag.
    ///
    /// The press itself is the "grid touched" signal: the caller decides
    /// what to do with open hints (the frontend clears them on press).
    pub fn begin_selection(&mut self, cell: Position) {
        if !self.puzzle.grid.in_bounds(cell) {
            return;
        }
        self.drag = Some(Drag {
            anchor: cell,
            current: cell,
            path: vec![cell],
        });
    }

    /// Grow the candidate path toward `cell`.
    ///
    /// Only straight extensions count: if `cell` does not share a row,
    /// column, or diagonal with the anchor the gesture is ignored and the
    /// last valid path stays. Otherwise the path becomes the inclusive
    /// line from the anchor to `cell`, clipped to the grid.
    pub fn extend_selection(&mut self, cell: Position) {
        let size = self.puzzle.grid.size();
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if cell == drag.current {
            return;
        }
        if !is_straight_line(drag.anchor, cell) {
            return;
        }
        drag.current = cell;
        drag.path = line_between(drag.anchor, cell, size);
    }

    /// Finish the drag and try to match the selected letters.
    ///
    /// The candidate string is the letters along the path in traversal
    /// order; it matches a word either directly or reversed. A bare click
    /// (single-cell path) can never match since words are at least two
    /// letters. The drag is cleared whatever the outcome.
    pub fn end_selection(&mut self) -> SelectionOutcome {
        let Some(drag) = self.drag.take() else {
            return SelectionOutcome::NotDragging;
        };
        if drag.path.len() < MIN_WORD_LEN {
            return SelectionOutcome::NoMatch;
        }

        let forward = self.puzzle.grid.letters_along(&drag.path);
        let backward: String = forward.chars().rev().collect();

        let word = if self.unfound_words.contains(&forward) {
            forward
        } else if self.unfound_words.contains(&backward) {
            backward
        } else {
            return SelectionOutcome::NoMatch;
        };

        self.unfound_words.remove(&word);
        self.found_words.insert(word.clone());
        self.found_paths.insert(drag.path.into_iter().collect());

        SelectionOutcome::Found {
            solved: self.unfound_words.is_empty(),
            word,
        }
    }

    /// Replace the hint set with the first cell of `word`'s placement.
    ///
    /// Requests for found or unknown words are reported back, not errors.
    pub fn request_hint(&mut self, word: &str) -> HintOutcome {
        if self.found_words.contains(word) {
            return HintOutcome::AlreadyFound;
        }
        let Some(placement) = self.puzzle.placement_for(word) else {
            return HintOutcome::UnknownWord;
        };

        let first = placement.first_cell();
        self.hint_paths = HashSet::from([BTreeSet::from([first])]);
        HintOutcome::Revealed(first)
    }

    /// Drop every hint marker
    pub fn clear_hints(&mut self) {
        self.hint_paths.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Placement;
    use crate::grid::Direction;

    /// A 6x6 fixture with CAT across row 0 and DOG down column 5
    fn fixture() -> Session {
        let rows = [
            "CATDOG", "QWERTD", "ASDFGO", "ZXCVBG", "POIUYT", "LKJHGF",
        ];
        let grid = Grid::from_rows(rows.iter().map(|r| r.chars().collect()).collect());
        let puzzle = Puzzle {
            grid,
            words: vec!["CAT".to_string(), "DOG".to_string()],
            placed_words: vec![
                Placement {
                    word: "CAT".to_string(),
                    path: vec![
                        Position::new(0, 0),
                        Position::new(0, 1),
                        Position::new(0, 2),
                    ],
                    direction: Direction::Right,
                },
                Placement {
                    word: "DOG".to_string(),
                    path: vec![
                        Position::new(0, 3),
                        Position::new(0, 4),
                        Position::new(0, 5),
                    ],
                    direction: Direction::Right,
                },
            ],
            grid_size: 6,
        };
        Session::new(puzzle)
    }

    #[test]
    fn test_horizontal_drag_builds_full_path() {
        let mut session = fixture();
        session.begin_selection(Position::new(2, 2));
        session.extend_selection(Position::new(2, 5));
        assert_eq!(
            session.drag_path().unwrap(),
            &[
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(2, 4),
                Position::new(2, 5),
            ]
        );
    }

    #[test]
    fn test_vertical_drag_builds_full_path() {
        let mut session = fixture();
        session.begin_selection(Position::new(2, 2));
        session.extend_selection(Position::new(5, 2));
        assert_eq!(
            session.drag_path().unwrap(),
            &[
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(4, 2),
                Position::new(5, 2),
            ]
        );
    }

    #[test]
    fn test_non_straight_extension_keeps_last_path() {
        let mut session = fixture();
        session.begin_selection(Position::new(2, 2));
        session.extend_selection(Position::new(2, 4));
        session.extend_selection(Position::new(5, 4));
        assert_eq!(
            session.drag_path().unwrap(),
            &[Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)]
        );
    }

    #[test]
    fn test_extension_without_begin_is_ignored() {
        let mut session = fixture();
        session.extend_selection(Position::new(2, 4));
        assert!(session.drag_path().is_none());
        assert_eq!(session.end_selection(), SelectionOutcome::NotDragging);
    }

    #[test]
    fn test_forward_match_marks_word_found() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        let outcome = session.end_selection();
        assert_eq!(
            outcome,
            SelectionOutcome::Found {
                word: "CAT".to_string(),
                solved: false,
            }
        );
        assert!(session.is_word_found("CAT"));
        assert!(session.is_found_cell(Position::new(0, 1)));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_reversed_selection_matches_by_string_reversal() {
        // Dragging DOG right-to-left reads "GOD"; the reversal check
        // still credits DOG
        let mut session = fixture();
        session.begin_selection(Position::new(0, 5));
        session.extend_selection(Position::new(0, 3));
        let outcome = session.end_selection();
        assert_eq!(
            outcome,
            SelectionOutcome::Found {
                word: "DOG".to_string(),
                solved: false,
            }
        );
    }

    #[test]
    fn test_reversed_word_set_entry_matches_forward_path() {
        // Word set holds "TAC"; selecting C-A-T matches it via reversal
        let mut session = fixture();
        session.puzzle.words = vec!["TAC".to_string(), "DOG".to_string()];
        session.unfound_words = session.puzzle.words.iter().cloned().collect();
        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        let outcome = session.end_selection();
        assert_eq!(
            outcome,
            SelectionOutcome::Found {
                word: "TAC".to_string(),
                solved: false,
            }
        );
    }

    #[test]
    fn test_found_path_matching_is_order_independent() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 2));
        session.extend_selection(Position::new(0, 0));
        assert!(matches!(
            session.end_selection(),
            SelectionOutcome::Found { .. }
        ));
        // Same cells, either traversal order
        assert!(session.is_found_cell(Position::new(0, 0)));
        assert!(session.is_found_cell(Position::new(0, 2)));
    }

    #[test]
    fn test_bare_click_never_matches() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 0));
        assert_eq!(session.end_selection(), SelectionOutcome::NoMatch);
        assert!(!session.is_word_found("CAT"));
    }

    #[test]
    fn test_refinding_a_found_word_is_no_match() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        session.end_selection();

        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        assert_eq!(session.end_selection(), SelectionOutcome::NoMatch);
        assert_eq!(session.found_count(), 1);
    }

    #[test]
    fn test_last_word_reports_solved() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        session.end_selection();

        session.begin_selection(Position::new(0, 3));
        session.extend_selection(Position::new(0, 5));
        assert_eq!(
            session.end_selection(),
            SelectionOutcome::Found {
                word: "DOG".to_string(),
                solved: true,
            }
        );
        assert!(session.is_solved());
    }

    #[test]
    fn test_hint_is_first_cell_and_replaces_previous() {
        let mut session = fixture();
        assert_eq!(
            session.request_hint("CAT"),
            HintOutcome::Revealed(Position::new(0, 0))
        );
        assert!(session.is_hint_cell(Position::new(0, 0)));

        // A second request swaps the marker rather than accumulating
        assert_eq!(
            session.request_hint("DOG"),
            HintOutcome::Revealed(Position::new(0, 3))
        );
        assert!(session.is_hint_cell(Position::new(0, 3)));
        assert!(!session.is_hint_cell(Position::new(0, 0)));
    }

    #[test]
    fn test_hint_determinism_regardless_of_prior_hints() {
        let mut session = fixture();
        session.request_hint("DOG");
        assert_eq!(
            session.request_hint("CAT"),
            HintOutcome::Revealed(Position::new(0, 0))
        );
    }

    #[test]
    fn test_hint_no_ops_are_signalled() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        session.end_selection();

        assert_eq!(session.request_hint("CAT"), HintOutcome::AlreadyFound);
        assert_eq!(session.request_hint("EMU"), HintOutcome::UnknownWord);
    }

    #[test]
    fn test_clear_hints_empties_the_set() {
        let mut session = fixture();
        session.request_hint("CAT");
        session.clear_hints();
        assert!(!session.is_hint_cell(Position::new(0, 0)));
    }

    #[test]
    fn test_found_paths_survive_drag_cycles() {
        let mut session = fixture();
        session.begin_selection(Position::new(0, 0));
        session.extend_selection(Position::new(0, 2));
        session.end_selection();

        // A later fruitless drag does not disturb the found overlay
        session.begin_selection(Position::new(3, 0));
        session.extend_selection(Position::new(3, 3));
        session.end_selection();
        assert!(session.is_found_cell(Position::new(0, 0)));
    }
}
