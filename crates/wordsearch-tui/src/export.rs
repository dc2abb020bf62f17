use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use wordsearch_core::{Position, Puzzle};

/// Render a printable puzzle sheet: the grid plus the word bank
pub fn puzzle_sheet(puzzle: &Puzzle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "WORD SEARCH  ({0} x {0})", puzzle.grid_size);
    let _ = writeln!(out);
    write_grid(&mut out, puzzle, |_| true);
    let _ = writeln!(out);
    let _ = writeln!(out, "Find these words:");

    let mut words = puzzle.words.clone();
    words.sort();
    for chunk in words.chunks(3) {
        let mut line = String::from("  ");
        for word in chunk {
            let _ = write!(line, "{:<17}", word);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Render the answer key: only placed letters survive, noise cells become
/// dots, and each word's start cell and direction are listed
pub fn answer_key(puzzle: &Puzzle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ANSWER KEY  ({0} x {0})", puzzle.grid_size);
    let _ = writeln!(out);

    write_grid(&mut out, puzzle, |pos| {
        puzzle
            .placed_words
            .iter()
            .any(|p| p.path.contains(&pos))
    });

    let _ = writeln!(out);
    let mut placements: Vec<_> = puzzle.placed_words.iter().collect();
    placements.sort_by(|a, b| a.word.cmp(&b.word));
    for placement in placements {
        let start = placement.first_cell();
        let _ = writeln!(
            out,
            "  {:<17} row {:>2}, col {:>2}, {}",
            placement.word,
            start.row + 1,
            start.col + 1,
            placement.direction
        );
    }
    out
}

fn write_grid<F: Fn(Position) -> bool>(out: &mut String, puzzle: &Puzzle, keep: F) {
    for (row, cells) in puzzle.grid.rows().enumerate() {
        let mut line = String::from("  ");
        for (col, &letter) in cells.iter().enumerate() {
            let shown = if keep(Position::new(row, col)) {
                letter
            } else {
                '.'
            };
            let _ = write!(line, "{} ", shown);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// Write both sheets next to each other under `dir`
pub fn export_to(dir: &Path, puzzle: &Puzzle) -> io::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;
    let sheet_path = dir.join("puzzle.txt");
    let key_path = dir.join("answer-key.txt");
    fs::write(&sheet_path, puzzle_sheet(puzzle))?;
    fs::write(&key_path, answer_key(puzzle))?;
    Ok((sheet_path, key_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordsearch_core::Generator;

    fn sample_puzzle() -> Puzzle {
        let words: Vec<String> = ["HARBOR", "JETTY", "BUOY", "PIER"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        Generator::with_seed(29).generate(10, &words).unwrap()
    }

    #[test]
    fn test_sheet_lists_every_word() {
        let puzzle = sample_puzzle();
        let sheet = puzzle_sheet(&puzzle);
        for word in &puzzle.words {
            assert!(sheet.contains(word), "sheet should list {}", word);
        }
        assert!(sheet.contains("WORD SEARCH  (10 x 10)"));
    }

    #[test]
    fn test_sheet_grid_has_one_line_per_row() {
        let puzzle = sample_puzzle();
        let sheet = puzzle_sheet(&puzzle);
        let grid_lines = sheet
            .lines()
            .filter(|l| l.starts_with("  ") && l.len() >= 2 * puzzle.grid_size)
            .count();
        assert!(grid_lines >= puzzle.grid_size);
    }

    #[test]
    fn test_answer_key_hides_noise_letters() {
        let puzzle = sample_puzzle();
        let key = answer_key(&puzzle);
        assert!(key.contains('.'), "noise cells should be dotted out");
        for placement in &puzzle.placed_words {
            let start = placement.first_cell();
            assert!(key.contains(&format!(
                "row {:>2}, col {:>2}",
                start.row + 1,
                start.col + 1
            )));
        }
    }

    #[test]
    fn test_answer_key_keeps_placed_letters() {
        let puzzle = sample_puzzle();
        let key = answer_key(&puzzle);
        // Every placed word's letters appear in the dotted grid section
        let placement = &puzzle.placed_words[0];
        let first_letter = placement.word.chars().next().unwrap();
        assert!(key.contains(first_letter));
    }
}
