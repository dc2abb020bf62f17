//! Basic example of using the word-search engine

use wordsearch_core::{validate_words, Generator, HintOutcome, Session, MAX_WORD_COUNT};

fn main() {
    // Validate a raw word list the same way the UI would
    let raw = ["compass", "lantern", "summit", "ridge", "trail", "cairn"];
    let words = validate_words(raw, MAX_WORD_COUNT);
    println!("Placing {} words...\n", words.len());

    // Generate a 12x12 puzzle
    let mut generator = Generator::new();
    let puzzle = match generator.generate_with_retries(12, &words) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("Generation failed: {}", err);
            return;
        }
    };

    println!("{}", puzzle.grid);

    println!("Find these words:");
    for word in &puzzle.words {
        println!("  {}", word);
    }

    // Show where the first word hides
    let mut session = Session::new(puzzle);
    let first = session.words()[0].clone();
    if let HintOutcome::Revealed(cell) = session.request_hint(&first) {
        println!(
            "\nHint: {} starts at row {}, column {}",
            first,
            cell.row + 1,
            cell.col + 1
        );
    }
}
