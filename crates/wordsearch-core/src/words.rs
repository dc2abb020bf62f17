use std::collections::HashSet;

/// Shortest accepted word
pub const MIN_WORD_LEN: usize = 2;
/// Longest accepted word
pub const MAX_WORD_LEN: usize = 15;
/// Fewest words a puzzle should carry
pub const MIN_WORD_COUNT: usize = 4;
/// Most words a puzzle may carry
pub const MAX_WORD_COUNT: usize = 15;

/// Normalize and filter a raw word list.
///
/// Each entry is trimmed and uppercased, then kept only if it is 2-15
/// ASCII letters and not a case-insensitive duplicate of an earlier entry.
/// The result is truncated to `max_count`, preserving input order. The same
/// rule applies to manual entry and to suggested word lists.
pub fn validate_words<'a, I>(lines: I, max_count: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut validated = Vec::new();

    for line in lines {
        let word = line.trim().to_uppercase();
        let len = word.chars().count();
        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len) {
            continue;
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        if !seen.insert(word.clone()) {
            continue;
        }
        validated.push(word);
        if validated.len() == max_count {
            break;
        }
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_uppercases() {
        let words = validate_words(["  cat ", "Dog", "FERRET"], MAX_WORD_COUNT);
        assert_eq!(words, vec!["CAT", "DOG", "FERRET"]);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let words = validate_words(["A", "OK", "ABCDEFGHIJKLMNO", "ABCDEFGHIJKLMNOP"], 10);
        assert_eq!(words, vec!["OK", "ABCDEFGHIJKLMNO"]);
    }

    #[test]
    fn test_rejects_non_alphabetic() {
        let words = validate_words(["C3PO", "R2-D2", "", "  ", "DROID"], 10);
        assert_eq!(words, vec!["DROID"]);
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let words = validate_words(["Cat", "CAT", "cAt", "dog"], 10);
        assert_eq!(words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_truncates_to_max_count() {
        let input = ["AA", "BB", "CC", "DD", "EE"];
        let words = validate_words(input, 3);
        assert_eq!(words, vec!["AA", "BB", "CC"]);
    }
}
