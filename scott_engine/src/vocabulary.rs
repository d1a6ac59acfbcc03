//! Word lookup against a verb or noun dictionary.
//!
//! Words are compared on their first `word_length` characters only, with
//! shorter words padded by spaces, so "NORTH", "NOR" and "NORTHWARD" are the
//! same word in a game with a word length of 3.

use scott_data::Word;

/// Find `text` in `words` and return the index of the word it means.
///
/// A synonym resolves to the nearest non-synonym before it. Returns `None`
/// when nothing matches, which is distinct from index 0.
///
/// ```
/// use scott_data::Word;
/// use scott_engine::vocabulary::lookup;
///
/// let verbs = [Word::new("GO"), Word::synonym("TRAVEL"), Word::new("LOOK")];
/// assert_eq!(lookup(&verbs, "travel", 3), Some(0));
/// assert_eq!(lookup(&verbs, "LOOK", 3), Some(2));
/// assert_eq!(lookup(&verbs, "JUMP", 3), None);
/// ```
pub fn lookup(words: &[Word], text: &str, word_length: usize) -> Option<usize> {
    let wanted = comparison_key(text, word_length);
    let found = words
        .iter()
        .position(|word| comparison_key(&word.text, word_length) == wanted)?;
    Some(canonical(words, found))
}

/// True when two words are the same word at `word_length`.
pub fn same_word(a: &str, b: &str, word_length: usize) -> bool {
    comparison_key(a, word_length) == comparison_key(b, word_length)
}

/// Walk back from a synonym to the word it stands for.
fn canonical(words: &[Word], mut index: usize) -> usize {
    while index > 0 && words[index].is_synonym {
        index -= 1;
    }
    index
}

fn comparison_key(text: &str, word_length: usize) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .chain(std::iter::repeat(' '))
        .take(word_length)
        .collect()
}
