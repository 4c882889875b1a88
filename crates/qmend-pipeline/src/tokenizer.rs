// Tokenizer: query cleaning and token creation.
//
// Both functions are pure. `clean` isolates punctuation so that
// spell-checking operates on words only; `tokenize` splits the cleaned
// query and assigns stable 1-based positions.

use qmend_core::Token;

/// Insert a space before and after every character of `special_chars`,
/// so punctuation becomes its own token.
///
/// Note that reassembly does not reproduce the original punctuation
/// spacing: `"apan?"` cleans to `"apan ? "` and renders back as
/// `"apan ?"`. Isolated punctuation staying a space-separated unit is
/// the documented convention, not a bug.
pub fn clean(query: &str, special_chars: &str) -> String {
    let mut cleaned = String::with_capacity(query.len());
    for ch in query.chars() {
        if special_chars.contains(ch) {
            cleaned.push(' ');
            cleaned.push(ch);
            cleaned.push(' ');
        } else {
            cleaned.push(ch);
        }
    }
    cleaned
}

/// Split a cleaned query on spaces into ordered, unresolved tokens.
///
/// Empty fragments produced by consecutive delimiters are dropped, so
/// `order` is always a contiguous 1..=N sequence and reassembly is
/// single-spaced.
pub fn tokenize(cleaned: &str) -> Vec<Token> {
    cleaned
        .split(' ')
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(idx, fragment)| Token::new(fragment, idx + 1))
        .collect()
}
