//! Splits raw input lines into whitespace-delimited tokens.
//!
//! There is no quoting, escaping or substitution of any kind: a token is a
//! maximal run of non-delimiter characters, and runs of delimiters collapse.

/// Token separators: the ASCII whitespace characters plus the alert (BEL)
/// control character, the classic shell-splitting delimiter set.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Split a line into its tokens.
///
/// Tokens are copied out of the line, so the result stays valid after the
/// line buffer is dropped. An empty or all-delimiter line yields an empty
/// vector.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
