//! Text tokenizer

/// Lower-case `text` and split it on runs of whitespace.
///
/// Never fails; empty or blank input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
