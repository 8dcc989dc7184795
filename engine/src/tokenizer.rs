/// Split text on runs of the space character into non-empty words.
///
/// Only `' '` separates words; other whitespace is part of a word.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// A string is valid when it contains no ASCII control characters.
pub fn is_valid_text(text: &str) -> bool {
    !text.chars().any(|c| (c as u32) < 0x20)
}
