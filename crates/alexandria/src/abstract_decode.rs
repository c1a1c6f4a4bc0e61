//! Decode OpenAlex abstract inverted index to plaintext
//!
//! OpenAlex serves abstracts as inverted indexes for legal reasons:
//! ```json
//! {"Despite": [0], "growing": [1], "interest": [2, 50], ...}
//! ```
//!
//! This module reconstructs the original text by position.

use std::collections::HashMap;

/// Word -> positions map as served in `abstract_inverted_index`
pub type InvertedIndex = HashMap<String, Vec<usize>>;

/// Decode inverted index to plaintext abstract
///
/// Words are emitted in position order and joined by single spaces.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use alexandria::abstract_decode::decode_inverted_index;
///
/// let index = HashMap::from([
///     ("Hello".to_string(), vec![0]),
///     ("world".to_string(), vec![1]),
/// ]);
/// assert_eq!(decode_inverted_index(&index), "Hello world");
/// ```
pub fn decode_inverted_index(index: &InvertedIndex) -> String {
    let mut pairs: Vec<(usize, &str)> = index
        .iter()
        .flat_map(|(word, positions)| positions.iter().map(move |&p| (p, word.as_str())))
        .collect();

    pairs.sort_unstable_by_key(|(pos, _)| *pos);

    let words: Vec<&str> = pairs.into_iter().map(|(_, w)| w).collect();
    words.join(" ")
}
