use crate::document::DocId;
use std::collections::BTreeMap;

/// Inverted index: word -> (document id -> term frequency).
///
/// Term frequency is the word's occurrence count divided by the total
/// word count of the document, so every stored value is in (0, 1].
/// Ordered maps keep query evaluation deterministic.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<DocId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one document's words. A document with no words leaves the
    /// index untouched.
    pub fn add_document(&mut self, id: DocId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let total = words.len() as f64;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in words {
            *counts.entry(word).or_insert(0) += 1;
        }
        for (word, count) in counts {
            self.postings
                .entry(word.to_string())
                .or_default()
                .insert(id, count as f64 / total);
        }
    }

    /// Documents containing `word`, with their term frequencies.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.postings.contains_key(word)
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, |docs| docs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_frequency_is_count_over_total() {
        let mut index = InvertedIndex::new();
        index.add_document(1, &["fluffy", "cat", "fluffy", "tail"]);

        let fluffy = index.postings("fluffy").unwrap();
        assert_eq!(fluffy.get(&1), Some(&0.5));
        let cat = index.postings("cat").unwrap();
        assert_eq!(cat.get(&1), Some(&0.25));
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let mut index = InvertedIndex::new();
        index.add_document(1, &["cat", "cat", "cat"]);
        index.add_document(2, &["cat", "dog"]);

        assert_eq!(index.document_frequency("cat"), 2);
        assert_eq!(index.document_frequency("dog"), 1);
        assert_eq!(index.document_frequency("bird"), 0);
    }

    #[test]
    fn empty_document_adds_nothing() {
        let mut index = InvertedIndex::new();
        index.add_document(1, &[]);
        assert!(!index.contains(""));
        assert_eq!(index.document_frequency("cat"), 0);
    }
}
