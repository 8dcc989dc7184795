use crate::document::{average_rating, DocId, Document, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::tokenizer::{is_valid_text, split_into_words};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// At most this many documents are returned per query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance scores closer than this are tied and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
struct DocumentRecord {
    rating: i32,
    status: DocumentStatus,
}

/// Parsed query: required terms plus the document ids excluded by minus
/// words. Minus words are resolved against the index at parse time, so
/// exclusion covers every document indexed under the word so far; with
/// no document removal this is equivalent to lazy resolution.
struct Query {
    terms: BTreeSet<String>,
    excluded_ids: BTreeSet<DocId>,
}

enum QueryWord<'a> {
    Plain(&'a str),
    Minus(&'a str),
}

/// In-memory TF-IDF search engine over short text documents.
///
/// Documents are immutable once added; ingestion is expected to finish
/// before querying starts. All methods are synchronous and the type is
/// not internally synchronized.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: BTreeSet<String>,
    index: InvertedIndex,
    documents: BTreeMap<DocId, DocumentRecord>,
    document_ids: Vec<DocId>,
}

impl SearchServer {
    /// Engine with an empty stop-word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the given stop words, which are excluded from both
    /// indexing and query matching.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for word in stop_words {
            let word = word.into();
            if !is_valid_text(&word) {
                return Err(SearchError::InvalidArgument(format!(
                    "stop word {word:?} contains control characters"
                )));
            }
            set.insert(word);
        }
        Ok(Self {
            stop_words: set,
            ..Self::default()
        })
    }

    /// Engine with stop words parsed from a space-separated string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::with_stop_words(split_into_words(text))
    }

    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }

    /// Id of the `index`-th added document, in insertion order.
    pub fn document_id_at(&self, index: usize) -> Result<DocId> {
        self.document_ids.get(index).copied().ok_or_else(|| {
            SearchError::OutOfRange(format!(
                "document index {index} is outside 0..{}",
                self.document_ids.len()
            ))
        })
    }

    /// Add a document to the index.
    ///
    /// Fails with `InvalidArgument` on a negative id, an id that was
    /// already added, or text containing control characters. Validation
    /// happens before any mutation, so a failed call leaves the engine
    /// unchanged.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidArgument(format!(
                "document id {id} is negative"
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::InvalidArgument(format!(
                "document id {id} was already added"
            )));
        }
        if !is_valid_text(text) {
            return Err(SearchError::InvalidArgument(format!(
                "text of document {id} contains control characters"
            )));
        }

        let rating = average_rating(ratings);
        self.documents.insert(id, DocumentRecord { rating, status });
        self.document_ids.push(id);

        let words = self.split_into_words_no_stop(text);
        debug!(id, words = words.len(), rating, "document indexed");
        self.index.add_document(id, &words);
        Ok(())
    }

    /// Top documents for the query among those with status `ACTUAL`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents for the query among those with the given status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents for the query, filtered by an arbitrary predicate
    /// over (id, status, rating). Rejected documents are dropped, not
    /// scored zero. Results are sorted by relevance descending; scores
    /// within [`RELEVANCE_EPSILON`] are tied and ordered by rating
    /// descending. At most [`MAX_RESULT_DOCUMENT_COUNT`] results are
    /// returned; an empty result is not an error.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let mut documents = self.find_all_documents(&query, &predicate);

        documents.sort_by(|lhs, rhs| {
            if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
                rhs.rating.cmp(&lhs.rating)
            } else {
                rhs.relevance
                    .partial_cmp(&lhs.relevance)
                    .unwrap_or(Ordering::Equal)
            }
        });
        documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
        debug!(query = raw_query, results = documents.len(), "query evaluated");
        Ok(documents)
    }

    /// Query terms that occur in the given document, sorted, plus the
    /// document's status. A minus word resolving to the document makes
    /// the match list empty.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let record = self.documents.get(&document_id).ok_or_else(|| {
            SearchError::OutOfRange(format!("no document with id {document_id}"))
        })?;

        let mut matched = Vec::new();
        if !query.excluded_ids.contains(&document_id) {
            for term in &query.terms {
                let in_document = self
                    .index
                    .postings(term)
                    .map_or(false, |docs| docs.contains_key(&document_id));
                if in_document {
                    matched.push(term.clone());
                }
            }
        }
        Ok((matched, record.status))
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_into_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(*word))
            .collect()
    }

    fn parse_query(&self, text: &str) -> Result<Query> {
        if !is_valid_text(text) {
            return Err(SearchError::InvalidArgument(
                "query contains control characters".to_string(),
            ));
        }

        let mut terms = BTreeSet::new();
        let mut excluded_ids = BTreeSet::new();
        for raw_word in split_into_words(text) {
            match parse_query_word(raw_word)? {
                QueryWord::Plain(word) => {
                    if !self.stop_words.contains(word) {
                        terms.insert(word.to_string());
                    }
                }
                QueryWord::Minus(word) => {
                    if self.stop_words.contains(word) {
                        continue;
                    }
                    if let Some(docs) = self.index.postings(word) {
                        excluded_ids.extend(docs.keys().copied());
                    }
                }
            }
        }
        Ok(Query { terms, excluded_ids })
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for term in &query.terms {
            let Some(docs) = self.index.postings(term) else {
                continue;
            };
            let idf = self.inverse_document_frequency(term);
            for (&id, &tf) in docs {
                if query.excluded_ids.contains(&id) {
                    continue;
                }
                let Some(record) = self.documents.get(&id) else {
                    continue;
                };
                if predicate(id, record.status, record.rating) {
                    *relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }

        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                let record = self.documents.get(&id)?;
                Some(Document {
                    id,
                    relevance,
                    rating: record.rating,
                })
            })
            .collect()
    }

    fn inverse_document_frequency(&self, term: &str) -> f64 {
        let containing = self.index.document_frequency(term);
        if containing == 0 || self.document_ids.is_empty() {
            return 0.0;
        }
        (self.document_ids.len() as f64 / containing as f64).ln()
    }
}

fn parse_query_word(raw: &str) -> Result<QueryWord<'_>> {
    if raw == "-" {
        return Err(SearchError::InvalidArgument(
            "minus sign with no word after it in query".to_string(),
        ));
    }
    match raw.strip_prefix('-') {
        None => Ok(QueryWord::Plain(raw)),
        Some(rest) if rest.starts_with('-') => Err(SearchError::InvalidArgument(format!(
            "query word {raw:?} has more than one leading minus"
        ))),
        Some(rest) => Ok(QueryWord::Minus(rest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_not_indexed() {
        let mut server = SearchServer::from_stop_words_text("in the").unwrap();
        server
            .add_document(0, "in the city", DocumentStatus::Actual, &[1])
            .unwrap();

        assert!(server.find_top_documents("in").unwrap().is_empty());
        assert_eq!(server.find_top_documents("city").unwrap().len(), 1);
    }

    #[test]
    fn invalid_stop_word_rejected_at_construction() {
        let err = SearchServer::with_stop_words(["in", "th\x02e"]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[test]
    fn document_with_only_stop_words_is_stored_but_never_relevant() {
        let mut server = SearchServer::from_stop_words_text("in the").unwrap();
        server
            .add_document(7, "in the", DocumentStatus::Actual, &[])
            .unwrap();

        assert_eq!(server.document_count(), 1);
        assert_eq!(server.document_id_at(0).unwrap(), 7);
        assert!(server.find_top_documents("in the").unwrap().is_empty());
    }

    #[test]
    fn minus_word_resolution_is_eager() {
        let mut server = SearchServer::new();
        server
            .add_document(0, "black cat", DocumentStatus::Actual, &[])
            .unwrap();
        // A minus word absent from the index excludes nothing.
        let found = server.find_top_documents("cat -dog").unwrap();
        assert_eq!(found.len(), 1);

        let found = server.find_top_documents("cat -black").unwrap();
        assert!(found.is_empty());
    }
}
