//! In-memory TF-IDF document indexing and ranking engine.
//!
//! Documents are ingested once, then served by free-text queries with
//! stop-word filtering, minus-word exclusion, and top-5 selection by
//! relevance with rating as a tie-break.

pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

pub use document::{average_rating, DocId, Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use paginator::{paginate, Page, Paginator};
pub use request_queue::RequestQueue;
pub use server::{SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
