use crate::document::{DocId, Document, DocumentStatus};
use crate::error::Result;
use crate::server::SearchServer;
use std::collections::VecDeque;

const MINUTES_IN_DAY: u64 = 1440;

struct QueryResult {
    timestamp: u64,
    results: usize,
}

/// Sliding-window tracker over search requests.
///
/// Each recorded request advances a logical clock by one minute;
/// requests older than a day fall out of the window. Only the result
/// count is kept, to answer how many recent requests found nothing.
/// A search that fails is not a request and is not recorded.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    current_time: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            requests: VecDeque::new(),
            no_result_requests: 0,
            current_time: 0,
        }
    }

    /// Run a default-status search and record its result count.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self.server.find_top_documents(raw_query)?;
        self.record(results.len());
        Ok(results)
    }

    /// Run a status-filtered search and record its result count.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let results = self.server.find_top_documents_with_status(raw_query, status)?;
        self.record(results.len());
        Ok(results)
    }

    /// Run a predicate-filtered search and record its result count.
    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let results = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(results.len());
        Ok(results)
    }

    /// Number of requests in the current window that returned nothing.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    fn record(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(front) = self.requests.front() {
            if self.current_time - front.timestamp < MINUTES_IN_DAY {
                break;
            }
            if front.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }

        self.requests.push_back(QueryResult {
            timestamp: self.current_time,
            results,
        });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }
}
