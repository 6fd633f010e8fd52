//! Paginated retrieval of document ids

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::http::{MzkClient, Transport};

use super::query_factory::SearchQuery;

const PID_PREFIX: &str = "uuid:";

/// How many matching documents to collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentLimit {
    #[default]
    All,
    AtMost(usize),
}

impl From<usize> for DocumentLimit {
    fn from(n: usize) -> Self {
        DocumentLimit::AtMost(n)
    }
}

// ===== Response DTOs =====

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: Option<ResponseBody>,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(rename = "numFound")]
    num_found: Option<usize>,
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    pid: Option<String>,
}

/// Runs a search and drains the results in fixed-size batches
pub struct PaginatedFetcher<'a, T: Transport> {
    client: &'a MzkClient<T>,
    batch_size: usize,
}

impl<'a, T: Transport> PaginatedFetcher<'a, T> {
    pub fn new(client: &'a MzkClient<T>) -> Self {
        Self::with_batch_size(client, SearchConfig::default().batch_size)
    }

    pub fn with_batch_size(client: &'a MzkClient<T>, batch_size: usize) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
        }
    }

    pub fn from_config(client: &'a MzkClient<T>, config: &SearchConfig) -> Self {
        Self::with_batch_size(client, config.batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn url(&self, query: &SearchQuery, rows: usize, start: usize) -> String {
        format!(
            "{}?q={}&fq={}&rows={}&start={}",
            self.client.endpoints().search_url,
            query.q,
            query.fq,
            rows,
            start
        )
    }

    fn request(&self, query: &SearchQuery, rows: usize, start: usize) -> Option<ResponseBody> {
        let response: SearchResponse = self.client.get_json(&self.url(query, rows, start))?;
        response.response
    }

    /// Total number of matches, `None` when the count request fails
    pub fn count(&self, query: &SearchQuery) -> Option<usize> {
        self.request(query, 0, 0)?.num_found
    }

    /// Ids of matching documents, without the `uuid:` prefix.
    ///
    /// A failed count yields no ids; a failed batch ends retrieval with the
    /// ids collected so far.
    pub fn fetch_ids(&self, query: &SearchQuery, limit: DocumentLimit) -> Vec<String> {
        let Some(total) = self.count(query) else {
            tracing::warn!("could not read the number of matching documents");
            return Vec::new();
        };
        let to_retrieve = match limit {
            DocumentLimit::All => total,
            DocumentLimit::AtMost(n) => total.min(n),
        };
        tracing::debug!(total, to_retrieve, batch_size = self.batch_size, "fetching document ids");

        let mut ids = Vec::with_capacity(to_retrieve);
        let mut seen = 0;
        while seen < to_retrieve {
            let rows = self.batch_size.min(to_retrieve - seen);
            let Some(body) = self.request(query, rows, seen) else {
                tracing::warn!(start = seen, rows, "batch request failed, stopping early");
                break;
            };
            if body.docs.is_empty() {
                tracing::debug!(start = seen, "empty batch, no more results");
                break;
            }

            let remaining = to_retrieve - seen;
            let batch: Vec<SearchDoc> = body.docs.into_iter().take(remaining).collect();
            seen += batch.len();
            ids.extend(batch.into_iter().filter_map(|doc| doc.pid).map(strip_pid_prefix));
        }

        ids
    }
}

fn strip_pid_prefix(pid: String) -> String {
    match pid.strip_prefix(PID_PREFIX) {
        Some(id) => id.to_string(),
        None => pid,
    }
}
