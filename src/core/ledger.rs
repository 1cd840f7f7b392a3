//! Bounded ledger of recent searches.
//!
//! The ledger keeps the last few successful searches, newest first. Positions
//! are counted from the most recent record, so every insertion shifts the
//! index of each existing record up by one. Callers must treat indices as
//! snapshot positions, not identifiers.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::DEFAULT_MAX_CACHED_SEARCHES;
use crate::error::LedgerError;

/// Text returned by the listing view when nothing has been recorded.
pub const EMPTY_LISTING: &str = "No recent searches available.";

/// One completed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    /// The query as sent to the API.
    pub query: String,
    /// Capture time, assigned by the ledger on insertion.
    #[serde(rename = "timestamp", serialize_with = "serialize_rfc3339")]
    pub captured_at: DateTime<Utc>,
    /// Full decoded API response.
    pub response: Value,
}

impl SearchRecord {
    /// Number of entries in the response's `results` array (0 if absent).
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.response
            .get("results")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Capture time as an RFC 3339 string.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.captured_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn serialize_rfc3339<S: serde::Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Listing row for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    /// Position from the most recent record.
    pub index: usize,
    /// The recorded query.
    pub query: String,
    /// Capture time (RFC 3339).
    pub captured_at: String,
    /// Number of results in the recorded response.
    pub result_count: usize,
}

/// Bounded, newest-first record of recent searches.
///
/// Insert-and-evict runs under one write guard, so concurrent readers see
/// either the state before an insertion or after it.
#[derive(Debug)]
pub struct Ledger {
    capacity: usize,
    records: RwLock<VecDeque<Arc<SearchRecord>>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CACHED_SEARCHES)
    }

    /// Creates an empty ledger holding at most `capacity` records (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: RwLock::new(VecDeque::with_capacity(capacity + 1)),
        }
    }

    /// Maximum number of records kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Records a completed search at index 0, evicting the oldest record if
    /// the ledger is over capacity.
    pub fn record(&self, query: impl Into<String>, response: Value) {
        let record = Arc::new(SearchRecord {
            query: query.into(),
            captured_at: Utc::now(),
            response,
        });

        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        records.push_front(record);
        records.truncate(self.capacity);

        tracing::debug!(size = records.len(), "ledger updated");
    }

    /// Returns a snapshot of summaries in ledger order (index 0 = newest).
    #[must_use]
    pub fn summaries(&self) -> Vec<SearchSummary> {
        self.read()
            .iter()
            .enumerate()
            .map(|(index, record)| SearchSummary {
                index,
                query: record.query.clone(),
                captured_at: record.timestamp(),
                result_count: record.result_count(),
            })
            .collect()
    }

    /// Returns a snapshot of all records in ledger order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<SearchRecord>> {
        self.read().iter().cloned().collect()
    }

    /// Returns the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IndexOutOfRange`] when `index` is negative or
    /// not below the current size; the error carries the size for reporting.
    pub fn get(&self, index: i64) -> Result<Arc<SearchRecord>, LedgerError> {
        let records = self.read();
        usize::try_from(index)
            .ok()
            .and_then(|i| records.get(i))
            .cloned()
            .ok_or(LedgerError::IndexOutOfRange {
                index,
                len: records.len(),
            })
    }

    /// Renders the human-facing listing.
    ///
    /// An empty ledger renders [`EMPTY_LISTING`] so that "no searches yet"
    /// reads differently from a search that returned zero results.
    #[must_use]
    pub fn render_listing(&self) -> String {
        let summaries = self.summaries();
        if summaries.is_empty() {
            return EMPTY_LISTING.to_string();
        }

        let mut out = String::from("Recent Searches:\n\n");
        for s in &summaries {
            let _ = writeln!(out, "{}. Query: {}", s.index, s.query);
            let _ = writeln!(out, "   Timestamp: {}", s.captured_at);
            let _ = writeln!(out, "   Results: {} items\n", s.result_count);
        }
        out
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, VecDeque<Arc<SearchRecord>>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }
}
