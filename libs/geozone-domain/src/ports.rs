//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts (ports) that external adapters must implement.
//! Following hexagonal architecture, the domain defines what it needs, and the
//! infrastructure provides implementations.
//!
//! ## Static Dispatch
//!
//! Remote ports use native `impl Future` return types instead of
//! `async_trait`, so every adapter is monomorphized into the sync service.

use std::future::Future;

use crate::sync::{Page, SyncReport, SyncStats, TransportError, ZoneAssignment};

/// Port for reading the remote record list one page at a time
///
/// Implementations issue exactly one list request per call. Pagination
/// bookkeeping (offset advancement, termination, the cursor guard) lives in
/// [`fetch_all`](crate::sync::fetch_all), not in the adapter.
pub trait RecordSource: Send + Sync {
    /// Fetch the page starting at `offset`
    ///
    /// The returned [`Page`] must report how many rows the server sent,
    /// including rows the adapter could not turn into records.
    ///
    /// # Arguments
    ///
    /// * `offset` - Zero-based position of the first record in the page
    /// * `page_size` - Number of records the caller expects in a full page
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` on any network, status or decoding failure
    fn fetch_page(
        &self,
        offset: usize,
        page_size: usize,
    ) -> impl Future<Output = Result<Page, TransportError>> + Send;
}

/// Port for writing a zone assignment back to one remote record
///
/// Each call is at-most-once: implementations must not retry.
pub trait RecordSink: Send + Sync {
    /// Write `assignment.code()` to the record `assignment.record_id()`
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when the update was not acknowledged
    fn write_zone(
        &self,
        assignment: &ZoneAssignment,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Observer notified about sync pass progress
#[cfg_attr(test, mockall::automock)]
pub trait SyncObserver: Send + Sync {
    /// Called every `progress_interval` processed records
    fn on_progress(&self, stats: &SyncStats);

    /// Called once when the pass has finished
    fn on_pass_complete(&self, report: &SyncReport);
}
