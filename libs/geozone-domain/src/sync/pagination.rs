//! Pagination over a [`RecordSource`]
//!
//! Pulls successive pages until one of the termination conditions holds:
//! a short page (end of data), the offset reaching the hard limit, a page
//! whose highest record id does not advance past the previous page's, or a
//! failed request. Failures never propagate: the caller always receives the
//! records accumulated so far together with the reason the pull stopped.

use tracing::{debug, error, info, warn};

use super::{entity::Record, error::TransportError};
use crate::ports::RecordSource;

/// Bitrix24 list methods always return 50 rows per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Where to start pulling and when to stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Records per full page
    pub page_size: usize,
    /// Offset of the first request
    pub start_offset: usize,
    /// No request is issued at an offset at or beyond this bound
    pub hard_limit: Option<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            start_offset: 0,
            hard_limit: None,
        }
    }
}

/// Why a pull ended
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// A page came back with fewer rows than `page_size`
    EndOfData,
    /// The next offset reached the hard limit
    LimitReached,
    /// The highest id of a page did not exceed the previous page's
    ///
    /// The offending page is discarded.
    NonAdvancingCursor { previous_max: u64, current_max: u64 },
    /// A page request failed, or the pull could not start
    TransportFailure(TransportError),
}

impl StopReason {
    /// True when the pull ended abnormally and the records may be incomplete
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Self::NonAdvancingCursor { .. } | Self::TransportFailure(_)
        )
    }
}

/// Records pulled by [`fetch_all`] and how the pull ended
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub records: Vec<Record>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}

impl FetchOutcome {
    pub fn is_partial(&self) -> bool {
        self.stop_reason.is_partial()
    }
}

/// Pull every page from `source` according to `config`
///
/// A zero `page_size` issues no request and ends with a
/// `TransportFailure` carrying a configuration error.
pub async fn fetch_all<S: RecordSource>(source: &S, config: &PaginationConfig) -> FetchOutcome {
    let page_size = config.page_size;
    let mut offset = config.start_offset;
    let mut records = Vec::new();
    let mut pages_fetched = 0;
    let mut previous_max: Option<u64> = None;

    if page_size == 0 {
        error!("Page size is zero, not fetching");
        return FetchOutcome {
            records,
            pages_fetched,
            stop_reason: StopReason::TransportFailure(TransportError::config(
                "page size must be greater than zero",
            )),
        };
    }

    let stop_reason = loop {
        if config.hard_limit.is_some_and(|limit| offset >= limit) {
            info!(offset, total = records.len(), "Hard limit reached");
            break StopReason::LimitReached;
        }

        let page = match source.fetch_page(offset, page_size).await {
            Ok(page) => page,
            Err(err) => {
                error!(offset, error = %err, total = records.len(), "Failed to fetch page, keeping partial results");
                break StopReason::TransportFailure(err);
            }
        };
        pages_fetched += 1;

        let row_count = page.row_count();
        if page.dropped() > 0 {
            warn!(offset, row_count, dropped = page.dropped(), "Page contained unusable rows");
        }

        let current_max = page
            .records()
            .iter()
            .filter_map(|record| record.id().ordinal())
            .max();

        if let (Some(previous), Some(current)) = (previous_max, current_max) {
            if current <= previous {
                warn!(
                    offset,
                    previous_max = previous,
                    current_max = current,
                    "Pagination cursor did not advance, discarding page"
                );
                break StopReason::NonAdvancingCursor {
                    previous_max: previous,
                    current_max: current,
                };
            }
        }
        if current_max.is_some() {
            previous_max = current_max;
        }

        records.extend(page.into_records());
        debug!(offset, row_count, total = records.len(), "Fetched page");

        if row_count < page_size {
            info!(offset, row_count, total = records.len(), "Reached end of data");
            break StopReason::EndOfData;
        }

        offset += page_size;
    };

    FetchOutcome {
        records,
        pages_fetched,
        stop_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{Page, RecordId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn record(id: u64) -> Record {
        Record::new(RecordId::new(id.to_string()).unwrap(), None)
    }

    /// Serves ids `1..=total` in offset order
    struct SequentialSource {
        total: usize,
        requests: Arc<Mutex<Vec<usize>>>,
    }

    impl SequentialSource {
        fn new(total: usize) -> Self {
            Self {
                total,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn requested_offsets(&self) -> Vec<usize> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl RecordSource for SequentialSource {
        fn fetch_page(
            &self,
            offset: usize,
            page_size: usize,
        ) -> impl std::future::Future<Output = Result<Page, TransportError>> + Send {
            self.requests.lock().unwrap().push(offset);
            let end = (offset + page_size).min(self.total);
            let page: Vec<Record> = (offset..end).map(|i| record(i as u64 + 1)).collect();

            async move { Ok(Page::new(page)) }
        }
    }

    /// Replays a fixed list of responses, one per call
    struct ScriptedSource {
        pages: Vec<Result<Page, TransportError>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Page, TransportError>>) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RecordSource for ScriptedSource {
        fn fetch_page(
            &self,
            _offset: usize,
            _page_size: usize,
        ) -> impl std::future::Future<Output = Result<Page, TransportError>> + Send {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let response = self
                .pages
                .get(call)
                .cloned()
                .unwrap_or_else(|| Ok(Page::default()));

            async move { response }
        }
    }

    fn ids(range: std::ops::RangeInclusive<u64>) -> Page {
        Page::new(range.map(record).collect())
    }

    #[tokio::test]
    async fn test_stops_after_short_page() {
        let source = SequentialSource::new(130);
        let config = PaginationConfig::default();

        let outcome = fetch_all(&source, &config).await;

        assert_eq!(outcome.records.len(), 130);
        assert_eq!(outcome.pages_fetched, 3);
        assert_eq!(outcome.stop_reason, StopReason::EndOfData);
        assert_eq!(source.requested_offsets(), vec![0, 50, 100]);
        assert!(!outcome.is_partial());
    }

    #[tokio::test]
    async fn test_exact_multiple_needs_one_empty_page() {
        let source = SequentialSource::new(100);

        let outcome = fetch_all(&source, &PaginationConfig::default()).await;

        assert_eq!(outcome.records.len(), 100);
        assert_eq!(source.requested_offsets(), vec![0, 50, 100]);
        assert_eq!(outcome.stop_reason, StopReason::EndOfData);
    }

    #[tokio::test]
    async fn test_start_offset_and_hard_limit() {
        let source = SequentialSource::new(20_000);
        let config = PaginationConfig {
            page_size: 50,
            start_offset: 3000,
            hard_limit: Some(3100),
        };

        let outcome = fetch_all(&source, &config).await;

        assert_eq!(source.requested_offsets(), vec![3000, 3050]);
        assert_eq!(outcome.records.len(), 100);
        assert_eq!(outcome.records[0].id().as_str(), "3001");
        assert_eq!(outcome.stop_reason, StopReason::LimitReached);
    }

    #[tokio::test]
    async fn test_start_beyond_limit_issues_no_request() {
        let source = SequentialSource::new(500);
        let config = PaginationConfig {
            page_size: 50,
            start_offset: 200,
            hard_limit: Some(100),
        };

        let outcome = fetch_all(&source, &config).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_fetched, 0);
        assert!(source.requested_offsets().is_empty());
        assert_eq!(outcome.stop_reason, StopReason::LimitReached);
    }

    #[tokio::test]
    async fn test_non_advancing_cursor_discards_page() {
        let source = ScriptedSource::new(vec![Ok(ids(1..=50)), Ok(ids(1..=50))]);
        let config = PaginationConfig::default();

        let outcome = fetch_all(&source, &config).await;

        assert_eq!(outcome.records.len(), 50);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(
            outcome.stop_reason,
            StopReason::NonAdvancingCursor {
                previous_max: 50,
                current_max: 50
            }
        );
        assert!(outcome.is_partial());
    }

    #[tokio::test]
    async fn test_cursor_going_backwards_stops() {
        let source = ScriptedSource::new(vec![
            Ok(ids(1..=50)),
            Ok(ids(51..=100)),
            Ok(ids(21..=70)),
        ]);

        let outcome = fetch_all(&source, &PaginationConfig::default()).await;

        assert_eq!(outcome.records.len(), 100);
        assert_eq!(
            outcome.stop_reason,
            StopReason::NonAdvancingCursor {
                previous_max: 100,
                current_max: 70
            }
        );
    }

    #[tokio::test]
    async fn test_guard_skipped_for_non_numeric_ids() {
        let opaque = |prefix: &str| -> Page {
            Page::new(
                (0..50)
                    .map(|i| Record::new(RecordId::new(format!("{prefix}{i}")).unwrap(), None))
                    .collect(),
            )
        };
        let source =
            ScriptedSource::new(vec![Ok(opaque("a")), Ok(opaque("b")), Ok(Page::default())]);

        let outcome = fetch_all(&source, &PaginationConfig::default()).await;

        assert_eq!(outcome.records.len(), 100);
        assert_eq!(outcome.stop_reason, StopReason::EndOfData);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_partial_results() {
        let source = ScriptedSource::new(vec![
            Ok(ids(1..=50)),
            Err(TransportError::status(500, "boom")),
        ]);

        let outcome = fetch_all(&source, &PaginationConfig::default()).await;

        assert_eq!(outcome.records.len(), 50);
        assert_eq!(outcome.pages_fetched, 1);
        assert!(matches!(
            outcome.stop_reason,
            StopReason::TransportFailure(TransportError::Status { status: 500, .. })
        ));
        assert!(outcome.is_partial());
    }

    #[tokio::test]
    async fn test_full_page_with_dropped_rows_is_not_end_of_data() {
        // 49 usable records out of 50 returned rows, then a short page
        let first = Page::with_row_count(ids(1..=49).into_records(), 50);
        let source = ScriptedSource::new(vec![Ok(first), Ok(ids(51..=60))]);

        let outcome = fetch_all(&source, &PaginationConfig::default()).await;

        assert_eq!(outcome.records.len(), 59);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.stop_reason, StopReason::EndOfData);
    }

    #[tokio::test]
    async fn test_page_of_only_unusable_rows_keeps_paging() {
        let unusable = Page::with_row_count(Vec::new(), 50);
        let source = ScriptedSource::new(vec![Ok(unusable), Ok(ids(51..=70))]);

        let outcome = fetch_all(&source, &PaginationConfig::default()).await;

        assert_eq!(outcome.records.len(), 20);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.stop_reason, StopReason::EndOfData);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let source = SequentialSource::new(100);
        let config = PaginationConfig {
            page_size: 0,
            ..PaginationConfig::default()
        };

        let outcome = fetch_all(&source, &config).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_fetched, 0);
        assert!(source.requested_offsets().is_empty());
        assert!(matches!(
            outcome.stop_reason,
            StopReason::TransportFailure(TransportError::Config(_))
        ));
        assert!(outcome.is_partial());
    }

    #[test]
    fn test_stop_reason_is_partial() {
        assert!(!StopReason::EndOfData.is_partial());
        assert!(!StopReason::LimitReached.is_partial());
        assert!(StopReason::NonAdvancingCursor {
            previous_max: 2,
            current_max: 1
        }
        .is_partial());
        assert!(StopReason::TransportFailure(TransportError::request("reset")).is_partial());
    }
}
