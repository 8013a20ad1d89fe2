//! Sync service - Business logic orchestration
//!
//! One sync pass pulls every record through the [`RecordSource`], classifies
//! each record's coordinates against the [`BoundaryStore`] and writes the
//! resulting zone code through the [`RecordSink`]. A bad record never stops
//! the pass.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::{
    codes::ZoneCodeTable,
    entity::{Record, ZoneAssignment},
    error::TransportError,
    ids::RunId,
    pagination::{fetch_all, PaginationConfig, StopReason},
};
use crate::ports::{RecordSink, RecordSource, SyncObserver};
use crate::zoning::{classify, BoundaryStore, GeoPoint};

/// Default number of processed records between progress reports
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Configuration for the sync service
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub pagination: PaginationConfig,
    pub zone_codes: ZoneCodeTable,
    /// Progress is reported every this many processed records (0 disables it)
    pub progress_interval: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            pagination: PaginationConfig::default(),
            zone_codes: ZoneCodeTable::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Counters for one sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Records returned by the source
    pub total_fetched: usize,
    /// Records that went through classification and a write attempt
    pub total_processed: usize,
    /// Records without coordinates
    pub total_skipped: usize,
    /// Writes acknowledged by the sink
    pub total_written: usize,
    /// Writes the sink rejected
    pub total_write_failures: usize,
    /// Coordinates present but malformed or out of range
    pub total_unclassified: usize,
    /// Valid coordinates outside every zone
    pub total_out_of_zone: usize,
}

/// Summary of a finished sync pass
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
    pub stats: SyncStats,
}

impl SyncReport {
    /// True when the pull ended early and some records were never seen
    pub fn is_partial(&self) -> bool {
        self.stop_reason.is_partial()
    }
}

/// What happened to a single record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// No coordinates, nothing written
    Skipped,
    /// Zone code written
    Written(ZoneAssignment),
    /// The sink rejected the write
    WriteFailed(ZoneAssignment, TransportError),
}

/// Observer reporting progress through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn on_progress(&self, stats: &SyncStats) {
        info!(
            processed = stats.total_processed,
            fetched = stats.total_fetched,
            skipped = stats.total_skipped,
            write_failures = stats.total_write_failures,
            "Sync progress"
        );
    }

    fn on_pass_complete(&self, report: &SyncReport) {
        let stats = &report.stats;
        let elapsed_ms = (report.finished_at - report.started_at).num_milliseconds();

        info!(
            run_id = %report.run_id,
            fetched = stats.total_fetched,
            processed = stats.total_processed,
            skipped = stats.total_skipped,
            written = stats.total_written,
            write_failures = stats.total_write_failures,
            unclassified = stats.total_unclassified,
            out_of_zone = stats.total_out_of_zone,
            pages = report.pages_fetched,
            elapsed_ms,
            "Sync pass complete"
        );

        if report.is_partial() {
            warn!(
                run_id = %report.run_id,
                stop_reason = ?report.stop_reason,
                "Sync pass worked on a partial record list"
            );
        }
    }
}

/// Service running sync passes against a CRM
///
/// ## Static Dispatch
///
/// The service is generic over its source, sink and observer. Passes are
/// strictly sequential: one remote request in flight at a time.
pub struct SyncService<S, K, O = TracingObserver> {
    source: S,
    sink: K,
    observer: O,
    config: SyncConfig,
}

impl<S, K> SyncService<S, K>
where
    S: RecordSource,
    K: RecordSink,
{
    /// Create a new SyncService reporting progress through `tracing`
    pub fn new(source: S, sink: K, config: SyncConfig) -> Self {
        Self {
            source,
            sink,
            observer: TracingObserver,
            config,
        }
    }

    /// Create a new SyncService with default configuration
    pub fn with_defaults(source: S, sink: K) -> Self {
        Self::new(source, sink, SyncConfig::default())
    }
}

impl<S, K, O> SyncService<S, K, O>
where
    S: RecordSource,
    K: RecordSink,
    O: SyncObserver,
{
    /// Replace the progress observer
    pub fn with_observer<P: SyncObserver>(self, observer: P) -> SyncService<S, K, P> {
        SyncService {
            source: self.source,
            sink: self.sink,
            observer,
            config: self.config,
        }
    }

    /// Run one full sync pass
    ///
    /// 1. Pull all records (partial results on fetch failure)
    /// 2. Skip records without coordinates
    /// 3. Classify the rest; unusable coordinates count as "out of zone"
    /// 4. Write the zone code for every classified record
    ///
    /// Never fails: every problem is logged with the affected record id and
    /// reflected in the returned report.
    pub async fn run(&self, store: &BoundaryStore) -> SyncReport {
        let run_id = RunId::new();
        self.run_pass(run_id, store)
            .instrument(info_span!("sync_pass", run_id = %run_id))
            .await
    }

    async fn run_pass(&self, run_id: RunId, store: &BoundaryStore) -> SyncReport {
        let started_at = Utc::now();
        info!(
            zones = store.len(),
            start_offset = self.config.pagination.start_offset,
            hard_limit = ?self.config.pagination.hard_limit,
            "Starting sync pass"
        );

        let outcome = fetch_all(&self.source, &self.config.pagination).await;
        let mut stats = SyncStats {
            total_fetched: outcome.records.len(),
            ..SyncStats::default()
        };
        info!(fetched = stats.total_fetched, "Records pulled");

        for record in &outcome.records {
            self.process_record(record, store, &mut stats).await;
        }

        let report = SyncReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            pages_fetched: outcome.pages_fetched,
            stop_reason: outcome.stop_reason,
            stats,
        };
        self.observer.on_pass_complete(&report);

        report
    }

    /// Classify and write a single record, updating `stats`
    pub async fn process_record(
        &self,
        record: &Record,
        store: &BoundaryStore,
        stats: &mut SyncStats,
    ) -> RecordOutcome {
        let record_id = record.id();

        let Some(raw) = record.coordinates() else {
            stats.total_skipped += 1;
            info!(record_id = %record_id, "Coordinates missing, skipping record");
            return RecordOutcome::Skipped;
        };

        let zone_name = match GeoPoint::parse(raw) {
            Ok(point) => {
                let zone = classify(&point, store);
                if zone.is_none() {
                    stats.total_out_of_zone += 1;
                    debug!(record_id = %record_id, point = %point, "Point outside every zone");
                }
                zone
            }
            Err(err) => {
                stats.total_unclassified += 1;
                warn!(
                    record_id = %record_id,
                    raw,
                    error = %err,
                    "Unusable coordinates, assigning fallback zone"
                );
                None
            }
        };

        let assignment = ZoneAssignment::new(record_id.clone(), zone_name, &self.config.zone_codes);

        let outcome = match self.sink.write_zone(&assignment).await {
            Ok(()) => {
                stats.total_written += 1;
                info!(
                    record_id = %record_id,
                    zone = assignment.zone_name().unwrap_or("-"),
                    code = %assignment.code(),
                    "Zone written"
                );
                RecordOutcome::Written(assignment)
            }
            Err(err) => {
                stats.total_write_failures += 1;
                error!(
                    record_id = %record_id,
                    code = %assignment.code(),
                    error = %err,
                    "Failed to write zone"
                );
                RecordOutcome::WriteFailed(assignment, err)
            }
        };

        stats.total_processed += 1;
        let interval = self.config.progress_interval;
        if interval > 0 && stats.total_processed % interval == 0 {
            self.observer.on_progress(stats);
        }

        outcome
    }

    /// Get the service configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}
