//! Sync domain module
//!
//! Remote records, zone codes, pagination and the sync pass that writes
//! zone assignments back to the CRM.

mod codes;
mod entity;
mod error;
mod ids;
mod pagination;
mod service;

pub use codes::{ZoneCode, ZoneCodeTable, FALLBACK_ZONE_CODE};
pub use entity::{Page, Record, ZoneAssignment};
pub use error::{Result, TransportError};
pub use ids::{RecordId, RunId};
pub use pagination::{fetch_all, FetchOutcome, PaginationConfig, StopReason, DEFAULT_PAGE_SIZE};
pub use service::{
    RecordOutcome, SyncConfig, SyncReport, SyncService, SyncStats, TracingObserver,
    DEFAULT_PROGRESS_INTERVAL,
};
