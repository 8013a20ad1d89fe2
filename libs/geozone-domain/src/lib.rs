//! # GeoZone Domain Layer
//!
//! This crate contains the business logic for geotagging CRM records with
//! the zone their coordinates fall into. It follows hexagonal architecture
//! principles:
//!
//! - **Entities**: Zones, geographic points, remote records, zone assignments
//! - **Ports**: Trait definitions for external dependencies (RecordSource, RecordSink)
//! - **Services**: The sync pass orchestrating fetch, classify and write
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (HTTP, file
//! formats, CRM wire shapes). Remote systems are expressed as traits (ports)
//! implemented by adapter crates.
//!
//! ## Example
//!
//! ```rust
//! use geozone_domain::ports::{RecordSink, RecordSource};
//! use geozone_domain::sync::SyncService;
//! use geozone_domain::zoning::BoundaryStore;
//!
//! // The service is generic over any source and sink implementation
//! async fn example<S: RecordSource, K: RecordSink>(
//!     service: SyncService<S, K>,
//!     store: BoundaryStore,
//! ) {
//!     let report = service.run(&store).await;
//!     println!("Processed {} records", report.stats.total_processed);
//! }
//! ```

pub mod ports;
pub mod sync;
pub mod zoning;

// Re-export commonly used types
pub use ports::{RecordSink, RecordSource, SyncObserver};
pub use sync::{
    Page, Record, RecordId, SyncConfig, SyncReport, SyncService, SyncStats, TransportError,
    ZoneAssignment, ZoneCode, ZoneCodeTable,
};
pub use zoning::{BoundaryStore, CoordinateError, GeoPoint, Zone};
