//! # GeoZone Bitrix24 Adapter
//!
//! Implements the [`RecordSource`](geozone_domain::ports::RecordSource) and
//! [`RecordSink`](geozone_domain::ports::RecordSink) ports on top of a
//! Bitrix24 inbound webhook (`https://<portal>/rest/<user>/<token>`).

pub mod infrastructure;

pub use infrastructure::{BitrixConfig, BitrixCrm};
