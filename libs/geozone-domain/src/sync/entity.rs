//! Domain entities for a sync pass
//!
//! Records are transient read-only copies of remote CRM entities; zone
//! assignments are produced by classification and consumed immediately by
//! the record sink. Neither is persisted locally.

use serde::Serialize;

use super::codes::{ZoneCode, ZoneCodeTable};
use super::ids::RecordId;

/// A remote record as seen by the sync pass
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    raw_coordinates: Option<String>,
}

impl Record {
    pub fn new(id: RecordId, raw_coordinates: Option<String>) -> Self {
        Self {
            id,
            raw_coordinates,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Raw coordinate string, `None` when absent or blank
    pub fn coordinates(&self) -> Option<&str> {
        self.raw_coordinates
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
    }
}

/// One page of the remote record list
///
/// `row_count` is the number of rows the server returned, which can exceed
/// `records.len()` when the adapter drops rows it cannot map. Pagination
/// decides "end of data" from `row_count`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    records: Vec<Record>,
    row_count: usize,
}

impl Page {
    /// A page where every returned row became a record
    pub fn new(records: Vec<Record>) -> Self {
        let row_count = records.len();
        Self { records, row_count }
    }

    /// A page where `row_count` rows were returned and some may have been dropped
    pub fn with_row_count(records: Vec<Record>, row_count: usize) -> Self {
        Self {
            row_count: row_count.max(records.len()),
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Rows returned by the server that did not become records
    pub fn dropped(&self) -> usize {
        self.row_count - self.records.len()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// The zone decided for one record, with its resolved CRM code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneAssignment {
    record_id: RecordId,
    zone_name: Option<String>,
    code: ZoneCode,
}

impl ZoneAssignment {
    /// Resolve the code for `zone_name` through `table`
    pub fn new(record_id: RecordId, zone_name: Option<&str>, table: &ZoneCodeTable) -> Self {
        Self {
            code: table.lookup(zone_name).clone(),
            zone_name: zone_name.map(str::to_string),
            record_id,
        }
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Matched zone name, `None` for "out of zone"
    pub fn zone_name(&self) -> Option<&str> {
        self.zone_name.as_deref()
    }

    pub fn code(&self) -> &ZoneCode {
        &self.code
    }
}
