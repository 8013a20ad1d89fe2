//! Zone name to CRM zone code mapping
//!
//! The CRM stores the zone as an enumeration value id, not as the zone's
//! name. Names missing from the table (and records with no zone at all)
//! map to the fallback code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code written to the CRM zone field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneCode(String);

impl ZoneCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Code used when no zone matched or the coordinates were unusable
pub const FALLBACK_ZONE_CODE: &str = "14834";

const DEFAULT_ENTRIES: [(&str, &str); 6] = [
    ("Юг", "14669"),
    ("Юг2", "14768"),
    ("Центр", "14668"),
    ("Центр 2", "14767"),
    ("Север", "14667"),
    ("Север2", "14766"),
];

/// Static lookup from zone name to zone code
///
/// Names are matched exactly (case and inner whitespace matter).
#[derive(Debug, Clone)]
pub struct ZoneCodeTable {
    entries: Vec<(String, ZoneCode)>,
    fallback: ZoneCode,
}

impl ZoneCodeTable {
    /// Build a custom table
    pub fn new<I, N, C>(entries: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, code)| (name.into(), ZoneCode::new(code)))
                .collect(),
            fallback: ZoneCode::new(fallback),
        }
    }

    /// Code for a zone name; `None` and unknown names yield the fallback
    pub fn lookup(&self, zone_name: Option<&str>) -> &ZoneCode {
        zone_name
            .and_then(|name| {
                self.entries
                    .iter()
                    .find(|(entry, _)| entry == name)
                    .map(|(_, code)| code)
            })
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &ZoneCode {
        &self.fallback
    }
}

impl Default for ZoneCodeTable {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES, FALLBACK_ZONE_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ZoneCodeTable::default();

        assert_eq!(table.lookup(Some("Юг")).as_str(), "14669");
        assert_eq!(table.lookup(Some("Юг2")).as_str(), "14768");
        assert_eq!(table.lookup(Some("Центр")).as_str(), "14668");
        assert_eq!(table.lookup(Some("Центр 2")).as_str(), "14767");
        assert_eq!(table.lookup(Some("Север")).as_str(), "14667");
        assert_eq!(table.lookup(Some("Север2")).as_str(), "14766");
    }

    #[test]
    fn test_fallback_for_none_and_unknown() {
        let table = ZoneCodeTable::default();

        assert_eq!(table.lookup(None).as_str(), FALLBACK_ZONE_CODE);
        assert_eq!(table.lookup(Some("Запад")).as_str(), FALLBACK_ZONE_CODE);
        // exact match only
        assert_eq!(table.lookup(Some("Центр2")).as_str(), FALLBACK_ZONE_CODE);
        assert_eq!(table.lookup(Some("юг")).as_str(), FALLBACK_ZONE_CODE);
    }

    #[test]
    fn test_custom_table() {
        let table = ZoneCodeTable::new([("North", "1")], "0");
        assert_eq!(table.lookup(Some("North")).as_str(), "1");
        assert_eq!(table.lookup(Some("South")).as_str(), "0");
        assert_eq!(table.fallback().as_str(), "0");
    }
}
