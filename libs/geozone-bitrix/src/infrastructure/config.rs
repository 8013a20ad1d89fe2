use std::time::Duration;

/// Default list method (CRM companies)
pub const DEFAULT_LIST_METHOD: &str = "crm.company.list";
/// Default update method (CRM companies)
pub const DEFAULT_UPDATE_METHOD: &str = "crm.company.update";
/// Default id field for classic CRM entities
pub const DEFAULT_ID_FIELD: &str = "ID";
/// Default user field holding `"lat, lon"` coordinates
pub const DEFAULT_COORDINATES_FIELD: &str = "UF_CRM_1725013332";
/// Default user field receiving the zone code
pub const DEFAULT_ZONE_FIELD: &str = "UF_CRM_1725013395";
/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection and field mapping for one Bitrix24 entity type
///
/// Classic CRM entities (`crm.company.*`) use upper-case `ID` and
/// `UF_CRM_*` fields. Smart processes (`crm.item.*`) need an
/// `entity_type_id` and use camel-case names such as `id` and
/// `ufCrm44_1724363546`.
#[derive(Debug, Clone)]
pub struct BitrixConfig {
    /// Inbound webhook base URL, including user id and token
    pub webhook_url: String,
    pub list_method: String,
    pub update_method: String,
    pub id_field: String,
    pub coordinates_field: String,
    pub zone_field: String,
    /// Required by `crm.item.*` methods
    pub entity_type_id: Option<u32>,
    pub timeout: Duration,
}

impl BitrixConfig {
    /// Company geotagging defaults for the given webhook
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            list_method: DEFAULT_LIST_METHOD.to_string(),
            update_method: DEFAULT_UPDATE_METHOD.to_string(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            coordinates_field: DEFAULT_COORDINATES_FIELD.to_string(),
            zone_field: DEFAULT_ZONE_FIELD.to_string(),
            entity_type_id: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Full URL of a REST method
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}.json", self.webhook_url.trim_end_matches('/'), method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let config = BitrixConfig::new("https://portal.example/rest/1/token/");
        assert_eq!(
            config.method_url(&config.list_method),
            "https://portal.example/rest/1/token/crm.company.list.json"
        );
    }

    #[test]
    fn test_defaults() {
        let config = BitrixConfig::new("https://portal.example/rest/1/token");
        assert_eq!(config.update_method, "crm.company.update");
        assert_eq!(config.id_field, "ID");
        assert_eq!(config.coordinates_field, "UF_CRM_1725013332");
        assert_eq!(config.zone_field, "UF_CRM_1725013395");
        assert!(config.entity_type_id.is_none());
    }
}
