//! Application configuration
//!
//! Everything comes from environment variables, optionally seeded from a
//! `.env` file. Parsing works over a key lookup function so it can be
//! exercised without touching the process environment.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use geozone_bitrix::BitrixConfig;
use geozone_domain::sync::{PaginationConfig, SyncConfig, ZoneCodeTable};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines, anything else the default
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Fully resolved configuration for one sync run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub boundary_path: PathBuf,
    pub zone_name_property: String,
    pub zone_id_property: Option<String>,
    pub bitrix: BitrixConfig,
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let boundary_path = PathBuf::from(required(&get, "GEOZONE_BOUNDARY_PATH")?);
        let zone_name_property = get("GEOZONE_ZONE_NAME_PROPERTY")
            .unwrap_or_else(|| geozone_geojson::DEFAULT_NAME_PROPERTY.to_string());
        let zone_id_property = get("GEOZONE_ZONE_ID_PROPERTY");

        let mut bitrix = BitrixConfig::new(required(&get, "BITRIX_WEBHOOK_URL")?);
        if let Some(method) = get("BITRIX_LIST_METHOD") {
            bitrix.list_method = method;
        }
        if let Some(method) = get("BITRIX_UPDATE_METHOD") {
            bitrix.update_method = method;
        }
        if let Some(field) = get("BITRIX_ID_FIELD") {
            bitrix.id_field = field;
        }
        if let Some(field) = get("BITRIX_COORDINATES_FIELD") {
            bitrix.coordinates_field = field;
        }
        if let Some(field) = get("BITRIX_ZONE_FIELD") {
            bitrix.zone_field = field;
        }
        bitrix.entity_type_id = optional(&get, "BITRIX_ENTITY_TYPE_ID")?;
        if let Some(secs) = optional::<u64, _>(&get, "BITRIX_TIMEOUT_SECS")? {
            bitrix.timeout = Duration::from_secs(secs);
        }

        let defaults = SyncConfig::default();
        let page_size = optional(&get, "SYNC_PAGE_SIZE")?.unwrap_or(defaults.pagination.page_size);
        if page_size == 0 {
            bail!("SYNC_PAGE_SIZE must be greater than zero");
        }

        let sync = SyncConfig {
            pagination: PaginationConfig {
                page_size,
                start_offset: optional(&get, "SYNC_START_OFFSET")?.unwrap_or(0),
                hard_limit: optional(&get, "SYNC_HARD_LIMIT")?,
            },
            zone_codes: ZoneCodeTable::default(),
            progress_interval: optional(&get, "SYNC_PROGRESS_INTERVAL")?
                .unwrap_or(defaults.progress_interval),
        };

        Ok(Self {
            boundary_path,
            zone_name_property,
            zone_id_property,
            bitrix,
            sync,
        })
    }
}

fn required<F>(get: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).with_context(|| format!("{key} must be set"))
}

fn optional<T, F>(get: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{key}={raw:?} is invalid: {e}"))
        })
        .transpose()
}
