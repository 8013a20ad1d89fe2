//! Bitrix24 REST request and response shapes

use std::collections::BTreeMap;

use geozone_domain::sync::{Record, RecordId, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::config::BitrixConfig;

#[derive(Debug, Serialize)]
pub(crate) struct ListRequest<'a> {
    select: [&'a str; 2],
    order: BTreeMap<&'a str, &'static str>,
    start: usize,
    #[serde(rename = "entityTypeId", skip_serializing_if = "Option::is_none")]
    entity_type_id: Option<u32>,
}

impl<'a> ListRequest<'a> {
    /// Ascending id order keeps the pagination guard meaningful
    pub(crate) fn new(config: &'a BitrixConfig, start: usize) -> Self {
        Self {
            select: [config.coordinates_field.as_str(), config.id_field.as_str()],
            order: BTreeMap::from([(config.id_field.as_str(), "ASC")]),
            start,
            entity_type_id: config.entity_type_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRequest<'a> {
    id: &'a str,
    fields: BTreeMap<&'a str, &'a str>,
    #[serde(rename = "entityTypeId", skip_serializing_if = "Option::is_none")]
    entity_type_id: Option<u32>,
}

impl<'a> UpdateRequest<'a> {
    pub(crate) fn new(config: &'a BitrixConfig, id: &'a str, code: &'a str) -> Self {
        Self {
            id,
            fields: BTreeMap::from([(config.zone_field.as_str(), code)]),
            entity_type_id: config.entity_type_id,
        }
    }
}

/// Error members Bitrix24 attaches to failed calls
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) error_description: Option<String>,
}

impl ApiEnvelope {
    pub(crate) fn into_error(self) -> Option<TransportError> {
        let code = self.error?;
        Some(TransportError::api(
            code,
            self.error_description.unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub(crate) result: Option<ListResult>,
    #[serde(flatten)]
    pub(crate) envelope: ApiEnvelope,
}

/// `crm.<entity>.list` returns rows directly, `crm.item.list` wraps them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResult {
    Rows(Vec<Map<String, Value>>),
    Items { items: Vec<Map<String, Value>> },
}

impl ListResult {
    pub(crate) fn into_rows(self) -> Vec<Map<String, Value>> {
        match self {
            Self::Rows(rows) => rows,
            Self::Items { items } => items,
        }
    }
}

/// Map one list row to a record, dropping rows without a usable id
pub(crate) fn record_from_row(config: &BitrixConfig, row: &Map<String, Value>) -> Option<Record> {
    let id = row
        .get(&config.id_field)
        .and_then(scalar_to_string)
        .and_then(RecordId::new);

    let Some(id) = id else {
        warn!(id_field = %config.id_field, row = ?row, "Row without usable id, dropping");
        return None;
    };

    let coordinates = row
        .get(&config.coordinates_field)
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(Record::new(id, coordinates))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
