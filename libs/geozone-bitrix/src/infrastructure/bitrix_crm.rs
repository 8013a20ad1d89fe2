//! Bitrix24 CRM Implementation
//!
//! This module implements the `RecordSource` and `RecordSink` ports over the
//! Bitrix24 REST API. It handles all HTTP calls and converts reqwest errors
//! and Bitrix error envelopes to domain errors.

use std::future::Future;
use std::sync::Arc;

use geozone_domain::{
    ports::{RecordSink, RecordSource},
    sync::{Page, Record, TransportError, ZoneAssignment},
};
use reqwest::{Client, Response};
use tracing::{debug, debug_span, error, info, warn, Instrument};

use super::{
    config::BitrixConfig,
    wire::{record_from_row, ApiEnvelope, ListRequest, ListResponse, UpdateRequest},
};

/// Longest response body excerpt kept in a status error
const MAX_ERROR_BODY: usize = 512;

/// Bitrix24-backed implementation of the record ports
///
/// One value serves as both source and sink; clones share the underlying
/// connection pool.
///
/// ## Pagination
///
/// Bitrix24 list methods return a fixed 50 rows per page and ignore any
/// requested size, so the sync pass must be configured with a page size of
/// 50. The `page_size` argument of [`RecordSource::fetch_page`] is only
/// used for logging. Rows without a usable id are dropped but still counted
/// in [`Page::row_count`], so a full page is never mistaken for the last one.
///
/// ## Error Handling
///
/// Transport failures, non-2xx statuses and Bitrix `error` envelopes are all
/// converted to [`TransportError`]. Nothing is retried.
#[derive(Clone)]
pub struct BitrixCrm {
    client: Client,
    config: Arc<BitrixConfig>,
}

impl BitrixCrm {
    /// Create a new Bitrix24 adapter
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Config` if the webhook URL is empty or the
    /// HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use geozone_bitrix::{BitrixConfig, BitrixCrm};
    ///
    /// let config = BitrixConfig::new("https://portal.example/rest/1/secret");
    /// let crm = BitrixCrm::new(config).unwrap();
    /// ```
    pub fn new(config: BitrixConfig) -> Result<Self, TransportError> {
        if config.webhook_url.trim().is_empty() {
            return Err(TransportError::config("Bitrix webhook URL is empty"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::config(format!("Failed to build HTTP client: {e}")))?;

        info!(
            list_method = %config.list_method,
            update_method = %config.update_method,
            entity_type_id = ?config.entity_type_id,
            timeout_secs = config.timeout.as_secs_f64(),
            "Initializing BitrixCrm"
        );

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Get the adapter configuration
    pub fn config(&self) -> &BitrixConfig {
        &self.config
    }
}

/// Turn a non-2xx response into a domain error, preferring Bitrix's own
/// error envelope when the body carries one
async fn error_from_response(response: Response) -> TransportError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    serde_json::from_str::<ApiEnvelope>(&body)
        .ok()
        .and_then(ApiEnvelope::into_error)
        .unwrap_or_else(|| {
            let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
            TransportError::status(status, excerpt)
        })
}

impl RecordSource for BitrixCrm {
    fn fetch_page(
        &self,
        offset: usize,
        page_size: usize,
    ) -> impl Future<Output = Result<Page, TransportError>> + Send {
        let client = self.client.clone();
        let config = self.config.clone();
        let url = self.config.method_url(&self.config.list_method);
        let span = debug_span!("bitrix_list", method = %self.config.list_method, offset);

        async move {
            debug!(page_size, "Requesting record page");

            let response = client
                .post(&url)
                .json(&ListRequest::new(&config, offset))
                .send()
                .await
                .map_err(|err| {
                    error!(error = %err, "List request failed");
                    TransportError::request(err.to_string())
                })?;

            if !response.status().is_success() {
                let err = error_from_response(response).await;
                warn!(error = %err, "List request rejected");
                return Err(err);
            }

            let body: ListResponse = response.json().await.map_err(|err| {
                error!(error = %err, "Failed to decode list response");
                TransportError::decode(err.to_string())
            })?;

            if let Some(err) = body.envelope.into_error() {
                warn!(error = %err, "List request returned an API error");
                return Err(err);
            }

            let rows = body
                .result
                .ok_or_else(|| TransportError::decode("List response has no 'result' member"))?
                .into_rows();

            let records: Vec<Record> = rows
                .iter()
                .filter_map(|row| record_from_row(&config, row))
                .collect();

            debug!(rows = rows.len(), records = records.len(), "Received record page");
            Ok(Page::with_row_count(records, rows.len()))
        }
        .instrument(span)
    }
}

impl RecordSink for BitrixCrm {
    fn write_zone(
        &self,
        assignment: &ZoneAssignment,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        let client = self.client.clone();
        let config = self.config.clone();
        let url = self.config.method_url(&self.config.update_method);
        let record_id = assignment.record_id().as_str().to_string();
        let code = assignment.code().as_str().to_string();
        let span = debug_span!("bitrix_update", record_id = %record_id, code = %code);

        async move {
            let response = client
                .post(&url)
                .json(&UpdateRequest::new(&config, &record_id, &code))
                .send()
                .await
                .map_err(|err| TransportError::request(err.to_string()))?;

            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            // 2xx bodies can still carry an error envelope
            let body = response.text().await.unwrap_or_default();
            if let Some(err) = serde_json::from_str::<ApiEnvelope>(&body)
                .ok()
                .and_then(ApiEnvelope::into_error)
            {
                return Err(err);
            }

            debug!("Zone field updated");
            Ok(())
        }
        .instrument(span)
    }
}
