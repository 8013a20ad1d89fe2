//! GeoZone Sync - CRM geotagging job
//!
//! Loads the zone map, pulls every CRM record through the Bitrix24 REST
//! API, classifies its coordinates and writes the zone code back. Only a
//! bad configuration or an unloadable zone map aborts the run.

mod config;

use anyhow::{Context, Result};
use geozone_bitrix::BitrixCrm;
use geozone_domain::sync::SyncService;
use geozone_geojson::GeoJsonBoundaryLoader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_value(
        std::env::var("LOG_FORMAT").ok().as_deref(),
    ));

    info!("Starting GeoZone sync");

    let config = AppConfig::from_env().context("Invalid configuration")?;

    let mut loader = GeoJsonBoundaryLoader::new().with_name_property(&config.zone_name_property);
    if let Some(property) = &config.zone_id_property {
        loader = loader.with_id_property(property);
    }
    let store = loader.load_path(&config.boundary_path).with_context(|| {
        format!(
            "Failed to load boundary file {}",
            config.boundary_path.display()
        )
    })?;

    info!(zones = store.len(), "Zone map ready");

    let crm = BitrixCrm::new(config.bitrix).context("Failed to initialize Bitrix24 adapter")?;
    let service = SyncService::new(crm.clone(), crm, config.sync);

    let report = service.run(&store).await;

    if report.is_partial() {
        warn!(
            run_id = %report.run_id,
            stop_reason = ?report.stop_reason,
            "Record list was incomplete, rerun with SYNC_START_OFFSET to cover the rest"
        );
    }

    Ok(())
}
