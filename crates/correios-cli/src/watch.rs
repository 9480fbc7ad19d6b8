//! Periodic refresh of every configured shipment.
//!
//! All shipments are refreshed once at startup and then on a repeated
//! scheduler job every `refresh_interval_secs` until Ctrl-C.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use correios_core::{load_shipments, AppConfig, IconTable, ShipmentSensor};
use correios_scraper::TrackingClient;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::refresh::{build_tracking_client, fetch_outcome, load_icons};

/// Upper bound on tracking pages fetched at the same time.
const MAX_CONCURRENT_REFRESHES: usize = 4;

type Sensors = Arc<Mutex<Vec<ShipmentSensor>>>;

pub(crate) async fn run_watch(
    config: &AppConfig,
    shipments_path: &Path,
    once: bool,
) -> anyhow::Result<()> {
    let shipments = load_shipments(shipments_path)?.shipments;
    if shipments.is_empty() {
        tracing::warn!(
            path = %shipments_path.display(),
            "no shipments configured; nothing to watch"
        );
        return Ok(());
    }

    let client = Arc::new(build_tracking_client(config)?);
    let icons = Arc::new(load_icons(config)?);
    let sensors: Sensors = Arc::new(Mutex::new(
        shipments
            .iter()
            .map(|s| ShipmentSensor::new(&s.code, &s.description))
            .collect(),
    ));

    tracing::info!(count = shipments.len(), "watching shipments");
    refresh_all(&client, &icons, &sensors).await;
    if once {
        return Ok(());
    }

    let mut scheduler = JobScheduler::new().await?;
    register_refresh_job(
        &scheduler,
        Duration::from_secs(config.refresh_interval_secs),
        client,
        icons,
        sensors,
    )
    .await?;
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    scheduler.shutdown().await?;
    Ok(())
}

async fn register_refresh_job(
    scheduler: &JobScheduler,
    interval: Duration,
    client: Arc<TrackingClient>,
    icons: Arc<IconTable>,
    sensors: Sensors,
) -> anyhow::Result<()> {
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let client = Arc::clone(&client);
        let icons = Arc::clone(&icons);
        let sensors = Arc::clone(&sensors);

        Box::pin(async move {
            tracing::debug!("scheduler: starting shipment refresh");
            refresh_all(&client, &icons, &sensors).await;
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Refreshes every sensor, fetching concurrently and applying in order.
///
/// The lock is not held while pages are fetched.
pub(crate) async fn refresh_all(
    client: &TrackingClient,
    icons: &IconTable,
    sensors: &Mutex<Vec<ShipmentSensor>>,
) {
    let codes: Vec<String> = sensors
        .lock()
        .await
        .iter()
        .map(|s| s.code().to_owned())
        .collect();

    let fetches: Vec<_> = codes
        .iter()
        .map(|code| fetch_outcome(client, code))
        .collect();
    let outcomes: Vec<_> = stream::iter(fetches)
        .buffered(MAX_CONCURRENT_REFRESHES)
        .collect()
        .await;

    let mut sensors = sensors.lock().await;
    for (sensor, outcome) in sensors.iter_mut().zip(&outcomes) {
        sensor.apply(outcome, icons);
        tracing::info!(
            code = sensor.code(),
            state = sensor.state().unwrap_or_default(),
            last_movement = sensor.last_movement().unwrap_or_default(),
            "{}",
            sensor.name()
        );
    }
}
