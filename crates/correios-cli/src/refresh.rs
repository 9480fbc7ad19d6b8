//! One refresh of one shipment: fetch, extract, apply.
//!
//! Every failure (bad URL, transport, timeout, markup drift) is logged with
//! the tracking code and failed stage and then shown as the "not found"
//! sentinel. Nothing here returns an error, so a bad refresh never stops the
//! cycle that called it.

use correios_core::{AppConfig, IconTable, ShipmentSensor, TrackingOutcome};
use correios_scraper::{ExtractionError, ScraperError, TrackingClient};

pub(crate) fn build_tracking_client(config: &AppConfig) -> anyhow::Result<TrackingClient> {
    TrackingClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
        &config.tracking_url_template,
    )
    .map_err(|e| anyhow::anyhow!("failed to build tracking client: {e}"))
}

/// The icon table from `CORREIOS_ICONS_PATH`, or the built-in one.
pub(crate) fn load_icons(config: &AppConfig) -> anyhow::Result<IconTable> {
    match &config.icons_path {
        Some(path) => Ok(IconTable::load(path)?),
        None => Ok(IconTable::default()),
    }
}

/// Fetches and extracts `code`, bounded by the client's deadline.
pub(crate) async fn fetch_outcome(client: &TrackingClient, code: &str) -> TrackingOutcome {
    let deadline = client.deadline();
    let result = match tokio::time::timeout(deadline, client.track(code)).await {
        Ok(result) => result,
        Err(_) => Err(ScraperError::Timeout {
            code: code.to_owned(),
            secs: deadline.as_secs(),
        }),
    };

    match result {
        Ok(record) => {
            tracing::info!(code, status = record.status(), "shipment refreshed");
            TrackingOutcome::Tracked(record)
        }
        // No history yet, or the carrier moved the tracking block.
        Err(
            e @ ScraperError::Extraction {
                source: ExtractionError::ContainerNotFound,
                ..
            },
        ) => {
            tracing::warn!(code, stage = e.stage(), error = %e, "no tracking data on page");
            TrackingOutcome::NotFound
        }
        Err(e) => {
            tracing::error!(code, stage = e.stage(), error = %e, "shipment refresh failed");
            TrackingOutcome::NotFound
        }
    }
}

/// Refreshes `sensor` in place and returns the outcome that was applied.
pub(crate) async fn refresh_shipment(
    client: &TrackingClient,
    sensor: &mut ShipmentSensor,
    icons: &IconTable,
) -> TrackingOutcome {
    let outcome = fetch_outcome(client, sensor.code()).await;
    sensor.apply(&outcome, icons);
    outcome
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use correios_core::NOT_FOUND_STATUS;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const TRANSFER_PAGE: &str = r#"<div class="accordion_2"><ul class="linha_status">
        <li><b>Objeto em transferência - por favor aguarde</b></li>
        <li>Data  : 12/04/2024 | Hora: 08:31</li>
        <li>Origem: CTE CAJAMAR - Cajamar/SP</li>
        <li>Destino: CTCE CURITIBA - Curitiba/PR</li>
    </ul></div>"#;

    fn client_for(server: &MockServer, timeout_secs: u64) -> TrackingClient {
        let template = format!("{}/?id={{}}", server.uri());
        TrackingClient::new(timeout_secs, "correios-test/0.1", 0, 0, &template).unwrap()
    }

    async fn serve(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn successful_refresh_updates_sensor() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(200).set_body_string(TRANSFER_PAGE)).await;

        let mut sensor = ShipmentSensor::new("QB123456789BR", "Livros");
        let outcome =
            refresh_shipment(&client_for(&server, 5), &mut sensor, &IconTable::default()).await;

        assert!(outcome.record().is_some());
        assert_eq!(
            sensor.state(),
            Some("Objeto em transferência - por favor aguarde")
        );
        assert_eq!(sensor.icon(), Some("mdi:truck-fast-outline"));
        assert_eq!(sensor.origin(), Some("CTE CAJAMAR - Cajamar/SP"));
        assert_eq!(sensor.last_movement(), Some("12/04 às 08:31"));
    }

    #[tokio::test]
    async fn garbage_page_degrades_to_sentinel() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(200).set_body_string("<html></html>")).await;

        let mut sensor = ShipmentSensor::new("QB123456789BR", "Livros");
        let outcome =
            refresh_shipment(&client_for(&server, 5), &mut sensor, &IconTable::default()).await;

        assert_eq!(outcome, TrackingOutcome::NotFound);
        assert_eq!(sensor.state(), Some(NOT_FOUND_STATUS));
        assert_eq!(sensor.icon(), Some("mdi:package-variant-closed"));
    }

    #[tokio::test]
    async fn server_error_degrades_to_sentinel() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(500)).await;

        let mut sensor = ShipmentSensor::new("QB123456789BR", "Livros");
        refresh_shipment(&client_for(&server, 5), &mut sensor, &IconTable::default()).await;
        assert_eq!(sensor.state(), Some(NOT_FOUND_STATUS));
    }

    #[tokio::test]
    async fn slow_page_degrades_to_sentinel() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200)
                .set_body_string(TRANSFER_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let mut sensor = ShipmentSensor::new("QB123456789BR", "Livros");
        let outcome =
            refresh_shipment(&client_for(&server, 1), &mut sensor, &IconTable::default()).await;

        assert_eq!(outcome, TrackingOutcome::NotFound);
        assert!(sensor.origin().is_none());
    }

    #[tokio::test]
    async fn failure_after_success_clears_previous_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TRANSFER_PAGE))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        serve(&server, ResponseTemplate::new(404)).await;

        let client = client_for(&server, 5);
        let icons = IconTable::default();
        let mut sensor = ShipmentSensor::new("QB123456789BR", "Livros");

        refresh_shipment(&client, &mut sensor, &icons).await;
        assert!(sensor.origin().is_some());

        refresh_shipment(&client, &mut sensor, &icons).await;
        assert_eq!(sensor.state(), Some(NOT_FOUND_STATUS));
        assert!(sensor.origin().is_none());
        assert!(sensor.last_movement().is_none());
    }
}
