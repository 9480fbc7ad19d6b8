//! HTTP client for the public tracking page.

use std::time::Duration;

use correios_core::TrackingRecord;
use reqwest::Client;

use crate::error::ScraperError;
use crate::extract::extract;
use crate::rate_limit::{backoff_delay_secs, retry_with_backoff};
use crate::url::{extract_domain, tracking_url};

/// Fetches tracking pages and extracts their latest event.
///
/// Network failures, 429s and 5xx responses are retried with exponential
/// backoff up to `max_retries` additional attempts; other non-2xx responses
/// are returned as typed errors straight away.
pub struct TrackingClient {
    client: Client,
    url_template: String,
    timeout_secs: u64,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl TrackingClient {
    /// Creates a `TrackingClient` with a per-request timeout, `User-Agent`,
    /// retry policy and tracking URL template (`{}` stands for the code).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
        url_template: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url_template: url_template.to_owned(),
            timeout_secs,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Longest a [`track`](Self::track) call can legitimately take: every
    /// attempt timing out plus every backoff sleep between them.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        let attempts = u64::from(self.max_retries) + 1;
        let requests = self.timeout_secs.saturating_mul(attempts);
        let sleeps = (0..self.max_retries)
            .map(|attempt| backoff_delay_secs(self.backoff_base_secs, attempt))
            .fold(0u64, u64::saturating_add);
        Duration::from_secs(requests.saturating_add(sleeps))
    }

    /// Fetches the tracking page body for `code`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidTrackingUrl`] — blank code or bad template.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network failure or request timeout after all retries.
    pub async fn fetch_page(&self, code: &str) -> Result<String, ScraperError> {
        let url = tracking_url(&self.url_template, code)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited {
                        domain: extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches the tracking page for `code` and extracts its latest event.
    ///
    /// # Errors
    ///
    /// Any error from [`fetch_page`](Self::fetch_page), or
    /// [`ScraperError::Extraction`] if the page could not be read.
    pub async fn track(&self, code: &str) -> Result<TrackingRecord, ScraperError> {
        let body = self.fetch_page(code).await?;
        let record = extract(&body).map_err(|source| ScraperError::Extraction {
            code: code.to_owned(),
            source,
        })?;
        tracing::debug!(
            code,
            status = record.status(),
            in_transit = record.place().is_in_transit(),
            "extracted tracking record"
        );
        Ok(record)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
