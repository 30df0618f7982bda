use async_trait::async_trait;
use flightcart_core::supplier::extract_offers;
use flightcart_core::{CoreError, CoreResult, FlightSupplier, UpstreamRequest};
use flightcart_shared::Masked;
use serde_json::Value;
use tracing::{info, warn};

use crate::app_config::UpstreamConfig;

/// SerpAPI Google Flights search over HTTP GET.
///
/// No timeout and no retry: a failed call surfaces as a failed search.
#[derive(Clone)]
pub struct SerpApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Masked<String>,
}

impl SerpApiClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        if config.api_key.is_empty() {
            warn!("Upstream API key is empty; searches will be rejected by the provider");
        }
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn build_request(&self, request: &UpstreamRequest) -> reqwest::Result<reqwest::Request> {
        self.http
            .get(&self.base_url)
            .query(request)
            .query(&[("api_key", self.api_key.expose().as_str())])
            .build()
    }
}

/// The request URL carries the API key, so it never reaches the message.
fn unavailable(e: reqwest::Error) -> CoreError {
    CoreError::UpstreamUnavailable(e.without_url().to_string())
}

#[async_trait]
impl FlightSupplier for SerpApiClient {
    async fn search(&self, request: &UpstreamRequest) -> CoreResult<Vec<Value>> {
        info!(
            "Fetching flights {} -> {} on {} (return: {:?})",
            request.departure_id, request.arrival_id, request.outbound_date, request.return_date
        );

        let http_request = self.build_request(request).map_err(unavailable)?;
        let response = self.http.execute(http_request).await.map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::UpstreamUnavailable(format!("HTTP {}: {}", status, body)));
        }

        let body: Value = response.json().await.map_err(unavailable)?;
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            warn!("Upstream reported: {}", message);
        }

        let offers = extract_offers(&body);
        info!("Upstream returned {} offers", offers.len());
        Ok(offers)
    }
}
