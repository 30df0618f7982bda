use async_trait::async_trait;
use flightcart_core::{CartItem, SearchQuery, TripType};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::ClientError;

/// Transport to the server-side cart.
#[async_trait]
pub trait CartApi: Send + Sync + 'static {
    async fn add(&self, item: CartItem) -> Result<Vec<CartItem>, ClientError>;
    async fn list(&self) -> Result<Vec<CartItem>, ClientError>;
    async fn remove(&self, id: &str) -> Result<Vec<CartItem>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct CartEnvelope {
    #[serde(default)]
    cart: Vec<CartItem>,
}

#[derive(Debug, Deserialize)]
pub struct FlightsEnvelope {
    #[serde(default)]
    pub flights: Vec<Value>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// HTTP client for the flight cart API.
#[derive(Clone)]
pub struct HttpCartApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCartApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one so
    /// that ids containing `/`, `?` or `#` stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Raw offers for a search, as the server returns them.
    pub async fn search_flights(&self, query: &SearchQuery) -> Result<FlightsEnvelope, ClientError> {
        let url = self.endpoint(&["flights"])?;
        let mut params = vec![
            ("from", query.origin.clone()),
            ("to", query.destination.clone()),
            ("departure", query.departure_date.to_string()),
            ("adults", query.adults.to_string()),
            ("children", query.children.to_string()),
            ("travel_class", query.travel_class.code().to_string()),
        ];
        match query.trip_type {
            TripType::Round => params.push(("tripType", "round".to_string())),
            TripType::OneWay => params.push(("tripType", "oneway".to_string())),
        }
        if let Some(ret) = query.return_date {
            params.push(("returnDate", ret.to_string()));
        }

        info!("Searching flights {} -> {}", query.origin, query.destination);
        let response = self.http.get(url).query(&params).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<FlightsEnvelope>().await?)
    }

    /// Normalized and priced offers for the query's party.
    pub async fn search_quotes(&self, query: &SearchQuery) -> Result<Vec<CartItem>, ClientError> {
        let envelope = self.search_flights(query).await?;
        Ok(flightcart_offer::quote_offers(
            &envelope.flights,
            query.adults,
            query.children,
        ))
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: ErrorEnvelope = response.json().await.unwrap_or_default();
    let message = match (body.error, body.details) {
        (Some(error), Some(details)) => format!("{}: {}", error, details),
        (Some(error), None) => error,
        (None, _) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };

    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(message))
    } else {
        Err(ClientError::Api { status: status.as_u16(), message })
    }
}

async fn read_cart(response: Response) -> Result<Vec<CartItem>, ClientError> {
    let response = check_status(response).await?;
    Ok(response.json::<CartEnvelope>().await?.cart)
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn add(&self, item: CartItem) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&["cart"])?;
        read_cart(self.http.post(url).json(&item).send().await?).await
    }

    async fn list(&self) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&["cart"])?;
        read_cart(self.http.get(url).send().await?).await
    }

    async fn remove(&self, id: &str) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&["cart", id])?;
        read_cart(self.http.delete(url).send().await?).await
    }
}
