use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use flightcart_core::search::FlightSearchParams;
use flightcart_core::SearchQuery;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct FlightsResponse {
    pub success: bool,
    pub flights: Vec<Value>,
    pub total: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights", get(search_flights))
}

/// GET /flights
/// Raw upstream offers, stamped with the requested travel class. Offers with
/// no usable leg data are dropped; the rest are passed through untouched.
async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<FlightSearchParams>,
) -> Result<Json<FlightsResponse>, AppError> {
    info!("Fetching flights: {:?}", params);

    // Rejected here, before any upstream call.
    let query = SearchQuery::try_from(params)?;
    let request = query.to_upstream(&state.upstream);

    let offers = state.supplier.search(&request).await?;
    let travel_class = query.travel_class.code();

    let flights: Vec<Value> = offers
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut offer)| {
            if let Err(e) = flightcart_offer::normalize(&offer) {
                warn!("Dropping offer #{}: {}", index, e);
                return None;
            }
            if let Some(fields) = offer.as_object_mut() {
                fields.insert("travel_class".to_string(), Value::from(travel_class));
            }
            Some(offer)
        })
        .collect();

    info!("Returning {} flights", flights.len());
    Ok(Json(FlightsResponse {
        success: true,
        total: flights.len(),
        flights,
    }))
}
