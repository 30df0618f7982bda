//! Turns one raw upstream offer into a canonical [`Itinerary`].
//!
//! The provider's payload is untrusted: keys move around and go missing. Each
//! field is resolved through an ordered fallback chain declared below; the
//! first present value wins, then a default applies. Empty strings, `null`,
//! `false` and numeric zero all count as absent.

use std::str::FromStr;

use flightcart_core::models::{NOT_AVAILABLE, UNKNOWN_AIRLINE, UNKNOWN_AIRPORT};
use flightcart_core::{AirportTime, CoreError, CoreResult, Itinerary, Leg, TravelClass};
use rust_decimal::Decimal;
use serde_json::Value;

/// Looks a value up somewhere inside a leg or offer object.
pub type Accessor = for<'a> fn(&'a Value) -> Option<&'a Value>;

/// Offer keys that may hold the leg list, in priority order.
pub const LEG_LIST_KEYS: &[&str] = &["flights", "legs"];

/// Keys that mark an offer root as carrying a single implicit leg.
pub const LEG_FIELD_KEYS: &[&str] = &[
    "departure_airport",
    "arrival_airport",
    "flight_number",
    "departure_time",
    "arrival_time",
];

/// Airport object keys that may hold the airport code, in priority order.
pub const AIRPORT_CODE_KEYS: &[&str] = &["code", "iata", "icao", "id"];

pub const AIRCRAFT_KEYS: &[&str] = &["airplane", "aircraft"];

/// Offer keys for the per-passenger fare, in priority order.
pub const PRICE_KEYS: &[&str] = &["price", "total_price"];

pub const DEPARTURE_TIME_CHAIN: &[Accessor] = &[leg_departure_time, departure_airport_time];
pub const ARRIVAL_TIME_CHAIN: &[Accessor] = &[leg_arrival_time, arrival_airport_time];

const TIME_SEPARATORS: [char; 2] = ['T', ' '];

fn leg_departure_time(leg: &Value) -> Option<&Value> {
    leg.get("departure_time")
}

fn departure_airport_time(leg: &Value) -> Option<&Value> {
    leg.get("departure_airport")?.get("time")
}

fn leg_arrival_time(leg: &Value) -> Option<&Value> {
    leg.get("arrival_time")
}

fn arrival_airport_time(leg: &Value) -> Option<&Value> {
    leg.get("arrival_airport")?.get("time")
}

/// Normalizes one offer. Fails only when no usable leg data exists.
pub fn normalize(offer: &Value) -> CoreResult<Itinerary> {
    let raw_legs = locate_legs(offer)?;
    let first = raw_legs[0];

    let airline = text_of(first, &["airline"])
        .or_else(|| text_of(offer, &["airline"]))
        .unwrap_or_else(|| UNKNOWN_AIRLINE.to_string());
    let airline_logo_url =
        text_of(first, &["airline_logo"]).or_else(|| text_of(offer, &["airline_logo"]));

    let base_price = first_key(offer, PRICE_KEYS)
        .and_then(as_price)
        .unwrap_or(Decimal::ZERO);

    let total_duration_minutes = first_key(offer, &["total_duration"])
        .or_else(|| first_key(first, &["duration"]))
        .and_then(as_minutes);

    let travel_class = first_key(offer, &["travel_class"])
        .and_then(as_travel_class)
        .unwrap_or_default();

    Ok(Itinerary {
        id: None,
        airline,
        airline_logo_url,
        legs: raw_legs.into_iter().map(normalize_leg).collect(),
        base_price,
        total_duration_minutes,
        travel_class,
    })
}

/// Normalizes a result list, dropping offers without leg data. Order is kept.
pub fn normalize_batch(offers: &[Value]) -> Vec<Itinerary> {
    offers
        .iter()
        .enumerate()
        .filter_map(|(index, offer)| match normalize(offer) {
            Ok(itinerary) => Some(itinerary),
            Err(e) => {
                tracing::warn!("Dropping offer #{}: {}", index, e);
                None
            }
        })
        .collect()
}

/// `HH:MM` from an upstream timestamp that may or may not be ISO-8601.
///
/// Takes the text after the first `T`, then the text after the first space,
/// keeping five characters of the first non-empty one; anything else is `N/A`.
pub fn extract_time(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return NOT_AVAILABLE.to_string();
    };

    TIME_SEPARATORS
        .iter()
        .find_map(|sep| {
            let clock: String = raw.split(*sep).nth(1)?.chars().take(5).collect();
            (!clock.is_empty()).then_some(clock)
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn locate_legs(offer: &Value) -> CoreResult<Vec<&Value>> {
    if !offer.is_object() {
        return Err(CoreError::MalformedOffer("offer is not an object".to_string()));
    }

    for key in LEG_LIST_KEYS {
        if let Some(list) = offer.get(*key).and_then(Value::as_array) {
            let legs: Vec<&Value> = list.iter().filter(|leg| leg.is_object()).collect();
            if legs.is_empty() {
                return Err(CoreError::MalformedOffer(format!("'{}' holds no legs", key)));
            }
            return Ok(legs);
        }
    }

    // No list: the offer itself may be a single flattened leg.
    if first_key(offer, LEG_FIELD_KEYS).is_some() {
        Ok(vec![offer])
    } else {
        Err(CoreError::MalformedOffer("no leg data".to_string()))
    }
}

fn normalize_leg(leg: &Value) -> Leg {
    Leg {
        flight_number: text_of(leg, &["flight_number"])
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        departure_airport: AirportTime {
            code: airport_code(leg.get("departure_airport")),
            time: first_of(leg, DEPARTURE_TIME_CHAIN).and_then(as_text),
        },
        arrival_airport: AirportTime {
            code: airport_code(leg.get("arrival_airport")),
            time: first_of(leg, ARRIVAL_TIME_CHAIN).and_then(as_text),
        },
        duration_minutes: first_key(leg, &["duration"]).and_then(as_minutes),
        aircraft: text_of(leg, AIRCRAFT_KEYS),
        legroom: text_of(leg, &["legroom"]),
    }
}

fn airport_code(airport: Option<&Value>) -> String {
    let code = match airport {
        Some(Value::String(code)) if !code.trim().is_empty() => Some(code.trim().to_string()),
        Some(airport) => text_of(airport, AIRPORT_CODE_KEYS),
        None => None,
    };
    code.unwrap_or_else(|| UNKNOWN_AIRPORT.to_string())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

fn first_key<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_present(value))
}

fn first_of<'a>(object: &'a Value, chain: &[Accessor]) -> Option<&'a Value> {
    chain
        .iter()
        .filter_map(|accessor| accessor(object))
        .find(|value| is_present(value))
}

fn text_of(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(as_text)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_minutes(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|m| u32::try_from(m).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_price(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .filter(|price| !price.is_sign_negative())
}

fn as_travel_class(value: &Value) -> Option<TravelClass> {
    match value {
        Value::Number(n) => n.as_u64().and_then(TravelClass::from_code),
        Value::String(s) => TravelClass::parse(s),
        _ => None,
    }
}
