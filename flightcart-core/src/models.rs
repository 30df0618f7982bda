use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{pricing, CoreError, CoreResult};

/// Airport code used when no source field carries one.
pub const UNKNOWN_AIRPORT: &str = "??";
/// Airline name used when neither the first leg nor the offer names one.
pub const UNKNOWN_AIRLINE: &str = "Unknown Airline";
/// Rendered in place of any missing time, duration or flight number.
pub const NOT_AVAILABLE: &str = "N/A";

/// Cabin class, carried on the wire as its upstream number (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn code(self) -> u8 {
        match self {
            TravelClass::Economy => 1,
            TravelClass::PremiumEconomy => 2,
            TravelClass::Business => 3,
            TravelClass::First => 4,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(TravelClass::Economy),
            2 => Some(TravelClass::PremiumEconomy),
            3 => Some(TravelClass::Business),
            4 => Some(TravelClass::First),
            _ => None,
        }
    }

    /// Accepts `3` as well as `"3"`, which is how query strings and some
    /// upstream payloads carry it.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().and_then(Self::from_code)
    }

    pub fn label(self) -> &'static str {
        match self {
            TravelClass::Economy => "Economy",
            TravelClass::PremiumEconomy => "Premium Economy",
            TravelClass::Business => "Business",
            TravelClass::First => "First Class",
        }
    }
}

impl Serialize for TravelClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TravelClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        // Unknown classes fall back to economy instead of rejecting the item.
        let class = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => TravelClass::from_code(n),
            Raw::Text(s) => TravelClass::parse(&s),
            Raw::Other(_) => None,
        };
        Ok(class.unwrap_or_default())
    }
}

/// One end of a leg. `time` is the raw upstream timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportTime {
    pub code: String,
    pub time: Option<String>,
}

impl Default for AirportTime {
    fn default() -> Self {
        Self {
            code: UNKNOWN_AIRPORT.to_string(),
            time: None,
        }
    }
}

/// One flown segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leg {
    pub flight_number: String,
    pub departure_airport: AirportTime,
    pub arrival_airport: AirportTime,
    pub duration_minutes: Option<u32>,
    pub aircraft: Option<String>,
    pub legroom: Option<String>,
}

/// A canonical, normalized flight offer.
///
/// Every field has a default so that cart payloads missing fields are still
/// accepted; only the normalizer guarantees `legs` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Itinerary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub airline: String,
    pub airline_logo_url: Option<String>,
    pub legs: Vec<Leg>,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub total_duration_minutes: Option<u32>,
    pub travel_class: TravelClass,
}

impl Itinerary {
    pub fn stops_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Arrival airport of every leg except the last, in travel order.
    pub fn layover_airports(&self) -> Vec<&str> {
        match self.legs.split_last() {
            Some((_, connecting)) => connecting
                .iter()
                .map(|leg| leg.arrival_airport.code.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn origin(&self) -> Option<&AirportTime> {
        self.legs.first().map(|leg| &leg.departure_airport)
    }

    pub fn destination(&self) -> Option<&AirportTime> {
        self.legs.last().map(|leg| &leg.arrival_airport)
    }
}

fn default_adults() -> u32 {
    1
}

/// An itinerary selected into the cart, priced for its party.
///
/// Replace-only: a cart entry is never edited after it has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    #[serde(default = "default_adults")]
    pub passenger_adults: u32,
    #[serde(default)]
    pub passenger_children: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl CartItem {
    /// Prices the itinerary for the party. Fails when the total would
    /// overflow, which only a garbage upstream fare can cause.
    pub fn new(itinerary: Itinerary, adults: u32, children: u32) -> CoreResult<Self> {
        let total_price = pricing::compute_total(itinerary.base_price, adults, children)
            .ok_or_else(|| {
                CoreError::MalformedOffer(format!(
                    "fare {} overflows for {} passengers",
                    itinerary.base_price,
                    u64::from(adults) + u64::from(children)
                ))
            })?;
        Ok(Self {
            itinerary,
            passenger_adults: adults,
            passenger_children: children,
            total_price,
        })
    }

    /// The identifier, treating an empty string the same as a missing one.
    pub fn id(&self) -> Option<&str> {
        self.itinerary.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.itinerary.id = Some(id.into());
        self
    }

    pub fn passenger_count(&self) -> u32 {
        self.passenger_adults.saturating_add(self.passenger_children)
    }
}
