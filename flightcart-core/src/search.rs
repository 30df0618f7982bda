use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TravelClass;
use crate::{CoreError, CoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    OneWay,
    Round,
}

impl TripType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "oneway" => Some(TripType::OneWay),
            "round" => Some(TripType::Round),
            _ => None,
        }
    }
}

/// Raw `GET /flights` query string. Everything is optional text so that the
/// conversion into [`SearchQuery`] owns every validation message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightSearchParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub departure: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub passengers: Option<String>,
    pub adults: Option<String>,
    pub children: Option<String>,
    #[serde(rename = "tripType")]
    pub trip_type: Option<String>,
    pub travel_class: Option<String>,
}

/// A validated flight search. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub adults: u32,
    pub children: u32,
    pub travel_class: TravelClass,
}

impl SearchQuery {
    pub fn validate(&self) -> CoreResult<()> {
        if self.origin.is_empty() {
            return Err(invalid("origin is required"));
        }
        if self.destination.is_empty() {
            return Err(invalid("destination is required"));
        }
        if self.adults < 1 {
            return Err(invalid("at least one adult passenger is required"));
        }
        if self.trip_type == TripType::Round {
            match self.return_date {
                None => return Err(invalid("return date is required for round trips")),
                Some(ret) if ret < self.departure_date => {
                    return Err(invalid("return date is before departure date"))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Builds the upstream request. The return date is only carried for
    /// round trips: the provider reads its presence as the trip-type switch.
    pub fn to_upstream(&self, settings: &UpstreamSettings) -> UpstreamRequest {
        let return_date = match self.trip_type {
            TripType::Round => self.return_date.map(|d| d.format(DATE_FORMAT).to_string()),
            TripType::OneWay => None,
        };

        UpstreamRequest {
            engine: settings.engine.clone(),
            departure_id: self.origin.clone(),
            arrival_id: self.destination.clone(),
            outbound_date: self.departure_date.format(DATE_FORMAT).to_string(),
            return_date,
            adults: self.adults,
            children: self.children,
            travel_class: self.travel_class.code(),
            hl: settings.language.clone(),
            gl: settings.country.clone(),
        }
    }
}

impl TryFrom<FlightSearchParams> for SearchQuery {
    type Error = CoreError;

    fn try_from(params: FlightSearchParams) -> Result<Self, Self::Error> {
        let origin = required(params.from, "from")?.to_ascii_uppercase();
        let destination = required(params.to, "to")?.to_ascii_uppercase();
        let departure_date = parse_date(&required(params.departure, "departure")?, "departure")?;

        let trip_type = match present(params.trip_type) {
            Some(raw) => TripType::parse(&raw)
                .ok_or_else(|| invalid(format!("unknown tripType '{}'", raw)))?,
            None => TripType::default(),
        };

        // A one-way form may still carry a stale return date; it is ignored.
        let return_date = match (trip_type, present(params.return_date)) {
            (TripType::Round, Some(raw)) => Some(parse_date(&raw, "returnDate")?),
            _ => None,
        };

        let children = match present(params.children) {
            Some(raw) => parse_count(&raw, "children")?,
            None => 0,
        };
        // `passengers` is the whole party, children included.
        let adults = match (present(params.adults), present(params.passengers)) {
            (Some(raw), _) => parse_count(&raw, "adults")?,
            (None, Some(raw)) => parse_count(&raw, "passengers")?.saturating_sub(children).max(1),
            (None, None) => 1,
        };

        let travel_class = match present(params.travel_class) {
            Some(raw) => TravelClass::parse(&raw)
                .ok_or_else(|| invalid(format!("unknown travel_class '{}'", raw)))?,
            None => TravelClass::default(),
        };

        let query = SearchQuery {
            origin,
            destination,
            departure_date,
            return_date,
            trip_type,
            adults,
            children,
            travel_class,
        };
        query.validate()?;
        Ok(query)
    }
}

/// Provider-wide request settings that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSettings {
    pub engine: String,
    pub language: String,
    pub country: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            engine: "google_flights".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
        }
    }
}

/// Query parameters sent to the upstream provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamRequest {
    pub engine: String,
    pub departure_id: String,
    pub arrival_id: String,
    pub outbound_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub adults: u32,
    pub children: u32,
    pub travel_class: u8,
    pub hl: String,
    pub gl: String,
}

fn invalid(msg: impl Into<String>) -> CoreError {
    CoreError::InvalidSearchParameters(msg.into())
}

fn present(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn required(raw: Option<String>, name: &str) -> CoreResult<String> {
    present(raw).ok_or_else(|| invalid(format!("missing required parameter '{}'", name)))
}

fn parse_date(raw: &str, name: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| invalid(format!("'{}' must be a YYYY-MM-DD date, got '{}'", name, raw)))
}

fn parse_count(raw: &str, name: &str) -> CoreResult<u32> {
    raw.parse::<u32>()
        .map_err(|_| invalid(format!("'{}' must be a non-negative integer, got '{}'", name, raw)))
}
