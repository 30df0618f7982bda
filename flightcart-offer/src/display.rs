use flightcart_core::models::NOT_AVAILABLE;
use flightcart_core::pricing::format_price;
use flightcart_core::{CartItem, Itinerary};

use crate::normalizer::extract_time;

/// `2h`, `2h 4m`, or `N/A` when the provider gave no duration.
pub fn format_duration(minutes: Option<u32>) -> String {
    match minutes {
        None => NOT_AVAILABLE.to_string(),
        Some(minutes) => {
            let (h, m) = (minutes / 60, minutes % 60);
            if m > 0 {
                format!("{}h {}m", h, m)
            } else {
                format!("{}h", h)
            }
        }
    }
}

pub fn layover_label(itinerary: &Itinerary) -> String {
    let layovers = itinerary.layover_airports();
    match layovers.len() {
        0 => "Non-stop".to_string(),
        1 => format!("1 stop • {}", layovers[0]),
        n => format!("{} stops • {}", n, layovers.join(" • ")),
    }
}

/// e.g. `1 adult`, `2 adults, 1 child`.
pub fn passenger_summary(adults: u32, children: u32) -> String {
    if adults + children == 1 {
        return if children == 1 { "1 child" } else { "1 adult" }.to_string();
    }

    let mut parts = Vec::new();
    if adults > 0 {
        parts.push(format!("{} adult{}", adults, if adults > 1 { "s" } else { "" }));
    }
    if children > 0 {
        parts.push(format!("{} child{}", children, if children > 1 { "ren" } else { "" }));
    }
    parts.join(", ")
}

pub fn departure_clock(itinerary: &Itinerary) -> String {
    extract_time(itinerary.origin().and_then(|a| a.time.as_deref()))
}

pub fn arrival_clock(itinerary: &Itinerary) -> String {
    extract_time(itinerary.destination().and_then(|a| a.time.as_deref()))
}

/// `$100.00 × 3 passengers`
pub fn price_breakdown(item: &CartItem) -> String {
    format!(
        "${} × {} passengers",
        format_price(item.itinerary.base_price),
        item.passenger_count()
    )
}
