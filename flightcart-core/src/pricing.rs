use rust_decimal::{Decimal, RoundingStrategy};

/// Price of the whole party: `base_price × (adults + children)`, rounded to
/// cents half-up.
///
/// A base price of zero is a valid result of incomplete upstream data, not an
/// error. Passenger counts are not validated here; callers own `adults >= 1`.
/// `None` when the product does not fit in a `Decimal`.
pub fn compute_total(base_price: Decimal, adults: u32, children: u32) -> Option<Decimal> {
    let passengers = Decimal::from(adults) + Decimal::from(children);
    base_price.checked_mul(passengers).map(round_to_cents)
}

/// Half-up rounding to two decimal places. Prices are never negative, so
/// rounding away from zero at the midpoint is half-up.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Always two decimals, e.g. `300.00`.
pub fn format_price(amount: Decimal) -> String {
    format!("{:.2}", round_to_cents(amount))
}
