//! Core pricing calculation helpers.
//!
//! Pure functions for pricing math - no I/O, no shared state.

use indexmap::IndexMap;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed dispatch fee charged on every job (USD).
const DISPATCH_BASE_FEE: Decimal = dec!(50);

/// Logistics cost per km in USD.
const LOGISTICS_RATE_PER_KM: Decimal = dec!(0.50);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is
/// exactly halfway between two possibilities. This reduces cumulative
/// rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use homequote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Calculate the dispatch (logistics) cost for a travel distance.
///
/// Fixed base fee plus a flat per-km rate, rounded to cents. No cap, no
/// floor beyond the base fee. Total for any input, including negative
/// distances - the caller owns distance sanity.
pub fn logistics_cost(distance_km: Decimal) -> Decimal {
    round_money(DISPATCH_BASE_FEE + distance_km * LOGISTICS_RATE_PER_KM, 2)
}

/// Select the most cost-effective material supplier.
///
/// Returns the (name, price) pair with the minimum quoted price; ties go to
/// the supplier seen first in the map's insertion order. `None` when no
/// quotes were provided - the engine substitutes its standard-materials
/// fallback in that case.
pub fn select_supplier(material_prices: &IndexMap<String, Decimal>) -> Option<(&str, Decimal)> {
    material_prices
        .iter()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(name, price)| (name.as_str(), *price))
}
