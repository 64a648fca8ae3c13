//! Request DTO for the pricing engine.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A job description submitted for quoting.
///
/// Every field is optional; the engine fills defaults and normalizes casing
/// before validating. `material_prices` keeps the supplier quotes in
/// first-seen order, which is what breaks ties between equally-priced
/// suppliers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRequest {
    /// Job category, matched case-insensitively against the rate tables.
    /// Unknown categories price at the neutral multiplier.
    #[serde(default)]
    pub job_type: Option<String>,

    /// Free text describing the job. Display-only; never affects pricing.
    #[serde(default)]
    pub job_description: Option<String>,

    /// One of "normal", "same_day", "emergency". Anything else is treated
    /// as "normal".
    #[serde(default)]
    pub urgency: Option<String>,

    /// Estimated labor hours, must lie in [0.5, 100]. Defaults to 2.
    #[serde(default)]
    pub labor_hours: Option<Decimal>,

    /// Two-letter U.S. state code. Defaults to "CA".
    #[serde(default, alias = "region_code")]
    pub state: Option<String>,

    /// Travel distance to the job site in km. Defaults to 10.
    #[serde(default)]
    pub distance_km: Option<Decimal>,

    /// Competing material-supplier quotes, supplier name to price.
    #[serde(default)]
    pub material_prices: IndexMap<String, Decimal>,
}
