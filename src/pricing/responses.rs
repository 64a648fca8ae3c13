//! Response DTOs for the pricing engine.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::pricing::rates::RateTables;

/// How confident the engine is in the quote it produced.
///
/// `Low` is defined by policy (it forces the approval flag) but the current
/// downgrade rules never emit it; kept so a future variable-margin engine
/// can start using it without a contract change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A complete price quote.
///
/// All money fields are whole currency units (the engine computes to cents
/// and rounds for display at the end), serialized as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub client_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub technician_payout: Decimal,
    /// Winning supplier name, or "Standard Materials" when no quotes came in.
    pub material_source: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub material_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub logistics_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_margin: Decimal,
    pub pricing_confidence: Confidence,
    pub approval_required: bool,
}

/// Error payload handed to transport layers.
#[derive(Debug, Serialize)]
pub struct QuoteErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PricingError> for QuoteErrorResponse {
    fn from(err: &PricingError) -> Self {
        Self {
            error_type: err.kind().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

/// Reference lookup: every known region code with its base hourly rate.
#[derive(Debug, Serialize)]
pub struct RegionListResponse {
    pub states: Vec<String>,
    pub rates: BTreeMap<String, Decimal>,
}

impl From<&RateTables> for RegionListResponse {
    fn from(tables: &RateTables) -> Self {
        Self {
            states: tables.region_codes().iter().map(|c| c.to_string()).collect(),
            rates: tables
                .regions()
                .map(|(code, rate)| (code.to_string(), rate))
                .collect(),
        }
    }
}

/// Reference lookup: every known job category name.
#[derive(Debug, Serialize)]
pub struct JobTypeListResponse {
    pub job_types: Vec<String>,
}

impl From<&RateTables> for JobTypeListResponse {
    fn from(tables: &RateTables) -> Self {
        Self {
            job_types: tables.job_types().iter().map(|j| j.to_string()).collect(),
        }
    }
}
