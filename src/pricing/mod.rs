//! Pricing engine module.
//!
//! Provides the quote calculation for home-services jobs. Callers build a
//! [`QuoteRequest`], hand it to [`calculate_pricing`] together with a set of
//! [`RateTables`], and get back either a complete [`QuoteResponse`] or a
//! [`crate::PricingError`].

pub mod calculators;
pub mod engine;
pub mod rates;
pub mod requests;
pub mod responses;

// Re-export commonly used items
pub use calculators::{logistics_cost, round_money, select_supplier};
pub use engine::calculate_pricing;
pub use rates::{RateTables, Urgency};
pub use requests::QuoteRequest;
pub use responses::{Confidence, JobTypeListResponse, QuoteErrorResponse, QuoteResponse, RegionListResponse};
