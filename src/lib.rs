//! Pricing engine for U.S. home-services job quotes.
//!
//! Turns a structured job description (job type, state, urgency, labor
//! hours, travel distance, competing material-supplier quotes) into a full
//! price breakdown with advisory flags. The engine is a pure, synchronous
//! function over immutable rate tables; transport layers marshal
//! [`pricing::QuoteRequest`] in and [`pricing::QuoteResponse`] out.

pub mod error;
pub mod pricing;

// Re-export the core entry points
pub use error::PricingError;
pub use pricing::{calculate_pricing, QuoteRequest, QuoteResponse, RateTables};
