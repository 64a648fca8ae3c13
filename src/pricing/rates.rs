//! Static rate tables for quote pricing.
//!
//! Region rates and job-category multipliers are loaded once at startup and
//! treated as immutable for the life of the process. The engine borrows the
//! tables; nothing here mutates after construction, so a single instance can
//! be shared across any number of concurrent callers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// U.S. state labor rates (USD/hour), based on 2025 market data.
const STATE_LABOR_RATES: &[(&str, Decimal)] = &[
    ("AL", dec!(28)),
    ("AK", dec!(35)),
    ("AZ", dec!(32)),
    ("AR", dec!(26)),
    ("CA", dec!(38)),
    ("CO", dec!(34)),
    ("CT", dec!(40)),
    ("DE", dec!(33)),
    ("FL", dec!(30)),
    ("GA", dec!(29)),
    ("HI", dec!(42)),
    ("ID", dec!(28)),
    ("IL", dec!(36)),
    ("IN", dec!(29)),
    ("IA", dec!(27)),
    ("KS", dec!(26)),
    ("KY", dec!(27)),
    ("LA", dec!(27)),
    ("ME", dec!(31)),
    ("MD", dec!(34)),
    ("MA", dec!(41)),
    ("MI", dec!(32)),
    ("MN", dec!(33)),
    ("MS", dec!(25)),
    ("MO", dec!(28)),
    ("MT", dec!(29)),
    ("NE", dec!(27)),
    ("NV", dec!(34)),
    ("NH", dec!(32)),
    ("NJ", dec!(38)),
    ("NM", dec!(27)),
    ("NY", dec!(39)),
    ("NC", dec!(28)),
    ("ND", dec!(26)),
    ("OH", dec!(30)),
    ("OK", dec!(26)),
    ("OR", dec!(33)),
    ("PA", dec!(35)),
    ("RI", dec!(36)),
    ("SC", dec!(27)),
    ("SD", dec!(25)),
    ("TN", dec!(28)),
    ("TX", dec!(29)),
    ("UT", dec!(30)),
    ("VT", dec!(32)),
    ("VA", dec!(31)),
    ("WA", dec!(36)),
    ("WV", dec!(27)),
    ("WI", dec!(31)),
    ("WY", dec!(27)),
];

/// Job type multipliers for labor complexity.
const JOB_TYPE_MULTIPLIERS: &[(&str, Decimal)] = &[
    ("plumbing", dec!(1.2)),
    ("electrical", dec!(1.3)),
    ("hvac", dec!(1.25)),
    ("roofing", dec!(1.4)),
    ("carpentry", dec!(1.15)),
    ("painting", dec!(1.0)),
    ("flooring", dec!(1.1)),
    ("drywall", dec!(1.05)),
    ("general_repair", dec!(1.0)),
    ("landscaping", dec!(0.9)),
    ("window_replacement", dec!(1.15)),
    ("insulation", dec!(1.0)),
    ("siding", dec!(1.2)),
    ("bathroom_remodel", dec!(1.3)),
    ("kitchen_remodel", dec!(1.4)),
];

/// Multiplier applied for unknown job categories.
const NEUTRAL_MULTIPLIER: Decimal = dec!(1.0);

/// Immutable rate tables consulted by the pricing engine.
#[derive(Debug, Clone)]
pub struct RateTables {
    region_rates: BTreeMap<String, Decimal>,
    job_multipliers: BTreeMap<String, Decimal>,
}

impl RateTables {
    /// Build the standard U.S. tables.
    pub fn standard() -> Self {
        Self {
            region_rates: STATE_LABOR_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
            job_multipliers: JOB_TYPE_MULTIPLIERS
                .iter()
                .map(|(job, mult)| (job.to_string(), *mult))
                .collect(),
        }
    }

    /// Base hourly labor rate for a region code, `None` when the code is
    /// not in the table. An unknown region is the one hard-reject lookup:
    /// the engine turns `None` into a validation failure.
    pub fn region_rate(&self, code: &str) -> Option<Decimal> {
        self.region_rates.get(code).copied()
    }

    /// Labor complexity multiplier for a job category. Unknown categories
    /// fall back to the neutral 1.0 multiplier rather than erroring.
    pub fn job_multiplier(&self, job_type: &str) -> Decimal {
        self.job_multipliers
            .get(job_type)
            .copied()
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// All known region codes with their base rates, sorted by code.
    pub fn regions(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.region_rates
            .iter()
            .map(|(code, rate)| (code.as_str(), *rate))
    }

    /// All known region codes, sorted.
    pub fn region_codes(&self) -> Vec<&str> {
        self.region_rates.keys().map(String::as_str).collect()
    }

    /// All known job category names, sorted.
    pub fn job_types(&self) -> Vec<&str> {
        self.job_multipliers.keys().map(String::as_str).collect()
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Job urgency level. Unrecognized input normalizes to `Normal` rather than
/// failing, and the normalized value is what downstream display sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Normal,
    SameDay,
    Emergency,
}

impl Urgency {
    /// Parse a raw urgency string, case-insensitively. Anything other than
    /// the known levels coerces to `Normal`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "same_day" => Urgency::SameDay,
            "emergency" => Urgency::Emergency,
            _ => Urgency::Normal,
        }
    }

    /// Price multiplier for this urgency level.
    pub fn multiplier(self) -> Decimal {
        match self {
            Urgency::Normal => dec!(1.0),
            Urgency::SameDay => dec!(1.25),
            Urgency::Emergency => dec!(1.5),
        }
    }
}
