//! Quote calculation orchestration.
//!
//! [`calculate_pricing`] is the single entry point: it normalizes and
//! validates the request, composes labor / material / logistics costs from
//! the rate tables and calculators, derives the margin-bounded client price,
//! and attaches the advisory flags. Pure and synchronous; the only state it
//! touches is the borrowed [`RateTables`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::PricingError;

use super::calculators::{logistics_cost, round_money, select_supplier};
use super::rates::{RateTables, Urgency};
use super::requests::QuoteRequest;
use super::responses::{Confidence, QuoteResponse};

/// Technician share of labor revenue (68%, middle of the 65-75% band).
/// Materials and logistics pass through at cost and are not shared.
const TECHNICIAN_LABOR_SHARE: Decimal = dec!(0.68);

/// Target platform margin as a fraction of the client price.
const TARGET_MARGIN: Decimal = dec!(0.27);

/// Floor and ceiling for the realized margin fraction.
const MIN_MARGIN: Decimal = dec!(0.20);
const MAX_MARGIN: Decimal = dec!(0.35);

const MIN_LABOR_HOURS: Decimal = dec!(0.5);
const MAX_LABOR_HOURS: Decimal = dec!(100);

const DEFAULT_LABOR_HOURS: Decimal = dec!(2);
const DEFAULT_DISTANCE_KM: Decimal = dec!(10);
const DEFAULT_STATE: &str = "CA";

/// Material source label used when no supplier quotes were provided.
const STANDARD_MATERIALS: &str = "Standard Materials";

fn overflow(context: &str) -> PricingError {
    PricingError::Computation(format!("Numeric overflow in {context}"))
}

/// Calculate a full quote for a job request.
///
/// Missing fields get defaults (2 labor hours, 10 km, "CA", normal urgency)
/// before validation. The only hard rejections are an unknown state code and
/// labor hours outside [0.5, 100]; unknown job types price at the neutral
/// multiplier and unknown urgency coerces to normal. Money is computed to
/// cents and rounded to whole units in the response.
pub fn calculate_pricing(
    tables: &RateTables,
    request: &QuoteRequest,
) -> Result<QuoteResponse, PricingError> {
    let job_type = request.job_type.as_deref().unwrap_or("").to_lowercase();
    let urgency = Urgency::parse(request.urgency.as_deref().unwrap_or("normal"));
    let labor_hours = request.labor_hours.unwrap_or(DEFAULT_LABOR_HOURS);
    let state = request
        .state
        .as_deref()
        .unwrap_or(DEFAULT_STATE)
        .to_uppercase();
    let distance_km = request.distance_km.unwrap_or(DEFAULT_DISTANCE_KM);

    let state_rate = tables.region_rate(&state).ok_or_else(|| {
        debug!(%state, "rejected quote request: unknown state code");
        PricingError::Validation("Invalid state code".to_string())
    })?;

    if labor_hours < MIN_LABOR_HOURS || labor_hours > MAX_LABOR_HOURS {
        debug!(%labor_hours, "rejected quote request: labor hours out of range");
        return Err(PricingError::Validation(
            "Labor hours must be between 0.5 and 100".to_string(),
        ));
    }

    let job_multiplier = tables.job_multiplier(&job_type);
    let urgency_multiplier = urgency.multiplier();

    let base_hourly_rate = state_rate
        .checked_mul(job_multiplier)
        .ok_or_else(|| overflow("labor rate"))?;
    let labor_cost = round_money(
        base_hourly_rate
            .checked_mul(labor_hours)
            .and_then(|cost| cost.checked_mul(urgency_multiplier))
            .ok_or_else(|| overflow("labor cost"))?,
        2,
    );

    let (material_source, material_cost) = match select_supplier(&request.material_prices) {
        Some((name, price)) => (name.to_string(), round_money(price, 2)),
        None => (STANDARD_MATERIALS.to_string(), Decimal::ZERO),
    };

    let logistics_cost = logistics_cost(distance_km);

    let subtotal = labor_cost
        .checked_add(material_cost)
        .and_then(|sum| sum.checked_add(logistics_cost))
        .ok_or_else(|| overflow("subtotal"))?;

    let technician_payout = round_money(
        labor_cost
            .checked_mul(TECHNICIAN_LABOR_SHARE)
            .ok_or_else(|| overflow("technician payout"))?,
        2,
    );

    // Margin is a fraction of the output price, not of the subtotal, so
    // work backwards: client_price = subtotal / (1 - target).
    let mut client_price = round_money(
        subtotal
            .checked_div(Decimal::ONE - TARGET_MARGIN)
            .ok_or_else(|| overflow("client price"))?,
        2,
    );
    let mut platform_margin = round_money(client_price - subtotal, 2);

    let actual_margin = if client_price > Decimal::ZERO {
        platform_margin / client_price
    } else {
        Decimal::ZERO
    };

    // Unreachable with the fixed 27% target; kept so the bounds still hold
    // if the target ever becomes a per-request parameter.
    if actual_margin < MIN_MARGIN {
        client_price = round_money(
            subtotal
                .checked_div(Decimal::ONE - MIN_MARGIN)
                .ok_or_else(|| overflow("client price"))?,
            2,
        );
        platform_margin = round_money(client_price - subtotal, 2);
    } else if actual_margin > MAX_MARGIN {
        client_price = round_money(
            subtotal
                .checked_div(Decimal::ONE - MAX_MARGIN)
                .ok_or_else(|| overflow("client price"))?,
            2,
        );
        platform_margin = round_money(client_price - subtotal, 2);
    }

    let mut pricing_confidence = Confidence::High;
    if request.material_prices.is_empty() {
        pricing_confidence = Confidence::Medium;
    }
    if labor_hours > dec!(50) || client_price > dec!(2000) {
        pricing_confidence = Confidence::Medium;
    }

    let approval_required = urgency == Urgency::Emergency
        || client_price > dec!(3000)
        || pricing_confidence == Confidence::Low;

    debug!(
        %state,
        %job_type,
        ?urgency,
        %labor_hours,
        %client_price,
        ?pricing_confidence,
        approval_required,
        "priced job request"
    );

    Ok(QuoteResponse {
        client_price: round_money(client_price, 0),
        technician_payout: round_money(technician_payout, 0),
        material_source,
        material_cost: round_money(material_cost, 0),
        labor_cost: round_money(labor_cost, 0),
        logistics_cost: round_money(logistics_cost, 0),
        platform_margin: round_money(platform_margin, 0),
        pricing_confidence,
        approval_required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn tables() -> RateTables {
        RateTables::standard()
    }

    fn quotes(entries: &[(&str, Decimal)]) -> IndexMap<String, Decimal> {
        entries
            .iter()
            .map(|(name, price)| (name.to_string(), *price))
            .collect()
    }

    // ==================== worked example tests ====================

    #[test]
    fn test_plumbing_ca_normal_quote() {
        // labor = 38 * 1.2 * 2 * 1.0 = 91.20; logistics = 50 + 10*0.5 = 55.00;
        // subtotal = 146.20; client = 146.20 / 0.73 = 200.27; payout = 62.02
        let request = QuoteRequest {
            job_type: Some("plumbing".to_string()),
            urgency: Some("normal".to_string()),
            labor_hours: Some(dec!(2)),
            state: Some("CA".to_string()),
            distance_km: Some(dec!(10)),
            ..Default::default()
        };

        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.labor_cost, dec!(91));
        assert_eq!(quote.logistics_cost, dec!(55));
        assert_eq!(quote.material_cost, dec!(0));
        assert_eq!(quote.material_source, "Standard Materials");
        assert_eq!(quote.client_price, dec!(200));
        assert_eq!(quote.platform_margin, dec!(54));
        assert_eq!(quote.technician_payout, dec!(62));
        assert_eq!(quote.pricing_confidence, Confidence::Medium); // no materials
        assert!(!quote.approval_required);
    }

    #[test]
    fn test_emergency_electrical_ny_quote() {
        // labor = 39 * 1.3 * 4 * 1.5 = 304.20; material = 95.00 (BuildMart);
        // logistics = 62.50; subtotal = 461.70; client = 632.47; payout = 206.86
        let request = QuoteRequest {
            job_type: Some("electrical".to_string()),
            urgency: Some("emergency".to_string()),
            labor_hours: Some(dec!(4)),
            state: Some("NY".to_string()),
            distance_km: Some(dec!(25)),
            material_prices: quotes(&[
                ("SupplyCo", dec!(120.50)),
                ("BuildMart", dec!(95.00)),
            ]),
            ..Default::default()
        };

        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.labor_cost, dec!(304));
        assert_eq!(quote.material_source, "BuildMart");
        assert_eq!(quote.material_cost, dec!(95));
        assert_eq!(quote.logistics_cost, dec!(62)); // 62.50 rounds to even
        assert_eq!(quote.client_price, dec!(632));
        assert_eq!(quote.platform_margin, dec!(171));
        assert_eq!(quote.technician_payout, dec!(207));
        assert_eq!(quote.pricing_confidence, Confidence::High);
        assert!(quote.approval_required); // emergency
    }

    // ==================== defaults & normalization tests ====================

    #[test]
    fn test_empty_request_uses_defaults() {
        // Defaults: CA, 2 hours, 10 km, normal urgency, neutral job type.
        // labor = 38 * 2 = 76.00; subtotal = 131.00; client = 179.45
        let quote = calculate_pricing(&tables(), &QuoteRequest::default()).unwrap();
        assert_eq!(quote.labor_cost, dec!(76));
        assert_eq!(quote.logistics_cost, dec!(55));
        assert_eq!(quote.client_price, dec!(179));
        assert_eq!(quote.platform_margin, dec!(48));
        assert_eq!(quote.technician_payout, dec!(52));
        assert_eq!(quote.pricing_confidence, Confidence::Medium);
        assert!(!quote.approval_required);
    }

    #[test]
    fn test_casing_is_normalized() {
        let shouting = QuoteRequest {
            job_type: Some("PLUMBING".to_string()),
            state: Some("ca".to_string()),
            urgency: Some("Normal".to_string()),
            ..Default::default()
        };
        let plain = QuoteRequest {
            job_type: Some("plumbing".to_string()),
            state: Some("CA".to_string()),
            urgency: Some("normal".to_string()),
            ..Default::default()
        };

        let a = calculate_pricing(&tables(), &shouting).unwrap();
        let b = calculate_pricing(&tables(), &plain).unwrap();
        assert_eq!(a.client_price, b.client_price);
        assert_eq!(a.labor_cost, b.labor_cost);
    }

    #[test]
    fn test_unknown_job_type_prices_at_neutral_multiplier() {
        let request = QuoteRequest {
            job_type: Some("gutter_cleaning".to_string()),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        // Same labor as the no-job-type default: 38 * 1.0 * 2
        assert_eq!(quote.labor_cost, dec!(76));
    }

    #[test]
    fn test_unknown_urgency_coerces_to_normal() {
        let request = QuoteRequest {
            urgency: Some("whenever".to_string()),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        let baseline = calculate_pricing(&tables(), &QuoteRequest::default()).unwrap();
        assert_eq!(quote.client_price, baseline.client_price);
        assert!(!quote.approval_required);
    }

    #[test]
    fn test_job_description_never_affects_pricing() {
        let request = QuoteRequest {
            job_description: Some("water heater making banging noises".to_string()),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        let baseline = calculate_pricing(&tables(), &QuoteRequest::default()).unwrap();
        assert_eq!(quote.client_price, baseline.client_price);
    }

    // ==================== validation tests ====================

    #[test]
    fn test_unknown_state_is_rejected() {
        let request = QuoteRequest {
            state: Some("ZZ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            calculate_pricing(&tables(), &request),
            Err(PricingError::Validation("Invalid state code".to_string()))
        );
    }

    #[test]
    fn test_labor_hours_bounds() {
        let at = |hours: Decimal| {
            calculate_pricing(
                &tables(),
                &QuoteRequest {
                    labor_hours: Some(hours),
                    ..Default::default()
                },
            )
        };

        assert!(at(dec!(0.5)).is_ok());
        assert!(at(dec!(100)).is_ok());

        let expected = Err(PricingError::Validation(
            "Labor hours must be between 0.5 and 100".to_string(),
        ));
        assert_eq!(at(dec!(0.49)), expected);
        assert_eq!(at(dec!(100.01)), expected);
        assert_eq!(at(dec!(0.1)), expected);
    }

    #[test]
    fn test_overflowing_material_price_is_a_computation_error() {
        let request = QuoteRequest {
            material_prices: quotes(&[("MegaCorp", Decimal::MAX)]),
            ..Default::default()
        };
        match calculate_pricing(&tables(), &request) {
            Err(PricingError::Computation(msg)) => assert!(msg.contains("overflow")),
            other => panic!("expected computation error, got {other:?}"),
        }
    }

    // ==================== payout & margin tests ====================

    #[test]
    fn test_technician_payout_is_68_percent_of_labor() {
        // labor = 42 * 1.4 * 3 = 176.40; payout = 119.952 -> 119.95 -> 120
        let request = QuoteRequest {
            job_type: Some("roofing".to_string()),
            labor_hours: Some(dec!(3)),
            state: Some("HI".to_string()),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.labor_cost, dec!(176));
        assert_eq!(quote.technician_payout, dec!(120));
    }

    #[test]
    fn test_margin_fraction_stays_near_target() {
        let request = QuoteRequest {
            job_type: Some("hvac".to_string()),
            labor_hours: Some(dec!(8)),
            state: Some("TX".to_string()),
            distance_km: Some(dec!(40)),
            material_prices: quotes(&[("SupplyCo", dec!(250))]),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();

        assert!(quote.platform_margin > Decimal::ZERO);
        let fraction = quote.platform_margin / quote.client_price;
        assert!(fraction > dec!(0.24) && fraction < dec!(0.30));
    }

    // ==================== advisory flag tests ====================

    #[test]
    fn test_confidence_high_with_materials_and_modest_price() {
        let request = QuoteRequest {
            job_type: Some("plumbing".to_string()),
            material_prices: quotes(&[("SupplyCo", dec!(50))]),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.client_price, dec!(269));
        assert_eq!(quote.pricing_confidence, Confidence::High);
        assert!(!quote.approval_required);
    }

    #[test]
    fn test_confidence_downgrades_on_long_jobs() {
        let request = QuoteRequest {
            job_type: Some("painting".to_string()),
            labor_hours: Some(dec!(60)),
            state: Some("TX".to_string()),
            material_prices: quotes(&[("SupplyCo", dec!(10))]),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.pricing_confidence, Confidence::Medium);
    }

    #[test]
    fn test_confidence_downgrades_on_expensive_quotes() {
        // subtotal = 76 + 2000 + 55 = 2131; client = 2919.18 > 2000
        let request = QuoteRequest {
            material_prices: quotes(&[("MarbleWorks", dec!(2000))]),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.pricing_confidence, Confidence::Medium);
        assert!(!quote.approval_required); // still under the 3000 line
    }

    #[test]
    fn test_approval_required_above_3000() {
        // subtotal = 76 + 3000 + 55 = 3131; client = 4289.04
        let request = QuoteRequest {
            material_prices: quotes(&[("MarbleWorks", dec!(3000))]),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert_eq!(quote.client_price, dec!(4289));
        assert!(quote.approval_required);
    }

    #[test]
    fn test_approval_required_for_emergency() {
        let request = QuoteRequest {
            urgency: Some("emergency".to_string()),
            ..Default::default()
        };
        let quote = calculate_pricing(&tables(), &request).unwrap();
        assert!(quote.approval_required);
    }
}
