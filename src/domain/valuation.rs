//! Trip valuation under the tiered distance tariff.
//!
//! The base (0.55 L per m³) is owed for every trip, however short, and is
//! valued at the tax-inclusive fuel price. Kilometers beyond the 4 included
//! ones add 4.5 L each, valued at the tax-exclusive price. The tax asymmetry
//! between base and extra is the agreed tariff, not an oversight.

use super::entities::{RelocationBilling, TripInput, TripValuation, ValuationPolicy};

/// Invalid numbers never abort a valuation; they price as zero.
pub(crate) fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Tax-exclusive fuel price derived from the tax-inclusive one.
///
/// Returns 0 when the divisor is not positive. With the rate clamped to
/// non-negative the divisor is always ≥ 1, but the guard stays as the tariff
/// documents it.
pub fn fuel_price_without_tax(price_with_tax: f64, tax_rate_percent: f64) -> f64 {
    let price = clamp_non_negative(price_with_tax);
    let rate = clamp_non_negative(tax_rate_percent);
    let divisor = 1.0 + rate / 100.0;
    if divisor <= 0.0 {
        return 0.0;
    }
    price / divisor
}

/// Distance the trip is priced on: clamped non-negative, and to the tariff
/// ceiling when the policy enforces one. Callers that need to know whether
/// the ceiling bit must compare against their raw input themselves.
pub(crate) fn billable_distance_km(distance_km: f64, policy: &ValuationPolicy) -> f64 {
    let km = clamp_non_negative(distance_km);
    if policy.clamp_distance {
        km.min(policy.tariff.max_trip_km)
    } else {
        km
    }
}

/// Prices one trip. Total function: any input, however malformed, yields a
/// valuation, at worst a degenerate zero-value one.
pub fn valuate_trip(input: &TripInput, policy: &ValuationPolicy) -> TripValuation {
    let tariff = &policy.tariff;
    let volume_m3 = clamp_non_negative(input.volume_m3);
    let distance_km = billable_distance_km(input.distance_km, policy);
    let price_with_tax = clamp_non_negative(input.fuel_price_with_tax);
    let commission_percent = clamp_non_negative(input.commission_percent);
    let driver_share_percent = clamp_non_negative(input.driver_share_percent);

    let price_without_tax = fuel_price_without_tax(price_with_tax, input.tax_rate_percent);

    let base_liters = tariff.base_liters_per_m3 * volume_m3;
    let base_amount = base_liters * price_with_tax;

    let excess_km = (distance_km - tariff.included_km).max(0.0);
    let extra_liters = excess_km * tariff.extra_liters_per_km;
    let extra_amount = extra_liters * price_without_tax;

    let relocation_liters = input.relocation.map(|leg| {
        clamp_non_negative(leg.distance_km) / 100.0 * clamp_non_negative(leg.liters_per_100km)
    });
    let relocation_amount = relocation_liters.map(|liters| liters * price_without_tax);

    let recognized_liters = base_liters + extra_liters + relocation_liters.unwrap_or(0.0);

    let mut total_amount = base_amount + extra_amount;
    if policy.relocation_billing == RelocationBilling::Billed {
        total_amount += relocation_amount.unwrap_or(0.0);
    }

    // Splits apply to the total independently; they never compound.
    let commission_amount = total_amount * (commission_percent / 100.0);
    let driver_amount = total_amount * (driver_share_percent / 100.0);
    let fuel_allocation_amount = policy
        .fuel_allocation_percent
        .map(|percent| total_amount * (clamp_non_negative(percent) / 100.0));
    let net_amount = total_amount
        - commission_amount
        - driver_amount
        - fuel_allocation_amount.unwrap_or(0.0);

    TripValuation {
        excess_km,
        fuel_price_without_tax: price_without_tax,
        base_liters,
        extra_liters,
        relocation_liters,
        recognized_liters,
        base_amount,
        extra_amount,
        relocation_amount,
        total_amount,
        commission_amount,
        driver_amount,
        fuel_allocation_amount,
        net_amount,
    }
}
