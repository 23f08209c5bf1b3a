//! Day-level aggregation and fuel-balance accounting.
//!
//! Two sources feed the same totals builder: the committed trip history, or a
//! single representative valuation times a trip count when nothing has been
//! committed yet. Which one runs is the caller's decision; the builder makes
//! the fuel-balance fields identical either way.

use super::entities::{DayTotals, HistoryEntry, TripValuation};
use super::valuation::clamp_non_negative;

/// Reduces the day's committed trips. Summation only, so the caller owes no
/// ordering guarantee on the entries.
pub fn aggregate_from_history(
    entries: &[HistoryEntry],
    received_liters: f64,
    fuel_price_with_tax: f64,
) -> DayTotals {
    let mut gross_day = 0.0;
    let mut net_day = 0.0;
    let mut committed_liters = 0.0;
    for entry in entries {
        gross_day += entry.total_amount;
        net_day += entry.net_amount;
        committed_liters += entry.extra_liters + entry.relocation_liters.unwrap_or(0.0);
    }

    build_day_totals(
        gross_day,
        net_day,
        committed_liters,
        received_liters,
        fuel_price_with_tax,
    )
}

/// Projects a day from one valuation repeated `trip_count` times (clamped
/// non-negative, like every numeric input).
pub fn aggregate_from_multiplier(
    valuation: &TripValuation,
    trip_count: f64,
    received_liters: f64,
    fuel_price_with_tax: f64,
) -> DayTotals {
    let count = clamp_non_negative(trip_count);
    let committed_per_trip =
        valuation.extra_liters + valuation.relocation_liters.unwrap_or(0.0);

    build_day_totals(
        valuation.total_amount * count,
        valuation.net_amount * count,
        committed_per_trip * count,
        received_liters,
        fuel_price_with_tax,
    )
}

fn build_day_totals(
    gross_day: f64,
    net_day: f64,
    committed_liters: f64,
    received_liters: f64,
    fuel_price_with_tax: f64,
) -> DayTotals {
    let received = clamp_non_negative(received_liters);
    let price = clamp_non_negative(fuel_price_with_tax);

    // May go negative: that is the fuel-shortfall signal, not an error.
    let available_liters = received - committed_liters;
    let available_fuel_value = available_liters * price;
    let net_plus_available = net_day + available_fuel_value;

    let profit_ratio = if gross_day > 0.0 { net_day / gross_day } else { 0.0 };
    let profit_ratio_plus = if gross_day > 0.0 {
        net_plus_available / gross_day
    } else {
        0.0
    };

    DayTotals {
        gross_day,
        net_day,
        committed_liters,
        available_liters,
        available_fuel_value,
        net_plus_available,
        profit_ratio,
        profit_ratio_plus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        assert_approx, valuate_trip, TripInput, ValuationPolicy, DEFAULT_EPSILON,
    };

    fn committed_day() -> (TripInput, ValuationPolicy, TripValuation) {
        let input = TripInput {
            volume_m3: 45.0,
            distance_km: 12.0,
            fuel_price_with_tax: 1415.0,
            ..TripInput::default()
        };
        let policy = ValuationPolicy::default();
        let valuation = valuate_trip(&input, &policy);
        (input, policy, valuation)
    }

    #[test]
    fn empty_history_yields_a_zero_day() {
        let totals = aggregate_from_history(&[], 0.0, 1415.0);
        assert_eq!(totals, DayTotals::default());
        assert_approx(totals.profit_ratio, 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn history_sums_and_balances_fuel() {
        let (input, policy, valuation) = committed_day();
        let entries = vec![
            HistoryEntry::record(&input, &valuation, &policy),
            HistoryEntry::record(&input, &valuation, &policy),
        ];

        let totals = aggregate_from_history(&entries, 100.0, 1415.0);
        assert_approx(totals.gross_day, 2.0 * valuation.total_amount, 1e-6);
        assert_approx(totals.net_day, 2.0 * valuation.net_amount, 1e-6);
        assert_approx(totals.committed_liters, 72.0, DEFAULT_EPSILON); // 36 L extra per trip
        assert_approx(totals.available_liters, 28.0, DEFAULT_EPSILON);
        assert_approx(totals.available_fuel_value, 28.0 * 1415.0, 1e-6);
        assert_approx(
            totals.net_plus_available,
            totals.net_day + totals.available_fuel_value,
            1e-6,
        );
        assert_approx(totals.profit_ratio, totals.net_day / totals.gross_day, DEFAULT_EPSILON);
    }

    #[test]
    fn shortfall_goes_negative_instead_of_failing() {
        let (input, policy, valuation) = committed_day();
        let entries = vec![HistoryEntry::record(&input, &valuation, &policy)];

        let totals = aggregate_from_history(&entries, 0.0, 1415.0);
        assert!(totals.available_liters < 0.0);
        assert!(totals.available_fuel_value < 0.0);
        assert_approx(totals.available_liters, -36.0, DEFAULT_EPSILON);
    }

    #[test]
    fn multiplier_matches_a_history_of_copies() {
        let (input, policy, valuation) = committed_day();
        let entries: Vec<_> = (0..3)
            .map(|_| HistoryEntry::record(&input, &valuation, &policy))
            .collect();

        let from_history = aggregate_from_history(&entries, 50.0, 1415.0);
        let from_multiplier = aggregate_from_multiplier(&valuation, 3.0, 50.0, 1415.0);

        assert_approx(from_history.gross_day, from_multiplier.gross_day, 1e-6);
        assert_approx(from_history.net_day, from_multiplier.net_day, 1e-6);
        assert_approx(
            from_history.committed_liters,
            from_multiplier.committed_liters,
            1e-6,
        );
        assert_approx(
            from_history.net_plus_available,
            from_multiplier.net_plus_available,
            1e-6,
        );
    }

    #[test]
    fn trip_count_clamps_like_every_input() {
        let (_, _, valuation) = committed_day();
        let negative = aggregate_from_multiplier(&valuation, -5.0, 50.0, 1415.0);
        let zero = aggregate_from_multiplier(&valuation, 0.0, 50.0, 1415.0);
        assert_eq!(negative, zero);

        let nan_count = aggregate_from_multiplier(&valuation, f64::NAN, 50.0, 1415.0);
        assert_eq!(nan_count, zero);
    }

    #[test]
    fn received_liters_and_price_clamp_too() {
        let (input, policy, valuation) = committed_day();
        let entries = vec![HistoryEntry::record(&input, &valuation, &policy)];

        let negative = aggregate_from_history(&entries, -10.0, f64::NAN);
        let zeroed = aggregate_from_history(&entries, 0.0, 0.0);
        assert_eq!(negative, zeroed);
    }
}
