//! Domain logic for trip valuation lives here.

pub mod day;
pub mod entities;
pub mod fuel_cost;
pub mod valuation;

pub use day::{aggregate_from_history, aggregate_from_multiplier};
pub use entities::{
    DayTotals, FuelCostBreakdown, FuelCostInput, FuelCostMode, HistoryEntry, RelocationBilling,
    RelocationLeg, Tariff, TripInput, TripValuation, ValuationPolicy,
};
pub use fuel_cost::evaluate_fuel_cost;
pub use valuation::{fuel_price_without_tax, valuate_trip};

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {expected}, got {actual} (epsilon {epsilon})"
    );
}
