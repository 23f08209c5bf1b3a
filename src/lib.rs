//! Pricing engine for cargo-hauling trips ("viajes").
//!
//! Pure computation only: the caller owns the trip history and every
//! configuration scalar and hands them in per call; nothing here reads files,
//! keeps state between calls, or returns an error. Malformed numbers clamp to
//! zero and price accordingly. The worst possible outcome is a zero-value
//! trip or a negative fuel balance, both of which are data for the caller to
//! display, not faults.
//!
//! Entry points:
//! - [`valuate_trip`] prices one trip under the tiered tariff (base per m³
//!   tax-inclusive, per-km extra beyond the included kilometers
//!   tax-exclusive) and applies the commission / driver-share splits.
//! - [`aggregate_from_history`] / [`aggregate_from_multiplier`] reduce a day
//!   of trips into totals plus the fuel balance (liters committed vs.
//!   received).
//! - [`evaluate_fuel_cost`] overlays actual fuel consumption on a valuation
//!   to yield the real margin.
//!
//! Scheme variants (relocation billed vs. tracked, distance ceiling, fuel
//! allocation) are toggles on [`ValuationPolicy`], never separate engines.

pub mod domain;

pub use domain::{
    aggregate_from_history, aggregate_from_multiplier, evaluate_fuel_cost,
    fuel_price_without_tax, valuate_trip, DayTotals, FuelCostBreakdown, FuelCostInput,
    FuelCostMode, HistoryEntry, RelocationBilling, RelocationLeg, Tariff, TripInput,
    TripValuation, ValuationPolicy,
};
