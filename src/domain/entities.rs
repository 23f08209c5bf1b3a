use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::valuation::{billable_distance_km, clamp_non_negative};

/// Fixed tariff constants agreed for the season.
///
/// Exposed as named values so callers and tests never hard-code the magic
/// numbers of the pricing policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    /// Liters credited per m³ of cargo, always valued with the tax-inclusive price.
    pub base_liters_per_m3: f64,
    /// Kilometers covered by the base; trips at or below this pay base only.
    pub included_km: f64,
    /// Liters charged per kilometer beyond `included_km`, valued tax-exclusive.
    pub extra_liters_per_km: f64,
    /// Distance ceiling applied by variants that clamp the trip length.
    pub max_trip_km: f64,
}

impl Tariff {
    pub const DEFAULT: Tariff = Tariff {
        base_liters_per_m3: 0.55,
        included_km: 4.0,
        extra_liters_per_km: 4.5,
        max_trip_km: 15.0,
    };
}

impl Default for Tariff {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a relocation leg enters the valuation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelocationBilling {
    /// Relocation liters count toward the fuel balance only; the trip total is untouched.
    #[default]
    TrackOnly,
    /// Relocation is also priced (tax-exclusive) into the trip total.
    Billed,
}

/// Variant toggles for the one engine.
///
/// The fleet runs several near-identical payment schemes; they differ only in
/// these switches, never in the tier formulas themselves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationPolicy {
    pub tariff: Tariff,
    /// Clamp the trip distance to `tariff.max_trip_km` before pricing.
    pub clamp_distance: bool,
    pub relocation_billing: RelocationBilling,
    /// Extra fixed-percentage deduction from the net (a fuel allocation), if the scheme has one.
    pub fuel_allocation_percent: Option<f64>,
}

impl Default for ValuationPolicy {
    fn default() -> Self {
        Self {
            tariff: Tariff::DEFAULT,
            clamp_distance: true,
            relocation_billing: RelocationBilling::TrackOnly,
            fuel_allocation_percent: None,
        }
    }
}

/// A repositioning leg: fuel-consuming movement that is not itself a cargo trip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelocationLeg {
    pub distance_km: f64,
    /// Consumption rate used only for relocation legs.
    pub liters_per_100km: f64,
}

/// Parameters of one trip ("viaje"), as entered by the caller.
///
/// All fields are semantically non-negative; the valuator clamps whatever
/// arrives rather than rejecting it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripInput {
    pub volume_m3: f64,
    pub distance_km: f64,
    /// Fuel price per liter, tax included; the price the company fixes per zone.
    pub fuel_price_with_tax: f64,
    pub tax_rate_percent: f64,
    pub commission_percent: f64,
    pub driver_share_percent: f64,
    /// Non-billable repositioning leg; `None` in schemes without relocations.
    #[serde(default)]
    pub relocation: Option<RelocationLeg>,
}

impl Default for TripInput {
    fn default() -> Self {
        Self {
            volume_m3: 0.0,
            distance_km: 0.0,
            fuel_price_with_tax: 0.0,
            tax_rate_percent: 21.0,
            commission_percent: 4.0,
            driver_share_percent: 15.0,
            relocation: None,
        }
    }
}

/// Full breakdown of one trip's value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripValuation {
    /// Kilometers beyond the included threshold (0 for short trips).
    pub excess_km: f64,
    pub fuel_price_without_tax: f64,
    pub base_liters: f64,
    pub extra_liters: f64,
    pub relocation_liters: Option<f64>,
    /// Liters ("litros reconocidos") whose cost the trip's charges are considered to cover.
    pub recognized_liters: f64,
    pub base_amount: f64,
    pub extra_amount: f64,
    pub relocation_amount: Option<f64>,
    pub total_amount: f64,
    pub commission_amount: f64,
    pub driver_amount: f64,
    pub fuel_allocation_amount: Option<f64>,
    pub net_amount: f64,
}

/// Immutable record of one committed trip.
///
/// Created once when the trip is confirmed, never mutated, removed only by an
/// explicit day reset. The external store round-trips these as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub volume_m3: f64,
    pub distance_km: f64,
    #[serde(default)]
    pub relocation_km: Option<f64>,
    pub total_amount: f64,
    pub net_amount: f64,
    pub extra_liters: f64,
    #[serde(default)]
    pub relocation_liters: Option<f64>,
}

impl HistoryEntry {
    /// Pure constructor: the caller supplies identity and timestamp.
    ///
    /// Stores the same clamped volume and distance the valuation was priced
    /// on, so replaying the entry reproduces the billing.
    pub fn from_trip(
        input: &TripInput,
        valuation: &TripValuation,
        policy: &ValuationPolicy,
        id: Uuid,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            timestamp,
            volume_m3: clamp_non_negative(input.volume_m3),
            distance_km: billable_distance_km(input.distance_km, policy),
            relocation_km: input
                .relocation
                .map(|leg| clamp_non_negative(leg.distance_km)),
            total_amount: valuation.total_amount,
            net_amount: valuation.net_amount,
            extra_liters: valuation.extra_liters,
            relocation_liters: valuation.relocation_liters,
        }
    }

    /// Convenience constructor stamping a fresh id and the current UTC time.
    pub fn record(input: &TripInput, valuation: &TripValuation, policy: &ValuationPolicy) -> Self {
        Self::from_trip(
            input,
            valuation,
            policy,
            Uuid::new_v4(),
            OffsetDateTime::now_utc(),
        )
    }
}

/// Day-level financial summary with the fuel balance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    pub gross_day: f64,
    pub net_day: f64,
    /// Extra (+ relocation) liters already owed against the fuel received.
    pub committed_liters: f64,
    /// Received minus committed; negative signals a shortfall.
    pub available_liters: f64,
    pub available_fuel_value: f64,
    pub net_plus_available: f64,
    /// net / gross when there is any gross, else 0.
    pub profit_ratio: f64,
    pub profit_ratio_plus: f64,
}

/// How per-trip fuel consumption is determined for the real-margin overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelCostMode {
    /// A percentage of the trip's recognized liters.
    #[default]
    RecognizedShare,
    /// Liters measured directly for the trip.
    MeasuredLiters,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelCostInput {
    pub mode: FuelCostMode,
    /// Used in `RecognizedShare` mode.
    pub consumption_percent: f64,
    /// Used in `MeasuredLiters` mode.
    pub measured_liters: f64,
    pub fuel_price_with_tax: f64,
}

/// What the trip really nets after paying for the fuel it burned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelCostBreakdown {
    pub recognized_liters: f64,
    pub consumed_liters: f64,
    pub fuel_cost: f64,
    pub net_real: f64,
    /// net_real / total when the trip has any value, else 0.
    pub real_margin: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_the_season_tariff() {
        let policy = ValuationPolicy::default();
        assert_eq!(policy.tariff, Tariff::DEFAULT);
        assert!(policy.clamp_distance);
        assert_eq!(policy.relocation_billing, RelocationBilling::TrackOnly);
        assert_eq!(policy.fuel_allocation_percent, None);

        assert_eq!(Tariff::DEFAULT.base_liters_per_m3, 0.55);
        assert_eq!(Tariff::DEFAULT.included_km, 4.0);
        assert_eq!(Tariff::DEFAULT.extra_liters_per_km, 4.5);
        assert_eq!(Tariff::DEFAULT.max_trip_km, 15.0);
    }

    #[test]
    fn history_entry_round_trips_as_json() {
        let input = TripInput {
            volume_m3: 45.0,
            distance_km: 12.0,
            fuel_price_with_tax: 1415.0,
            ..TripInput::default()
        };
        let policy = ValuationPolicy::default();
        let valuation = crate::domain::valuate_trip(&input, &policy);
        let entry = HistoryEntry::record(&input, &valuation, &policy);

        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn history_entry_stores_clamped_parameters() {
        let input = TripInput {
            volume_m3: -3.0,
            distance_km: 40.0,
            fuel_price_with_tax: 1415.0,
            ..TripInput::default()
        };
        let policy = ValuationPolicy::default();
        let valuation = crate::domain::valuate_trip(&input, &policy);
        let entry = HistoryEntry::record(&input, &valuation, &policy);

        assert_eq!(entry.volume_m3, 0.0);
        assert_eq!(entry.distance_km, 15.0); // ceiling applied
        assert_eq!(entry.relocation_km, None);
    }
}
