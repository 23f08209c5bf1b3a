//! Real-margin overlay: what a trip nets once the fuel it burned is paid for.
//!
//! The tariff recognizes liters through base/extra/relocation charges; actual
//! consumption is taken either as a share of those recognized liters or as a
//! measured figure, always valued at the tax-inclusive price.

use super::entities::{FuelCostBreakdown, FuelCostInput, FuelCostMode, TripValuation};
use super::valuation::clamp_non_negative;

pub fn evaluate_fuel_cost(valuation: &TripValuation, input: &FuelCostInput) -> FuelCostBreakdown {
    let recognized_liters = valuation.recognized_liters;
    let price = clamp_non_negative(input.fuel_price_with_tax);

    let consumed_liters = match input.mode {
        FuelCostMode::RecognizedShare => {
            recognized_liters * (clamp_non_negative(input.consumption_percent) / 100.0)
        }
        FuelCostMode::MeasuredLiters => clamp_non_negative(input.measured_liters),
    };

    let fuel_cost = consumed_liters * price;
    let net_real = valuation.net_amount - fuel_cost;
    let real_margin = if valuation.total_amount > 0.0 {
        net_real / valuation.total_amount
    } else {
        0.0
    };

    FuelCostBreakdown {
        recognized_liters,
        consumed_liters,
        fuel_cost,
        net_real,
        real_margin,
    }
}
