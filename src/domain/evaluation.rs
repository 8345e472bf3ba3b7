//! Grid model: zone rate × surface with percentage adjustments and fixed annexes.

use super::entities::{
    CommerceMethod, Detail, DetailValue, EstimationResult, Property, PropertyType,
    ReferenceGridRow,
};
use super::params::Parameters;
use super::range::{price_range, PriceRange, RangeMode};

/// Smallest surface any model divides or multiplies by.
pub const MIN_AREA: f64 = 1.0;

/// Clamps an area to [`MIN_AREA`], warning when the input was out of range.
pub fn clamp_area(value: f64, what: &str) -> f64 {
    if value.is_nan() || value < MIN_AREA {
        log::warn!("[estimate] {what} of {value} m² clamped to {MIN_AREA} m²");
        MIN_AREA
    } else {
        value
    }
}

/// Dispatches on the property type: commerce has its own methods.
pub fn estimate_with_grid(
    row: &ReferenceGridRow,
    property: &Property,
    params: &Parameters,
) -> EstimationResult {
    match property.property_type {
        PropertyType::House | PropertyType::Apartment => {
            estimate_residential(row, property, params)
        }
        PropertyType::Commerce => estimate_commerce(row, property, params),
    }
}

pub fn estimate_residential(
    row: &ReferenceGridRow,
    property: &Property,
    params: &Parameters,
) -> EstimationResult {
    let surface = clamp_area(property.surface, "surface");
    let base_rate = params.degressivity.apply(row.base_rate_per_area, surface);

    let adjustment_pct = params.energy.for_rating(property.energy_rating)
        + params.condition.for_condition(property.condition);

    let built_value = surface * base_rate * (1.0 + adjustment_pct);

    let land_value = if property.property_type == PropertyType::House {
        property.land_area * row.land_rate_per_area
    } else {
        0.0
    };

    let annexes = annex_total(property, params);
    let value = built_value + land_value + annexes;

    let mut detail = Detail::new();
    detail.push("grid_rate_per_area", DetailValue::RatePerArea(row.base_rate_per_area));
    detail.push("base_rate_per_area", DetailValue::RatePerArea(base_rate));
    detail.push("adjustment_pct", DetailValue::Percent(adjustment_pct));
    detail.push("built_value", DetailValue::Amount(built_value));
    detail.push("land_value", DetailValue::Amount(land_value));
    detail.push("annexes", DetailValue::Amount(annexes));

    log::debug!(
        "[estimate] grid {} {}: built {built_value:.0} + land {land_value:.0} + annexes {annexes:.0}",
        row.zone,
        row.property_type
    );

    with_fixed_range(value, params, detail)
}

pub fn estimate_commerce(
    row: &ReferenceGridRow,
    property: &Property,
    params: &Parameters,
) -> EstimationResult {
    let mut detail = Detail::new();
    detail.push("method", DetailValue::Text(property.commerce.label().to_string()));

    let value = match property.commerce {
        CommerceMethod::Yield {
            monthly_rent,
            yield_pct,
        } => {
            let annual_rent = monthly_rent * 12.0;
            let rate = (yield_pct / 100.0).max(0.01);
            detail.push("annual_rent", DetailValue::Amount(annual_rent));
            detail.push("yield_rate", DetailValue::Percent(rate));
            annual_rent / rate
        }
        CommerceMethod::PerArea => {
            let surface = clamp_area(property.surface, "surface");
            detail.push(
                "commerce_rate_per_area",
                DetailValue::RatePerArea(row.commerce_rate_per_area),
            );
            surface * row.commerce_rate_per_area
        }
    };

    with_fixed_range(value, params, detail)
}

fn annex_total(property: &Property, params: &Parameters) -> f64 {
    let amenities = &property.amenities;
    let annexes = &params.annexes;
    [
        (amenities.garage, annexes.garage),
        (amenities.parking, annexes.parking),
        (amenities.terrace, annexes.terrace),
        (amenities.garden, annexes.garden),
        (amenities.basement, annexes.basement),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, value)| value)
    .sum()
}

fn with_fixed_range(value: f64, params: &Parameters, detail: Detail) -> EstimationResult {
    let PriceRange { low, high, .. } = price_range(value, RangeMode::Fixed(params.range.pct));
    EstimationResult {
        value,
        low,
        high,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConditionCategory, EnergyRating};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn neutral_params() -> Parameters {
        let mut params = Parameters::default();
        params.condition.good = 0.0;
        params
    }

    fn house(surface: f64, land_area: f64) -> Property {
        Property {
            property_type: PropertyType::House,
            surface,
            land_area,
            condition: ConditionCategory::Good,
            energy_rating: EnergyRating::C,
            ..Property::default()
        }
    }

    #[test]
    fn house_without_adjustments_matches_hand_computation() {
        let row = ReferenceGridRow::new("Zone", PropertyType::House, 2000.0, 10.0, 0.0);
        let result = estimate_residential(&row, &house(100.0, 200.0), &neutral_params());

        assert!(close(result.detail.number("built_value").unwrap(), 200_000.0));
        assert!(close(result.detail.number("land_value").unwrap(), 2_000.0));
        assert!(close(result.value, 202_000.0));
        assert!(close(result.low, 189_880.0));
        assert!(close(result.high, 214_120.0));
    }

    #[test]
    fn zero_land_rate_contributes_nothing() {
        let row = ReferenceGridRow::new("Zone", PropertyType::House, 2000.0, 0.0, 0.0);
        let result = estimate_residential(&row, &house(100.0, 5_000.0), &neutral_params());
        assert_eq!(result.detail.number("land_value"), Some(0.0));
    }

    #[test]
    fn apartments_never_carry_land_value() {
        let row = ReferenceGridRow::new("Zone", PropertyType::Apartment, 2000.0, 10.0, 0.0);
        let mut property = house(80.0, 300.0);
        property.property_type = PropertyType::Apartment;
        let result = estimate_residential(&row, &property, &neutral_params());
        assert_eq!(result.detail.number("land_value"), Some(0.0));
    }

    #[test]
    fn degressivity_boundary_is_exclusive() {
        let row = ReferenceGridRow::new("Zone", PropertyType::House, 2000.0, 0.0, 0.0);
        let params = neutral_params();

        let at = estimate_residential(&row, &house(160.0, 0.0), &params);
        assert_eq!(at.detail.number("base_rate_per_area"), Some(2000.0));

        let above = estimate_residential(&row, &house(160.0 + 1e-6, 0.0), &params);
        assert!(close(
            above.detail.number("base_rate_per_area").unwrap(),
            2000.0 * (1.0 - 0.06)
        ));
    }

    #[test]
    fn energy_and_condition_percentages_add_up() {
        let row = ReferenceGridRow::new("Zone", PropertyType::House, 1000.0, 0.0, 0.0);
        let mut property = house(100.0, 0.0);
        property.energy_rating = EnergyRating::A;
        property.condition = ConditionCategory::Renovated;

        let result = estimate_residential(&row, &property, &Parameters::default());
        assert!(close(result.detail.number("adjustment_pct").unwrap(), 0.14));
        assert!(close(result.value, 114_000.0));
    }

    #[test]
    fn annexes_are_summed_independently() {
        let row = ReferenceGridRow::new("Zone", PropertyType::House, 0.0, 0.0, 0.0);
        let mut property = house(100.0, 0.0);
        property.amenities.garage = true;
        property.amenities.basement = true;
        property.amenities.garden = true;

        let result = estimate_residential(&row, &property, &neutral_params());
        assert_eq!(result.detail.number("annexes"), Some(15_000.0 + 2_000.0 + 6_000.0));
    }

    #[test]
    fn zero_surface_is_clamped_to_one() {
        let row = ReferenceGridRow::new("Zone", PropertyType::House, 2000.0, 0.0, 0.0);
        let result = estimate_residential(&row, &house(0.0, 0.0), &neutral_params());
        assert!(close(result.value, 2000.0));
    }

    #[test]
    fn commerce_per_area_uses_commerce_rate() {
        let row = ReferenceGridRow::new("Axe", PropertyType::Commerce, 0.0, 0.0, 2400.0);
        let property = Property {
            property_type: PropertyType::Commerce,
            surface: 50.0,
            ..Property::default()
        };
        let result = estimate_with_grid(&row, &property, &Parameters::default());
        assert!(close(result.value, 120_000.0));
        assert_eq!(
            result.detail.get("method"),
            Some(&DetailValue::Text("€/m² commercial".into()))
        );
    }

    #[test]
    fn commerce_yield_capitalises_rent_with_a_floor_rate() {
        let row = ReferenceGridRow::new("Axe", PropertyType::Commerce, 0.0, 0.0, 2400.0);
        let mut property = Property {
            property_type: PropertyType::Commerce,
            commerce: CommerceMethod::Yield {
                monthly_rent: 1000.0,
                yield_pct: 6.0,
            },
            ..Property::default()
        };
        let result = estimate_commerce(&row, &property, &Parameters::default());
        assert!(close(result.value, 200_000.0));

        property.commerce = CommerceMethod::Yield {
            monthly_rent: 1000.0,
            yield_pct: 0.0,
        };
        let floored = estimate_commerce(&row, &property, &Parameters::default());
        assert!(close(floored.value, 1_200_000.0));
        assert_eq!(floored.detail.number("yield_rate"), Some(0.01));
    }
}
