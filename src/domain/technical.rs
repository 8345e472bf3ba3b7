//! Technical model: grid market value, plus a fixed list of technical impacts,
//! times the expert coefficient. The range is modulated by the condition index.

use serde::{Deserialize, Serialize};

use super::condition::condition_index;
use super::entities::{
    Detail, DetailValue, EstimationResult, Property, PropertyType, ReferenceGridRow, RoofCondition,
};
use super::evaluation::clamp_area;
use super::params::{ExpertBounds, Parameters, TechnicalParams};
use super::range::{price_range, RangeMode};

/// Subjective appraisal adjustment, in percent, with its justification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpertCoefficient {
    pub percent: f64,
    #[serde(default)]
    pub justification: String,
}

impl ExpertCoefficient {
    pub fn new(percent: f64, justification: impl Into<String>) -> Self {
        Self {
            percent,
            justification: justification.into(),
        }
    }

    /// Keeps the percentage inside the configured slider bounds.
    /// Inverted bounds are not rejected: the upper bound wins.
    pub fn bounded(&self, bounds: &ExpertBounds) -> Self {
        let percent = if self.percent.is_nan() {
            0.0
        } else {
            self.percent.max(bounds.min_pct).min(bounds.max_pct)
        };
        if percent != self.percent {
            log::warn!(
                "[technical] expert coefficient {}% clamped to {percent}% (bounds {}..={})",
                self.percent,
                bounds.min_pct,
                bounds.max_pct
            );
        }
        Self {
            percent,
            justification: self.justification.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketValue {
    pub grid_rate: f64,
    pub rate: f64,
    pub built_value: f64,
    pub land_value: f64,
}

impl MarketValue {
    pub fn total(&self) -> f64 {
        self.built_value + self.land_value
    }
}

/// Every technical impact term, in currency. Negative values are costs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TechnicalImpacts {
    pub roof: f64,
    pub heating: f64,
    pub kitchen: f64,
    pub bathroom: f64,
    pub glazing: f64,
    pub energy: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub floor: f64,
    pub garage: f64,
    pub parking: f64,
    pub balcony: f64,
    pub terrace: f64,
    pub garden: f64,
    pub basement: f64,
    pub attic: f64,
}

impl TechnicalImpacts {
    pub fn entries(&self) -> [(&'static str, f64); 16] {
        [
            ("impact_roof", self.roof),
            ("impact_heating", self.heating),
            ("impact_kitchen", self.kitchen),
            ("impact_bathroom", self.bathroom),
            ("impact_glazing", self.glazing),
            ("impact_energy", self.energy),
            ("impact_bedrooms", self.bedrooms),
            ("impact_bathrooms", self.bathrooms),
            ("impact_floor", self.floor),
            ("impact_garage", self.garage),
            ("impact_parking", self.parking),
            ("impact_balcony", self.balcony),
            ("impact_terrace", self.terrace),
            ("impact_garden", self.garden),
            ("impact_basement", self.basement),
            ("impact_attic", self.attic),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, value)| value).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TechnicalEstimate {
    pub result: EstimationResult,
    pub market: MarketValue,
    pub impacts: TechnicalImpacts,
    pub technical_value: f64,
    pub condition_index: f64,
    /// The coefficient actually applied, after bounding.
    pub expert: ExpertCoefficient,
}

/// Surface × (possibly degressive) rate, plus land for houses.
pub fn market_value(row: &ReferenceGridRow, property: &Property, params: &Parameters) -> MarketValue {
    let surface = clamp_area(property.surface, "surface");
    let grid_rate =
        if property.property_type == PropertyType::Commerce && row.base_rate_per_area == 0.0 {
            row.commerce_rate_per_area
        } else {
            row.base_rate_per_area
        };
    let rate = params.degressivity.apply(grid_rate, surface);

    let land_value = if property.property_type == PropertyType::House {
        property.land_area * row.land_rate_per_area
    } else {
        0.0
    };

    MarketValue {
        grid_rate,
        rate,
        built_value: surface * rate,
        land_value,
    }
}

pub fn technical_impacts(property: &Property, params: &TechnicalParams) -> TechnicalImpacts {
    let technical = &property.technical;
    let amenities = &property.amenities;
    let outdoor = &params.outdoor;

    let flag = |present: bool, value: f64| if present { value } else { 0.0 };

    TechnicalImpacts {
        roof: roof_impact(property, params),
        heating: params.heating.for_system(technical.heating),
        kitchen: params.kitchen.for_condition(technical.kitchen),
        bathroom: params.bathroom.for_condition(technical.bathroom),
        glazing: params.glazing.for_glazing(technical.glazing),
        energy: params.energy.for_rating(property.energy_rating),
        bedrooms: bedroom_impact(property, params),
        bathrooms: bathroom_impact(property, params),
        floor: floor_impact(property, params),
        garage: flag(amenities.garage, outdoor.garage),
        parking: flag(amenities.parking, outdoor.parking),
        balcony: flag(amenities.balcony, outdoor.balcony),
        terrace: flag(
            amenities.terrace,
            outdoor.terrace_base + amenities.terrace_area * outdoor.terrace_rate_per_area,
        ),
        garden: flag(
            amenities.garden,
            outdoor.garden_base + amenities.garden_area * outdoor.garden_rate_per_area,
        ),
        basement: flag(amenities.basement, outdoor.basement),
        attic: match property.attic {
            Some(attic) if attic.finishable => {
                outdoor.attic_base + attic.area * outdoor.attic_rate_per_area
            }
            _ => 0.0,
        },
    }
}

/// Works on the roof are always a cost. Unknown condition is neutral.
pub fn roof_impact(property: &Property, params: &TechnicalParams) -> f64 {
    let roof = &params.roof;
    let condition = property.technical.roof;
    if matches!(condition, RoofCondition::Perfect | RoofCondition::Unknown) {
        return 0.0;
    }

    let works = match property.attic {
        Some(attic) => roof.attic_base + attic.area * roof.attic_rate_per_area,
        None => roof.flat_fee_without_attic,
    };
    let scaled = if condition == RoofCondition::Average {
        works * roof.average_coefficient
    } else {
        works
    };

    -(scaled * roof.impact_factor).abs()
}

fn bedroom_impact(property: &Property, params: &TechnicalParams) -> f64 {
    let rooms = &params.rooms;
    let reference = match property.property_type {
        PropertyType::House => rooms.bedroom_reference_house,
        PropertyType::Apartment => rooms.bedroom_reference_apartment,
        PropertyType::Commerce => return 0.0,
    };
    (f64::from(property.bedrooms) - f64::from(reference)) * rooms.per_bedroom
}

fn bathroom_impact(property: &Property, params: &TechnicalParams) -> f64 {
    if !property.property_type.is_residential() {
        return 0.0;
    }
    let rooms = &params.rooms;
    (f64::from(property.bathrooms) - f64::from(rooms.bathroom_reference)) * rooms.per_bathroom
}

fn floor_impact(property: &Property, params: &TechnicalParams) -> f64 {
    if property.property_type != PropertyType::Apartment {
        return 0.0;
    }
    match property.floor {
        Some(floor) if floor.level > 0 => {
            if floor.elevator {
                params.floor.elevator_bonus
            } else {
                -params.floor.per_level_penalty * f64::from(floor.level)
            }
        }
        _ => 0.0,
    }
}

pub fn estimate_technical(
    row: &ReferenceGridRow,
    property: &Property,
    params: &Parameters,
    expert: &ExpertCoefficient,
) -> TechnicalEstimate {
    let market = market_value(row, property, params);
    let impacts = technical_impacts(property, &params.technical);
    let technical_value = market.total() + impacts.total();

    let expert = expert.bounded(&params.expert);
    let value = technical_value * (1.0 + expert.percent / 100.0);

    let index = condition_index(&property.technical, property.energy_rating);
    let range = price_range(
        value,
        RangeMode::IndexModulated {
            index,
            neutral_pct: params.range.pct,
        },
    );

    let mut detail = Detail::new();
    detail.push("grid_rate_per_area", DetailValue::RatePerArea(market.grid_rate));
    detail.push("base_rate_per_area", DetailValue::RatePerArea(market.rate));
    detail.push("built_value", DetailValue::Amount(market.built_value));
    detail.push("land_value", DetailValue::Amount(market.land_value));
    detail.push("market_value", DetailValue::Amount(market.total()));
    for (key, value) in impacts.entries() {
        detail.push(key, DetailValue::Amount(value));
    }
    detail.push("impacts_total", DetailValue::Amount(impacts.total()));
    detail.push("technical_value", DetailValue::Amount(technical_value));
    detail.push("condition_index", DetailValue::Score(index));
    detail.push("expert_coefficient_pct", DetailValue::Percent(expert.percent / 100.0));
    detail.push(
        "expert_justification",
        DetailValue::Text(expert.justification.clone()),
    );
    detail.push("final_value", DetailValue::Amount(value));
    detail.push("range_low_pct", DetailValue::Percent(range.low_pct));
    detail.push("range_high_pct", DetailValue::Percent(range.high_pct));

    log::debug!(
        "[technical] {} {}: market {:.0} + impacts {:.0} = {technical_value:.0}, expert {}% -> {value:.0} (index {index:.1})",
        row.zone,
        row.property_type,
        market.total(),
        impacts.total(),
        expert.percent
    );

    TechnicalEstimate {
        result: EstimationResult {
            value,
            low: range.low,
            high: range.high,
            detail,
        },
        market,
        impacts,
        technical_value,
        condition_index: index,
        expert,
    }
}
