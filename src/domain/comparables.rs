//! Comparable-sales model: weighted average of adjusted price/m².
//!
//! Each sale is weighted by surface similarity, distance and recency, after its
//! price/m² has been corrected for the energy/condition gap with the subject.

use time::Date;

use super::entities::{
    ComparableSale, ConditionCategory, Detail, DetailValue, EnergyRating, EstimationResult,
    Property,
};
use super::error::ValuationError;
use super::evaluation::{clamp_area, MIN_AREA};
use super::params::Parameters;
use super::range::{price_range, RangeMode};

pub const MIN_COMPARABLES: usize = 3;

const SIMILARITY_DECAY: f64 = 2.0;
const DISTANCE_DECAY_PER_KM: f64 = 0.9;
const MIN_DISTANCE_KM: f64 = 0.1;
const RECENCY_DECAY_PER_YEAR: f64 = 1.3;
const MIN_WEIGHT: f64 = 1e-4;
const MIN_WEIGHT_SUM: f64 = 1e-9;

/// Intermediate terms for one comparable.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedComparable {
    pub raw_rate: f64,
    pub adjusted_rate: f64,
    pub differential: f64,
    pub age_days: i64,
    pub similarity: f64,
    pub distance_decay: f64,
    pub recency_decay: f64,
    pub weight: f64,
}

/// Energy percentage plus condition percentage.
pub fn adjustment_factor(
    params: &Parameters,
    energy: EnergyRating,
    condition: ConditionCategory,
) -> f64 {
    params.energy.for_rating(energy) + params.condition.for_condition(condition)
}

pub fn weigh_comparable(
    subject: &Property,
    sale: &ComparableSale,
    params: &Parameters,
    as_of: Date,
) -> WeightedComparable {
    let sale_surface = sale.surface_area.max(MIN_AREA);
    let raw_rate = sale.price / sale_surface;

    let age_days = (as_of - sale.sale_date).whole_days().max(1);

    let differential = adjustment_factor(params, subject.energy_rating, subject.condition)
        - adjustment_factor(params, sale.energy_rating, sale.condition);
    let adjusted_rate = raw_rate * (1.0 + differential);

    let ratio = subject.surface.max(MIN_AREA) / sale_surface;
    let similarity = (-(1.0 - ratio).abs() * SIMILARITY_DECAY).exp();
    let distance_decay = (-sale.distance_km.max(MIN_DISTANCE_KM) * DISTANCE_DECAY_PER_KM).exp();
    let recency_decay = (-(age_days as f64 / 365.0) * RECENCY_DECAY_PER_YEAR).exp();

    let weight = (similarity * distance_decay * recency_decay).max(MIN_WEIGHT);

    WeightedComparable {
        raw_rate,
        adjusted_rate,
        differential,
        age_days,
        similarity,
        distance_decay,
        recency_decay,
        weight,
    }
}

/// Estimates the subject from at least [`MIN_COMPARABLES`] sales, as of `as_of`.
pub fn estimate_from_comparables(
    subject: &Property,
    sales: &[ComparableSale],
    params: &Parameters,
    as_of: Date,
) -> Result<EstimationResult, ValuationError> {
    if sales.len() < MIN_COMPARABLES {
        return Err(ValuationError::InsufficientComparables {
            found: sales.len(),
            required: MIN_COMPARABLES,
        });
    }

    let weighted: Vec<WeightedComparable> = sales
        .iter()
        .map(|sale| weigh_comparable(subject, sale, params, as_of))
        .collect();

    let (numerator, weight_sum) = weighted.iter().fold((0.0, 0.0), |(num, den), item| {
        (num + item.adjusted_rate * item.weight, den + item.weight)
    });
    let weighted_rate = numerator / weight_sum.max(MIN_WEIGHT_SUM);

    let surface = clamp_area(subject.surface, "surface");
    let built_value = weighted_rate * surface;
    let land_value = subject.land_area * params.comparables.land_rate_per_area;
    let amenity_bonus = if subject.amenities.garage || subject.amenities.parking {
        params.comparables.parking_bonus
    } else {
        0.0
    };
    let value = built_value + land_value + amenity_bonus;

    let mut detail = Detail::new();
    detail.push("comparable_count", DetailValue::Score(sales.len() as f64));
    detail.push(
        "subject_adjustment_pct",
        DetailValue::Percent(adjustment_factor(
            params,
            subject.energy_rating,
            subject.condition,
        )),
    );
    for (position, item) in weighted.iter().enumerate() {
        let n = position + 1;
        detail.push(
            &format!("comparable_{n}_adjusted_rate"),
            DetailValue::RatePerArea(item.adjusted_rate),
        );
        detail.push(&format!("comparable_{n}_weight"), DetailValue::Score(item.weight));
        log::debug!(
            "[comparables] #{n}: raw {:.0} adj {:.0} age {}d sim {:.3} dist {:.3} rec {:.3} w {:.4}",
            item.raw_rate,
            item.adjusted_rate,
            item.age_days,
            item.similarity,
            item.distance_decay,
            item.recency_decay,
            item.weight
        );
    }
    detail.push("weight_sum", DetailValue::Score(weight_sum));
    detail.push("weighted_rate_per_area", DetailValue::RatePerArea(weighted_rate));
    detail.push("built_value", DetailValue::Amount(built_value));
    detail.push("land_value", DetailValue::Amount(land_value));
    detail.push("amenity_bonus", DetailValue::Amount(amenity_bonus));

    let range = price_range(value, RangeMode::Fixed(params.range.pct));
    Ok(EstimationResult {
        value,
        low: range.low,
        high: range.high,
        detail,
    })
}
