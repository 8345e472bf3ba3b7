//! Editable valuation constants. One instance per session; defaults match the
//! agency's working grid. Nothing here is checked for internal consistency.

use serde::{Deserialize, Serialize};

use super::entities::{
    ConditionCategory, EnergyRating, FinishCondition, Glazing, HeatingSystem,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub energy: EnergyAdjustments,
    pub condition: ConditionAdjustments,
    pub annexes: AnnexValues,
    pub degressivity: Degressivity,
    pub range: RangeParams,
    pub comparables: ComparableParams,
    pub technical: TechnicalParams,
    pub expert: ExpertBounds,
}

/// Percentage adjustment per energy letter, as fractions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyAdjustments {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

impl Default for EnergyAdjustments {
    fn default() -> Self {
        Self {
            a: 0.06,
            b: 0.03,
            c: 0.0,
            d: -0.03,
            e: -0.06,
            f: -0.09,
            g: -0.12,
        }
    }
}

impl EnergyAdjustments {
    pub fn for_rating(&self, rating: EnergyRating) -> f64 {
        match rating {
            EnergyRating::A => self.a,
            EnergyRating::B => self.b,
            EnergyRating::C => self.c,
            EnergyRating::D => self.d,
            EnergyRating::E => self.e,
            EnergyRating::F => self.f,
            EnergyRating::G => self.g,
            EnergyRating::Unknown => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionAdjustments {
    pub renovated: f64,
    pub good: f64,
    pub to_refresh: f64,
    pub to_renovate: f64,
}

impl Default for ConditionAdjustments {
    fn default() -> Self {
        Self {
            renovated: 0.08,
            good: 0.03,
            to_refresh: -0.03,
            to_renovate: -0.10,
        }
    }
}

impl ConditionAdjustments {
    /// Unknown conditions are priced as "good", the average case.
    pub fn for_condition(&self, condition: ConditionCategory) -> f64 {
        match condition {
            ConditionCategory::Renovated => self.renovated,
            ConditionCategory::Good | ConditionCategory::Unknown => self.good,
            ConditionCategory::ToRefresh => self.to_refresh,
            ConditionCategory::ToRenovate => self.to_renovate,
        }
    }
}

/// Fixed values added by the grid model for each annex present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnexValues {
    pub garage: f64,
    pub parking: f64,
    pub terrace: f64,
    pub garden: f64,
    pub basement: f64,
}

impl Default for AnnexValues {
    fn default() -> Self {
        Self {
            garage: 15_000.0,
            parking: 8_000.0,
            terrace: 4_000.0,
            garden: 6_000.0,
            basement: 2_000.0,
        }
    }
}

/// Rate reduction applied above a surface threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Degressivity {
    pub threshold_area: f64,
    pub rate: f64,
}

impl Default for Degressivity {
    fn default() -> Self {
        Self {
            threshold_area: 160.0,
            rate: 0.06,
        }
    }
}

impl Degressivity {
    /// Strictly above the threshold only.
    pub fn applies_to(&self, surface: f64) -> bool {
        surface > self.threshold_area
    }

    pub fn apply(&self, base_rate: f64, surface: f64) -> f64 {
        if self.applies_to(surface) {
            base_rate * (1.0 - self.rate)
        } else {
            base_rate
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeParams {
    /// Symmetric band (fixed mode) and neutral band (index-modulated mode).
    pub pct: f64,
}

impl Default for RangeParams {
    fn default() -> Self {
        Self { pct: 0.06 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparableParams {
    pub land_rate_per_area: f64,
    /// Flat bonus when the subject has a garage or a parking space.
    pub parking_bonus: f64,
}

impl Default for ComparableParams {
    fn default() -> Self {
        Self {
            land_rate_per_area: 15.0,
            parking_bonus: 10_000.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalParams {
    pub roof: RoofParams,
    pub heating: HeatingImpacts,
    pub kitchen: FinishImpacts,
    pub bathroom: FinishImpacts,
    pub glazing: GlazingImpacts,
    pub energy: EnergyImpacts,
    pub rooms: RoomParams,
    pub floor: FloorParams,
    pub outdoor: OutdoorParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofParams {
    pub flat_fee_without_attic: f64,
    pub attic_base: f64,
    pub attic_rate_per_area: f64,
    /// Share of the full works applied when the roof is only average.
    pub average_coefficient: f64,
    pub impact_factor: f64,
}

impl Default for RoofParams {
    fn default() -> Self {
        Self {
            flat_fee_without_attic: 18_000.0,
            attic_base: 12_000.0,
            attic_rate_per_area: 110.0,
            average_coefficient: 0.5,
            impact_factor: 0.70,
        }
    }
}

/// Signed currency impact per heating system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatingImpacts {
    pub heat_pump: f64,
    pub gas_condensing: f64,
    pub gas: f64,
    pub oil: f64,
    pub electric: f64,
    pub wood: f64,
    pub absent: f64,
}

impl Default for HeatingImpacts {
    fn default() -> Self {
        Self {
            heat_pump: 12_000.0,
            gas_condensing: 6_000.0,
            gas: 0.0,
            oil: -6_000.0,
            electric: -8_000.0,
            wood: -2_000.0,
            absent: -15_000.0,
        }
    }
}

impl HeatingImpacts {
    pub fn for_system(&self, system: HeatingSystem) -> f64 {
        match system {
            HeatingSystem::HeatPump => self.heat_pump,
            HeatingSystem::GasCondensing => self.gas_condensing,
            HeatingSystem::Gas => self.gas,
            HeatingSystem::Oil => self.oil,
            HeatingSystem::Electric => self.electric,
            HeatingSystem::Wood => self.wood,
            HeatingSystem::Absent => self.absent,
            HeatingSystem::Unknown => 0.0,
        }
    }
}

/// Signed currency impact per finish level (kitchen or bathroom).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishImpacts {
    pub new: f64,
    pub good: f64,
    pub dated: f64,
    pub to_renovate: f64,
}

impl Default for FinishImpacts {
    fn default() -> Self {
        Self {
            new: 8_000.0,
            good: 0.0,
            dated: -6_000.0,
            to_renovate: -15_000.0,
        }
    }
}

impl FinishImpacts {
    pub fn for_condition(&self, condition: FinishCondition) -> f64 {
        match condition {
            FinishCondition::New => self.new,
            FinishCondition::Good => self.good,
            FinishCondition::Dated => self.dated,
            FinishCondition::ToRenovate => self.to_renovate,
            FinishCondition::Unknown => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlazingImpacts {
    pub triple: f64,
    pub double: f64,
    pub double_old: f64,
    pub single: f64,
}

impl Default for GlazingImpacts {
    fn default() -> Self {
        Self {
            triple: 5_000.0,
            double: 0.0,
            double_old: -4_000.0,
            single: -10_000.0,
        }
    }
}

impl GlazingImpacts {
    pub fn for_glazing(&self, glazing: Glazing) -> f64 {
        match glazing {
            Glazing::Triple => self.triple,
            Glazing::Double => self.double,
            Glazing::DoubleOld => self.double_old,
            Glazing::Single => self.single,
            Glazing::Unknown => 0.0,
        }
    }
}

/// Signed currency impact per energy letter (technical model).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyImpacts {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

impl Default for EnergyImpacts {
    fn default() -> Self {
        Self {
            a: 15_000.0,
            b: 8_000.0,
            c: 0.0,
            d: -6_000.0,
            e: -12_000.0,
            f: -18_000.0,
            g: -25_000.0,
        }
    }
}

impl EnergyImpacts {
    pub fn for_rating(&self, rating: EnergyRating) -> f64 {
        match rating {
            EnergyRating::A => self.a,
            EnergyRating::B => self.b,
            EnergyRating::C => self.c,
            EnergyRating::D => self.d,
            EnergyRating::E => self.e,
            EnergyRating::F => self.f,
            EnergyRating::G => self.g,
            EnergyRating::Unknown => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomParams {
    pub bedroom_reference_house: u32,
    pub bedroom_reference_apartment: u32,
    pub bathroom_reference: u32,
    pub per_bedroom: f64,
    pub per_bathroom: f64,
}

impl Default for RoomParams {
    fn default() -> Self {
        Self {
            bedroom_reference_house: 3,
            bedroom_reference_apartment: 2,
            bathroom_reference: 1,
            per_bedroom: 7_500.0,
            per_bathroom: 5_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorParams {
    pub elevator_bonus: f64,
    /// Applied per level when there is no elevator.
    pub per_level_penalty: f64,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            elevator_bonus: 3_000.0,
            per_level_penalty: 2_500.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutdoorParams {
    pub garage: f64,
    pub parking: f64,
    pub balcony: f64,
    pub terrace_base: f64,
    pub terrace_rate_per_area: f64,
    pub garden_base: f64,
    pub garden_rate_per_area: f64,
    pub basement: f64,
    pub attic_base: f64,
    pub attic_rate_per_area: f64,
}

impl Default for OutdoorParams {
    fn default() -> Self {
        Self {
            garage: 15_000.0,
            parking: 8_000.0,
            balcony: 3_000.0,
            terrace_base: 2_000.0,
            terrace_rate_per_area: 150.0,
            garden_base: 3_000.0,
            garden_rate_per_area: 10.0,
            basement: 2_000.0,
            attic_base: 5_000.0,
            attic_rate_per_area: 250.0,
        }
    }
}

/// Bounds of the expert coefficient slider, in percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertBounds {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl Default for ExpertBounds {
    fn default() -> Self {
        Self {
            min_pct: -15.0,
            max_pct: 15.0,
        }
    }
}
