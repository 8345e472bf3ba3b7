use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

/// Kind of property a grid row or a subject belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    #[serde(alias = "Maison")]
    House,
    #[serde(alias = "Appartement")]
    Apartment,
    Commerce,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [Self::House, Self::Apartment, Self::Commerce];

    pub fn label(&self) -> &'static str {
        match self {
            Self::House => "Maison",
            Self::Apartment => "Appartement",
            Self::Commerce => "Commerce",
        }
    }

    pub fn is_residential(&self) -> bool {
        matches!(self, Self::House | Self::Apartment)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Energy performance certificate letter (PEB).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyRating {
    A,
    B,
    #[default]
    C,
    D,
    E,
    F,
    G,
    #[serde(other)]
    Unknown,
}

impl EnergyRating {
    pub const LETTERS: [EnergyRating; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::Unknown => "?",
        }
    }
}

/// General upkeep of the living space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    #[serde(alias = "Renove")]
    Renovated,
    #[default]
    #[serde(alias = "Bon")]
    Good,
    #[serde(alias = "A rafraichir")]
    ToRefresh,
    #[serde(alias = "A renover")]
    ToRenovate,
    #[serde(other)]
    Unknown,
}

impl ConditionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Renovated => "Renove",
            Self::Good => "Bon",
            Self::ToRefresh => "A rafraichir",
            Self::ToRenovate => "A renover",
            Self::Unknown => "Inconnu",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofCondition {
    #[serde(alias = "Parfait")]
    Perfect,
    #[default]
    #[serde(alias = "Moyen")]
    Average,
    #[serde(alias = "Mauvaise", alias = "Mauvais")]
    Bad,
    #[serde(other)]
    Unknown,
}

impl RoofCondition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "Parfait",
            Self::Average => "Moyen",
            Self::Bad => "Mauvaise",
            Self::Unknown => "Inconnu",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatingSystem {
    HeatPump,
    GasCondensing,
    #[default]
    Gas,
    Oil,
    Electric,
    Wood,
    Absent,
    #[serde(other)]
    Unknown,
}

impl HeatingSystem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HeatPump => "Pompe a chaleur",
            Self::GasCondensing => "Gaz condensation",
            Self::Gas => "Gaz",
            Self::Oil => "Mazout",
            Self::Electric => "Electrique",
            Self::Wood => "Bois / pellets",
            Self::Absent => "Aucun",
            Self::Unknown => "Inconnu",
        }
    }
}

/// Finish level of a kitchen or a bathroom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishCondition {
    New,
    #[default]
    Good,
    Dated,
    ToRenovate,
    #[serde(other)]
    Unknown,
}

impl FinishCondition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "Neuf",
            Self::Good => "Bon",
            Self::Dated => "Date",
            Self::ToRenovate => "A renover",
            Self::Unknown => "Inconnu",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glazing {
    Triple,
    #[default]
    Double,
    DoubleOld,
    Single,
    #[serde(other)]
    Unknown,
}

impl Glazing {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Triple => "Triple vitrage",
            Self::Double => "Double vitrage",
            Self::DoubleOld => "Double vitrage ancien",
            Self::Single => "Simple vitrage",
            Self::Unknown => "Inconnu",
        }
    }
}

/// Categorical technical attributes, used by the impact estimator and the condition index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalState {
    pub roof: RoofCondition,
    pub heating: HeatingSystem,
    pub kitchen: FinishCondition,
    pub bathroom: FinishCondition,
    pub glazing: Glazing,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenities {
    pub garage: bool,
    pub parking: bool,
    pub balcony: bool,
    pub terrace: bool,
    pub garden: bool,
    pub basement: bool,
    /// Only used by the technical model (base + area x rate).
    pub terrace_area: f64,
    pub garden_area: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorInfo {
    /// 0 is the ground floor.
    pub level: u32,
    pub elevator: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attic {
    pub area: f64,
    pub finishable: bool,
}

/// How a commercial unit is valued by the grid model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum CommerceMethod {
    #[default]
    PerArea,
    /// Capitalised rent: annual rent / yield.
    Yield { monthly_rent: f64, yield_pct: f64 },
}

impl CommerceMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PerArea => "€/m² commercial",
            Self::Yield { .. } => "Rendement",
        }
    }
}

/// The subject property being valued. Built fresh for every estimation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub property_type: PropertyType,
    /// Address or municipality, free text.
    pub commune: String,
    pub owner: String,
    pub surface: f64,
    pub land_area: f64,
    pub condition: ConditionCategory,
    pub energy_rating: EnergyRating,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub amenities: Amenities,
    pub floor: Option<FloorInfo>,
    pub attic: Option<Attic>,
    pub technical: TechnicalState,
    pub commerce: CommerceMethod,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            property_type: PropertyType::House,
            commune: String::new(),
            owner: String::new(),
            surface: 100.0,
            land_area: 0.0,
            condition: ConditionCategory::Good,
            energy_rating: EnergyRating::C,
            bedrooms: 3,
            bathrooms: 1,
            amenities: Amenities::default(),
            floor: None,
            attic: None,
            technical: TechnicalState::default(),
            commerce: CommerceMethod::PerArea,
        }
    }
}

/// One line of the user's reference grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGridRow {
    pub zone: String,
    pub property_type: PropertyType,
    pub base_rate_per_area: f64,
    #[serde(default)]
    pub land_rate_per_area: f64,
    #[serde(default)]
    pub commerce_rate_per_area: f64,
}

impl ReferenceGridRow {
    pub fn new(
        zone: impl Into<String>,
        property_type: PropertyType,
        base_rate_per_area: f64,
        land_rate_per_area: f64,
        commerce_rate_per_area: f64,
    ) -> Self {
        Self {
            zone: zone.into(),
            property_type,
            base_rate_per_area,
            land_rate_per_area,
            commerce_rate_per_area,
        }
    }
}

/// A past transaction used as a weighted reference point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparableSale {
    pub price: f64,
    pub surface_area: f64,
    pub sale_date: Date,
    pub distance_km: f64,
    #[serde(default)]
    pub condition: ConditionCategory,
    #[serde(default)]
    pub energy_rating: EnergyRating,
    #[serde(default)]
    pub note: String,
}

/// Value attached to a named intermediate term of an estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DetailValue {
    Amount(f64),
    RatePerArea(f64),
    /// Stored as a fraction: 0.03 is 3%.
    Percent(f64),
    Score(f64),
    Text(String),
}

impl DetailValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Amount(v) | Self::RatePerArea(v) | Self::Percent(v) | Self::Score(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub key: String,
    pub value: DetailValue,
}

/// Ordered list of intermediate terms. Insertion order is the report order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Detail {
    entries: Vec<DetailEntry>,
}

impl Detail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: DetailValue) {
        self.entries.push(DetailEntry {
            key: key.to_string(),
            value,
        });
    }

    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Numeric value of `key`, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(DetailValue::as_f64)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetailEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of every estimator. Recomputed on each request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub value: f64,
    pub low: f64,
    pub high: f64,
    pub detail: Detail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_strings_deserialize_to_unknown() {
        let roof: RoofCondition = serde_json::from_str("\"Leaking\"").unwrap();
        assert_eq!(roof, RoofCondition::Unknown);
        let heating: HeatingSystem = serde_json::from_str("\"Geothermal\"").unwrap();
        assert_eq!(heating, HeatingSystem::Unknown);
        let rating: EnergyRating = serde_json::from_str("\"Z\"").unwrap();
        assert_eq!(rating, EnergyRating::Unknown);
    }

    #[test]
    fn french_labels_are_accepted_as_aliases() {
        let roof: RoofCondition = serde_json::from_str("\"Mauvaise\"").unwrap();
        assert_eq!(roof, RoofCondition::Bad);
        let kind: PropertyType = serde_json::from_str("\"Maison\"").unwrap();
        assert_eq!(kind, PropertyType::House);
        let condition: ConditionCategory = serde_json::from_str("\"A renover\"").unwrap();
        assert_eq!(condition, ConditionCategory::ToRenovate);
    }

    #[test]
    fn partial_property_json_falls_back_to_defaults() {
        let property: Property =
            serde_json::from_str(r#"{"property_type": "Apartment", "surface": 72.0}"#).unwrap();
        assert_eq!(property.property_type, PropertyType::Apartment);
        assert_eq!(property.surface, 72.0);
        assert_eq!(property.energy_rating, EnergyRating::C);
        assert!(property.floor.is_none());
    }

    #[test]
    fn detail_keeps_insertion_order_and_finds_numbers() {
        let mut detail = Detail::new();
        detail.push("market_value", DetailValue::Amount(1000.0));
        detail.push("method", DetailValue::Text("grid".into()));
        detail.push("adjustment_pct", DetailValue::Percent(0.03));

        let keys: Vec<&str> = detail.keys().collect();
        assert_eq!(keys, vec!["market_value", "method", "adjustment_pct"]);
        assert_eq!(detail.number("adjustment_pct"), Some(0.03));
        assert_eq!(detail.number("method"), None);
        assert_eq!(detail.number("missing"), None);
    }
}
