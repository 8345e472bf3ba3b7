//! Valuation logic lives here. Everything in this module is pure and synchronous.

pub mod comparables;
pub mod condition;
pub mod entities;
pub mod error;
pub mod evaluation;
pub mod grid;
pub mod history;
pub mod params;
pub mod range;
pub mod session;
pub mod technical;

pub use comparables::{estimate_from_comparables, weigh_comparable, WeightedComparable};
pub use condition::{condition_index, condition_scores, ConditionScores};
pub use entities::{
    Amenities, Attic, ComparableSale, CommerceMethod, ConditionCategory, Detail, DetailEntry,
    DetailValue, EnergyRating, EstimationResult, FinishCondition, FloorInfo, Glazing,
    HeatingSystem, Property, PropertyType, ReferenceGridRow, RoofCondition, TechnicalState,
};
pub use error::ValuationError;
pub use evaluation::{estimate_commerce, estimate_residential, estimate_with_grid};
pub use grid::{GridError, ReferenceGrid};
pub use history::{parse_sale_date, History, HistoryError, HistoryRecord};
pub use params::Parameters;
pub use range::{price_range, PriceRange, RangeMode};
pub use session::{Session, SessionConfig};
pub use technical::{estimate_technical, ExpertCoefficient, TechnicalEstimate, TechnicalImpacts};
