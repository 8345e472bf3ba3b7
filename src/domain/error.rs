use thiserror::Error;

use super::entities::PropertyType;

/// Conditions that stop an estimation. Unknown categories never end up here:
/// they fall back to neutral values instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error("not enough comparable sales: {found} supplied, at least {required} required")]
    InsufficientComparables { found: usize, required: usize },
    #[error("no reference grid row for zone '{zone}' and type {property_type}")]
    MissingReferenceRow {
        zone: String,
        property_type: PropertyType,
    },
}
