//! The user's reference grid: price per m² by zone and property type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{PropertyType, ReferenceGridRow};

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("zone name must not be blank")]
    BlankZone,
    #[error("{field} must be a non-negative number (got {value})")]
    NegativeRate { field: &'static str, value: f64 },
}

/// Rows read from disk go through the same checks as [`ReferenceGrid::append`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ReferenceGridRow>", into = "Vec<ReferenceGridRow>")]
pub struct ReferenceGrid {
    rows: Vec<ReferenceGridRow>,
}

impl Default for ReferenceGrid {
    fn default() -> Self {
        Self {
            rows: default_rows(),
        }
    }
}

impl ReferenceGrid {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[ReferenceGridRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact match on zone and type. First match wins.
    pub fn lookup(&self, zone: &str, property_type: PropertyType) -> Option<&ReferenceGridRow> {
        self.rows
            .iter()
            .find(|row| row.zone == zone && row.property_type == property_type)
    }

    /// Validates and appends a row. The zone name is trimmed.
    pub fn append(&mut self, row: ReferenceGridRow) -> Result<(), GridError> {
        let row = validate_row(row)?;
        log::debug!(
            "[grid] Added {} / {} (base {}, land {}, commerce {})",
            row.zone,
            row.property_type,
            row.base_rate_per_area,
            row.land_rate_per_area,
            row.commerce_rate_per_area
        );
        self.rows.push(row);
        Ok(())
    }

    /// Distinct zone names, sorted.
    pub fn zone_names(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.zone.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Property types that have at least one row in `zone`.
    pub fn types_for_zone(&self, zone: &str) -> Vec<PropertyType> {
        PropertyType::ALL
            .into_iter()
            .filter(|kind| self.lookup(zone, *kind).is_some())
            .collect()
    }
}

/// Duplicates are kept and the first one wins on lookup. Invalid rows are
/// dropped with a warning.
impl From<Vec<ReferenceGridRow>> for ReferenceGrid {
    fn from(rows: Vec<ReferenceGridRow>) -> Self {
        let mut grid = Self::empty();
        for row in rows {
            let label = format!("{} / {}", row.zone, row.property_type);
            if let Err(err) = grid.append(row) {
                log::warn!("[grid] Skipping row '{label}': {err}");
            }
        }
        grid
    }
}

impl From<ReferenceGrid> for Vec<ReferenceGridRow> {
    fn from(grid: ReferenceGrid) -> Self {
        grid.rows
    }
}

fn validate_row(mut row: ReferenceGridRow) -> Result<ReferenceGridRow, GridError> {
    let zone = row.zone.trim();
    if zone.is_empty() {
        return Err(GridError::BlankZone);
    }
    row.zone = zone.to_string();

    for (field, value) in [
        ("base_rate_per_area", row.base_rate_per_area),
        ("land_rate_per_area", row.land_rate_per_area),
        ("commerce_rate_per_area", row.commerce_rate_per_area),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GridError::NegativeRate { field, value });
        }
    }
    Ok(row)
}

fn default_rows() -> Vec<ReferenceGridRow> {
    vec![
        ReferenceGridRow::new("Namur - Centre", PropertyType::House, 2150.0, 20.0, 0.0),
        ReferenceGridRow::new("Namur - Centre", PropertyType::Apartment, 2350.0, 0.0, 0.0),
        ReferenceGridRow::new("Charleroi", PropertyType::House, 1550.0, 12.0, 0.0),
        ReferenceGridRow::new("Charleroi", PropertyType::Apartment, 1700.0, 0.0, 0.0),
        ReferenceGridRow::new(
            "Liege - Axe commercial",
            PropertyType::Commerce,
            0.0,
            0.0,
            2400.0,
        ),
    ]
}
