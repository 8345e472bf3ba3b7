use serde::{Deserialize, Serialize};
use time::Date;

use super::comparables::estimate_from_comparables;
use super::entities::{ComparableSale, EstimationResult, Property, ReferenceGridRow};
use super::error::ValuationError;
use super::evaluation::estimate_with_grid;
use super::grid::ReferenceGrid;
use super::history::{History, HistoryRecord};
use super::params::Parameters;
use super::technical::{estimate_technical, ExpertCoefficient, TechnicalEstimate};

/// Everything the user edits during one working session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub grid: ReferenceGrid,
    pub params: Parameters,
    pub history: History,
}

impl Session {
    pub fn apply_config(&mut self, config: SessionConfig) {
        self.grid = config.grid;
        self.params = config.params;
        self.history = config.history;
    }

    pub fn to_config(&self) -> SessionConfig {
        SessionConfig {
            grid: self.grid.clone(),
            params: self.params.clone(),
            history: self.history.clone(),
        }
    }

    /// Grid row for the subject's type in `zone`. Estimation must not proceed without one.
    pub fn resolve_row(
        &self,
        zone: &str,
        property: &Property,
    ) -> Result<&ReferenceGridRow, ValuationError> {
        self.grid
            .lookup(zone, property.property_type)
            .ok_or_else(|| ValuationError::MissingReferenceRow {
                zone: zone.to_string(),
                property_type: property.property_type,
            })
    }

    pub fn estimate_grid(
        &self,
        zone: &str,
        property: &Property,
    ) -> Result<EstimationResult, ValuationError> {
        let row = self.resolve_row(zone, property)?;
        Ok(estimate_with_grid(row, property, &self.params))
    }

    pub fn estimate_comparables(
        &self,
        property: &Property,
        sales: &[ComparableSale],
        as_of: Date,
    ) -> Result<EstimationResult, ValuationError> {
        estimate_from_comparables(property, sales, &self.params, as_of)
    }

    pub fn estimate_technical(
        &self,
        zone: &str,
        property: &Property,
        expert: &ExpertCoefficient,
    ) -> Result<TechnicalEstimate, ValuationError> {
        let row = self.resolve_row(zone, property)?;
        Ok(estimate_technical(row, property, &self.params, expert))
    }

    /// Runs the technical model and appends the outcome to the history.
    pub fn estimate_and_record(
        &mut self,
        zone: &str,
        property: &Property,
        expert: &ExpertCoefficient,
        today: Date,
    ) -> Result<TechnicalEstimate, ValuationError> {
        let row = self.resolve_row(zone, property)?.clone();
        let estimate = estimate_technical(&row, property, &self.params, expert);
        self.history
            .record(HistoryRecord::from_estimate(&row, property, &estimate, today));
        Ok(estimate)
    }
}

/// What a session saves between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub grid: ReferenceGrid,
    #[serde(default)]
    pub params: Parameters,
    #[serde(default)]
    pub history: History,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PropertyType;
    use time::macros::date;

    #[test]
    fn missing_row_blocks_estimation() {
        let session = Session::default();
        let property = Property {
            property_type: PropertyType::Commerce,
            ..Property::default()
        };
        assert_eq!(
            session.estimate_grid("Namur - Centre", &property),
            Err(ValuationError::MissingReferenceRow {
                zone: "Namur - Centre".into(),
                property_type: PropertyType::Commerce,
            })
        );
        assert!(session
            .estimate_technical("Nowhere", &Property::default(), &ExpertCoefficient::default())
            .is_err());
    }

    #[test]
    fn recording_prepends_to_history() {
        let mut session = Session::default();
        let property = Property::default();
        let expert = ExpertCoefficient::new(5.0, "quartier recherche");

        session
            .estimate_and_record("Charleroi", &property, &expert, date!(2025 - 05 - 01))
            .unwrap();
        let latest = session
            .estimate_and_record("Namur - Centre", &property, &expert, date!(2025 - 05 - 02))
            .unwrap();

        assert_eq!(session.history.len(), 2);
        let first = session.history.get(0).unwrap();
        assert_eq!(first.zone, "Namur - Centre");
        assert_eq!(first.value, latest.result.value);
        assert_eq!(first.expert_pct, 5.0);
    }

    #[test]
    fn failed_estimation_records_nothing() {
        let mut session = Session::default();
        let result = session.estimate_and_record(
            "Unknown zone",
            &Property::default(),
            &ExpertCoefficient::default(),
            date!(2025 - 05 - 01),
        );
        assert!(result.is_err());
        assert!(session.history.is_empty());
    }

    #[test]
    fn config_round_trips_through_the_session() {
        let mut session = Session::default();
        let mut config = session.to_config();
        config.params.range.pct = 0.1;
        config.grid = ReferenceGrid::empty();
        session.apply_config(config.clone());
        assert_eq!(session.to_config(), config);

        session
            .estimate_and_record(
                "Charleroi",
                &Property::default(),
                &ExpertCoefficient::default(),
                date!(2025 - 05 - 01),
            )
            .unwrap_err();
        session.apply_config(SessionConfig::default());
        session
            .estimate_and_record(
                "Charleroi",
                &Property::default(),
                &ExpertCoefficient::default(),
                date!(2025 - 05 - 01),
            )
            .unwrap();
        assert_eq!(session.to_config().history.len(), 1);
    }
}
