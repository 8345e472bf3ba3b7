//! Session history of completed technical estimations.
//!
//! Records are stored most recent first. The only mutation after insertion is
//! setting the sold price/date of one record by index.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{macros::format_description, Date};
use uuid::Uuid;

use super::entities::{Property, PropertyType, ReferenceGridRow};
use super::technical::TechnicalEstimate;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HistoryError {
    #[error("invalid date '{0}': expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDateFormat(String),
    #[error("invalid sold price {0}: expected a non-negative amount")]
    InvalidPrice(f64),
    #[error("no history record at index {index} (history holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub estimated_on: Date,
    pub zone: String,
    pub property_type: PropertyType,
    pub commune: String,
    pub owner: String,
    pub surface: f64,
    pub market_value: f64,
    pub technical_value: f64,
    pub value: f64,
    pub low: f64,
    pub high: f64,
    pub condition_index: f64,
    pub expert_pct: f64,
    pub expert_justification: String,
    pub sold_price: Option<f64>,
    pub sold_date: Option<Date>,
}

impl HistoryRecord {
    pub fn from_estimate(
        row: &ReferenceGridRow,
        property: &Property,
        estimate: &TechnicalEstimate,
        estimated_on: Date,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            estimated_on,
            zone: row.zone.clone(),
            property_type: property.property_type,
            commune: property.commune.clone(),
            owner: property.owner.clone(),
            surface: property.surface,
            market_value: estimate.market.total(),
            technical_value: estimate.technical_value,
            value: estimate.result.value,
            low: estimate.result.low,
            high: estimate.result.high,
            condition_index: estimate.condition_index,
            expert_pct: estimate.expert.percent,
            expert_justification: estimate.expert.justification.clone(),
            sold_price: None,
            sold_date: None,
        }
    }

    /// Relative gap between the sold price and the estimate, as a fraction.
    pub fn sale_gap(&self) -> Option<f64> {
        let sold = self.sold_price?;
        if self.value == 0.0 {
            return None;
        }
        Some((sold - self.value) / self.value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    /// Inserts at the front.
    pub fn record(&mut self, record: HistoryRecord) {
        log::info!(
            "[history] Recorded {} estimate for {} ({:.0})",
            record.property_type,
            record.zone,
            record.value
        );
        self.records.insert(0, record);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sets the sold price and date of the record at `index`.
    ///
    /// Price and date are checked before anything is written, so bad input
    /// leaves the record untouched.
    pub fn update_sale(
        &mut self,
        index: usize,
        sold_price: f64,
        sold_date: &str,
    ) -> Result<&HistoryRecord, HistoryError> {
        if !sold_price.is_finite() || sold_price < 0.0 {
            return Err(HistoryError::InvalidPrice(sold_price));
        }
        let date = parse_sale_date(sold_date)?;
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(HistoryError::IndexOutOfRange { index, len })?;

        record.sold_price = Some(sold_price);
        record.sold_date = Some(date);
        Ok(record)
    }

    /// Mean of |sale gap| over records that have been sold.
    pub fn mean_absolute_gap(&self) -> Option<f64> {
        let gaps: Vec<f64> = self
            .records
            .iter()
            .filter_map(HistoryRecord::sale_gap)
            .map(f64::abs)
            .collect();
        if gaps.is_empty() {
            None
        } else {
            Some(gaps.iter().sum::<f64>() / gaps.len() as f64)
        }
    }
}

/// Accepts `YYYY-MM-DD` and `DD/MM/YYYY`.
pub fn parse_sale_date(input: &str) -> Result<Date, HistoryError> {
    let trimmed = input.trim();
    let iso = format_description!("[year]-[month]-[day]");
    let french = format_description!("[day]/[month]/[year]");

    Date::parse(trimmed, &iso)
        .or_else(|_| Date::parse(trimmed, &french))
        .map_err(|_| HistoryError::InvalidDateFormat(input.to_string()))
}
