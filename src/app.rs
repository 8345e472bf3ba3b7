use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    domain::{ComparableSale, EstimationResult, ExpertCoefficient, Property, Session, ValuationError},
    report::{render, Report, ReportInput, ReportModel},
};

/// Which valuation model to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    Grid,
    Comparables,
    Technical,
}

/// One estimation run, as read from a request file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    #[serde(default)]
    pub method: Method,
    /// Required by the grid and technical models.
    #[serde(default)]
    pub zone: String,
    pub property: Property,
    #[serde(default)]
    pub comparables: Vec<ComparableSale>,
    #[serde(default)]
    pub expert: ExpertCoefficient,
    /// Evaluation date; defaults to today.
    #[serde(default)]
    pub as_of: Option<Date>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub result: EstimationResult,
    pub report: Report,
}

/// Runs `request` against the session. Technical estimations are recorded in
/// the session history.
pub fn run(
    session: &mut Session,
    request: &EstimationRequest,
    today: Date,
) -> Result<Outcome, ValuationError> {
    let as_of = request.as_of.unwrap_or(today);
    let property = &request.property;

    log::info!(
        "Running {:?} estimation for {} ({})",
        request.method,
        property.property_type,
        if request.zone.is_empty() { "no zone" } else { request.zone.as_str() }
    );

    match request.method {
        Method::Grid => {
            let row = session.resolve_row(&request.zone, property)?;
            let result = session.estimate_grid(&request.zone, property)?;
            let report = render(
                &ReportInput {
                    property,
                    row: Some(row),
                    result: &result,
                    params: &session.params,
                    model: ReportModel::Grid,
                },
                as_of,
            );
            Ok(Outcome { result, report })
        }
        Method::Comparables => {
            let result = session.estimate_comparables(property, &request.comparables, as_of)?;
            let report = render(
                &ReportInput {
                    property,
                    row: None,
                    result: &result,
                    params: &session.params,
                    model: ReportModel::Comparables {
                        sales: &request.comparables,
                    },
                },
                as_of,
            );
            Ok(Outcome { result, report })
        }
        Method::Technical => {
            let estimate =
                session.estimate_and_record(&request.zone, property, &request.expert, as_of)?;
            let row = session.resolve_row(&request.zone, property)?;
            let report = render(
                &ReportInput {
                    property,
                    row: Some(row),
                    result: &estimate.result,
                    params: &session.params,
                    model: ReportModel::Technical {
                        condition_index: estimate.condition_index,
                        expert: &estimate.expert,
                    },
                },
                as_of,
            );
            Ok(Outcome {
                result: estimate.result,
                report,
            })
        }
    }
}
