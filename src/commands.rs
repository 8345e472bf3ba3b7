//! Handlers behind the CLI subcommands. Each one returns the text to print and
//! whether the session changed; saving is left to the caller.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::Date;

use crate::{
    app::{run, EstimationRequest, Method},
    domain::{
        GridError, History, HistoryError, ReferenceGrid, ReferenceGridRow, Session,
        ValuationError,
    },
    util::format::{date, euro, euro_per_area, pct, signed_pct},
};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot read request {}: {source}", path.display())]
    ReadRequest { path: PathBuf, source: io::Error },
    #[error("invalid request {}: {source}", path.display())]
    ParseRequest {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Valuation(#[from] ValuationError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommandOutput {
    pub text: String,
    pub session_changed: bool,
}

impl CommandOutput {
    fn unchanged(text: String) -> Self {
        Self {
            text,
            session_changed: false,
        }
    }

    fn changed(text: String) -> Self {
        Self {
            text,
            session_changed: true,
        }
    }
}

pub fn read_request(path: &Path) -> Result<EstimationRequest, CommandError> {
    let data = fs::read_to_string(path).map_err(|source| CommandError::ReadRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| CommandError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Technical runs land in the history, so they change the session.
pub fn estimate(
    session: &mut Session,
    request: &EstimationRequest,
    today: Date,
    json: bool,
) -> Result<CommandOutput, CommandError> {
    let outcome = run(session, request, today)?;
    let text = if json {
        let mut text = serde_json::to_string_pretty(&outcome.result)?;
        text.push('\n');
        text
    } else {
        outcome.report.to_string()
    };
    Ok(CommandOutput {
        text,
        session_changed: request.method == Method::Technical,
    })
}

pub fn grid_list(grid: &ReferenceGrid) -> CommandOutput {
    if grid.is_empty() {
        return CommandOutput::unchanged("Reference grid is empty\n".to_string());
    }

    let mut text = String::new();
    for row in grid.rows() {
        let _ = writeln!(
            text,
            "{:<28} {:<12} base {:>12}  land {:>10}  commerce {:>12}",
            row.zone,
            row.property_type.label(),
            euro_per_area(row.base_rate_per_area),
            euro_per_area(row.land_rate_per_area),
            euro_per_area(row.commerce_rate_per_area)
        );
    }
    text.push('\n');
    for zone in grid.zone_names() {
        let types: Vec<&str> = grid
            .types_for_zone(zone)
            .into_iter()
            .map(|kind| kind.label())
            .collect();
        let _ = writeln!(text, "{zone}: {}", types.join(", "));
    }
    CommandOutput::unchanged(text)
}

pub fn grid_add(session: &mut Session, row: ReferenceGridRow) -> Result<CommandOutput, CommandError> {
    let label = format!("{} / {}", row.zone.trim(), row.property_type.label());
    session.grid.append(row)?;
    Ok(CommandOutput::changed(format!(
        "Added {label} ({} rows)\n",
        session.grid.len()
    )))
}

pub fn history_list(history: &History) -> CommandOutput {
    if history.is_empty() {
        return CommandOutput::unchanged("No recorded estimations\n".to_string());
    }

    let mut text = String::new();
    for (index, record) in history.records().iter().enumerate() {
        let _ = write!(
            text,
            "[{index}] {} {} {} {} {}",
            date(record.estimated_on),
            record.zone,
            record.property_type.label(),
            record.commune,
            euro(record.value)
        );
        match (record.sold_price, record.sold_date, record.sale_gap()) {
            (Some(price), Some(sold_on), Some(gap)) => {
                let _ = write!(
                    text,
                    "  sold {} on {} ({})",
                    euro(price),
                    date(sold_on),
                    signed_pct(gap)
                );
            }
            (Some(price), _, _) => {
                let _ = write!(text, "  sold {}", euro(price));
            }
            _ => {}
        }
        text.push('\n');
    }
    if let Some(gap) = history.mean_absolute_gap() {
        let _ = writeln!(text, "\nMean absolute gap on sold properties: {}", pct(gap));
    }
    CommandOutput::unchanged(text)
}

pub fn history_sold(
    session: &mut Session,
    index: usize,
    price: f64,
    sold_on: &str,
) -> Result<CommandOutput, CommandError> {
    let record = session.history.update_sale(index, price, sold_on)?;
    let gap = record.sale_gap().map(signed_pct).unwrap_or_default();
    Ok(CommandOutput::changed(format!(
        "Recorded sale of [{index}] {} at {} {gap}\n",
        record.zone,
        euro(price)
    )))
}
