use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::PropertyType;

#[derive(Parser, Debug)]
#[command(name = "immo-estimator")]
#[command(about = "Property valuation with a seller report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session file (reference grid, parameters, history).
    /// Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value a property from a JSON request and print the seller report
    Estimate {
        /// Estimation request (method, zone, property, comparables, expert coefficient)
        request: PathBuf,

        /// Print the estimation result as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Inspect or extend the reference grid
    Grid {
        #[command(subcommand)]
        command: GridCommand,
    },
    /// Review technical estimations and record how they sold
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum GridCommand {
    /// List every row, then each zone with its property types
    List,
    /// Append a row to the grid and save the session
    Add {
        zone: String,

        #[arg(value_enum)]
        property_type: GridPropertyType,

        /// Built price per m²
        #[arg(long, default_value = "0")]
        base: f64,

        /// Land price per m² (houses)
        #[arg(long, default_value = "0")]
        land: f64,

        /// Commerce price per m²
        #[arg(long, default_value = "0")]
        commerce: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List recorded estimations, most recent first
    List,
    /// Record the sold price and date of one estimation
    Sold {
        /// Position shown by `history list` (0 is the most recent)
        index: usize,

        price: f64,

        /// YYYY-MM-DD or DD/MM/YYYY
        date: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GridPropertyType {
    House,
    Apartment,
    Commerce,
}

impl From<GridPropertyType> for PropertyType {
    fn from(value: GridPropertyType) -> Self {
        match value {
            GridPropertyType::House => PropertyType::House,
            GridPropertyType::Apartment => PropertyType::Apartment,
            GridPropertyType::Commerce => PropertyType::Commerce,
        }
    }
}
