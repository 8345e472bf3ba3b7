//! Property valuation engine: grid, comparable-sales and technical-impact
//! models over a user-editable reference grid, with a plain-text seller report.

pub mod app;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod report;
pub mod util;
