use std::process::ExitCode;

use clap::Parser;
use time::OffsetDateTime;

use immo_estimator::{
    cli::{Cli, Commands, GridCommand, HistoryCommand},
    commands::{self, CommandError, CommandOutput},
    domain::{ReferenceGridRow, Session},
    infra::config::{load_config, save_config},
    util::version::APP_NAME,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut session = Session::default();
    session.apply_config(load_config(cli.config.as_deref()));

    let output = match dispatch(&mut session, cli.command) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{APP_NAME}: {err}");
            return ExitCode::FAILURE;
        }
    };

    if output.session_changed {
        if let Err(err) = save_config(&session.to_config(), cli.config.as_deref()) {
            eprintln!("{APP_NAME}: cannot save session: {err}");
            return ExitCode::FAILURE;
        }
    }

    print!("{}", output.text);
    ExitCode::SUCCESS
}

fn dispatch(session: &mut Session, command: Commands) -> Result<CommandOutput, CommandError> {
    match command {
        Commands::Estimate { request, json } => {
            let request = commands::read_request(&request)?;
            let today = OffsetDateTime::now_utc().date();
            commands::estimate(session, &request, today, json)
        }
        Commands::Grid { command } => match command {
            GridCommand::List => Ok(commands::grid_list(&session.grid)),
            GridCommand::Add {
                zone,
                property_type,
                base,
                land,
                commerce,
            } => commands::grid_add(
                session,
                ReferenceGridRow::new(zone, property_type.into(), base, land, commerce),
            ),
        },
        Commands::History { command } => match command {
            HistoryCommand::List => Ok(commands::history_list(&session.history)),
            HistoryCommand::Sold { index, price, date } => {
                commands::history_sold(session, index, price, &date)
            }
        },
    }
}
