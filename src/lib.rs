//! Training planner library root.
//! Exposes the CLI parser, the high-level run() function and the
//! planning core (template, generator, assignments, availability, ICS).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cmd, cfg),
        Commands::Db { .. } => cli::commands::db::handle(cmd, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cmd, cfg),
        Commands::Trainer { .. } => cli::commands::trainer::handle(cmd, cfg),
        Commands::Generate { .. } => cli::commands::generate::handle(cmd, cfg),
        Commands::Session { .. } => cli::commands::session::handle(cmd, cfg),
        Commands::Assign { .. } => cli::commands::assign::handle(cmd, cfg),
        Commands::Publish { .. } => cli::commands::publish::handle(cmd, cfg),
        Commands::Avail { .. } => cli::commands::avail::handle(cmd, cfg),
        Commands::Confirm { .. } => cli::commands::confirm::handle(cmd, cfg),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(cmd, cfg),
        Commands::Plan { .. } => cli::commands::plan::handle(cmd, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // test mode never reads the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(user) = cli.user {
        cfg.current_user = Some(user);
    }

    dispatch(&cli, &cfg)
}
