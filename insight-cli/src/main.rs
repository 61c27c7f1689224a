//! insight CLI
//!
//! Deck builder for Sanity's End: browse the card catalog, build and track
//! decks, and move deck lists in and out in the untap text format.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;

use cli_types::{CardsAction, Cli, Commands, ConfigAction, DecksAction};
pub(crate) use error::CliError;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;
    let Some(command) = cli.command else {
        return commands::menu::run_menu(db);
    };

    match command {
        Commands::Cards { action } => match action {
            CardsAction::List { filter } => commands::cards::run_cards_list(db, filter.into_filter()),
            CardsAction::Show { name } => commands::cards::run_cards_show(db, &name),
            CardsAction::Seed { path } => commands::cards::run_cards_seed(db, path),
        },
        Commands::Decks { action } => match action {
            DecksAction::List => commands::decks::run_decks_list(db),
            DecksAction::Show { deck } => commands::decks::run_decks_show(db, &deck),
            DecksAction::Delete { deck } => commands::decks::run_decks_delete(db, &deck),
            DecksAction::Win { deck } => commands::decks::run_decks_outcome(db, &deck, true),
            DecksAction::Loss { deck } => commands::decks::run_decks_outcome(db, &deck, false),
            DecksAction::Import { file } => commands::decks::run_decks_import(db, file),
            DecksAction::Export { deck, file } => commands::decks::run_decks_export(db, &deck, file),
            DecksAction::Create { name } => commands::decks::run_decks_create(db, &name),
            DecksAction::Edit { deck } => commands::decks::run_decks_edit(db, &deck),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(db);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
            ConfigAction::SetSeed { path } => commands::config::run_config_set_seed(path),
        },
    }
}
