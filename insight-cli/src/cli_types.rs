//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use insight_catalog::{CardFilter, CardType, NumericCondition, Region};

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Insight Apparatus, the Sanity's End deck builder", long_about = None)]
pub(crate) struct Cli {
    /// Deck database file (defaults to the configured or standard location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Without a command, the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Browse the card catalog
    Cards {
        #[command(subcommand)]
        action: CardsAction,
    },

    /// Manage decks
    Decks {
        #[command(subcommand)]
        action: DecksAction,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Catalog filter options. Every given option must match.
#[derive(Args, Clone, Default)]
pub(crate) struct CardFilterArgs {
    /// Part of the card name (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Card types (e.g., creature,event)
    #[arg(long = "type", value_delimiter = ',')]
    pub types: Vec<CardType>,

    /// Regions (e.g., forest,fishing-hamlet)
    #[arg(long = "region", value_delimiter = ',')]
    pub regions: Vec<Region>,

    /// Part of the effect text (case-insensitive)
    #[arg(long)]
    pub effect: Option<String>,

    /// Power conditions (e.g., ">2,<5")
    #[arg(long, value_delimiter = ',')]
    pub power: Vec<NumericCondition>,

    /// Madness conditions (e.g., "=3")
    #[arg(long, value_delimiter = ',')]
    pub madness: Vec<NumericCondition>,
}

impl CardFilterArgs {
    pub(crate) fn into_filter(self) -> CardFilter {
        let mut filter = CardFilter::new();
        filter.name = self.name;
        filter.effect = self.effect;
        for card_type in self.types {
            filter.add_type(card_type);
        }
        for region in self.regions {
            filter.add_region(region);
        }
        filter.power = self.power;
        filter.madness = self.madness;
        filter
    }
}

#[derive(Subcommand)]
pub(crate) enum CardsAction {
    /// List catalog cards, optionally filtered
    List {
        #[command(flatten)]
        filter: CardFilterArgs,
    },

    /// Show one card by name
    Show {
        /// Card name (case-insensitive)
        name: String,
    },

    /// Load cards from a YAML file or directory into the catalog
    Seed {
        /// YAML file or directory of YAML files
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub(crate) enum DecksAction {
    /// List all decks with their record
    List,

    /// Show a deck with its statistics
    Show {
        /// Deck id or name
        deck: String,
    },

    /// Delete a deck
    Delete {
        /// Deck id or name
        deck: String,
    },

    /// Register a win for a deck
    Win {
        /// Deck id or name
        deck: String,
    },

    /// Register a loss for a deck
    Loss {
        /// Deck id or name
        deck: String,
    },

    /// Import a deck list in untap format
    Import {
        /// Deck list file
        file: PathBuf,
    },

    /// Export a deck list in untap format
    Export {
        /// Deck id or name
        deck: String,

        /// Output file (".txt" is added when there is no extension)
        file: PathBuf,
    },

    /// Build a new deck interactively
    Create {
        /// Name of the new deck
        name: String,
    },

    /// Edit a deck interactively
    Edit {
        /// Deck id or name
        deck: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings
    Show,

    /// Print the settings file path
    Path,

    /// Set the default deck database path
    SetDb {
        /// Database file; omit to return to the default location
        path: Option<PathBuf>,
    },

    /// Set the YAML catalog used to seed an empty database
    SetSeed {
        /// YAML file or directory; omit to clear
        path: Option<PathBuf>,
    },
}
