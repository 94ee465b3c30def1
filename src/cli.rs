use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::FlavorCategory;

/// CupNote - A coffee tasting journal for the terminal
#[derive(Parser, Debug)]
#[command(name = "cupnote")]
#[command(about = "Record coffee tastings: flavors, taste ratings and notes")]
#[command(version)]
pub struct Cli {
    /// Write logs to this file (the terminal UI discards logs otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive tasting wizard
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Draft file: restored on start if present, written on Ctrl+S
        #[arg(short, long)]
        draft: Option<PathBuf>,
    },
    /// Print the flavor catalog
    Catalog {
        /// Only this category (e.g. fruity, nutty_cocoa)
        #[arg(long)]
        category: Option<FlavorCategory>,

        /// Only flavors whose label or category contains this text
        #[arg(long, default_value = "")]
        query: String,

        /// Path to configuration file (for a custom catalog)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Print a saved draft
    ShowDraft {
        /// Path to the draft file
        file: PathBuf,

        /// Configuration used to format ratings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
