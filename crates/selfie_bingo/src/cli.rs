//! Command-line interface for selfie_bingo.

use clap::{Parser, Subcommand};
use selfie_bingo_board::Position;
use std::path::PathBuf;

/// Selfie Bingo - meet people, photograph them, fill the grid
#[derive(Parser, Debug)]
#[command(name = "selfie_bingo")]
#[command(about = "Selfie bingo board with celebrations and grid sharing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "selfie_bingo.toml", global = true)]
    pub config: PathBuf,

    /// Override the database path from the config
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the board
    Show {
        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Name a tile (prompts when no name is given)
    Name {
        /// Tile number (1-9) or label
        position: Position,

        /// Name of the person to meet
        name: Option<String>,
    },

    /// Take a photo for a tile from an image file
    Photo {
        /// Tile number (1-9) or label
        position: Position,

        /// Image file to use as the photo
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Tap a tile: name it if unnamed, otherwise take a photo
    Tap {
        /// Tile number (1-9) or label
        position: Position,

        /// Image file to use if a photo is taken
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Compose the grid image and share it
    Share {
        /// Share without asking when the board is not full
        #[arg(short, long)]
        yes: bool,
    },

    /// Clear every tile
    Reset,
}
