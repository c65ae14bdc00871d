//! Selfie Bingo - command-line front end

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use selfie_bingo::{
    AnimatorState, BingoConfig, BingoSession, Collaborators, ConsoleDialogs, ConsoleSurface,
    FileCapture, FileShareTarget, SqliteTileStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = BingoConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }
    info!(db_path = %config.db_path(), "Starting Selfie Bingo");

    match cli.command {
        Command::Show { json } => show(&config, json),
        Command::Name { position, name } => {
            let session = build_session(&config, None, false)?;
            match name {
                Some(name) => session.set_name(position, &name)?,
                None => {
                    session.name_tile(position).await?;
                }
            }
            print_board(&session)
        }
        Command::Photo { position, file } => {
            let session = build_session(&config, file, false)?;
            let outcome = session.capture_photo(position).await?;
            debug!(?outcome, "Photo handled");
            finish(&session).await
        }
        Command::Tap { position, file } => {
            let session = build_session(&config, file, false)?;
            let outcome = session.tap(position).await?;
            debug!(?outcome, "Tap handled");
            finish(&session).await
        }
        Command::Share { yes } => {
            let session = build_session(&config, None, yes)?;
            let outcome = session.share().await?;
            println!("{:?}", outcome);
            Ok(())
        }
        Command::Reset => {
            let session = build_session(&config, None, false)?;
            session.reset()?;
            print_board(&session)
        }
    }
}

/// Wires the console collaborators into a session.
fn build_session(config: &BingoConfig, file: Option<PathBuf>, assume_yes: bool) -> Result<BingoSession> {
    let store = Arc::new(SqliteTileStore::open(config.db_path())?);
    let collaborators = Collaborators::new(
        Arc::new(ConsoleDialogs::new(assume_yes)),
        Arc::new(FileCapture::new(file, config.capture_target())),
        Arc::new(FileShareTarget::new(config.output_dir())),
    );
    Ok(BingoSession::new(
        store,
        Arc::new(ConsoleSurface),
        collaborators,
        config,
    ))
}

/// Prints the board without composing anything.
fn show(config: &BingoConfig, json: bool) -> Result<()> {
    let store = SqliteTileStore::open(config.db_path())?;
    let board = selfie_bingo::BoardModel::new(Arc::new(store)).get_all()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        println!("{}", board.display());
    }
    Ok(())
}

fn print_board(session: &BingoSession) -> Result<()> {
    println!("{}", session.board()?.display());
    Ok(())
}

/// Dismisses any overlay left up by a celebration, then prints the board.
async fn finish(session: &BingoSession) -> Result<()> {
    if session.animator().state() != AnimatorState::Idle {
        session.dismiss_overlay().await?;
    }
    print_board(session)
}
