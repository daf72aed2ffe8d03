//! CLI module for the chat relay
//!
//! - `serve`: run the HTTP relay
//! - `ask`: stream one completion to stdout

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Chat completion relay for OpenAI and Azure OpenAI
#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP relay server
    Serve,

    /// Send a single prompt and stream the answer to stdout
    Ask(ask::AskArgs),
}

/// Load `.env` and the layered app config, then install logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging)?;

    Ok(config)
}
