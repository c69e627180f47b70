//! CLI entry point for the journalist.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AI journalist CLI
#[derive(Parser, Debug)]
#[command(name = "journalist", version, about = "AI journalist: research, write and edit an article")]
pub struct Cli {
    /// Config file (defaults to the platform config dir's journalist.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an article about a topic
    Generate(GenerateArgs),
    /// Run a single web search
    Search(SearchArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Topic to write about
    #[arg(default_value = "latest ML news")]
    pub topic: String,

    /// Chat model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum number of messages in the conversation
    #[arg(long)]
    pub max_rounds: Option<usize>,

    /// Directory for exported articles
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Export the article as a Markdown file
    #[arg(long)]
    pub save: bool,

    /// Write the conversation transcript as JSON to this file
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Serper API key (overrides SERPER_API_KEY)
    #[arg(long)]
    pub search_api_key: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Number of results
    #[arg(short, long, default_value_t = crate::tools::search::DEFAULT_NUM_RESULTS)]
    pub num: usize,

    /// Serper API key (overrides SERPER_API_KEY)
    #[arg(long)]
    pub search_api_key: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
