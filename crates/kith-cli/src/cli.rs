use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kith",
    about = "Kith: audience-aware feeds and set-based recommendations",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Kith HTTP server
    Serve(ServeArgs),
    /// Validate a configuration file
    CheckConfig(CheckConfigArgs),
    /// Preview the ranking of two candidate lists
    Rank(RankArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides `server.bind_addr` from the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct RankArgs {
    /// First candidate list (UUIDs or integers), comma separated
    #[arg(long, value_delimiter = ',')]
    pub a: Vec<String>,
    /// Second candidate list (UUIDs or integers), comma separated
    #[arg(long, value_delimiter = ',')]
    pub b: Vec<String>,
    #[arg(long, default_value = "10")]
    pub page_size: usize,
}
