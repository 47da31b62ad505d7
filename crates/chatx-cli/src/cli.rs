use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatx")]
#[command(about = "Extract one author's messages from a chat export and count their tokens", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub extract: ExtractArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a chatx.toml into the current directory
    Init {
        /// Author to extract (exact display name)
        #[arg(long)]
        author: Option<String>,
    },
}

/// Overrides for the extraction run; anything unset comes from config
#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Config file (default: nearest chatx.toml, then the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chat export JSON
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Text file to write
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Author to extract, matched exactly against `from`
    #[arg(long, short)]
    pub author: Option<String>,

    /// BPE encoding for exact token counts (e.g. cl100k_base, o200k_base)
    #[arg(long)]
    pub encoding: Option<String>,
}
