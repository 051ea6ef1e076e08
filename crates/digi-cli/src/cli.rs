use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "digi",
    about = "Digitionary: deterministic hash trees and a content-addressed object model",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a hash tree from a delimited word list and print its root
    Build(BuildArgs),
    /// Print the node/link graph of a word list's hash tree
    Graph(GraphArgs),
    /// Compute the object id of a payload
    HashObject(HashObjectArgs),
    /// Build a tree object from MODE:NAME:HASH entries
    Mktree(MktreeArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    pub words: String,
}

#[derive(Args)]
pub struct GraphArgs {
    pub words: String,
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct HashObjectArgs {
    /// Payload given inline
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub payload: Option<String>,
    /// Read the payload from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Treat the payload as an encoded tree instead of a blob
    #[arg(long)]
    pub tree: bool,
}

#[derive(Args)]
pub struct MktreeArgs {
    /// Entries as MODE:NAME:HASH, mode in octal
    pub entries: Vec<String>,
}
