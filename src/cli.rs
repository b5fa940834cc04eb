use clap::{Parser as CliParser, Subcommand};
use std::path::PathBuf;

#[derive(CliParser)]
#[command(author, version, about, long_about=None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log what the scanner does, twice for every match (RUST_LOG takes precedence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand)]
pub enum Action {
    /// Tokenize a file
    Lex {
        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
        /// The rule file, either plain (.olx) or JSON (.json)
        #[arg(id = "rules")]
        rules_path: PathBuf,
        /// The file to tokenize, standard input if absent
        source: Option<PathBuf>,
    },
    /// Show the rules of a rule file, in the order they are tried
    Rules {
        /// Show whether each rule captures
        #[arg(short, long)]
        full: bool,
        /// Dump the rules as a JSON rule file
        #[arg(long, conflicts_with = "full")]
        json: bool,
        /// The rule file, either plain (.olx) or JSON (.json)
        #[arg(id = "rules")]
        rules_path: PathBuf,
    },
}
