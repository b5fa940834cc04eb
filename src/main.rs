use anyhow::{Context, Result};
use clap::Parser;
use cli::{Action, Cli};
use itertools::Itertools;
use ordlex::builder::{Buildable, RuleFileSchema};
use ordlex::stream::StringStream;
use ordlex::{RuleSet, ScanEngine};
use std::io::{self, Read};
use std::path::Path;

mod cli;

/// Install a subscriber writing to stderr, only if `RUST_LOG` is set or `-v` was given.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => return,
            1 => EnvFilter::new("ordlex=debug"),
            _ => EnvFilter::new("ordlex=trace"),
        }
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn load_rules(path: &Path) -> Result<RuleSet> {
    RuleSet::build_from_path(path)
        .with_context(|| format!("cannot load rules from {}", path.display()))
}

fn read_source(source: Option<&Path>) -> Result<StringStream> {
    match source {
        Some(path) => Ok(StringStream::from_file(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read standard input")?;
            Ok(StringStream::new(Path::new("<stdin>"), buffer))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.action {
        Action::Lex {
            json,
            rules_path,
            source,
        } => {
            let rules = load_rules(&rules_path)?;
            let stream = read_source(source.as_deref())?;
            let tokens = ScanEngine::new(&rules).scan_stream(&stream)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!(
                        "{}\t{}\t{}",
                        token.offset(),
                        token.rule().label(),
                        token.text().escape_debug()
                    );
                }
            }
        }
        Action::Rules {
            full,
            json,
            rules_path,
        } => {
            let rules = load_rules(&rules_path)?;
            if json {
                let schema = RuleFileSchema::from(&rules);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if full {
                for (order, order_rules) in rules.ordered_view() {
                    println!(
                        "{}: {}",
                        order,
                        order_rules
                            .iter()
                            .map(|rule| format!("{:#}", rule))
                            .join(" ")
                    );
                }
            } else {
                println!("{}", rules);
            }
        }
    }
    Ok(())
}
