//! txmerkle CLI - Command line interface for tx_merkle
//!
//! Computes, walks and renders merkle trees over transaction payloads.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tx_merkle::tree::format_visit;
use tx_merkle::{
    print_block_tree, ConfigStore, HashAlgorithm, MerkleTree, OddLevelPolicy, TreeConfig,
};

#[derive(Parser)]
#[command(name = "txmerkle")]
#[command(about = "Merkle roots over transaction payloads")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Hash function: sha256 or blake3 (overrides the config file)
    #[arg(short, long)]
    algorithm: Option<HashAlgorithm>,

    /// Odd intermediate level handling: reject or duplicate-last
    #[arg(long)]
    odd_level: Option<OddLevelPolicy>,

    /// Path to the config file (default: ~/.config/txmerkle/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log build progress to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
struct Input {
    /// Payloads, one leaf each (read from stdin, one per line, if omitted)
    payloads: Vec<String>,

    /// Read payloads from a file, one per line
    #[arg(long, conflicts_with = "payloads")]
    file: Option<PathBuf>,

    /// Treat each payload as hex-encoded bytes
    #[arg(long)]
    hex: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merkle root
    Root(Input),

    /// Render the whole tree, one node per line
    Print(Input),

    /// List nodes in preorder with their depth and side
    Traverse(Input),

    /// Show leaf count, node count and height
    Stats(Input),

    /// Show or save the effective config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective config and where it was loaded from
    Show,
    /// Save the effective config (flags included) to the config file
    Save,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        fail(&cli.format, &e);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let store = match &cli.config {
        Some(path) => Some(ConfigStore::at(path)),
        None => ConfigStore::new().ok(),
    };
    let mut config = match &store {
        Some(store) => store.load_or_default()?,
        None => TreeConfig::default(),
    };
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(odd_level) = cli.odd_level {
        config.odd_level = odd_level;
    }

    match &cli.command {
        Commands::Root(input) => {
            let tree = build_tree(input, &config)?;
            match cli.format {
                OutputFormat::Json => output(
                    &cli.format,
                    &serde_json::json!({
                        "root": tree.root_hash(),
                        "algorithm": tree.algorithm(),
                        "leaves": tree.leaf_count()
                    }),
                ),
                OutputFormat::Text => println!("{}", tree.root_hash()),
            }
        }

        Commands::Print(input) => match cli.format {
            OutputFormat::Json => {
                let tree = build_tree(input, &config)?;
                let lines: Vec<String> = tree.preorder().map(|v| format_visit(&v)).collect();
                output(
                    &cli.format,
                    &serde_json::json!({
                        "root": tree.root_hash(),
                        "lines": lines
                    }),
                );
            }
            OutputFormat::Text => {
                let payloads = read_payloads(input)?;
                print_block_tree(&payloads, &config)?;
            }
        },

        Commands::Traverse(input) => {
            let tree = build_tree(input, &config)?;
            match cli.format {
                OutputFormat::Json => {
                    let visits: Vec<_> = tree.preorder().collect();
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "count": visits.len(),
                            "visits": visits
                        }),
                    );
                }
                OutputFormat::Text => {
                    let stdout = io::stdout();
                    let mut out = stdout.lock();
                    for visit in tree.preorder() {
                        let side = if visit.is_left { "L" } else { "R" };
                        writeln!(out, "{}\t{}\t{}", visit.depth, side, visit.digest)?;
                    }
                }
            }
        }

        Commands::Stats(input) => {
            let tree = build_tree(input, &config)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root_hash(),
                    "algorithm": tree.algorithm(),
                    "odd_level": config.odd_level,
                    "leaves": tree.leaf_count(),
                    "nodes": tree.node_count(),
                    "height": tree.height()
                }),
            );
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "path": store.as_ref().map(|s| s.path().display().to_string()),
                        "config": config
                    }),
                );
            }
            ConfigAction::Save => {
                let store = store
                    .as_ref()
                    .context("Could not find config directory")?;
                store.save(&config)?;
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "path": store.path().display().to_string(),
                        "config": config
                    }),
                );
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Collect payloads from arguments, a file or stdin
fn read_payloads(input: &Input) -> anyhow::Result<Vec<Vec<u8>>> {
    let lines: Vec<Vec<u8>> = if let Some(path) = &input.file {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        split_lines(&bytes)
    } else if !input.payloads.is_empty() {
        input
            .payloads
            .iter()
            .map(|p| p.clone().into_bytes())
            .collect()
    } else {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        split_lines(&bytes)
    };

    if !input.hex {
        return Ok(lines);
    }

    lines
        .iter()
        .map(|line| {
            let text = String::from_utf8_lossy(line);
            hex::decode(text.trim()).map_err(|e| {
                anyhow::Error::from(tx_merkle::Error::InvalidPayload(format!(
                    "{:?} is not hex: {}",
                    text, e
                )))
            })
        })
        .collect()
}

/// Split raw bytes into newline-separated payloads, dropping a trailing `\r`
fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

fn build_tree(input: &Input, config: &TreeConfig) -> anyhow::Result<MerkleTree> {
    let payloads = read_payloads(input)?;
    Ok(MerkleTree::build_with_config(&payloads, config)?)
}

/// Report an error as JSON on stdout and exit non-zero
fn fail(format: &OutputFormat, error: &anyhow::Error) -> ! {
    output(
        format,
        &serde_json::json!({
            "status": "error",
            "message": format!("{:#}", error)
        }),
    );
    std::process::exit(1);
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_raw_bytes() {
        assert_eq!(split_lines(&[0xff, 0xfe, b'\n']), vec![vec![0xff, 0xfe]]);
    }

    #[test]
    fn test_split_lines_handles_crlf_and_blank_lines() {
        assert_eq!(
            split_lines(b"a\r\n\nb"),
            vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]
        );
    }

    #[test]
    fn test_split_lines_empty_input() {
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![Vec::<u8>::new()]);
    }
}
