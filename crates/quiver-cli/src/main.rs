#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! `Quiver` CLI - compile and inspect search requests
//!
//! Usage:
//!   `quiver compile --space space.json --query query.json`
//!   `quiver explain --space space.json --query query.json`
//!   `quiver inspect request.bin`

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use quiver_core::{
    decode_request, HeadParams, QuiverConfig, SearchCompiler, SearchParams, Space, SpaceRegistry,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quiver")]
#[command(
    author,
    version,
    about = "Quiver CLI - vector search request compiler"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "quiver.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Encoded buffer output
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputArg {
    #[default]
    Hex,
    Json,
    Raw,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query into an encoded request buffer
    Compile {
        #[command(flatten)]
        input: RequestInput,

        /// Output format (hex, json, raw)
        #[arg(short, long, value_enum, default_value = "hex")]
        output: OutputArg,
    },

    /// Print the canonical request as JSON without encoding it
    Explain {
        #[command(flatten)]
        input: RequestInput,
    },

    /// Decode an encoded request buffer (raw bytes or hex text)
    Inspect {
        /// Path to the buffer file
        file: PathBuf,
    },
}

#[derive(clap::Args)]
struct RequestInput {
    /// Path to the space definition (JSON)
    #[arg(short, long)]
    space: PathBuf,

    /// Path to the query body (JSON with `vector` / `filter` sections)
    #[arg(short, long)]
    query: PathBuf,

    /// Path to the remaining search parameters (JSON)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Head parameter as key=value (repeatable)
    #[arg(long = "head", value_name = "KEY=VALUE")]
    head: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = QuiverConfig::load_from_path(&cli.config)?;
    config.validate()?;
    init_tracing(&config);

    match cli.command {
        Commands::Compile { input, output } => {
            let (compiler, space, params, head) = load_request(&input, &config)?;
            let bytes = compiler.compile_search(&space, params, head)?;
            tracing::info!(space = %space, bytes = bytes.len(), "Request compiled");

            match output {
                OutputArg::Hex => println!("{}", hex::encode(&bytes)),
                OutputArg::Json => {
                    let decoded = decode_request(&bytes)?;
                    println!("{}", serde_json::to_string_pretty(&decoded)?);
                }
                OutputArg::Raw => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
        }
        Commands::Explain { input } => {
            let (compiler, space, params, head) = load_request(&input, &config)?;
            let request = compiler.prepare_search(&space, params, head)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Commands::Inspect { file } => {
            let bytes = read_buffer(&file)?;
            let decoded = decode_request(&bytes)
                .with_context(|| format!("Failed to decode {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }

    Ok(())
}

fn init_tracing(config: &QuiverConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the compiled output
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

type LoadedRequest = (SearchCompiler<SpaceRegistry>, String, SearchParams, HeadParams);

fn load_request(input: &RequestInput, config: &QuiverConfig) -> anyhow::Result<LoadedRequest> {
    let space_doc = read_text(&input.space)?;
    let space = Space::from_json(&space_doc)
        .with_context(|| format!("Invalid space definition {}", input.space.display()))?;
    let name = space.name().to_string();

    let mut params: SearchParams = match &input.params {
        Some(path) => serde_json::from_str(&read_text(path)?)
            .with_context(|| format!("Invalid search parameters {}", path.display()))?,
        None => SearchParams::default(),
    };
    let query = read_text(&input.query)?;
    params.query = Some(
        serde_json::from_str(&query)
            .with_context(|| format!("Invalid query body {}", input.query.display()))?,
    );

    let head = parse_head(&input.head)?;

    let registry = SpaceRegistry::new();
    registry.register(space);
    let compiler = SearchCompiler::new(registry, config.search.clone());

    Ok((compiler, name, params, head))
}

fn parse_head(pairs: &[String]) -> anyhow::Result<HeadParams> {
    let mut head = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid head parameter '{}', expected KEY=VALUE", pair);
        };
        head.insert(key.trim().to_string(), value.to_string());
    }
    Ok(head)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Reads a buffer file, accepting hex text as written by `compile --output hex`.
fn read_buffer(path: &Path) -> anyhow::Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if let Ok(text) = std::str::from_utf8(&bytes) {
        let text = text.trim();
        if !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return hex::decode(text).context("Invalid hex buffer");
        }
    }

    Ok(bytes)
}
