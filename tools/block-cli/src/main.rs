//! Block CLI - Preview server-rendered blocks from the command line.
//!
//! Commands:
//! - `block render` - Fetch a block's server render and print the output
//! - `block url` - Print the request URL without fetching

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use block_core::{RenderSnapshot, RenderState, TimingContext};
use block_data::{RenderClient, RenderRequest};
use block_view::{select_render, PlaceholderSet};

use config::CliConfig;

/// Block CLI - Preview server-rendered blocks from the command line
#[derive(Parser)]
#[command(name = "block")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (timing marks on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a block's server render and print the selected output
    Render(RenderArgs),

    /// Print the request URL without fetching
    Url(UrlArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Block name, e.g. core/latest-posts
    block: String,

    /// Block attribute as key=value (repeatable; values parse as JSON
    /// first, raw strings otherwise)
    #[arg(long = "attr")]
    attrs: Vec<String>,

    /// Send attributes in a POST body instead of the URL
    #[arg(long)]
    post: bool,

    /// Extra query argument as key=value (repeatable)
    #[arg(long = "query")]
    query: Vec<String>,

    /// REST API base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Print the raw snapshot as JSON instead of the selected output
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct UrlArgs {
    /// Block name, e.g. core/latest-posts
    block: String,

    /// Block attribute as key=value (repeatable)
    #[arg(long = "attr")]
    attrs: Vec<String>,

    /// Extra query argument as key=value (repeatable)
    #[arg(long = "query")]
    query: Vec<String>,

    /// REST API base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Render(args) => render(args, &config, cli.verbose).await,
        Commands::Url(args) => url(args, &config),
    }
}

async fn render(args: RenderArgs, config: &CliConfig, verbose: bool) -> Result<()> {
    let mut timing = TimingContext::new();

    let request = build_request(&args.block, &args.attrs, args.post, &args.query)?;
    timing.mark("request_built");

    let mut client = RenderClient::new(&base_url(args.base_url.as_deref(), config)?)
        .context("Invalid base URL")?;
    for (key, value) in &config.headers {
        client = client.with_default_header(key.as_str(), value.as_str());
    }

    let outcome = client.fetch(&request).await;
    timing.mark("fetched");

    let failed = outcome.is_err();
    let snapshot = RenderSnapshot::settled(match outcome {
        Ok(html) => RenderState::from_rendered(html),
        Err(err) => RenderState::Error(err.to_string()),
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", select_render(&snapshot, &PlaceholderSet::new()));
    }

    if verbose {
        for mark in ["request_built", "fetched"] {
            if let Some(offset) = timing.offset(mark) {
                eprintln!("{} {} at {:?}", style("·").dim(), mark, offset);
            }
        }
    }

    if failed {
        if let Some(message) = snapshot.state.error_message() {
            eprintln!("{} {}", style("✗").red(), message);
        }
        std::process::exit(1);
    }
    Ok(())
}

fn url(args: UrlArgs, config: &CliConfig) -> Result<()> {
    let request = build_request(&args.block, &args.attrs, false, &args.query)?;
    let client = RenderClient::new(&base_url(args.base_url.as_deref(), config)?)
        .context("Invalid base URL")?;

    println!("{}", request.build_path(client.base_url()));
    Ok(())
}

fn base_url(flag: Option<&str>, config: &CliConfig) -> Result<String> {
    flag.map(str::to_string)
        .or_else(|| config.base_url.clone())
        .context("No base URL; pass --base-url or set one in the config file")
}

fn build_request(
    block: &str,
    attrs: &[String],
    post: bool,
    query: &[String],
) -> Result<RenderRequest> {
    let mut request = if post {
        RenderRequest::post(block)
    } else {
        RenderRequest::get(block)
    };

    if let Some(attributes) = parse_attrs(attrs)? {
        request = request.with_attributes(attributes);
    }
    for pair in query {
        let (key, value) = split_pair(pair)?;
        request = request.with_query_arg(key, value);
    }
    Ok(request)
}

/// Parse repeated `key=value` flags into an attribute map.
///
/// Values are taken as JSON when they parse (`--attr postsToShow=5` stays a
/// number, `--attr align=full` becomes a string).
fn parse_attrs(pairs: &[String]) -> Result<Option<Map<String, Value>>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut map = Map::new();
    for pair in pairs {
        let (key, value) = split_pair(pair)?;
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(Some(map))
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .with_context(|| format!("Invalid flag value '{}', expected key=value", pair))
}
