//! Pilot Search CLI - aggregated multi-provider search from the command line.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

use pilot_search::{
    parse_provider_ids, HttpTransport, Registry, SearchRequest, SearchService,
};

/// Pilot Search - multi-provider search aggregation CLI
#[derive(Parser)]
#[command(name = "pilot-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search across providers and print the merged results
    Search(SearchArgs),

    /// List available search providers
    Providers,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Providers to query (comma-separated).
    /// Available: google, bing, duckduckgo, reddit, github
    #[arg(short, long, value_delimiter = ',')]
    providers: Option<Vec<String>>,

    /// Maximum number of results per page
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Offset into the merged result set
    #[arg(short, long, default_value = "0")]
    offset: usize,

    /// Disable safe search filtering
    #[arg(long)]
    no_safe_search: bool,

    /// Region code for localized results
    #[arg(long, default_value = "us")]
    region: String,

    /// Language code for results
    #[arg(long, default_value = "en")]
    language: String,

    /// Per-provider timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Providers => list_providers(),
    }
}

fn list_providers() -> Result<()> {
    let registry = Registry::new();
    println!("Available search providers:\n");
    for spec in registry.specs() {
        let auth = if spec
            .params
            .iter()
            .chain(spec.headers.iter())
            .any(|(_, template)| template.contains("{api_key}"))
        {
            " (requires API key)"
        } else {
            ""
        };
        println!("  {:<12} - {}{}", spec.kind.id(), spec.display_name, auth);
    }
    println!();
    println!("API keys are read from the environment, e.g. GOOGLE_API_KEY,");
    println!("GOOGLE_SEARCH_ENGINE_ID, BING_API_KEY.");
    println!();
    println!("Usage: pilot-search search \"query\" -p duckduckgo,github");
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let providers = parse_provider_ids(&args.providers.unwrap_or_default())?;

    let service = SearchService::new(Arc::new(HttpTransport::new()))
        .with_call_timeout(Duration::from_secs(args.timeout));

    let request = SearchRequest::new(&args.query)
        .with_providers(providers)
        .with_limit(args.limit)
        .with_offset(args.offset)
        .with_safe_search(!args.no_safe_search)
        .with_region(&args.region)
        .with_language(&args.language);

    let response = service.aggregate(request).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nSearch results for \"{}\" ({} total, page {}):\n",
                response.query, response.total_results, response.page
            );

            for (i, item) in response.results.iter().enumerate() {
                println!("{}. {}", i + 1, item.title);
                println!("   URL: {}", item.url);
                if !item.snippet.is_empty() {
                    let snippet: String = item.snippet.chars().take(150).collect();
                    if snippet.len() < item.snippet.len() {
                        println!("   {}...", snippet);
                    } else {
                        println!("   {}", snippet);
                    }
                }
                println!("   Provider: {} | Score: {:.2}", item.provider, item.score);
                println!();
            }

            for (provider, error) in &response.provider_errors {
                eprintln!("warning: {} failed: {}", provider, error);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for item in &response.results {
                println!("{}\t{}", item.title, item.url);
            }
        }
    }

    Ok(())
}
