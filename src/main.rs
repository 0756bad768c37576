//! Sitescribe main entry point
//!
//! This is the command-line interface for the sitescribe documentation crawler.

use anyhow::Context;
use clap::Parser;
use sitescribe::config::{load_config_with_hash, Config};
use sitescribe::{CrawlManifest, Crawler, FileStore, MarkdownConverter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitescribe: a single-domain documentation crawler
///
/// Sitescribe crawls one web domain breadth-first, converts the pages it
/// fetches to Markdown, and stores them per project together with a JSON
/// manifest of the run.
#[derive(Parser, Debug)]
#[command(name = "sitescribe")]
#[command(version)]
#[command(about = "Crawl a domain and save its pages as Markdown", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescribe=info,warn"),
            1 => EnvFilter::new("sitescribe=debug,info"),
            2 => EnvFilter::new("sitescribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sitescribe Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Max pages: {}", config.crawl.max_pages);
    println!("  Concurrency: {}", config.crawl.concurrency);
    println!("  Request timeout: {}ms", config.crawl.request_timeout_ms);
    println!("  Ignore fragments: {}", config.crawl.ignore_fragments);

    if !config.crawl.exclude_patterns.is_empty() {
        println!(
            "\nExtra exclude patterns ({}):",
            config.crawl.exclude_patterns.len()
        );
        for pattern in &config.crawl.exclude_patterns {
            println!("  - {}", pattern);
        }
    }

    if !config.crawl.include_patterns.is_empty() {
        println!(
            "\nInclude patterns ({}):",
            config.crawl.include_patterns.len()
        );
        for pattern in &config.crawl.include_patterns {
            println!("  - {}", pattern);
        }
    }

    println!("\nConversion:");
    println!("  Keep images: {}", config.convert.keep_images);
    println!("  Keep tables: {}", config.convert.keep_tables);
    println!("  Keep code blocks: {}", config.convert.keep_code_blocks);

    println!("\nStorage:");
    println!("  Base directory: {}", config.storage.base_dir.display());
    match &config.storage.project {
        Some(project) => println!("  Project: {}", project),
        None => println!("  Project: (crawl domain)"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation: crawl, convert, store, summarize
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let crawler = Crawler::new(&config.crawl.seed_url, config.crawl.crawler_options())
        .context("Failed to construct crawler")?;

    let project = config
        .storage
        .project
        .clone()
        .unwrap_or_else(|| crawler.domain().to_string());
    tracing::info!(
        "Crawling {} into project '{}'",
        config.crawl.seed_url,
        project
    );

    let results = crawler.crawl().await;
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    let store = FileStore::new(&config.storage.base_dir, &project);
    store
        .init()
        .context("Failed to create storage directories")?;

    // Convert and save the pages that actually fetched
    let converter = MarkdownConverter::new(config.convert.convert_options());
    let mut saved = 0usize;
    for result in results.iter().filter(|r| r.error.is_none()) {
        let markdown = converter.convert(result);
        let path = store
            .save_markdown(&result.title, &markdown)
            .with_context(|| format!("Failed to save page '{}'", result.url))?;
        tracing::debug!("Saved {} to {}", result.url, path.display());
        saved += 1;
    }

    // The manifest records every result, failures included
    let manifest = CrawlManifest::new(&project, crawler.seed(), results);
    let manifest_path = store
        .save_manifest(&manifest)
        .context("Failed to save crawl manifest")?;

    println!("Crawled {} pages ({} failed)", manifest.page_count, failed);
    println!(
        "Saved {} documents to {}",
        saved,
        store.pages_dir().display()
    );
    println!("Manifest: {}", manifest_path.display());

    Ok(())
}
