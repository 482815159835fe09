use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mvnrepo_core::{DEFAULT_BASE_URL, MvnRepository, PageFetcher};
use owo_colors::OwoColorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

mod sql;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_DIRECTIVES: &str = "warn";
const VERBOSE_DIRECTIVES: &str = "warn,mvnrepo=debug,mvnrepo_core=debug";

/// Resolve Maven coordinates against mvnrepository.com and emit SQL updates
#[derive(Parser, Debug)]
#[command(name = "mvnrepo")]
#[command(author = "Mvnrepo Contributors")]
#[command(version)]
#[command(about = "Resolve Maven coordinates against mvnrepository.com", long_about = None)]
struct Args {
    /// File of group,artifact,version lines to resolve
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Pause between lines, in milliseconds
    #[arg(value_name = "DELAY_MS")]
    delay_ms: Option<u64>,

    /// Base URL of the index site
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    base_url: Url,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Print a styled banner for verbose mode
fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "mvnrepo".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Resolve Maven coordinates against mvnrepository.com".dimmed());
    eprintln!();
}

/// Print a styled step message
fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

fn init_tracing(verbose: bool) {
    let directives = if verbose { VERBOSE_DIRECTIVES } else { DEFAULT_DIRECTIVES };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("Failed to build HTTP client")?;

    let mut fetcher = PageFetcher::new(args.base_url.clone(), client)
        .with_context(|| format!("Invalid base URL: {}", args.base_url))?;
    if let Some(user_agent) = &args.user_agent {
        fetcher = fetcher.with_user_agent(user_agent.clone());
    }
    let api = MvnRepository::with_fetcher(fetcher);

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read file: {}", args.input.display()))?;

    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with('#'))
        .collect();

    if args.verbose {
        print_info(&format!("{} coordinate lines to resolve", lines.len()));
        eprintln!();
    }

    let mut emitted = 0usize;
    for (index, line) in lines.iter().enumerate() {
        if args.verbose {
            print_step(index + 1, lines.len(), line);
        }

        let Some((group_id, artifact_id, version)) = sql::split_coordinates(line) else {
            warn!("skipping malformed coordinate line {:?}", line);
            continue;
        };

        if let Some(artifact) = api.get_artifact(group_id, artifact_id, version).await {
            println!("{}", sql::update_statement(&artifact));
            emitted += 1;
        }

        if let Some(delay) = args.delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    if args.verbose {
        eprintln!();
        print_success(&format!("Emitted {} update statements", emitted));
    }

    Ok(())
}
