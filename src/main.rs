use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use copycatch::browserless::BrowserlessClient;
use copycatch::config::Config;
use copycatch::detect::{self, Comment};
use copycatch::output::{csv as csv_export, terminal};
use copycatch::pipeline;
use copycatch::scrape::facebook::FacebookPageSource;

/// Copycatch: coordinated bot-comment detection for public Facebook pages.
///
/// Scrapes a page's posts and comments, then flags near-duplicate comment
/// text posted by distinct accounts as likely coordinated activity.
#[derive(Parser)]
#[command(name = "copycatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a public page and flag coordinated comment clusters
    Analyze {
        /// Page handle (e.g. lemonde.fr) or a full page URL
        page: String,

        /// Only analyze posts with at least this many comments
        #[arg(long, default_value = "10")]
        min_comments: u32,

        /// Similarity threshold (0-100) for near-duplicate matching
        #[arg(long, default_value_t = detect::DEFAULT_THRESHOLD)]
        threshold: u8,

        /// Max posts to analyze per run
        #[arg(long, default_value = "200")]
        max_posts: usize,

        /// Inject synthetic duplicate probes to self-test the pipeline
        #[arg(long)]
        debug: bool,

        /// CSV output path (default: timestamped file under the output dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run the detector over a CSV of text,author rows (no scraping)
    ScanFile {
        /// Path to a CSV file with a `text,author` header
        path: PathBuf,

        /// Similarity threshold (0-100) for near-duplicate matching
        #[arg(long, default_value_t = detect::DEFAULT_THRESHOLD)]
        threshold: u8,

        /// CSV output path (default: timestamped file under the output dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("copycatch=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            page,
            min_comments,
            threshold,
            max_posts,
            debug,
            out,
        } => {
            let config = Config::load()?;
            config.require_browserless()?;

            println!("Analyzing page: {}", page.bold());

            let client = BrowserlessClient::new(
                &config.browserless_url,
                config.browserless_token.as_deref(),
            )?;
            let source =
                FacebookPageSource::new(client, &config.page_base_url, config.feed_scroll_passes);

            let comments =
                pipeline::collect_comments(&source, &page, min_comments, max_posts, debug).await?;

            let report = detect::detect_duplicates(&comments, threshold)?;

            terminal::display_duplicate_report(&report);
            if !report.is_empty() {
                let path =
                    out.unwrap_or_else(|| csv_export::default_report_path(&config.output_dir));
                let written = csv_export::write_report(&report, &path)?;
                println!(
                    "\n{}",
                    format!("Results saved to {}", written.display()).bold()
                );
            }
            terminal::display_run_summary(comments.len(), report.len());
        }

        Commands::ScanFile {
            path,
            threshold,
            out,
        } => {
            let config = Config::load()?;

            let comments = read_comments_csv(&path)?;
            println!(
                "Loaded {} comment(s) from {}",
                comments.len(),
                path.display()
            );

            let report = detect::detect_duplicates(&comments, threshold)?;

            terminal::display_duplicate_report(&report);
            if !report.is_empty() {
                let path =
                    out.unwrap_or_else(|| csv_export::default_report_path(&config.output_dir));
                let written = csv_export::write_report(&report, &path)?;
                println!(
                    "\n{}",
                    format!("Results saved to {}", written.display()).bold()
                );
            }
            terminal::display_run_summary(comments.len(), report.len());
        }
    }

    Ok(())
}

/// Read (text, author) rows from a CSV file with a `text,author` header.
fn read_comments_csv(path: &Path) -> Result<Vec<Comment>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut comments = Vec::new();
    for row in reader.deserialize() {
        let comment: Comment =
            row.with_context(|| format!("Malformed row in {}", path.display()))?;
        comments.push(comment);
    }
    Ok(comments)
}
