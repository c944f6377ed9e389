use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::browserless::DEFAULT_BROWSERLESS_URL;

/// Default base URL the page handle is joined against.
pub const DEFAULT_PAGE_BASE_URL: &str = "https://www.facebook.com";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// knob has a default, so `copycatch scan-file` works with no
/// configuration at all; `analyze` additionally needs a reachable
/// Browserless instance.
pub struct Config {
    /// Browserless endpoint that renders pages (COPYCATCH_BROWSERLESS_URL).
    pub browserless_url: String,
    /// Optional Browserless API token (COPYCATCH_BROWSERLESS_TOKEN).
    pub browserless_token: Option<String>,
    /// Base URL page handles are joined against (COPYCATCH_BASE_URL).
    pub page_base_url: String,
    /// Directory CSV exports land in (COPYCATCH_OUTPUT_DIR).
    pub output_dir: PathBuf,
    /// Viewport scrolls applied to the feed before snapshotting
    /// (COPYCATCH_SCROLL_PASSES). More passes load older posts.
    pub feed_scroll_passes: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let feed_scroll_passes = match env::var("COPYCATCH_SCROLL_PASSES") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("COPYCATCH_SCROLL_PASSES must be a number, got `{raw}`")
            })?,
            Err(_) => 20,
        };

        Ok(Self {
            browserless_url: env::var("COPYCATCH_BROWSERLESS_URL")
                .unwrap_or_else(|_| DEFAULT_BROWSERLESS_URL.to_string()),
            browserless_token: env::var("COPYCATCH_BROWSERLESS_TOKEN").ok(),
            page_base_url: env::var("COPYCATCH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PAGE_BASE_URL.to_string()),
            output_dir: env::var("COPYCATCH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
            feed_scroll_passes,
        })
    }

    /// Check that a Browserless endpoint is configured.
    /// Call this before any live scraping operation.
    pub fn require_browserless(&self) -> Result<()> {
        if self.browserless_url.is_empty() {
            anyhow::bail!(
                "COPYCATCH_BROWSERLESS_URL is empty. Point it at a Browserless\n\
                 instance (e.g. http://localhost:3000). See .env.example."
            );
        }
        Ok(())
    }
}
