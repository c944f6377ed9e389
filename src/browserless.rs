// Browserless rendering client — fully-rendered HTML over HTTP.
//
// Facebook pages are useless without JavaScript, so raw reqwest GETs
// won't do. We POST to a Browserless /content endpoint, which drives a
// headless Chrome instance and returns the rendered DOM. Feed pagination
// is handled by injecting a small auto-scroll script and waiting for the
// lazy-loaded posts to settle.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

/// Default Browserless endpoint for a local docker instance.
pub const DEFAULT_BROWSERLESS_URL: &str = "http://localhost:3000";

/// How long Browserless waits after navigation before snapshotting, in ms.
const SETTLE_MS: u64 = 4_000;

/// Interval between injected scroll steps, in ms. Matches the cadence a
/// human would need for the feed to keep up.
const SCROLL_STEP_MS: u64 = 1_500;

/// Thin reqwest wrapper over the Browserless /content API.
pub struct BrowserlessClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("copycatch/0.1 (page-analysis)")
            .timeout(Duration::from_secs(180))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    /// Fetch the rendered HTML for a URL.
    pub async fn content(&self, url: &str) -> Result<String> {
        self.render(url, 0).await
    }

    /// Fetch the rendered HTML for a URL after `scroll_passes` viewport
    /// scrolls, letting infinite-scroll feeds load older entries.
    pub async fn content_scrolled(&self, url: &str, scroll_passes: u32) -> Result<String> {
        self.render(url, scroll_passes).await
    }

    async fn render(&self, url: &str, scroll_passes: u32) -> Result<String> {
        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }

        // Wait for the initial snapshot, plus one scroll interval per pass.
        let wait_ms = SETTLE_MS + u64::from(scroll_passes) * SCROLL_STEP_MS;

        let mut body = serde_json::json!({
            "url": url,
            "gotoOptions": { "waitUntil": "networkidle2" },
            "waitForTimeout": wait_ms,
        });

        if scroll_passes > 0 {
            let script = format!(
                "(() => {{ let n = 0; const t = setInterval(() => {{ \
                 window.scrollBy(0, window.innerHeight); \
                 if (++n >= {scroll_passes}) clearInterval(t); }}, {SCROLL_STEP_MS}); }})();"
            );
            body["addScriptTag"] = serde_json::json!([{ "content": script }]);
        }

        debug!(url = url, scroll_passes, wait_ms, "Rendering page via Browserless");

        let resp = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Browserless request failed for {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            anyhow::bail!("Browserless returned {status} for {url}: {message}");
        }

        resp.text()
            .await
            .with_context(|| format!("Failed to read rendered HTML for {url}"))
    }
}
