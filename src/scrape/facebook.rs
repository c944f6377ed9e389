// Facebook page scraping — rendered-HTML extraction for posts and comments.
//
// All selectors here are coupled to Facebook's current public DOM and
// WILL break when the layout changes; that's an accepted external
// dependency. The extraction functions are pure over an HTML string so
// they can be tested on fixtures without a browser.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::browserless::BrowserlessClient;
use crate::detect::Comment;

use super::traits::{PostRef, PostSource};

/// Minimum comment body length in chars. Shorter strings are almost
/// always reaction labels or stray UI text, not comments.
const MIN_COMMENT_CHARS: usize = 10;

/// Author shown when a comment node carries no visible name.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Leading strings that mark UI chrome rather than a comment body.
/// English and French, since the original operator targets both locales.
const NOISE_PREFIXES: &[&str] = &[
    "Like",
    "Reply",
    "Share",
    "See translation",
    "Most relevant",
    "J'aime",
    "J\u{2019}aime",
    "Répondre",
    "Partager",
    "Voir la traduction",
];

/// Live scraper for one public Facebook page, rendered via Browserless.
pub struct FacebookPageSource {
    client: BrowserlessClient,
    base_url: String,
    feed_scroll_passes: u32,
}

impl FacebookPageSource {
    pub fn new(client: BrowserlessClient, base_url: &str, feed_scroll_passes: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            feed_scroll_passes,
        }
    }

    /// Build the feed URL for a page handle. A full URL is passed through
    /// untouched so operators can paste permalinks directly.
    fn page_url(&self, page: &str) -> String {
        if page.starts_with("http://") || page.starts_with("https://") {
            page.to_string()
        } else {
            format!("{}/{}", self.base_url, page.trim_matches('/'))
        }
    }

    /// Sleep 2.5-4s between post fetches. Keeps the request cadence
    /// inside what a human reader would produce.
    async fn polite_delay(&self) {
        let ms = rand::rng().random_range(2_500..=4_000);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[async_trait]
impl PostSource for FacebookPageSource {
    async fn fetch_candidate_posts(
        &self,
        page: &str,
        min_comments: u32,
        max_posts: usize,
    ) -> Result<Vec<PostRef>> {
        let feed_url = self.page_url(page);
        info!(url = %feed_url, "Rendering page feed");

        let html = self
            .client
            .content_scrolled(&feed_url, self.feed_scroll_passes)
            .await?;

        let links = extract_post_links(&html, &self.base_url)?;
        info!(found = links.len(), "Post links discovered in feed");

        let pb = ProgressBar::new(links.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Checking posts [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );

        let mut kept = Vec::new();
        let mut skipped = 0usize;

        for link in &links {
            if kept.len() >= max_posts {
                break;
            }

            let post_html = match self.client.content(link).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %link, error = %e, "Skipping unreachable post");
                    skipped += 1;
                    pb.inc(1);
                    continue;
                }
            };

            match parse_comment_count(&post_html)? {
                Some(count) if count >= min_comments => {
                    kept.push(PostRef {
                        url: link.clone(),
                        comment_count: count,
                    });
                }
                _ => skipped += 1,
            }

            pb.inc(1);
            self.polite_delay().await;
        }

        pb.finish_and_clear();
        debug!(
            checked = links.len(),
            kept = kept.len(),
            skipped,
            "Candidate post filtering complete"
        );

        Ok(kept)
    }

    async fn fetch_comments(&self, post: &PostRef) -> Result<Vec<Comment>> {
        let html = self.client.content(&post.url).await?;
        let comments = extract_comments(&html)?;
        info!(
            url = %post.url,
            count = comments.len(),
            "Comments extracted from post"
        );
        self.polite_delay().await;
        Ok(comments)
    }
}

/// Parse a CSS selector, mapping the borrow-tied parse error into anyhow.
fn sel(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector `{css}`: {e}"))
}

/// Extract deduplicated post permalinks from a rendered feed, in feed
/// order, absolutized against `base_url`.
pub fn extract_post_links(html: &str, base_url: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let anchor = sel("a[href*='/posts/']")?;

    let mut links = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for element in document.select(&anchor) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        // The feed repeats each permalink (timestamp, comment count, text
        // preview all link to the post) — key on the raw href.
        if !seen.insert(href.to_string()) {
            continue;
        }
        let full = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}/{}", base_url.trim_end_matches('/'), href.trim_start_matches('/'))
        };
        links.push(full);
    }

    Ok(links)
}

/// Parse the displayed comment count from a rendered post page.
///
/// Returns None when no comment-count element is present (posts with
/// comments disabled, or a layout change). The count is read by
/// digit-filtering the label text, so "1 234 commentaires" parses as
/// 1234. Grouped abbreviations like "1.2K" are read literally (12) —
/// same limitation as the original tooling, and harmless since such
/// posts clear any sane min-comments filter either way.
pub fn parse_comment_count(html: &str) -> Result<Option<u32>> {
    let document = Html::parse_document(html);
    // 'omment' covers Comment/comments/commentaires in either capitalization.
    let label = sel("span[aria-label*='omment']")?;

    for element in document.select(&label) {
        let text: String = element.text().collect();
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if let Ok(count) = digits.parse::<u32>() {
            return Ok(Some(count));
        }
    }

    Ok(None)
}

/// Extract (text, author) comment pairs from a rendered post page.
///
/// Each comment is a `div[role='article']` node; the post body itself is
/// an article too and can contain the comment articles, so only leaf
/// articles (no nested article) are treated as comments. The author is
/// the first `h3` descendant's text; bodies are `div[dir='auto']`
/// descendants, filtered for minimum length and UI-noise prefixes.
pub fn extract_comments(html: &str) -> Result<Vec<Comment>> {
    let document = Html::parse_document(html);
    let article = sel("div[role='article']")?;
    let body = sel("div[dir='auto']")?;
    let author = sel("h3")?;

    let mut comments = Vec::new();

    for node in document.select(&article) {
        // Skip container articles — their dir='auto' text belongs to the
        // post (or to nested comments), not to a comment by this author.
        if node.select(&article).next().is_some() {
            continue;
        }

        let author_name = node
            .select(&author)
            .next()
            .map(|h| h.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        for text_node in node.select(&body) {
            let text = text_node.text().collect::<String>().trim().to_string();
            if text.chars().count() <= MIN_COMMENT_CHARS {
                continue;
            }
            if NOISE_PREFIXES.iter().any(|p| text.starts_with(p)) {
                continue;
            }
            comments.push(Comment::new(text, author_name.clone()));
        }
    }

    Ok(comments)
}
