// Analysis pipeline: discover posts, accumulate comments, detect.
//
// Comments from every selected post land in ONE sequence before the
// detector runs — the same bot text showing up under different posts is
// exactly the signal we're after, so clustering must never be per-post.

use anyhow::Result;
use tracing::{info, warn};

use crate::detect::Comment;
use crate::scrape::selftest;
use crate::scrape::PostSource;

/// Collect the full comment set for one analysis run.
///
/// Fetches candidate posts (filtered by `min_comments`, capped at
/// `max_posts`), then extracts and accumulates comments across all of
/// them. With `debug` set, synthetic duplicate probes are appended after
/// collection so the run visibly exercises the detector.
pub async fn collect_comments(
    source: &dyn PostSource,
    page: &str,
    min_comments: u32,
    max_posts: usize,
    debug: bool,
) -> Result<Vec<Comment>> {
    let posts = source
        .fetch_candidate_posts(page, min_comments, max_posts)
        .await?;

    println!(
        "  {} post(s) selected (>= {} comments each)",
        posts.len(),
        min_comments
    );

    let mut all_comments = Vec::new();
    for post in &posts {
        match source.fetch_comments(post).await {
            Ok(comments) => all_comments.extend(comments),
            Err(e) => {
                warn!(url = %post.url, error = %e, "Skipping post with failed comment fetch");
            }
        }
    }

    if all_comments.is_empty() {
        warn!("No comments collected — check that the selected posts have visible comments");
    } else {
        info!(
            posts = posts.len(),
            comments = all_comments.len(),
            "Comment collection complete"
        );
    }

    if debug {
        selftest::inject_probe_comments(&mut all_comments);
    }

    Ok(all_comments)
}
