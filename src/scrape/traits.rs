// PostSource trait — the seam between scraping and detection.
//
// Everything downstream of this trait is pure and testable offline. A
// live implementation drives a browser; test implementations return
// canned posts and comments.

use anyhow::Result;
use async_trait::async_trait;

use crate::detect::Comment;

/// A post selected for comment analysis.
#[derive(Debug, Clone)]
pub struct PostRef {
    /// Absolute permalink to the post.
    pub url: String,
    /// Comment count as displayed on the post at discovery time.
    pub comment_count: u32,
}

/// Source of candidate posts and their comments for one public page.
/// Implementations must be async because fetching means network calls.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Discover posts on `page` with at least `min_comments` comments,
    /// returning at most `max_posts` of them in feed order.
    async fn fetch_candidate_posts(
        &self,
        page: &str,
        min_comments: u32,
        max_posts: usize,
    ) -> Result<Vec<PostRef>>;

    /// Extract the visible (text, author) comment pairs from one post.
    async fn fetch_comments(&self, post: &PostRef) -> Result<Vec<Comment>>;
}
