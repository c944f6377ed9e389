// Composition tests — the run pipeline chained over a canned PostSource.
//
// These exercise the data flow between modules:
//   PostSource -> collect_comments -> detect_duplicates -> CSV export
// without any network calls or browser (except CSV generation, which
// writes to the temp dir).

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use copycatch::detect::{detect_duplicates, Comment};
use copycatch::output::csv::{default_report_path, write_report};
use copycatch::output::truncate_chars;
use copycatch::pipeline::collect_comments;
use copycatch::scrape::selftest::{inject_probe_comments, PROBE_AUTHORS};
use copycatch::scrape::{PostRef, PostSource};

/// Canned source: fixed posts, fixed comments per post URL.
struct CannedSource {
    posts: Vec<PostRef>,
    comments: HashMap<String, Vec<Comment>>,
}

#[async_trait]
impl PostSource for CannedSource {
    async fn fetch_candidate_posts(
        &self,
        _page: &str,
        min_comments: u32,
        max_posts: usize,
    ) -> Result<Vec<PostRef>> {
        Ok(self
            .posts
            .iter()
            .filter(|p| p.comment_count >= min_comments)
            .take(max_posts)
            .cloned()
            .collect())
    }

    async fn fetch_comments(&self, post: &PostRef) -> Result<Vec<Comment>> {
        Ok(self.comments.get(&post.url).cloned().unwrap_or_default())
    }
}

fn post(url: &str, comment_count: u32) -> PostRef {
    PostRef {
        url: url.to_string(),
        comment_count,
    }
}

fn two_post_source() -> CannedSource {
    let mut comments = HashMap::new();
    comments.insert(
        "post-1".to_string(),
        vec![
            Comment::new("Amazing insight, thank you for sharing!", "bot_alpha"),
            Comment::new("what a sunset, where was this taken?", "carol"),
        ],
    );
    comments.insert(
        "post-2".to_string(),
        vec![
            Comment::new("Amazing insight, thank you for sharing!", "bot_beta"),
            Comment::new("congrats on the launch everyone", "dan"),
        ],
    );

    CannedSource {
        posts: vec![post("post-1", 25), post("post-2", 12), post("post-3", 2)],
        comments,
    }
}

// ============================================================
// Chain: PostSource -> collect -> detect
// ============================================================

#[tokio::test]
async fn cross_post_duplicates_are_flagged() {
    let source = two_post_source();

    let comments = collect_comments(&source, "somepage", 10, 200, false)
        .await
        .unwrap();
    // post-3 is below min_comments, so only the two qualifying posts contribute.
    assert_eq!(comments.len(), 4);

    let report = detect_duplicates(&comments, 98).unwrap();
    assert_eq!(report.len(), 1);

    let cluster = &report["Amazing insight, thank you for sharing!"];
    let authors: Vec<&str> = cluster.iter().map(String::as_str).collect();
    assert_eq!(authors, ["bot_alpha", "bot_beta"]);
}

#[tokio::test]
async fn max_posts_caps_collection() {
    let source = two_post_source();
    let comments = collect_comments(&source, "somepage", 10, 1, false)
        .await
        .unwrap();
    assert_eq!(comments.len(), 2, "only post-1 should contribute");
}

#[tokio::test]
async fn empty_source_yields_empty_report() {
    let source = CannedSource {
        posts: vec![],
        comments: HashMap::new(),
    };
    let comments = collect_comments(&source, "somepage", 10, 200, false)
        .await
        .unwrap();
    let report = detect_duplicates(&comments, 98).unwrap();
    assert!(report.is_empty());
}

// ============================================================
// Debug probe injection
// ============================================================

#[tokio::test]
async fn debug_run_flags_the_injected_probes() {
    let source = two_post_source();

    let comments = collect_comments(&source, "somepage", 10, 200, true)
        .await
        .unwrap();
    assert_eq!(comments.len(), 6, "two probes should be appended");

    let report = detect_duplicates(&comments, 98).unwrap();
    let probe_cluster = report
        .values()
        .find(|authors| authors.contains(PROBE_AUTHORS[0]))
        .expect("probe authors should be flagged");
    assert!(probe_cluster.contains(PROBE_AUTHORS[1]));
}

#[test]
fn probe_injection_is_a_noop_on_empty_input() {
    let mut comments: Vec<Comment> = Vec::new();
    inject_probe_comments(&mut comments);
    assert!(comments.is_empty());
}

// ============================================================
// CSV export
// ============================================================

#[test]
fn csv_export_round_trips_through_the_filesystem() {
    let input = vec![
        Comment::new("hello world", "alice"),
        Comment::new("hello world", "bob"),
    ];
    let report = detect_duplicates(&input, 98).unwrap();

    let tmp_path = std::env::temp_dir().join("copycatch-test-report.csv");
    let written = write_report(&report, &tmp_path).unwrap();

    let content = std::fs::read_to_string(&written).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Comment,Suspicious Users"));
    assert_eq!(lines.next(), Some("hello world,\"alice, bob\""));

    let _ = std::fs::remove_file(&tmp_path);
}

#[test]
fn default_report_path_is_a_csv_under_the_output_dir() {
    let dir = std::path::Path::new("some/output/dir");
    let path = default_report_path(dir);
    assert!(path.starts_with(dir));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));
    assert!(path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap()
        .starts_with("copycatch-"));
}

// ============================================================
// truncate_chars in display context
// ============================================================

#[test]
fn truncation_respects_utf8_boundaries() {
    let long_text = "é".repeat(200);
    let truncated = truncate_chars(&long_text, 120);
    assert_eq!(truncated.chars().count(), 123); // 120 + "..."
    assert!(truncated.ends_with("..."));
}
