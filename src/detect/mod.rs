// Duplicate comment clustering — the detection core.
//
// Flags near-identical comment text posted by more than one distinct
// account. The comparison runs pairwise over the FULL collected set, not
// per post: coordinated accounts reuse the same text across posts, and a
// per-post pass would miss that.

pub mod similarity;

pub use similarity::similarity_score;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default similarity threshold. Near-verbatim copies only — one or two
/// characters of drift on a typical comment still clears it.
pub const DEFAULT_THRESHOLD: u8 = 98;

/// A single scraped comment: the trimmed displayed body and the display
/// name that posted it. The display name is not a stable identifier —
/// two accounts sharing a name is an accepted limitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub author: String,
}

impl Comment {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Flagged clusters: representative comment text mapped to the distinct
/// authors that posted a near-duplicate of it. Only entries with two or
/// more distinct authors survive. BTree containers keep iteration
/// deterministic for rendering and export.
pub type DuplicateReport = BTreeMap<String, BTreeSet<String>>;

/// Cluster near-duplicate comments across distinct authors.
///
/// Every unordered pair of comments is scored; when a pair meets the
/// threshold, both authors are recorded under both sides' own exact text.
/// Near-duplicate but non-identical texts therefore stay separate keys —
/// the match relation is never closed transitively, so a bot network
/// posting several distinct variants shows up as several clusters rather
/// than one merged one.
///
/// `threshold` must be in 0..=100 and is validated before any comparison
/// work. Returns an empty report for empty or single-element input.
pub fn detect_duplicates(comments: &[Comment], threshold: u8) -> Result<DuplicateReport> {
    if threshold > 100 {
        anyhow::bail!("similarity threshold must be between 0 and 100, got {threshold}");
    }

    let mut clusters: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for i in 0..comments.len() {
        for j in (i + 1)..comments.len() {
            let score = similarity_score(&comments[i].text, &comments[j].text);
            if score >= threshold {
                for key in [comments[i].text.as_str(), comments[j].text.as_str()] {
                    let authors = clusters.entry(key).or_default();
                    authors.insert(comments[i].author.as_str());
                    authors.insert(comments[j].author.as_str());
                }
            }
        }
    }

    // A cluster is only suspicious when more than one distinct account
    // posted it — one user reposting their own comment is not a signal.
    let report: DuplicateReport = clusters
        .into_iter()
        .filter(|(_, authors)| authors.len() > 1)
        .map(|(text, authors)| {
            (
                text.to_string(),
                authors.into_iter().map(String::from).collect(),
            )
        })
        .collect();

    debug!(
        compared = comments.len(),
        flagged = report.len(),
        "Duplicate clustering complete"
    );

    Ok(report)
}
