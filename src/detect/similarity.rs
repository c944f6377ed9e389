// Similarity scoring — case-insensitive fuzzy ratio between comment texts.
//
// SequenceMatcher-style ratio: 2M / T, where M is the number of matching
// characters (longest common subsequence) and T the combined length.
// Scaled to an integer 0-100 so thresholds read as percentages. This is
// deliberately NOT max-length-normalized Levenshtein: a trailing "." on a
// copy-pasted comment should barely dent the score, and 2M/T keeps
// "hi there" vs "hi there!" at 94 where the max-len form drops to 89.

/// Compute the similarity score between two texts, 0-100.
///
/// Case-insensitive and symmetric. Identical texts score 100, disjoint
/// texts score 0. Total over any input: empty strings and arbitrary
/// unicode are compared as-is, never rejected.
pub fn similarity_score(a: &str, b: &str) -> u8 {
    // Compare over chars, not bytes — a one-emoji difference should cost
    // one edit, not four.
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let matches = lcs_length(&a, &b);
    let ratio = 2.0 * matches as f64 / (a.len() + b.len()) as f64;
    (ratio * 100.0).round() as u8
}

/// LCS length via two-row DP (space-optimised).
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
