// Unit tests for the similarity score.
//
// Covers the contract the clusterer relies on: symmetry, identity,
// case-insensitivity, boundedness, and unicode safety.

use copycatch::detect::similarity_score;

// ============================================================
// Identity and symmetry
// ============================================================

#[test]
fn identical_texts_score_100() {
    for text in ["hello world", "a", "J'aime ça", "😀 great post 😀"] {
        assert_eq!(similarity_score(text, text), 100, "identity failed for {text:?}");
    }
}

#[test]
fn score_is_symmetric() {
    let pairs = [
        ("hello world", "hello word"),
        ("hi there", "hi there!"),
        ("abc", "xyz"),
        ("", "nonempty"),
        ("héllo", "hello"),
    ];
    for (a, b) in pairs {
        assert_eq!(
            similarity_score(a, b),
            similarity_score(b, a),
            "symmetry failed for {a:?} / {b:?}"
        );
    }
}

#[test]
fn case_is_ignored() {
    assert_eq!(similarity_score("Hello World", "hello world"), 100);
    assert_eq!(similarity_score("HELLO", "hello"), 100);
}

// ============================================================
// Boundary values
// ============================================================

#[test]
fn both_empty_scores_100() {
    assert_eq!(similarity_score("", ""), 100);
}

#[test]
fn one_empty_scores_0() {
    assert_eq!(similarity_score("", "hello"), 0);
    assert_eq!(similarity_score("hello", ""), 0);
}

#[test]
fn disjoint_texts_score_0() {
    assert_eq!(similarity_score("abc", "xyz"), 0);
}

#[test]
fn score_never_exceeds_100() {
    let long = "copy pasted bot comment ".repeat(50);
    let variant = format!("{long}.");
    let score = similarity_score(&long, &variant);
    assert!(score <= 100, "got {score}");
    assert!(score >= 99, "one char on a long text should barely register, got {score}");
}

// ============================================================
// Near-duplicate behavior
// ============================================================

#[test]
fn trailing_punctuation_stays_above_90() {
    // 8 matched chars over 17 total: round(100 * 16/17) = 94.
    assert_eq!(similarity_score("hi there", "hi there!"), 94);
}

#[test]
fn unrelated_sentences_stay_low() {
    let score = similarity_score(
        "this product changed my life, highly recommend",
        "terrible customer service, never buying again",
    );
    assert!(
        score < 85,
        "unrelated texts should stay well below the default threshold, got {score}"
    );
}

// ============================================================
// Unicode safety — chars, not bytes
// ============================================================

#[test]
fn emoji_difference_costs_one_char() {
    // 3 of 4 chars match: round(100 * 6/8) = 75. Byte-based comparison
    // would punish the 4-byte emoji far harder.
    assert_eq!(similarity_score("😀😀😀😀", "😀😀😀🙂"), 75);
}

#[test]
fn accented_text_does_not_panic() {
    let score = similarity_score("Très bon article, merci !", "Très bon article, merci!");
    assert!(score >= 95, "got {score}");
}
