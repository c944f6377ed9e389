// Debug probe injection — synthetic duplicates for end-to-end self-test.
//
// With --debug, two fabricated accounts "repost" the first collected
// comment: one verbatim, one with a trailing period. A working pipeline
// must flag both. This is a test aid only — the sole caller is the
// --debug path, and the probe authors are named so they can't be
// mistaken for real accounts in the output.

use tracing::info;

use crate::detect::Comment;

/// Display names used for injected probe comments.
pub const PROBE_AUTHORS: [&str; 2] = ["copycatch_probe_1", "copycatch_probe_2"];

/// Append two near-duplicate probe comments based on the first collected
/// comment. Does nothing when no comments were collected.
pub fn inject_probe_comments(comments: &mut Vec<Comment>) {
    let Some(first) = comments.first().cloned() else {
        return;
    };

    info!("Debug mode: injecting synthetic duplicate probes");
    comments.push(Comment::new(first.text.clone(), PROBE_AUTHORS[0]));
    comments.push(Comment::new(format!("{}.", first.text), PROBE_AUTHORS[1]));
}
