// Page scraping — candidate post discovery and comment extraction.
//
// The site-coupled parts (selectors, scroll behavior) live in the
// facebook module behind the PostSource trait, so the detection core can
// be exercised against canned sources in tests.

pub mod facebook;
pub mod selftest;
pub mod traits;

pub use traits::{PostRef, PostSource};
