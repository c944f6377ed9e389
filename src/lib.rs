// Copycatch: coordinated bot-comment detection for public Facebook pages.
//
// This is the library root. Each module corresponds to one stage of an
// analysis run: scrape (rendered HTML in), detect (near-duplicate
// clustering), output (terminal + CSV out).

pub mod browserless;
pub mod config;
pub mod detect;
pub mod output;
pub mod pipeline;
pub mod scrape;
