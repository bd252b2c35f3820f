//! Blog PDF core: pure link selection, naming and tally logic (no I/O).
mod filename;
mod links;
mod outcome;
mod summary;

pub use filename::{
    date_prefix, derive_base_name, sanitize_title, TitleCandidates, FALLBACK_NAME,
    MAX_TITLE_CHARS, UNTITLED,
};
pub use links::{is_candidate_href, select_post_links, PostLink, POST_SUFFIX};
pub use outcome::{FailureRecord, PostOutcome, RunTally};
pub use summary::{render_summary, MAX_LISTED_FAILURES, MAX_ERROR_CHARS, RULE_WIDTH};
