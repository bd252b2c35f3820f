use std::fmt::Write;

use crate::outcome::RunTally;

pub const RULE_WIDTH: usize = 60;
pub const MAX_LISTED_FAILURES: usize = 10;
pub const MAX_ERROR_CHARS: usize = 80;

/// Human-readable end-of-run report. `pdfs_in_dir` is counted by the caller
/// because it reflects the output directory, not just this run.
pub fn render_summary(tally: &RunTally, pdfs_in_dir: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  New PDFs created: {}", tally.created);
    let _ = writeln!(out, "  Already existing: {}", tally.skipped_existing);
    if tally.failed > 0 {
        let _ = writeln!(out, "  Errors: {}", tally.failed);
    }
    let _ = writeln!(out, "  Total PDFs in directory: {pdfs_in_dir}");

    if !tally.failures.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Failed conversions ({}):", tally.failures.len());
        for failure in tally.failures.iter().take(MAX_LISTED_FAILURES) {
            let _ = writeln!(out, "    - {}", failure.url);
            let _ = writeln!(out, "      Error: {}", truncate_message(&failure.message));
        }
        if tally.failures.len() > MAX_LISTED_FAILURES {
            let _ = writeln!(
                out,
                "    ... and {} more",
                tally.failures.len() - MAX_LISTED_FAILURES
            );
        }
    }

    let _ = writeln!(out, "{rule}");
    out
}

fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_ERROR_CHARS {
        return message.to_string();
    }
    let cut: String = message.chars().take(MAX_ERROR_CHARS).collect();
    format!("{cut}...")
}
