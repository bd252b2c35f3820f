use std::sync::{Mutex, PoisonError};

use blog_pdf_core::{PostOutcome, RULE_WIDTH};
use blog_pdf_engine::{PipelineEvent, ProgressSink};

const SAMPLE_LINKS: usize = 3;

/// Prints pipeline progress to stdout, one block per event.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    lines: Mutex<ProgressLines>,
}

impl ProgressSink for ConsoleProgress {
    fn emit(&self, event: PipelineEvent) {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(text) = lines.describe(&event) {
            println!("{text}");
        }
    }
}

/// Turns events into console text. Remembers whether the current post's
/// failure was already printed so it is not repeated when the post finishes.
#[derive(Debug, Default)]
struct ProgressLines {
    failure_shown: bool,
}

impl ProgressLines {
    fn describe(&mut self, event: &PipelineEvent) -> Option<String> {
        let text = match event {
            PipelineEvent::IndexFetching { url } => format!("Fetching blog index from {url}"),
            PipelineEvent::LinksDiscovered { links } => {
                let mut lines = vec![format!("Found {} blog post links", links.len())];
                if !links.is_empty() {
                    lines.push("Sample links:".to_string());
                    lines.extend(
                        links
                            .iter()
                            .take(SAMPLE_LINKS)
                            .map(|link| format!("  - {link}")),
                    );
                    lines.push(format!("\nProcessing {} blog posts...", links.len()));
                    lines.push("-".repeat(RULE_WIDTH));
                }
                lines.join("\n")
            }
            PipelineEvent::PostStarted { index, total, url } => {
                self.failure_shown = false;
                format!("\n[{index}/{total}] Processing: {url}")
            }
            PipelineEvent::Rendering { file_name } => format!("  → Creating PDF: {file_name}"),
            PipelineEvent::PdfFailed { message, .. } => {
                self.failure_shown = true;
                format!("  ✗ Error creating PDF: {message}")
            }
            PipelineEvent::PostFinished { result, .. } => match result {
                Ok(PostOutcome::Created { file_name }) => format!("  ✓ Created: {file_name}"),
                Ok(PostOutcome::SkippedExisting { file_name }) => {
                    format!("  ✓ Already exists: {file_name}")
                }
                Err(_) if self.failure_shown => return None,
                Err(message) => format!("  ✗ Error: {message}"),
            },
            PipelineEvent::BackupSaved { file_name } => {
                format!("  → Saved HTML backup: {file_name}")
            }
            PipelineEvent::BackupFailed { message } => {
                format!("  ✗ Failed to save HTML backup: {message}")
            }
        };
        Some(text)
    }
}
