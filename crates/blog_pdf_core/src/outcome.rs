use std::fmt;

/// Successful result of converting one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// A new PDF was rendered and written.
    Created { file_name: String },
    /// A PDF with the derived name was already present.
    SkippedExisting { file_name: String },
}

impl PostOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            PostOutcome::Created { file_name } | PostOutcome::SkippedExisting { file_name } => {
                file_name
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub url: String,
    pub message: String,
}

/// Running counts for one pipeline run plus the failures in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTally {
    pub created: usize,
    pub skipped_existing: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one post's result into the tally.
    pub fn record<E: fmt::Display>(mut self, url: &str, result: &Result<PostOutcome, E>) -> Self {
        match result {
            Ok(PostOutcome::Created { .. }) => self.created += 1,
            Ok(PostOutcome::SkippedExisting { .. }) => self.skipped_existing += 1,
            Err(err) => {
                self.failed += 1;
                self.failures.push(FailureRecord {
                    url: url.to_string(),
                    message: err.to_string(),
                });
            }
        }
        self
    }

    pub fn processed(&self) -> usize {
        self.created + self.skipped_existing + self.failed
    }
}
