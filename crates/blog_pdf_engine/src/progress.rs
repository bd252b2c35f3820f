use blog_pdf_core::{PostLink, PostOutcome};

/// Progress notifications emitted while a run is underway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    IndexFetching {
        url: String,
    },
    LinksDiscovered {
        links: Vec<PostLink>,
    },
    PostStarted {
        index: usize,
        total: usize,
        url: String,
    },
    /// PDF is about to be rendered under this name.
    Rendering {
        file_name: String,
    },
    /// Rendering or writing the PDF failed; a backup attempt follows.
    PdfFailed {
        file_name: String,
        message: String,
    },
    PostFinished {
        url: String,
        result: Result<PostOutcome, String>,
    },
    BackupSaved {
        file_name: String,
    },
    BackupFailed {
        message: String,
    },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn emit(&self, _event: PipelineEvent) {}
}
