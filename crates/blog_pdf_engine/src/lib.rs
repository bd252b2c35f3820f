//! Blog PDF engine: fetching, markup cleanup, rendering and the batch pipeline.
mod config;
mod convert;
mod decode;
mod discovery;
mod document;
mod fetch;
mod persist;
mod pipeline;
mod progress;
mod render;

pub use config::{PipelineConfig, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_POST_DELAY};
pub use convert::{ConvertError, PdfError, PostConverter, RENDERER_MISSING};
pub use discovery::{anchor_targets, discover_posts, DiscoveryError};
pub use document::{PostDocument, PRINT_STYLE};
pub use fetch::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchSettings, Fetcher, ReqwestFetcher,
    HTML_MEDIA_TYPES,
};
pub use persist::{OutputDir, PersistError};
pub use pipeline::{Pipeline, PipelineError, RunReport};
pub use progress::{PipelineEvent, ProgressSink, SilentSink};
pub use render::{RenderError, Renderer, WeasyPrintRenderer, DEFAULT_RENDERER_PROGRAM};
