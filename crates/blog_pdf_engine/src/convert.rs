use std::path::PathBuf;
use std::sync::Arc;

use blog_pdf_core::{derive_base_name, PostOutcome};
use engine_logging::{engine_error, engine_info, engine_warn};

use crate::document::PostDocument;
use crate::persist::{OutputDir, PersistError};
use crate::render::{RenderError, Renderer};
use crate::{FetchError, Fetcher, PipelineEvent, ProgressSink};

pub const RENDERER_MISSING: &str = "renderer not installed";

/// Why producing the PDF itself failed.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to write PDF: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("renderer not installed")]
    RendererUnavailable,
    /// The raw page was saved under `backup` when that write succeeded.
    #[error("{source}")]
    Pdf {
        #[source]
        source: PdfError,
        backup: Option<PathBuf>,
    },
}

/// Converts one post URL into at most one artifact in the output directory.
pub struct PostConverter {
    fetcher: Arc<dyn Fetcher>,
    renderer: Option<Arc<dyn Renderer>>,
    output: OutputDir,
}

impl PostConverter {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        renderer: Option<Arc<dyn Renderer>>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            output: OutputDir::new(output_dir),
        }
    }

    pub async fn convert(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<PostOutcome, ConvertError> {
        let page = self.fetcher.fetch(url).await?;

        let document = PostDocument::parse(&page.text());
        let base_name = derive_base_name(&document.title_candidates(), url);
        let pdf_name = format!("{base_name}.pdf");

        if self.output.contains(&pdf_name) {
            engine_info!("already exists: {}", pdf_name);
            return Ok(PostOutcome::SkippedExisting {
                file_name: pdf_name,
            });
        }

        let Some(renderer) = self.renderer.as_ref() else {
            engine_warn!("cannot create {}: {}", pdf_name, RENDERER_MISSING);
            return Err(ConvertError::RendererUnavailable);
        };

        sink.emit(PipelineEvent::Rendering {
            file_name: pdf_name.clone(),
        });
        let print_html = document.into_print_html();

        match self.render_to(renderer.as_ref(), &print_html, url, &pdf_name).await {
            Ok(()) => {
                engine_info!("created {}", pdf_name);
                Ok(PostOutcome::Created {
                    file_name: pdf_name,
                })
            }
            Err(source) => {
                engine_error!("error creating {}: {}", pdf_name, source);
                sink.emit(PipelineEvent::PdfFailed {
                    file_name: pdf_name,
                    message: source.to_string(),
                });
                let backup = self.write_backup(&base_name, &page.bytes, sink);
                Err(ConvertError::Pdf { source, backup })
            }
        }
    }

    async fn render_to(
        &self,
        renderer: &dyn Renderer,
        html: &str,
        base_url: &str,
        pdf_name: &str,
    ) -> Result<(), PdfError> {
        let pdf = renderer.render(html, base_url).await?;
        self.output.write_atomic(pdf_name, &pdf)?;
        Ok(())
    }

    /// Best effort: keep the page exactly as fetched so nothing is lost when
    /// rendering fails.
    fn write_backup(
        &self,
        base_name: &str,
        raw: &[u8],
        sink: &dyn ProgressSink,
    ) -> Option<PathBuf> {
        let html_name = format!("{base_name}.html");
        match self.output.write_atomic(&html_name, raw) {
            Ok(path) => {
                engine_info!("saved HTML backup {}", html_name);
                sink.emit(PipelineEvent::BackupSaved {
                    file_name: html_name,
                });
                Some(path)
            }
            Err(err) => {
                engine_error!("failed to save HTML backup {}: {}", html_name, err);
                sink.emit(PipelineEvent::BackupFailed {
                    message: err.to_string(),
                });
                None
            }
        }
    }
}
