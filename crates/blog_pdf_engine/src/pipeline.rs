use std::path::PathBuf;
use std::sync::Arc;

use blog_pdf_core::{PostLink, RunTally};
use engine_logging::{engine_info, engine_warn};
use futures_util::stream::{self, StreamExt};

use crate::config::PipelineConfig;
use crate::convert::PostConverter;
use crate::discovery::{discover_posts, DiscoveryError};
use crate::fetch::{FetchError, Fetcher, ReqwestFetcher};
use crate::persist::{OutputDir, PersistError};
use crate::render::Renderer;
use crate::{PipelineEvent, ProgressSink};

/// Errors that abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot prepare output directory {path:?}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub links: Vec<PostLink>,
    pub tally: RunTally,
    /// PDFs present in the output directory after the run, from any run.
    pub pdfs_in_output: usize,
}

/// Discovery once, then one conversion per post, in order.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn Fetcher>,
    converter: PostConverter,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        fetcher: Arc<dyn Fetcher>,
        renderer: Option<Arc<dyn Renderer>>,
    ) -> Self {
        let converter = PostConverter::new(fetcher.clone(), renderer, config.output_dir.clone());
        Self {
            config,
            fetcher,
            converter,
        }
    }

    /// Pipeline over HTTP with the fetch settings from `config`.
    pub fn with_http(
        config: PipelineConfig,
        renderer: Option<Arc<dyn Renderer>>,
    ) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone())?);
        Ok(Self::new(config, fetcher, renderer))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run(&self, sink: &dyn ProgressSink) -> Result<RunReport, PipelineError> {
        let output = OutputDir::new(self.config.output_dir.clone());
        output.prepare().map_err(|source| PipelineError::OutputDir {
            path: output.root().to_path_buf(),
            source,
        })?;

        sink.emit(PipelineEvent::IndexFetching {
            url: self.config.base_url.clone(),
        });
        let links = discover_posts(self.fetcher.as_ref(), &self.config.base_url).await?;
        sink.emit(PipelineEvent::LinksDiscovered {
            links: links.clone(),
        });

        let tally = self.convert_all(&links, sink).await;
        engine_info!(
            "run finished: created={} skipped={} failed={}",
            tally.created,
            tally.skipped_existing,
            tally.failed
        );

        let pdfs_in_output = output.count_with_extension("pdf").unwrap_or_else(|err| {
            engine_warn!("cannot count PDFs: {}", err);
            0
        });

        Ok(RunReport {
            links,
            tally,
            pdfs_in_output,
        })
    }

    /// Fold every post into the tally. A failing post is recorded and the
    /// fold moves on to the next one.
    async fn convert_all(&self, links: &[PostLink], sink: &dyn ProgressSink) -> RunTally {
        let total = links.len();
        let delay = self.config.post_delay;

        stream::iter(links.iter().enumerate())
            .fold(RunTally::new(), |tally, (index, link)| async move {
                if index > 0 && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                sink.emit(PipelineEvent::PostStarted {
                    index: index + 1,
                    total,
                    url: link.to_string(),
                });

                let result = self.converter.convert(link.as_str(), sink).await;
                if let Err(err) = &result {
                    engine_warn!("post {} failed: {}", link, err);
                }
                let tally = tally.record(link.as_str(), &result);

                sink.emit(PipelineEvent::PostFinished {
                    url: link.to_string(),
                    result: result.map_err(|err| err.to_string()),
                });
                tally
            })
            .await
    }
}
