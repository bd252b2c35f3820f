use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::FetchSettings;

pub const DEFAULT_BASE_URL: &str = "https://geohot.github.io/blog/";
pub const DEFAULT_OUTPUT_DIR: &str = "blogs";
pub const DEFAULT_POST_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Index page; also the prefix every post URL must share.
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Pause between consecutive posts.
    pub post_delay: Duration,
    pub fetch: FetchSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            post_delay: DEFAULT_POST_DELAY,
            fetch: FetchSettings::default(),
        }
    }
}

impl PipelineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }
}
