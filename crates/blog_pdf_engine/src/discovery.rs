use blog_pdf_core::{select_post_links, PostLink};
use engine_logging::{engine_debug, engine_info};
use scraper::{Html, Selector};
use url::Url;

use crate::{FetchError, Fetcher};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid index url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to fetch blog index {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Fetch the index page and return the sorted, unique post URLs it links to.
pub async fn discover_posts(
    fetcher: &dyn Fetcher,
    base_url: &str,
) -> Result<Vec<PostLink>, DiscoveryError> {
    let base = Url::parse(base_url).map_err(|source| DiscoveryError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    engine_info!("fetching blog index {}", base);
    let page = fetcher
        .fetch(base.as_str())
        .await
        .map_err(|source| DiscoveryError::Fetch {
            url: base_url.to_string(),
            source,
        })?;

    let targets = anchor_targets(&page.text());
    engine_debug!("index has {} anchor targets", targets.len());

    let links = select_post_links(&base, targets.iter().map(String::as_str));
    engine_info!("found {} blog post links", links.len());
    Ok(links)
}

/// Every `href` value on an anchor, in document order, untrimmed.
pub fn anchor_targets(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}
