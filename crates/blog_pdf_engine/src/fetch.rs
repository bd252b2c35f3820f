use std::fmt;
use std::time::Duration;

use engine_logging::{engine_debug, engine_trace, engine_warn};
use futures_util::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect, Client, Response};

/// Media types a blog page is expected to be served as. Anything else is
/// logged and still parsed.
pub const HTML_MEDIA_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole-request budget, body included.
    pub request_timeout: Duration,
    pub max_redirects: usize,
    pub max_body_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_redirects: 5,
            max_body_bytes: 5 << 20,
            user_agent: concat!("blog_pdf/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A page body as received, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub requested_url: String,
    /// Where the body actually came from, after redirects.
    pub resolved_url: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_redirect() {
            FailureKind::TooManyRedirects
        } else if err.is_builder() {
            FailureKind::InvalidUrl
        } else {
            FailureKind::Network
        };
        Self::new(kind, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Status(u16),
    Timeout,
    TooManyRedirects,
    /// `received` is the declared length, or the running total when the
    /// stream crossed the limit.
    TooLarge { limit: u64, received: u64 },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => f.write_str("invalid url"),
            FailureKind::Status(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => f.write_str("timed out"),
            FailureKind::TooManyRedirects => f.write_str("too many redirects"),
            FailureKind::TooLarge { limit, received } => {
                write!(f, "body of {received} bytes exceeds {limit}")
            }
            FailureKind::Network => f.write_str("network error"),
        }
    }
}

/// Plain GET of one page. Used for both the index and every post.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// `Fetcher` over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    fn over_limit(&self, received: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                limit: self.max_body_bytes,
                received,
            },
            "page too large",
        )
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        if let Some(declared) = response.content_length() {
            if declared > self.max_body_bytes {
                return Err(self.over_limit(declared));
            }
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            let received = (body.len() + chunk.len()) as u64;
            if received > self.max_body_bytes {
                return Err(self.over_limit(received));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        engine_debug!("GET {}", target);
        let response = self
            .client
            .get(target)
            .header(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::Status(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if let Some(declared) = content_type.as_deref() {
            if !is_html_media_type(declared) {
                engine_warn!("{} is served as {}, parsing it as html anyway", url, declared);
            }
        }

        let resolved_url = response.url().to_string();
        let bytes = self.read_body(response).await?;
        engine_trace!("{} bytes from {}", bytes.len(), resolved_url);

        Ok(FetchOutput {
            bytes,
            metadata: FetchMetadata {
                requested_url: url.to_owned(),
                resolved_url,
                content_type,
            },
        })
    }
}

/// Compares the media type essence only; parameters such as `charset` are ignored.
fn is_html_media_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    HTML_MEDIA_TYPES
        .iter()
        .any(|html| html.eq_ignore_ascii_case(essence))
}

#[cfg(test)]
mod tests {
    use super::is_html_media_type;

    #[test]
    fn media_type_ignores_parameters_and_case() {
        assert!(is_html_media_type("Text/HTML; charset=utf-8"));
        assert!(is_html_media_type("application/xhtml+xml"));
        assert!(!is_html_media_type("application/json"));
        assert!(!is_html_media_type(""));
    }
}
