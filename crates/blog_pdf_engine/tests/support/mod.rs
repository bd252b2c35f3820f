#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use blog_pdf_engine::{
    FetchSettings, PipelineEvent, ProgressSink, RenderError, Renderer, ReqwestFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FAKE_PDF: &[u8] = b"%PDF-1.7 fake";

pub fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings::default()).expect("http client")
}

/// Renderer double: records every call and either returns `FAKE_PDF` or fails.
#[derive(Default)]
pub struct FakeRenderer {
    fail_with: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeRenderer {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn injected(renderer: &Arc<FakeRenderer>) -> Option<Arc<dyn Renderer>> {
    Some(renderer.clone())
}

#[async_trait::async_trait]
impl Renderer for FakeRenderer {
    async fn render(&self, html: &str, base_url: &str) -> Result<Vec<u8>, RenderError> {
        self.calls
            .lock()
            .unwrap()
            .push((html.to_string(), base_url.to_string()));
        match &self.fail_with {
            Some(message) => Err(RenderError::Spawn {
                program: "fake".to_string(),
                source: io::Error::new(io::ErrorKind::Other, message.clone()),
            }),
            None => Ok(FAKE_PDF.to_vec()),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn post_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{title} | blog</title></head>
<body>
<header class="site-header"><a class="site-title" href="/blog/">blog</a>
<nav class="site-nav"><a class="page-link" href="/blog/about.html">About</a></nav></header>
<main><article class="post"><h1 class="post-title">{title}</h1>
<div class="post-content"><p>Body of {title}.</p><pre><code>let x = 1;</code></pre></div>
</article></main>
<footer class="site-footer">footer text</footer>
</body></html>"#
    )
}

pub async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Index page linking to `posts` (paths relative to the server root), plus
/// the usual navigation noise.
pub fn index_html(posts: &[&str]) -> String {
    let mut body = String::from(
        r##"<html><head><title>blog</title></head><body>
<a href="/">home</a><a href="#top">top</a><a href="https://github.com/x">gh</a>
<a href="/blog/feed.xml">feed</a>"##,
    );
    for post in posts {
        body.push_str(&format!(r#"<li><a class="post-link" href="{post}">{post}</a></li>"#));
    }
    body.push_str("</body></html>");
    body
}
