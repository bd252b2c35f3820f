mod support;

use blog_pdf_core::PostLink;
use blog_pdf_engine::{anchor_targets, discover_posts, DiscoveryError, FailureKind};
use pretty_assertions::assert_eq;
use wiremock::MockServer;

#[test]
fn anchor_targets_keep_document_order_and_raw_values() {
    let targets = anchor_targets(
        r##"<a href="#x">x</a><a>no href</a><a href="/blog/p1.html">1</a><a href="">e</a>"##,
    );
    assert_eq!(targets, vec!["#x", "/blog/p1.html", ""]);
}

#[tokio::test]
async fn index_links_are_filtered_deduplicated_and_sorted() {
    let server = MockServer::start().await;
    let index = support::index_html(&[
        "/blog/jekyll/update/2024/03/07/zeta.html",
        "/blog/jekyll/update/2020/01/01/alpha.html",
        "/blog/jekyll/update/2024/03/07/zeta.html",
        "/blog/notes.txt",
        "/other/outside.html",
    ]);
    support::mount_html(&server, "/blog/", index).await;

    let base = format!("{}/blog/", server.uri());
    let links = discover_posts(&support::fetcher(), &base)
        .await
        .expect("discovery ok");

    let urls: Vec<String> = links.into_iter().map(PostLink::into_string).collect();
    assert_eq!(
        urls,
        vec![
            format!("{base}jekyll/update/2020/01/01/alpha.html"),
            format!("{base}jekyll/update/2024/03/07/zeta.html"),
        ]
    );
}

#[tokio::test]
async fn index_fetch_failure_is_reported_with_cause() {
    let server = MockServer::start().await;
    support::mount_status(&server, "/blog/", 503).await;

    let base = format!("{}/blog/", server.uri());
    let err = discover_posts(&support::fetcher(), &base)
        .await
        .unwrap_err();

    match err {
        DiscoveryError::Fetch { url, source } => {
            assert_eq!(url, base);
            assert_eq!(source.kind, FailureKind::Status(503));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_base_url_is_rejected_before_fetching() {
    let err = discover_posts(&support::fetcher(), "::not a url::")
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidBaseUrl { .. }));
}
