use std::collections::BTreeSet;
use std::fmt;

use url::Url;

/// Only targets with this suffix are treated as posts.
pub const POST_SUFFIX: &str = ".html";

/// Absolute URL of a single blog post.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostLink(String);

impl PostLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PostLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Raw anchor targets that can never be a post on the index's own site:
/// empty, fragment-only, already absolute, or the site root.
pub fn is_candidate_href(href: &str) -> bool {
    !(href.is_empty() || href.starts_with('#') || href.starts_with("http") || href == "/")
}

/// Resolve anchor targets against `base` and keep the ones that look like posts
/// under it. Result is deduplicated and sorted by string order.
pub fn select_post_links<'a, I>(base: &Url, hrefs: I) -> Vec<PostLink>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = base.as_str();
    let unique: BTreeSet<String> = hrefs
        .into_iter()
        .filter(|href| is_candidate_href(href))
        .filter_map(|href| base.join(href).ok())
        .map(String::from)
        .filter(|full| full.starts_with(prefix) && full != prefix && full.ends_with(POST_SUFFIX))
        .collect();

    unique.into_iter().map(PostLink).collect()
}
