use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Title used when a page has no heading or `<title>` at all.
pub const UNTITLED: &str = "untitled";
/// Name used when neither the title nor the URL path yields anything usable.
pub const FALLBACK_NAME: &str = "blog_post";
pub const MAX_TITLE_CHARS: usize = 200;

static DATE_SEGMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/(\d{4})/(\d{2})/(\d{2})/").ok());

/// Text of the first element of each kind a post title may come from.
/// `None` means the element is absent; `Some("")` means present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleCandidates {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub h2: Option<String>,
    pub h3: Option<String>,
}

impl TitleCandidates {
    /// First present candidate in priority order `h1`, `title`, `h2`, `h3`.
    pub fn pick(&self) -> &str {
        [&self.h1, &self.title, &self.h2, &self.h3]
            .into_iter()
            .find_map(|candidate| candidate.as_deref())
            .unwrap_or(UNTITLED)
    }
}

/// Strip path-hostile characters, turn spaces into underscores and cap the length.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !is_forbidden(*c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_TITLE_CHARS)
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
}

/// `YYYY-MM-DD` from the first `/YYYY/MM/DD/` segment of a Jekyll-style URL.
pub fn date_prefix(url: &str) -> Option<String> {
    let re = DATE_SEGMENT.as_ref()?;
    let caps = re.captures(url)?;
    Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// Base filename (no extension) for a post: `[YYYY-MM-DD_]<sanitized title>`.
pub fn derive_base_name(candidates: &TitleCandidates, url: &str) -> String {
    let mut name = sanitize_title(candidates.pick());
    if name.trim().is_empty() {
        name = name_from_url_path(url);
    }
    match date_prefix(url) {
        Some(date) => format!("{date}_{name}"),
        None => name,
    }
}

fn name_from_url_path(url: &str) -> String {
    let from_path = Url::parse(url)
        .map(|parsed| parsed.path().replace('/', "_"))
        .unwrap_or_default();
    let trimmed = from_path.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
