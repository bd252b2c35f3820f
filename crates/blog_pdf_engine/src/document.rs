use blog_pdf_core::TitleCandidates;
use ego_tree::NodeId;
use scraper::{Html, Selector};

/// Site chrome dropped before printing. Tag selectors first, then the class
/// denylist used by the default Jekyll (minima) theme.
const CHROME_SELECTORS: &[&str] = &[
    "header",
    "nav",
    ".site-header",
    ".site-nav",
    ".page-header",
    ".site-title",
    ".site-description",
    ".trigger",
    ".page-link",
    "footer",
];

/// Injected into `<head>` to keep the renderer from overlapping the title bar
/// with content and from splitting headings or code across pages.
pub const PRINT_STYLE: &str = "
        body { padding: 20px; }
        .post-content { position: relative; z-index: 1; }
        h1, h2, h3 { break-after: avoid; }
        pre, code { break-inside: avoid; }
    ";

/// A parsed post page, alive only while that post is processed.
pub struct PostDocument {
    html: Html,
}

impl PostDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn title_candidates(&self) -> TitleCandidates {
        TitleCandidates {
            h1: self.first_text("h1"),
            title: self.first_text("title"),
            h2: self.first_text("h2"),
            h3: self.first_text("h3"),
        }
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.html
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Strip navigation/header/footer chrome, add the print stylesheet and
    /// serialize the result for the renderer.
    pub fn into_print_html(mut self) -> String {
        self.remove_chrome();
        self.append_print_style();
        self.html.html()
    }

    fn remove_chrome(&mut self) {
        let doomed: Vec<NodeId> = CHROME_SELECTORS
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .flat_map(|sel| self.html.select(&sel).map(|el| el.id()).collect::<Vec<_>>())
            .collect();

        for id in doomed {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    /// Graft a `<style>` element, built by the parser from `PRINT_STYLE`, as the
    /// last child of `<head>`.
    fn append_print_style(&mut self) {
        let fragment = Html::parse_fragment(&format!("<style>{PRINT_STYLE}</style>"));
        let Some(style) = first_id(&fragment, "style").and_then(|id| fragment.tree.get(id)) else {
            return;
        };
        let Some(mut head) = first_id(&self.html, "head").and_then(|id| self.html.tree.get_mut(id))
        else {
            return;
        };

        let mut grafted = head.append(style.value().clone());
        for child in style.children() {
            grafted.append(child.value().clone());
        }
    }
}

fn first_id(html: &Html, selector: &str) -> Option<NodeId> {
    let sel = Selector::parse(selector).ok()?;
    html.select(&sel).next().map(|el| el.id())
}

#[cfg(test)]
mod tests {
    use super::{PostDocument, PRINT_STYLE};

    #[test]
    fn style_is_last_child_of_head() {
        let out = PostDocument::parse(
            "<html><head><title>t</title></head><body><p>x</p></body></html>",
        )
        .into_print_html();
        let style = out.find("<style>").unwrap();
        assert!(style > out.find("</title>").unwrap());
        assert!(style < out.find("</head>").unwrap());
        assert!(out.contains(PRINT_STYLE));
    }

    #[test]
    fn head_close_inside_script_text_does_not_capture_style() {
        let source = r#"<html><head><script>var marker = "</head>";</script><title>t</title></head><body><p>x</p></body></html>"#;
        let out = PostDocument::parse(source).into_print_html();

        assert!(out.contains(r#"<script>var marker = "</head>";</script>"#));
        let style = out.find("<style>").unwrap();
        assert!(style > out.find("</script>").unwrap());
        assert!(style > out.find("</title>").unwrap());
        assert_eq!(out.matches("<style>").count(), 1);
    }

    #[test]
    fn headless_fragment_gets_synthesized_head() {
        let out = PostDocument::parse("<p>x</p>").into_print_html();
        assert!(out.contains("<head><style>"));
    }
}
