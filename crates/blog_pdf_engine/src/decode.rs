use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use engine_logging::engine_warn;

use crate::FetchOutput;

impl FetchOutput {
    /// Body as text. Malformed sequences become U+FFFD rather than failing the
    /// page, matching what browsers do.
    pub fn text(&self) -> String {
        let content_type = self.metadata.content_type.as_deref();
        let encoding = pick_encoding(&self.bytes, content_type);
        let (text, _, had_errors) = encoding.decode(&self.bytes);
        if had_errors {
            engine_warn!(
                "lossy {} decode of {}",
                encoding.name(),
                self.metadata.resolved_url
            );
        }
        text.into_owned()
    }
}

/// BOM first, then the Content-Type charset, then byte sniffing.
pub(crate) fn pick_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]))
    })
}
