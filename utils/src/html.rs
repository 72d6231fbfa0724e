//! Console text for HTML screen outs.

use std::sync::LazyLock;
use regex_lite::Regex;

/// The element holding the card body in Assistant screen outs.
pub const CARD_CONTENT_ID: &str = "assistant-card-content";

static CARD_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    // exact attribute value, so `data-id=` and `id="...-footer"` do not match
    Regex::new(concat!(
        r#"(?is)<div\b[^>]*\sid\s*=\s*"#,
        r#"(?:(?:"assistant-card-content"|'assistant-card-content'"#,
        r#"|assistant-card-content[\s/])[^>]*>"#,
        r#"|assistant-card-content>)"#,
    ))
    .expect("CARD_OPEN_RE should compile")
});
static DIV_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(/?)div\b[^>]*>").expect("DIV_TAG_RE should compile"));
static INVISIBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->")
        .expect("INVISIBLE_RE should compile")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("TAG_RE should compile"));

/// Text of the card region if the page has one, else of the whole page.
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with
/// newlines. Markup the extractor cannot make sense of falls back to the
/// whole-page text rather than failing.
pub fn card_text(html: &[u8]) -> String {
    let html = String::from_utf8_lossy(html);
    let source = card_region(&html).unwrap_or(&html);
    visible_text(source)
}

/// Inner HTML of `div#assistant-card-content`, nested divs included.
pub fn card_region(html: &str) -> Option<&str> {
    let open = CARD_OPEN_RE.find(html)?;
    let mut depth = 1usize;
    for tag in DIV_TAG_RE.captures_iter(&html[open.end()..]) {
        let closing = tag.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        let whole = tag.get(0)?;
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(&html[open.end()..open.end() + whole.start()]);
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    tracing::debug!("unterminated {} region, using the whole page", CARD_CONTENT_ID);
    None
}

/// Visible text of an HTML fragment, one text node per line.
pub fn visible_text(html: &str) -> String {
    let html = INVISIBLE_RE.replace_all(html, "");
    TAG_RE
        .split(&html)
        .map(|text| html_escape::decode_html_entities(text.trim()))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
