//! Shared HTML document helpers
//!
//! Both the page parser and the Markdown converter work on parsed documents:
//! they strip unwanted elements, read text, and read attributes. The helpers
//! here keep that handling in one place. All of them are tolerant: invalid
//! selectors are skipped rather than reported, and a missing element yields
//! an empty result.

use scraper::{Html, Selector};

/// Removes every element matching any of the given CSS selectors
///
/// Selectors that fail to parse are ignored. Detaching a parent also detaches
/// its children, so overlapping selectors are harmless.
pub fn strip_elements(document: &mut Html, selectors: &[String]) {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
            for id in ids {
                if let Some(mut node) = document.tree.get_mut(id) {
                    node.detach();
                }
            }
        }
    }
}

/// Trimmed text of the first element matching `selector`
///
/// Returns `None` when the selector is invalid, no element matches, or the
/// matched element contains only whitespace.
pub fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Trimmed value of `attr` on the first element matching `selector`
pub fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let value = element.value().attr(attr)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Trimmed text of the document body
///
/// The HTML5 parser always supplies a body for documents, including bodies
/// synthesized around plain-text input, so this is empty only when the page
/// genuinely has no visible text.
pub fn body_text(document: &Html) -> String {
    let selector = match Selector::parse("body") {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };
    document
        .select(&selector)
        .next()
        .map(|body| body.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Serialized HTML of the document body, falling back to the document root
pub fn body_html(document: &Html) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    match body {
        Some(body) => body.html(),
        None => document.root_element().html(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    fn selectors(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strip_elements_removes_matches() {
        let mut document = doc("<body><script>x()</script><p>keep</p></body>");
        strip_elements(&mut document, &selectors(&["script"]));
        assert_eq!(body_text(&document), "keep");
    }

    #[test]
    fn test_strip_elements_removes_nested_content() {
        let mut document = doc("<body><nav><a href=\"/\">home</a></nav><p>keep</p></body>");
        strip_elements(&mut document, &selectors(&["nav"]));
        assert_eq!(body_text(&document), "keep");
    }

    #[test]
    fn test_strip_elements_ignores_invalid_selector() {
        let mut document = doc("<body><p>keep</p></body>");
        strip_elements(&mut document, &selectors(&["p:::bad", "em"]));
        assert_eq!(body_text(&document), "keep");
    }

    #[test]
    fn test_first_text_trims() {
        let document = doc("<head><title>  Hello  </title></head>");
        assert_eq!(first_text(&document, "title").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_first_text_empty_element_is_none() {
        let document = doc("<head><title>   </title></head>");
        assert_eq!(first_text(&document, "title"), None);
    }

    #[test]
    fn test_first_attr_reads_content() {
        let document = doc(r#"<head><meta name="description" content="About us"></head>"#);
        assert_eq!(
            first_attr(&document, r#"meta[name="description"]"#, "content").as_deref(),
            Some("About us")
        );
    }

    #[test]
    fn test_first_attr_missing_is_none() {
        let document = doc("<body><p>text</p></body>");
        assert_eq!(first_attr(&document, "meta", "content"), None);
    }

    #[test]
    fn test_body_text_of_plain_text_document() {
        let document = doc("not html");
        assert_eq!(body_text(&document), "not html");
    }

    #[test]
    fn test_body_html_wraps_content() {
        let document = doc("<body><p>hi</p></body>");
        let html = body_html(&document);
        assert!(html.starts_with("<body>"));
        assert!(html.contains("<p>hi</p>"));
    }
}
