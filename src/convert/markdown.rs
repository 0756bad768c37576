//! Markdown document generation
//!
//! Turns a crawled page into a Markdown document with YAML frontmatter.
//! The page content is re-parsed as markup, stripped of boilerplate
//! elements, converted, and cleaned line by line. Plain-text content
//! parses to a bare body and comes out as flat paragraphs.

use crate::crawler::CrawlResult;
use crate::markup;
use regex::Regex;
use scraper::{Html, Selector};

/// Elements stripped from every document before conversion
const BASE_REMOVE_SELECTORS: &[&str] = &[
    "nav", "header", "footer", "aside", "menu", "script", "style", "iframe", "noscript", "form",
    "button", "input",
];

/// Meta selectors probed for a page description, in priority order
const DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[name="description"]"#,
    r#"meta[property="og:description"]"#,
    r#"meta[property="twitter:description"]"#,
    r#"meta[itemprop="description"]"#,
];

/// Longest description taken from paragraph text, in characters
const DESCRIPTION_LIMIT: usize = 300;

/// Characters that make a line or container worthless on their own
const MEANINGLESS_PUNCTUATION: &str = ".,/#!$%^&*;:{}=-_`~()";

/// Cleanup passes applied to the converted Markdown, in order
const CLEANUP_PASSES: &[(&str, &str)] = &[
    // Unwrap links whose target is empty or a bare fragment
    (r"\[([^\]]*)\]\((?:#[^)]*)?\)", "$1"),
    // Collapse runs of blank lines
    (r"\n{3,}", "\n\n"),
    // Strip trailing whitespace per line
    (r"(?m)[ \t]+$", ""),
    // Normalize bullet markers
    (r"(?m)^[-*][ \t]+", "- "),
    // Collapse runs of spaces and tabs
    (r"[ \t]+", " "),
    // Drop lines holding a bare number
    (r"(?m)^[0-9]+$", ""),
    // Drop lines holding only punctuation
    (r"(?m)^[.,/#!$%^&*;:{}=\-_`~()]+$", ""),
    // Re-collapse blank lines opened by the dropped ones
    (r"\n{3,}", "\n\n"),
];

/// Options controlling document conversion
///
/// The built-in removal list is always applied. The keep flags retain
/// element families that are stripped by default, and `remove_elements`
/// appends caller-supplied CSS selectors to the removal list.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Keep `img` elements (converted to Markdown image syntax)
    pub keep_images: bool,

    /// Keep `table` elements
    pub keep_tables: bool,

    /// Keep `pre` and `code` elements
    pub keep_code_blocks: bool,

    /// Extra CSS selectors to strip before conversion
    pub remove_elements: Vec<String>,
}

/// Converts crawl results into Markdown documents
///
/// # Examples
///
/// ```
/// use sitescribe::{ConvertOptions, MarkdownConverter};
/// use sitescribe::crawler::CrawlResult;
///
/// let converter = MarkdownConverter::new(ConvertOptions::default());
/// let result = CrawlResult {
///     url: "https://example.com/guide".to_string(),
///     title: "Guide".to_string(),
///     content: "<h1>Guide</h1><p>Welcome.</p>".to_string(),
///     links: Vec::new(),
///     depth: 0,
///     error: None,
/// };
/// let markdown = converter.convert(&result);
/// assert!(markdown.starts_with("---\ntitle: \"Guide\""));
/// ```
pub struct MarkdownConverter {
    remove_selectors: Vec<String>,
}

impl MarkdownConverter {
    /// Creates a converter with the removal list implied by `options`
    pub fn new(options: ConvertOptions) -> Self {
        let mut remove_selectors: Vec<String> = BASE_REMOVE_SELECTORS
            .iter()
            .map(|s| s.to_string())
            .collect();
        if !options.keep_images {
            remove_selectors.push("img".to_string());
        }
        if !options.keep_tables {
            remove_selectors.push("table".to_string());
        }
        if !options.keep_code_blocks {
            remove_selectors.push("pre".to_string());
            remove_selectors.push("code".to_string());
        }
        remove_selectors.extend(options.remove_elements);

        Self { remove_selectors }
    }

    /// Renders one crawl result as a Markdown document
    ///
    /// The output always carries `title` and `url` frontmatter fields; a
    /// `description` field appears only when one could be extracted from
    /// the page. Callers are expected to skip results with `error` set,
    /// but converting one is harmless (empty content yields an empty body).
    pub fn convert(&self, result: &CrawlResult) -> String {
        let mut document = Html::parse_document(&result.content);
        markup::strip_elements(&mut document, &self.remove_selectors);
        prune_meaningless_containers(&mut document);

        let description = extract_description(&document);
        let markdown = htmd::convert(&markup::body_html(&document)).unwrap_or_default();
        let body = cleanup_markdown(&markdown);

        let mut output = String::from("---\n");
        output.push_str(&format!("title: \"{}\"\n", escape_quotes(&result.title)));
        output.push_str(&format!("url: \"{}\"\n", result.url));
        if let Some(description) = &description {
            output.push_str(&format!(
                "description: \"{}\"\n",
                escape_quotes(description)
            ));
        }
        output.push_str("---\n\n");
        output.push_str(&body);

        output
    }
}

/// Removes `span` and `div` elements whose text carries no meaning
fn prune_meaningless_containers(document: &mut Html) {
    let selector = match Selector::parse("span, div") {
        Ok(selector) => selector,
        Err(_) => return,
    };
    let ids: Vec<_> = document
        .select(&selector)
        .filter(|el| is_meaningless(&el.text().collect::<String>()))
        .map(|el| el.id())
        .collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Whitespace, a bare number, a single non-letter, or punctuation only
fn is_meaningless(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || is_bare_number(text) {
        return true;
    }

    let mut chars = text.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if !only.is_ascii_alphabetic() {
            return true;
        }
    }

    text.chars().all(|c| MEANINGLESS_PUNCTUATION.contains(c))
}

/// Digits with at most one decimal point, like `42` or `3.14`
fn is_bare_number(text: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match text.split_once('.') {
        Some((whole, frac)) => all_digits(whole) && all_digits(frac),
        None => all_digits(text),
    }
}

/// Description from meta tags, falling back to the first paragraph
fn extract_description(document: &Html) -> Option<String> {
    for selector in DESCRIPTION_SELECTORS {
        if let Some(content) = markup::first_attr(document, selector, "content") {
            return Some(content);
        }
    }
    markup::first_text(document, "p").map(|text| truncate_chars(&text, DESCRIPTION_LIMIT))
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Applies the cleanup passes and trims the result
fn cleanup_markdown(markdown: &str) -> String {
    let mut cleaned = markdown.to_string();
    for (pattern, replacement) in CLEANUP_PASSES {
        if let Ok(re) = Regex::new(pattern) {
            cleaned = re.replace_all(&cleaned, *replacement).to_string();
        }
    }
    cleaned.trim().to_string()
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(title: &str, content: &str) -> CrawlResult {
        CrawlResult {
            url: "https://example.com/docs".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            links: Vec::new(),
            depth: 0,
            error: None,
        }
    }

    fn convert_default(content: &str) -> String {
        MarkdownConverter::new(ConvertOptions::default()).convert(&result_with("Guide", content))
    }

    #[test]
    fn test_frontmatter_has_title_and_url() {
        let output = convert_default("<p>Welcome to the guide.</p>");

        assert!(output.starts_with("---\n"));
        assert!(output.contains("title: \"Guide\""));
        assert!(output.contains("url: \"https://example.com/docs\""));
        assert!(output.contains("Welcome to the guide."));
    }

    #[test]
    fn test_frontmatter_escapes_quotes_in_title() {
        let converter = MarkdownConverter::new(ConvertOptions::default());
        let output = converter.convert(&result_with("Say \"hi\"", "<p>body</p>"));

        assert!(output.contains("title: \"Say \\\"hi\\\"\""));
    }

    #[test]
    fn test_description_from_meta_tag() {
        let output = convert_default(
            "<head><meta name=\"description\" content=\"A fine page\"></head><body><p>x y z</p></body>",
        );

        assert!(output.contains("description: \"A fine page\""));
    }

    #[test]
    fn test_description_prefers_meta_over_paragraph() {
        let output = convert_default(
            "<head><meta property=\"og:description\" content=\"From meta\"></head>\
             <body><p>From paragraph</p></body>",
        );

        assert!(output.contains("description: \"From meta\""));
        assert!(!output.contains("description: \"From paragraph\""));
    }

    #[test]
    fn test_description_falls_back_to_first_paragraph() {
        let output = convert_default("<p>First paragraph text.</p><p>Second.</p>");

        assert!(output.contains("description: \"First paragraph text.\""));
    }

    #[test]
    fn test_description_from_paragraph_is_truncated() {
        let long = "a".repeat(400);
        let output = convert_default(&format!("<p>{}</p>", long));

        let line = output
            .lines()
            .find(|line| line.starts_with("description:"))
            .unwrap();
        assert_eq!(line.len(), "description: \"\"".len() + DESCRIPTION_LIMIT);
    }

    #[test]
    fn test_description_absent_for_plain_text() {
        let output = convert_default("not html");

        assert!(!output.contains("description:"));
        assert!(output.trim_end().ends_with("not html"));
    }

    #[test]
    fn test_navigation_elements_are_removed() {
        let output = convert_default("<nav>Site Menu</nav><p>Body text</p>");

        assert!(!output.contains("Site Menu"));
        assert!(output.contains("Body text"));
    }

    #[test]
    fn test_images_removed_by_default() {
        let output = convert_default("<p>intro</p><img src=\"/x.png\" alt=\"diagram\">");

        assert!(!output.contains("diagram"));
    }

    #[test]
    fn test_keep_images_preserves_images() {
        let options = ConvertOptions {
            keep_images: true,
            ..ConvertOptions::default()
        };
        let converter = MarkdownConverter::new(options);
        let output = converter.convert(&result_with(
            "Guide",
            "<p>intro</p><img src=\"/x.png\" alt=\"diagram\">",
        ));

        assert!(output.contains("diagram"));
    }

    #[test]
    fn test_code_blocks_removed_by_default() {
        let output = convert_default("<p>intro</p><pre><code>let x = 1;</code></pre>");

        assert!(!output.contains("let x = 1;"));
    }

    #[test]
    fn test_keep_code_blocks_preserves_code() {
        let options = ConvertOptions {
            keep_code_blocks: true,
            ..ConvertOptions::default()
        };
        let converter = MarkdownConverter::new(options);
        let output = converter.convert(&result_with(
            "Guide",
            "<p>intro</p><pre><code>let x = 1;</code></pre>",
        ));

        assert!(output.contains("let x = 1;"));
    }

    #[test]
    fn test_custom_selectors_are_removed() {
        let options = ConvertOptions {
            remove_elements: vec![".sidebar".to_string()],
            ..ConvertOptions::default()
        };
        let converter = MarkdownConverter::new(options);
        let output = converter.convert(&result_with(
            "Guide",
            "<div class=\"sidebar\">advert column</div><p>keep me</p>",
        ));

        assert!(!output.contains("advert column"));
        assert!(output.contains("keep me"));
    }

    #[test]
    fn test_meaningless_containers_are_pruned() {
        let output = convert_default("<p>real text</p><span>42</span><span>!!!</span>");

        assert!(output.contains("real text"));
        assert!(!output.contains("42"));
        assert!(!output.contains("!!!"));
    }

    #[test]
    fn test_bare_number_lines_are_dropped() {
        let output = convert_default("<p>before</p><p>42</p><p>after</p>");

        assert!(output.contains("before"));
        assert!(!output.contains("42"));
        assert!(output.contains("after"));
    }

    #[test]
    fn test_bullet_markers_are_normalized() {
        let output = convert_default("<ul><li>one</li><li>two</li></ul>");

        assert!(output.contains("- one"));
        assert!(output.contains("- two"));
    }

    #[test]
    fn test_blank_lines_are_collapsed() {
        let output = convert_default("<p>one</p><p></p><p></p><p>two</p>");

        assert!(!output.contains("\n\n\n"));
    }

    #[test]
    fn test_fragment_links_are_unwrapped() {
        let output = convert_default("<p><a href=\"#section\">Jump</a> here</p>");

        assert!(output.contains("Jump here"));
        assert!(!output.contains("](#"));
    }

    #[test]
    fn test_absolute_links_are_kept() {
        let output = convert_default("<p><a href=\"https://example.com/next\">Next</a></p>");

        assert!(output.contains("[Next](https://example.com/next)"));
    }

    #[test]
    fn test_is_bare_number() {
        assert!(is_bare_number("42"));
        assert!(is_bare_number("3.14"));
        assert!(!is_bare_number("3."));
        assert!(!is_bare_number(".5"));
        assert!(!is_bare_number("v2"));
        assert!(!is_bare_number(""));
    }

    #[test]
    fn test_is_meaningless() {
        assert!(is_meaningless("   "));
        assert!(is_meaningless("7"));
        assert!(is_meaningless("•"));
        assert!(is_meaningless("...."));
        assert!(!is_meaningless("a"));
        assert!(!is_meaningless("words here"));
    }
}
