//! Document conversion
//!
//! Turns crawled pages into Markdown documents with YAML frontmatter:
//! - Boilerplate removal and optional element keeping ([`ConvertOptions`])
//! - HTML to Markdown conversion with cleanup ([`MarkdownConverter`])

mod markdown;

pub use markdown::{ConvertOptions, MarkdownConverter};
