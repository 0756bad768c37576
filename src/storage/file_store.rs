//! Filesystem-backed result store
//!
//! Documents for one crawl live under `<base>/projects/<project>/`: the
//! Markdown pages in a `pages/` subdirectory, the manifest beside it as
//! `crawl.json`. Storage runs strictly after the crawl completes, so plain
//! blocking I/O is fine here.

use crate::storage::{CrawlManifest, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest sanitized filename stem, in characters
const MAX_FILENAME_LEN: usize = 100;

/// Writes crawl output under a per-project directory
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use sitescribe::FileStore;
///
/// # fn example() -> sitescribe::storage::StorageResult<()> {
/// let store = FileStore::new(Path::new("data"), "example.com");
/// store.init()?;
/// let path = store.save_markdown("Getting Started", "# Getting Started\n")?;
/// assert!(path.ends_with("Getting Started.md"));
/// # Ok(())
/// # }
/// ```
pub struct FileStore {
    project_dir: PathBuf,
    pages_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `<base_dir>/projects/<project>`
    ///
    /// No directories are created until [`init`](FileStore::init) runs.
    pub fn new(base_dir: &Path, project: &str) -> Self {
        let project_dir = base_dir.join("projects").join(project);
        let pages_dir = project_dir.join("pages");
        Self {
            project_dir,
            pages_dir,
        }
    }

    /// Creates the project and pages directories, parents included
    ///
    /// Safe to call repeatedly; existing directories are left alone.
    pub fn init(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.pages_dir)?;
        Ok(())
    }

    /// Directory the Markdown pages are written to
    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// Directory holding the manifest and the pages directory
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Writes one page's Markdown under a filename derived from `title`
    ///
    /// Returns the path the document was written to. Pages whose titles
    /// sanitize to the same filename overwrite each other; the manifest
    /// keeps the full per-page record regardless.
    pub fn save_markdown(&self, title: &str, markdown: &str) -> StorageResult<PathBuf> {
        let filename = format!("{}.md", sanitize_filename(title));
        let path = self.pages_dir.join(filename);
        fs::write(&path, markdown)?;
        Ok(path)
    }

    /// Writes the crawl manifest as pretty-printed `crawl.json`
    pub fn save_manifest(&self, manifest: &CrawlManifest) -> StorageResult<PathBuf> {
        let json = serde_json::to_string_pretty(manifest)?;
        let path = self.project_dir.join("crawl.json");
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// Reduces a page title to a safe filename stem
///
/// Reserved characters and control characters become `-`, runs of `-`
/// collapse, leading and trailing `-` are trimmed, and the result is capped
/// at 100 characters. Titles that sanitize away entirely fall back to
/// `untitled`.
fn sanitize_filename(name: &str) -> String {
    let mapped = name.chars().map(|c| match c {
        '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
        c if c.is_control() => '-',
        c => c,
    });

    let mut collapsed = String::new();
    for c in mapped {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let stem: String = collapsed
        .trim_matches('-')
        .chars()
        .take(MAX_FILENAME_LEN)
        .collect();

    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlResult;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path(), "example")
    }

    #[test]
    fn test_init_creates_directories() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.init().unwrap();

        assert!(dir.path().join("projects/example/pages").is_dir());
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.init().unwrap();
        store.init().unwrap();

        assert!(store.pages_dir().is_dir());
    }

    #[test]
    fn test_save_markdown_writes_under_pages() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().unwrap();

        let path = store.save_markdown("Getting Started", "# Hello\n").unwrap();

        assert_eq!(path, store.pages_dir().join("Getting Started.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hello\n");
    }

    #[test]
    fn test_save_markdown_sanitizes_title() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().unwrap();

        let path = store.save_markdown("a/b: c?", "body").unwrap();

        assert_eq!(path, store.pages_dir().join("a-b- c.md"));
        assert!(path.is_file());
    }

    #[test]
    fn test_save_manifest_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().unwrap();

        let manifest = CrawlManifest::new(
            "example",
            "https://example.com",
            vec![CrawlResult {
                url: "https://example.com".to_string(),
                title: "Home".to_string(),
                content: "welcome".to_string(),
                links: vec!["https://example.com/about".to_string()],
                depth: 0,
                error: None,
            }],
        );

        let path = store.save_manifest(&manifest).unwrap();

        assert_eq!(path, store.project_dir().join("crawl.json"));
        let parsed: CrawlManifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.page_count, 1);
        assert_eq!(parsed.results[0].links.len(), 1);
    }

    #[test]
    fn test_sanitize_replaces_reserved_characters() {
        assert_eq!(sanitize_filename("a<b>c:d\"e"), "a-b-c-d-e");
        assert_eq!(sanitize_filename("path/to\\file"), "path-to-file");
        assert_eq!(sanitize_filename("what|why?how*"), "what-why-how");
    }

    #[test]
    fn test_sanitize_collapses_and_trims_dashes() {
        assert_eq!(sanitize_filename("--a---b--"), "a-b");
        assert_eq!(sanitize_filename("?-?name?-?"), "name");
    }

    #[test]
    fn test_sanitize_replaces_control_characters() {
        assert_eq!(sanitize_filename("tab\there"), "tab-here");
        assert_eq!(sanitize_filename("line\nbreak"), "line-break");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(150);
        assert_eq!(sanitize_filename(&long).chars().count(), 100);
    }

    #[test]
    fn test_sanitize_empty_falls_back_to_untitled() {
        assert_eq!(sanitize_filename(""), "untitled");
        assert_eq!(sanitize_filename("///"), "untitled");
    }

    #[test]
    fn test_sanitize_keeps_unicode() {
        assert_eq!(sanitize_filename("Guía rápida"), "Guía rápida");
    }
}
