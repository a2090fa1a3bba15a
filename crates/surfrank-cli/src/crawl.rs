//! Corpus crawler: turns a directory of HTML pages into a [`CorpusGraph`].
//!
//! Every `*.html` file directly inside the directory is a page, named by its
//! file name. Its links are the `href` targets of its anchor tags. Targets
//! that are not pages of the corpus, and links from a page to itself, are
//! discarded by [`CorpusGraph::from_links`]. Subdirectories and other files
//! are ignored.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use regex::Regex;
use surfrank_core::CorpusGraph;
use tracing::{debug, instrument, warn};

/// Anchor tags with a double-quoted `href`, capturing the target.
const ANCHOR_HREF: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// Extracts anchor targets from HTML text.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// # Errors
    ///
    /// Returns an error if the anchor pattern fails to compile.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(ANCHOR_HREF).context("Failed to compile anchor pattern")?;
        Ok(Self { pattern })
    }

    /// All `href` targets in `html`, in document order, duplicates kept.
    #[must_use]
    pub fn links(&self, html: &str) -> Vec<String> {
        self.pattern
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Crawl `dir` and build its corpus graph.
///
/// # Errors
///
/// Returns an error if the directory or a page cannot be read, or if the
/// directory holds no `.html` files.
#[instrument]
pub fn crawl(dir: &Path) -> Result<CorpusGraph> {
    let extractor = LinkExtractor::new()?;
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read corpus directory {}", dir.display()))?;

    let mut pages: Vec<(String, Vec<String>)> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(OsStr::to_str) != Some("html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            warn!(path = %path.display(), "skipping page with non UTF-8 name");
            continue;
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let links = extractor.links(&contents);
        debug!(page = name, links = links.len(), "parsed page");
        pages.push((name.to_string(), links));
    }

    if pages.is_empty() {
        bail!("No .html files found in {}", dir.display());
    }

    Ok(CorpusGraph::from_links(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn extractor() -> LinkExtractor {
        LinkExtractor::new().expect("pattern compiles")
    }

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).expect("write page");
    }

    #[test]
    fn extracts_hrefs_in_order() {
        let html = r#"<p><a href="2.html">two</a> and <a href="3.html">three</a></p>"#;
        assert_eq!(extractor().links(html), vec!["2.html", "3.html"]);
    }

    #[test]
    fn href_may_follow_other_attributes() {
        let html = r#"<a class="nav" id="x" href="about.html">About</a>"#;
        assert_eq!(extractor().links(html), vec!["about.html"]);
    }

    #[test]
    fn ignores_non_anchor_hrefs() {
        let html = r#"<link href="style.css"><abbr href="no.html"></abbr><a href="yes.html">"#;
        assert_eq!(extractor().links(html), vec!["yes.html"]);
    }

    #[test]
    fn anchors_without_href_yield_nothing() {
        assert!(extractor().links(r#"<a name="top">top</a>"#).is_empty());
    }

    #[test]
    fn crawl_builds_graph_from_html_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "1.html", r#"<a href="2.html">2</a>"#);
        write(
            dir.path(),
            "2.html",
            r#"<a href="1.html">1</a><a href="2.html">self</a><a href="http://elsewhere/">out</a>"#,
        );
        write(dir.path(), "3.html", "no links here");
        write(dir.path(), "notes.txt", r#"<a href="1.html">ignored</a>"#);

        let corpus = crawl(dir.path()).expect("crawl succeeds");
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.links("1.html").expect("page"), BTreeSet::from(["2.html"]));
        assert_eq!(corpus.links("2.html").expect("page"), BTreeSet::from(["1.html"]));
        assert!(corpus.is_sink("3.html").expect("page"));
        assert!(!corpus.contains("notes.txt"));
    }

    #[test]
    fn crawl_ignores_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "a.html", r#"<a href="nested.html">n</a>"#);
        fs::create_dir(dir.path().join("sub.html")).expect("mkdir");
        write(&dir.path().join("sub.html"), "nested.html", "");

        let corpus = crawl(dir.path()).expect("crawl succeeds");
        assert_eq!(corpus.len(), 1);
        assert!(corpus.is_sink("a.html").expect("page"));
    }

    #[test]
    fn crawl_without_pages_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "readme.md", "nothing");
        let err = crawl(dir.path()).expect_err("no pages");
        assert!(err.to_string().contains("No .html files"), "{err}");
    }

    #[test]
    fn crawl_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent");
        let err = crawl(&missing).expect_err("missing dir");
        assert!(err.to_string().contains("absent"), "{err}");
    }
}
